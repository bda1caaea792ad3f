//! Regex constructors for the directive grammar. The two directive forms
//! (line-comment and block-comment) are built here and nowhere else, from
//! the language profile's delimiter fragments and the escaped target name.

use regex::Regex;

use crate::RestampError;
use crate::RestampResult;
use crate::language::LanguageProfile;

/// The directive keyword embedded in comments:
/// `autoreplace for <target> <pattern> to <replacement>`.
const KEYWORD: &str = "autoreplace";

/// Compiled matchers for the two directive forms a language profile allows.
/// A profile without block comments has no block matcher and vice versa; a
/// given line can only ever match one of the two forms.
#[derive(Debug)]
pub(crate) struct DirectiveMatchers {
	line: Option<Regex>,
	block: Option<Regex>,
}

impl DirectiveMatchers {
	/// Build the matchers for `profile`, scoped to directives naming
	/// `target`. Matching is case-insensitive and anchored to the full line.
	pub(crate) fn new(profile: &LanguageProfile, target: &str) -> Self {
		let target = regex::escape(target);

		let line = profile.line_comment.map(|prefix| {
			let source =
				format!(r"(?i)^\s*{prefix}\s*{KEYWORD}\s+for\s+{target}\s+(.+?)\s+to\s+(.+?)\s*$");
			Regex::new(&source).expect("line directive template always compiles")
		});

		let block = profile.block_comment.map(|(start, end)| {
			let source = format!(
				r"(?i)^\s*{start}\s*{KEYWORD}\s+for\s+{target}\s+(.+?)\s+to\s+(.+?)\s*{end}\s*$"
			);
			Regex::new(&source).expect("block directive template always compiles")
		});

		Self { line, block }
	}

	/// Extract the `(pattern, template)` payload when `line` is a directive
	/// for the configured target.
	pub(crate) fn parse(&self, line: &str) -> Option<(String, String)> {
		self.line
			.iter()
			.chain(self.block.iter())
			.find_map(|matcher| {
				matcher.captures(line).map(|caps| {
					(caps[1].to_string(), caps[2].to_string())
				})
			})
	}
}

/// Compile a directive's user-authored pattern for matching against the
/// target line. The pattern is taken as written — it is the directive
/// author's regex, not a literal string.
pub(crate) fn compile_target_pattern(pattern: &str) -> RestampResult<Regex> {
	Regex::new(pattern).map_err(|source| {
		RestampError::InvalidPattern {
			pattern: pattern.to_string(),
			source,
		}
	})
}
