use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::PlaceholderMap;
use crate::RestampResult;
use crate::backup::create_backup;
use crate::backup::delete_backup;
use crate::language::LanguageProfile;
use crate::language::profile_for_path;
use crate::lines::TextEncoding;
use crate::lines::read_lines;
use crate::lines::write_lines;
use crate::patterns::DirectiveMatchers;
use crate::patterns::compile_target_pattern;
use crate::placeholder::resolve_placeholders;

/// Options for a file replacement transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceOptions {
	/// Force a specific encoding instead of BOM auto-detection.
	pub encoding: Option<TextEncoding>,
}

/// One rewritten line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRewrite {
	/// 0-indexed line holding the directive comment.
	pub directive_line: usize,
	/// 0-indexed line that was rewritten (always `directive_line + 1`).
	pub target_line: usize,
	/// The line content before the rewrite.
	pub old: String,
	/// The line content after the rewrite.
	pub new: String,
}

/// A non-fatal condition observed during the pass. Warnings never abort the
/// transaction; the file is still written as computed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReplaceWarning {
	/// A directive's pattern did not match the line following it. The line
	/// is left untouched — the pattern text is assumed to have already been
	/// replaced, or the source has drifted from the directive.
	PatternNotMatched {
		directive_line: usize,
		target_line: usize,
		pattern: String,
	},
	/// The pattern still matches the rewritten line, so the directive is not
	/// self-excluding and every future run will rewrite the line again.
	PatternStillMatches { target_line: usize, pattern: String },
	/// The backup could not be removed after the live file was rewritten.
	BackupNotRemoved { backup: PathBuf, reason: String },
}

impl ReplaceWarning {
	/// Human-readable one-line description.
	pub fn message(&self) -> String {
		match self {
			Self::PatternNotMatched {
				directive_line,
				target_line,
				pattern,
			} => {
				format!(
					"pattern `{pattern}` from the directive on line {} did not match line {}",
					directive_line + 1,
					target_line + 1
				)
			}
			Self::PatternStillMatches {
				target_line,
				pattern,
			} => {
				format!(
					"pattern `{pattern}` still matches line {} after the rewrite; the \
					 replacement does not exclude its own pattern",
					target_line + 1
				)
			}
			Self::BackupNotRemoved { backup, reason } => {
				format!(
					"could not remove backup `{}`: {reason}",
					backup.display()
				)
			}
		}
	}
}

/// Result of the in-memory rewrite pass over a line buffer.
#[derive(Debug, Default)]
pub struct RewriteOutcome {
	/// Lines that were rewritten, in file order.
	pub rewrites: Vec<LineRewrite>,
	/// Non-fatal conditions observed during the pass.
	pub warnings: Vec<ReplaceWarning>,
}

/// Result of a whole-file replacement transaction.
#[derive(Debug)]
pub struct ReplaceOutcome {
	/// Lines that were rewritten, in file order.
	pub rewrites: Vec<LineRewrite>,
	/// Non-fatal conditions observed during the transaction.
	pub warnings: Vec<ReplaceWarning>,
	/// The encoding the file was read and written with.
	pub encoding: TextEncoding,
}

impl ReplaceOutcome {
	/// Returns true when at least one line was rewritten.
	pub fn changed(&self) -> bool {
		!self.rewrites.is_empty()
	}
}

/// A directive that has been scanned and is waiting for its target line.
#[derive(Debug)]
struct ArmedDirective {
	pattern: String,
	template: String,
	line: usize,
}

/// Scanner state for the single forward pass. A directive match arms the
/// scanner; the armed directive is consumed on exactly the next line,
/// whether or not its pattern matches there, unless that line is itself a
/// directive, which supersedes the pending one.
#[derive(Debug, Default)]
enum ScanState {
	#[default]
	Idle,
	Armed(ArmedDirective),
}

/// Run the directive scan and rewrite pass over `lines` in place.
///
/// This is the pure core of the engine: no file I/O happens here, which is
/// what makes the one-line-lookahead contract testable in isolation. Each
/// directive affects only the line immediately following it; occurrences of
/// a pattern anywhere else in the buffer are never touched.
pub fn rewrite_lines(
	lines: &mut [String],
	profile: &LanguageProfile,
	target: &str,
	placeholders: &PlaceholderMap,
) -> RestampResult<RewriteOutcome> {
	let matchers = DirectiveMatchers::new(profile, target);
	let mut outcome = RewriteOutcome::default();
	let mut state = ScanState::Idle;

	for index in 0..lines.len() {
		// Directive detection comes first: a directive line re-arms the
		// scanner and is never itself a substitution target, so a pending
		// directive followed directly by another directive is superseded
		// without ever being applied.
		if let Some((pattern, template)) = matchers.parse(&lines[index]) {
			trace!(line = index, %pattern, %template, "directive armed");
			state = ScanState::Armed(ArmedDirective {
				pattern,
				template,
				line: index,
			});
			continue;
		}

		// An armed directive is consumed here, exactly one line after it
		// was armed. A directive still armed at end of file is simply
		// dropped.
		if let ScanState::Armed(directive) = std::mem::take(&mut state) {
			debug_assert_eq!(directive.line + 1, index);
			apply_directive(lines, index, &directive, placeholders, &mut outcome)?;
		}
	}

	Ok(outcome)
}

/// Attempt the armed directive's pattern against line `index` and splice in
/// the resolved replacement on a match.
fn apply_directive(
	lines: &mut [String],
	index: usize,
	directive: &ArmedDirective,
	placeholders: &PlaceholderMap,
	outcome: &mut RewriteOutcome,
) -> RestampResult<()> {
	let matcher = compile_target_pattern(&directive.pattern)?;

	let Some(found) = matcher.find(&lines[index]) else {
		trace!(line = index, pattern = %directive.pattern, "pattern did not match");
		outcome.warnings.push(ReplaceWarning::PatternNotMatched {
			directive_line: directive.line,
			target_line: index,
			pattern: directive.pattern.clone(),
		});
		return Ok(());
	};

	let (found_start, found_end) = (found.start(), found.end());
	let resolved = resolve_placeholders(&directive.template, placeholders);
	let old = std::mem::take(&mut lines[index]);

	// Splice over the matched span, keeping the unmatched prefix and suffix
	// byte-for-byte.
	let mut new = String::with_capacity(old.len() + resolved.len());
	new.push_str(&old[..found_start]);
	new.push_str(&resolved);
	new.push_str(&old[found_end..]);

	if matcher.is_match(&new) {
		warn!(line = index, pattern = %directive.pattern, "pattern still matches after rewrite");
		outcome.warnings.push(ReplaceWarning::PatternStillMatches {
			target_line: index,
			pattern: directive.pattern.clone(),
		});
	}

	debug!(line = index, %old, %new, "line rewritten");
	lines[index] = new.clone();
	outcome.rewrites.push(LineRewrite {
		directive_line: directive.line,
		target_line: index,
		old,
		new,
	});

	Ok(())
}

/// Run the full backup-protected replacement transaction against `path`.
///
/// The order of operations is the crash-safety contract: the backup exists
/// before anything destructive happens, the lines are loaded from the
/// backup (never the live path, which a crashed earlier run may have left
/// half-written), and the live file is rewritten in one pass only after the
/// whole in-memory rewrite has succeeded. The backup is removed last; if
/// removal fails the transaction still counts as complete and the leftover
/// `.bak` file is reported as a warning.
pub fn replace_in_file(
	path: &Path,
	target: &str,
	placeholders: &PlaceholderMap,
	options: &ReplaceOptions,
) -> RestampResult<ReplaceOutcome> {
	let profile = profile_for_path(path)?;
	debug!(path = %path.display(), %target, "starting replacement transaction");

	let backup = create_backup(path)?;
	let (mut lines, encoding) = read_lines(&backup, options.encoding)?;

	let RewriteOutcome {
		rewrites,
		mut warnings,
	} = rewrite_lines(&mut lines, profile, target, placeholders)?;

	write_lines(path, &lines, encoding)?;

	if let Err(source) = delete_backup(path) {
		warn!(backup = %backup.display(), error = %source, "backup not removed");
		warnings.push(ReplaceWarning::BackupNotRemoved {
			backup,
			reason: source.to_string(),
		});
	}

	debug!(
		path = %path.display(),
		rewritten = rewrites.len(),
		"transaction complete"
	);

	Ok(ReplaceOutcome {
		rewrites,
		warnings,
		encoding,
	})
}

/// Compute the replacements for `path` without touching the file: no backup
/// is created and nothing is written. The live file is read directly since
/// there is no transaction to protect.
pub fn preview_replacements(
	path: &Path,
	target: &str,
	placeholders: &PlaceholderMap,
	options: &ReplaceOptions,
) -> RestampResult<ReplaceOutcome> {
	let profile = profile_for_path(path)?;
	let (mut lines, encoding) = read_lines(path, options.encoding)?;

	let RewriteOutcome { rewrites, warnings } =
		rewrite_lines(&mut lines, profile, target, placeholders)?;

	Ok(ReplaceOutcome {
		rewrites,
		warnings,
		encoding,
	})
}
