use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum RestampError {
	#[error("no comment syntax known for `{extension}`")]
	#[diagnostic(
		code(restamp::unsupported_language),
		help(
			"supported extensions include .c, .cs, .js, .php, .pas, .ps1, .vb, .html, .xml and \
			 other common source file types"
		)
	)]
	UnsupportedLanguage { extension: String },

	#[error("failed to access `{path}`: {source}")]
	#[diagnostic(code(restamp::file_access))]
	FileAccess {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("directive pattern `{pattern}` is not a valid regex: {source}")]
	#[diagnostic(
		code(restamp::invalid_pattern),
		help("the text between `for <target>` and `to` must compile as a regular expression")
	)]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("invalid placeholder `{token}`")]
	#[diagnostic(
		code(restamp::invalid_placeholder),
		help("placeholders are passed as `name=value` with a non-empty name")
	)]
	InvalidPlaceholder { token: String },

	#[error("duplicate placeholder name: `{name}`")]
	#[diagnostic(
		code(restamp::duplicate_placeholder),
		help("each placeholder name may be given at most once")
	)]
	DuplicatePlaceholder { name: String },
}

impl RestampError {
	/// Wrap an io error together with the path the operation touched.
	pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::FileAccess {
			path: path.into(),
			source,
		}
	}
}

pub type RestampResult<T> = Result<T, RestampError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
