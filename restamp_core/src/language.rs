use std::path::Path;

use crate::RestampError;
use crate::RestampResult;

/// The comment syntax associated with a file extension.
///
/// The fields are regex fragments, not literal strings, so a profile can
/// accept several interchangeable markers (e.g. `.iss` files allow both `;`
/// and `//` line comments). Every profile carries a line-comment form, a
/// block-comment form, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
	/// Regex fragment matching the language's line-comment prefix.
	pub line_comment: Option<&'static str>,
	/// Regex fragments for the opening and closing block-comment delimiters.
	pub block_comment: Option<(&'static str, &'static str)>,
}

const C_FAMILY: LanguageProfile = LanguageProfile {
	line_comment: Some("//"),
	block_comment: Some((r"/\*", r"\*/")),
};

const INNO_SETUP: LanguageProfile = LanguageProfile {
	line_comment: Some("(?:;|//)"),
	block_comment: None,
};

const PASCAL: LanguageProfile = LanguageProfile {
	line_comment: None,
	block_comment: Some((r"\{", r"\}")),
};

const PHP: LanguageProfile = LanguageProfile {
	line_comment: Some("(?:#|//)"),
	block_comment: Some((r"/\*", r"\*/")),
};

const HASH: LanguageProfile = LanguageProfile {
	line_comment: Some("#"),
	block_comment: None,
};

const INI: LanguageProfile = LanguageProfile {
	line_comment: Some(";"),
	block_comment: None,
};

const DASH_DASH: LanguageProfile = LanguageProfile {
	line_comment: Some("--"),
	block_comment: None,
};

const BASIC: LanguageProfile = LanguageProfile {
	line_comment: Some("'"),
	block_comment: None,
};

const MARKUP: LanguageProfile = LanguageProfile {
	line_comment: None,
	block_comment: Some(("<!--", "-->")),
};

/// Extension (without the dot, lowercase) to profile table. Extensions not
/// listed here have no known comment syntax and are rejected up front.
const PROFILES: &[(&str, &LanguageProfile)] = &[
	("bas", &BASIC),
	("bash", &HASH),
	("c", &C_FAMILY),
	("cc", &C_FAMILY),
	("cpp", &C_FAMILY),
	("cs", &C_FAMILY),
	("css", &C_FAMILY),
	("go", &C_FAMILY),
	("h", &C_FAMILY),
	("hpp", &C_FAMILY),
	("html", &MARKUP),
	("ini", &INI),
	("iss", &INNO_SETUP),
	("java", &C_FAMILY),
	("js", &C_FAMILY),
	("json", &C_FAMILY),
	("jsx", &C_FAMILY),
	("kt", &C_FAMILY),
	("lua", &DASH_DASH),
	("markdown", &MARKUP),
	("md", &MARKUP),
	("pas", &PASCAL),
	("php", &PHP),
	("pl", &HASH),
	("ps1", &HASH),
	("psm1", &HASH),
	("py", &HASH),
	("rb", &HASH),
	("reg", &INI),
	("rs", &C_FAMILY),
	("scala", &C_FAMILY),
	("sh", &HASH),
	("sql", &DASH_DASH),
	("svg", &MARKUP),
	("swift", &C_FAMILY),
	("toml", &HASH),
	("ts", &C_FAMILY),
	("tsx", &C_FAMILY),
	("vb", &BASIC),
	("vbs", &BASIC),
	("xhtml", &MARKUP),
	("xml", &MARKUP),
	("yaml", &HASH),
	("yml", &HASH),
	("zsh", &HASH),
];

/// Resolve the comment profile for a file extension. The extension is
/// matched case-insensitively and may be given with or without the leading
/// dot.
pub fn profile_for_extension(extension: &str) -> RestampResult<&'static LanguageProfile> {
	let normalized = extension.trim_start_matches('.').to_ascii_lowercase();
	PROFILES
		.iter()
		.find(|(ext, _)| *ext == normalized)
		.map(|(_, profile)| *profile)
		.ok_or_else(|| {
			RestampError::UnsupportedLanguage {
				extension: format!(".{normalized}"),
			}
		})
}

/// Resolve the comment profile from a file path's extension. A path with no
/// extension at all is unsupported.
pub fn profile_for_path(path: &Path) -> RestampResult<&'static LanguageProfile> {
	let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
		return Err(RestampError::UnsupportedLanguage {
			extension: path.display().to_string(),
		});
	};
	profile_for_extension(extension)
}
