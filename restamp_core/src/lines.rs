use std::path::Path;

use encoding_rs::Encoding;
use encoding_rs::UTF_8;
use encoding_rs::UTF_16BE;
use encoding_rs::UTF_16LE;
use tracing::debug;
use tracing::warn;

use crate::RestampError;
use crate::RestampResult;

/// Character encodings the loader and writer understand.
///
/// When no encoding is requested the loader sniffs the file's byte-order
/// mark and falls back to plain UTF-8. Whatever was detected is returned to
/// the caller and must be reused for the write so an unspecified encoding
/// round-trips: a UTF-16 file read without an explicit `--encoding` is
/// written back as UTF-16, BOM included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
	/// UTF-8 without a byte-order mark.
	Utf8,
	/// UTF-8 with a leading byte-order mark, re-emitted on write.
	Utf8Bom,
	/// UTF-16 little-endian, written with a BOM.
	Utf16Le,
	/// UTF-16 big-endian, written with a BOM.
	Utf16Be,
}

impl TextEncoding {
	/// Sniff the encoding from a byte-order mark, defaulting to plain UTF-8
	/// when no BOM is present.
	pub fn detect(bytes: &[u8]) -> Self {
		match Encoding::for_bom(bytes) {
			Some((encoding, _)) if encoding == UTF_8 => Self::Utf8Bom,
			Some((encoding, _)) if encoding == UTF_16LE => Self::Utf16Le,
			Some((encoding, _)) if encoding == UTF_16BE => Self::Utf16Be,
			_ => Self::Utf8,
		}
	}

	fn encoding(self) -> &'static Encoding {
		match self {
			Self::Utf8 | Self::Utf8Bom => UTF_8,
			Self::Utf16Le => UTF_16LE,
			Self::Utf16Be => UTF_16BE,
		}
	}

	/// Decode raw file bytes, stripping any leading byte-order mark.
	/// Malformed sequences are replaced with U+FFFD rather than failing.
	pub fn decode(self, bytes: &[u8]) -> String {
		let (text, had_errors) = self.encoding().decode_with_bom_removal(bytes);
		if had_errors {
			warn!(encoding = %self, "malformed byte sequences replaced during decode");
		}
		text.into_owned()
	}

	/// Encode text back to bytes, emitting the BOM the encoding implies.
	/// UTF-16 is encoded by hand because `encoding_rs` only decodes it.
	pub fn encode(self, text: &str) -> Vec<u8> {
		match self {
			Self::Utf8 => text.as_bytes().to_vec(),
			Self::Utf8Bom => {
				let mut bytes = Vec::with_capacity(text.len() + 3);
				bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
				bytes.extend_from_slice(text.as_bytes());
				bytes
			}
			Self::Utf16Le => encode_utf16(text, false),
			Self::Utf16Be => encode_utf16(text, true),
		}
	}
}

impl std::fmt::Display for TextEncoding {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let label = match self {
			Self::Utf8 => "utf-8",
			Self::Utf8Bom => "utf-8 (bom)",
			Self::Utf16Le => "utf-16le",
			Self::Utf16Be => "utf-16be",
		};
		f.write_str(label)
	}
}

fn encode_utf16(text: &str, big_endian: bool) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(text.len() * 2 + 2);
	let bom: u16 = 0xFEFF;
	for unit in std::iter::once(bom).chain(text.encode_utf16()) {
		if big_endian {
			bytes.extend_from_slice(&unit.to_be_bytes());
		} else {
			bytes.extend_from_slice(&unit.to_le_bytes());
		}
	}
	bytes
}

/// Read a file into its lines, using `encoding` when given or BOM detection
/// otherwise. Line terminators (`\n` and `\r\n`) are stripped; each line is
/// stored as one unit. Returns the lines together with the encoding that was
/// actually used, which the caller must pass back to [`write_lines`].
pub fn read_lines(
	path: &Path,
	encoding: Option<TextEncoding>,
) -> RestampResult<(Vec<String>, TextEncoding)> {
	let bytes = std::fs::read(path).map_err(|source| RestampError::file_access(path, source))?;
	let used = encoding.unwrap_or_else(|| TextEncoding::detect(&bytes));
	let text = used.decode(&bytes);
	let lines: Vec<String> = text.lines().map(String::from).collect();
	debug!(
		path = %path.display(),
		encoding = %used,
		count = lines.len(),
		"loaded lines"
	);
	Ok((lines, used))
}

/// Truncate `path` and write every line followed by the platform line
/// terminator, in the given encoding.
pub fn write_lines(path: &Path, lines: &[String], encoding: TextEncoding) -> RestampResult<()> {
	let terminator = if cfg!(windows) { "\r\n" } else { "\n" };
	let mut text = String::with_capacity(lines.iter().map(|line| line.len() + 2).sum());
	for line in lines {
		text.push_str(line);
		text.push_str(terminator);
	}
	let bytes = encoding.encode(&text);
	std::fs::write(path, bytes).map_err(|source| RestampError::file_access(path, source))?;
	debug!(path = %path.display(), encoding = %encoding, count = lines.len(), "wrote lines");
	Ok(())
}
