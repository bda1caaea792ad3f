use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use restamp_core::TextEncoding;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Stamp build-time values into source files through comment directives.",
	long_about = "restamp rewrites one line of a source file per `autoreplace` comment \
	              directive, substituting a matched pattern with a template resolved against \
	              caller-supplied placeholder data.\n\nA directive is written in the file's own \
	              comment syntax and affects exactly the line below it:\n\n  // autoreplace for \
	              asm © [0-9–]{4,9} to © 2015–{year}\n  // © 2015 Example Corp\n\nRunning \
	              `restamp version.cs --target asm --set year=2024` rewrites the second line to \
	              `// © 2015–2024 Example Corp`. The rewrite is protected by a `.bak` sibling \
	              copy; a leftover `.bak` file means a run did not complete and will be reused \
	              for recovery by the next run."
)]
pub struct RestampCli {
	/// Source file to rewrite. The comment syntax is resolved from its
	/// extension.
	pub file: PathBuf,

	/// Target name directives must declare (`autoreplace for <TARGET> ...`);
	/// directives for other targets are ignored. Matched case-insensitively.
	#[arg(long, short)]
	pub target: String,

	/// Placeholder data as `name=value`; may be repeated. `{name}` tokens in
	/// replacement templates resolve against these values.
	#[arg(long = "set", short = 's', value_name = "NAME=VALUE")]
	pub set: Vec<String>,

	/// Character encoding of the file. When omitted the encoding is detected
	/// from the byte-order mark, falling back to plain UTF-8, and the write
	/// reuses whatever was detected.
	#[arg(long, value_enum)]
	pub encoding: Option<EncodingArg>,

	/// Compute and report the rewrites without creating a backup or writing
	/// the file.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Output format for the rewrite report.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Enable verbose output: engine trace logging, per-line diffs, and
	/// non-fatal warnings.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. Includes every rewritten
	/// line and all non-fatal warnings.
	Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EncodingArg {
	/// UTF-8 without a byte-order mark.
	Utf8,
	/// UTF-8 with a byte-order mark.
	Utf8Bom,
	/// UTF-16 little-endian.
	Utf16le,
	/// UTF-16 big-endian.
	Utf16be,
}

impl From<EncodingArg> for TextEncoding {
	fn from(value: EncodingArg) -> Self {
		match value {
			EncodingArg::Utf8 => Self::Utf8,
			EncodingArg::Utf8Bom => Self::Utf8Bom,
			EncodingArg::Utf16le => Self::Utf16Le,
			EncodingArg::Utf16be => Self::Utf16Be,
		}
	}
}
