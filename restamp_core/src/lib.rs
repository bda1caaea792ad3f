//! `restamp_core` is the engine behind the [restamp](https://github.com/ifiokjr/restamp) build-time substitution tool. It scans a source file for `autoreplace` directive comments, rewrites the line following each directive by regex substitution, resolves `{name}` placeholders from caller-supplied data, and protects the whole read-modify-write cycle with a crash-safe `.bak` sibling file.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source file
//!   → Language profile (comment syntax resolved from the file extension)
//!   → Backup manager (idempotent .bak copy, the crash-recovery point)
//!   → Line loader (BOM-aware decode of the backup, never the live file)
//!   → Scanner/rewriter (directive detection, one-line lookahead rewrite)
//!   → Line writer (full buffer rewritten to the live file, backup retired)
//! ```
//!
//! ## Modules
//!
//! - [`language`] — Maps file extensions to their comment syntax (line and/or block markers).
//! - [`backup`] — Creates and retires the `.bak` recovery copy around the transaction.
//! - [`lines`] — Encoding-aware line loading and writing (UTF-8, UTF-8 BOM, UTF-16).
//!
//! ## Key Types
//!
//! - [`LanguageProfile`] — Comment-syntax rules for one file extension.
//! - [`PlaceholderMap`] — Caller-supplied `name=value` data resolved against `{name}` tokens.
//! - [`ReplaceOutcome`] — Rewritten lines, warnings, and the encoding a transaction used.
//! - [`RestampError`] — The fatal error taxonomy; non-fatal conditions are [`ReplaceWarning`]s.
//!
//! ## Directive Grammar
//!
//! A directive is a comment in the target file's own comment syntax:
//!
//! ```text
//! // autoreplace for asm © [0-9–]{4,9} to © 2015–{year}
//! // © 2015 Example Corp
//! ```
//!
//! Running with target `asm` and `year=2024` rewrites the second line to
//! `// © 2015–2024 Example Corp`. A directive applies to exactly the one
//! line after it; matching is case-insensitive; placeholders without data
//! are preserved verbatim.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use restamp_core::PlaceholderMap;
//! use restamp_core::ReplaceOptions;
//! use restamp_core::replace_in_file;
//!
//! let placeholders = PlaceholderMap::parse(["year=2024"]).unwrap();
//! let outcome = replace_in_file(
//! 	Path::new("version.cs"),
//! 	"asm",
//! 	&placeholders,
//! 	&ReplaceOptions::default(),
//! )
//! .unwrap();
//! println!("{} line(s) rewritten", outcome.rewrites.len());
//! ```

pub use backup::*;
pub use engine::*;
pub use error::*;
pub use language::*;
pub use lines::*;
pub use placeholder::*;

pub mod backup;
mod engine;
mod error;
pub mod language;
pub mod lines;
pub(crate) mod patterns;
mod placeholder;
