use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use restamp_cli::OutputFormat;
use restamp_cli::RestampCli;
use restamp_core::PlaceholderMap;
use restamp_core::ReplaceOptions;
use restamp_core::ReplaceOutcome;
use restamp_core::RestampError;
use restamp_core::RestampResult;
use restamp_core::preview_replacements;
use restamp_core::replace_in_file;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = RestampCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if args.verbose {
		let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			tracing_subscriber::EnvFilter::new("restamp_core=trace,restamp_cli=debug")
		});
		tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.init();
	}

	if let Err(error) = run(&args) {
		let code = exit_code(&error);
		let report: miette::Report = error.into();
		eprintln!("{report:?}");
		process::exit(code);
	}
}

/// One exit status per fatal error kind, so callers in build scripts can
/// distinguish a typo'd placeholder from a missing file. Code 2 doubles as
/// clap's own usage-error status, which is the same class of mistake.
fn exit_code(error: &RestampError) -> i32 {
	match error {
		RestampError::InvalidPlaceholder { .. } | RestampError::DuplicatePlaceholder { .. } => 2,
		RestampError::UnsupportedLanguage { .. } => 3,
		RestampError::FileAccess { .. } => 4,
		RestampError::InvalidPattern { .. } => 5,
		_ => 1,
	}
}

fn run(args: &RestampCli) -> RestampResult<()> {
	let placeholders = PlaceholderMap::parse(&args.set)?;
	let options = ReplaceOptions {
		encoding: args.encoding.map(Into::into),
	};

	let outcome = if args.dry_run {
		preview_replacements(&args.file, &args.target, &placeholders, &options)?
	} else {
		replace_in_file(&args.file, &args.target, &placeholders, &options)?
	};

	match args.format {
		OutputFormat::Json => print_json(args, &outcome),
		OutputFormat::Text => print_text(args, &outcome),
	}

	Ok(())
}

fn print_text(args: &RestampCli, outcome: &ReplaceOutcome) {
	// Non-fatal warnings are only surfaced when asked for.
	if args.verbose {
		for warning in &outcome.warnings {
			eprintln!("{} {}", colored!("warning:", yellow), warning.message());
		}
	}

	if outcome.rewrites.is_empty() {
		println!(
			"No lines rewritten in {} for target `{}`.",
			args.file.display(),
			args.target
		);
		return;
	}

	if args.dry_run {
		println!(
			"Dry run: would rewrite {} line(s) in {}:",
			outcome.rewrites.len(),
			args.file.display()
		);
	} else {
		println!(
			"Rewrote {} line(s) in {}.",
			outcome.rewrites.len(),
			args.file.display()
		);
	}

	if args.dry_run || args.verbose {
		for rewrite in &outcome.rewrites {
			println!("  line {}:", rewrite.target_line + 1);
			print_diff(&rewrite.old, &rewrite.new);
		}
	}
}

fn print_json(args: &RestampCli, outcome: &ReplaceOutcome) {
	let rewrites: Vec<serde_json::Value> = outcome
		.rewrites
		.iter()
		.map(|rewrite| {
			serde_json::json!({
				"directiveLine": rewrite.directive_line + 1,
				"line": rewrite.target_line + 1,
				"old": rewrite.old,
				"new": rewrite.new,
			})
		})
		.collect();
	let warnings: Vec<serde_json::Value> = outcome
		.warnings
		.iter()
		.map(|warning| serde_json::Value::String(warning.message()))
		.collect();

	let output = serde_json::json!({
		"file": args.file.display().to_string(),
		"target": args.target,
		"dryRun": args.dry_run,
		"encoding": outcome.encoding.to_string(),
		"rewrites": rewrites,
		"warnings": warnings,
	});
	println!("{output}");
}

/// Print a unified diff between the old and new line, colorized. The
/// rewritten values carry no line terminators, so each change is printed on
/// its own line here.
fn print_diff(old: &str, new: &str) {
	let diff = TextDiff::from_lines(old, new);
	for change in diff.iter_all_changes() {
		let text = change.to_string();
		let text = text.strip_suffix('\n').unwrap_or(&text);
		match change.tag() {
			ChangeTag::Delete => {
				println!("  {}", colored!(format!("-{text}"), red));
			}
			ChangeTag::Insert => {
				println!("  {}", colored!(format!("+{text}"), green));
			}
			ChangeTag::Equal => {
				println!("   {text}");
			}
		}
	}
}
