use predicates::prelude::*;
use restamp_core::AnyEmptyResult;

mod common;
use common::restamp_cmd;

const COPYRIGHT_SOURCE: &str = "// autoreplace for asm © [0-9–]{4,9} to © 2015–{year}\n// © 2015 \
                                Example Corp\nclass Version {}\n";

#[test]
fn replace_rewrites_the_target_line() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("version.cs");
	std::fs::write(&file, COPYRIGHT_SOURCE)?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.arg("--set")
		.arg("year=2024")
		.assert()
		.success()
		.stdout(predicates::str::contains("Rewrote 1 line(s)"));

	let content = std::fs::read_to_string(&file)?;
	assert!(content.contains("// © 2015–2024 Example Corp"));
	assert!(content.contains("class Version {}"));
	assert!(!tmp.path().join("version.cs.bak").exists());

	Ok(())
}

#[test]
fn replace_reports_when_nothing_matches() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("plain.cs");
	std::fs::write(&file, "class Plain {}\n")?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.assert()
		.success()
		.stdout(predicates::str::contains("No lines rewritten"));

	Ok(())
}

#[test]
fn dry_run_does_not_write_or_back_up() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("version.cs");
	std::fs::write(&file, COPYRIGHT_SOURCE)?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.arg("--set")
		.arg("year=2024")
		.arg("--dry-run")
		.assert()
		.success()
		.stdout(predicates::str::contains("would rewrite 1 line(s)"))
		.stdout(predicates::str::contains("© 2015–2024"));

	assert_eq!(std::fs::read_to_string(&file)?, COPYRIGHT_SOURCE);
	assert!(!tmp.path().join("version.cs.bak").exists());

	Ok(())
}

#[test]
fn json_format_reports_the_rewrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("version.cs");
	std::fs::write(&file, COPYRIGHT_SOURCE)?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.arg("--set")
		.arg("year=2024")
		.arg("--format")
		.arg("json")
		.assert()
		.success()
		.stdout(predicates::str::contains("\"rewrites\""))
		.stdout(predicates::str::contains("© 2015–2024 Example Corp"))
		.stdout(predicates::str::contains("\"encoding\":\"utf-8\""));

	Ok(())
}

#[test]
fn verbose_surfaces_unmatched_pattern_warnings() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("stale.cs");
	std::fs::write(
		&file,
		"// autoreplace for asm absent-pattern to replacement\nnothing to see here\n",
	)?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.arg("--verbose")
		.assert()
		.success()
		.stderr(predicates::str::contains("warning:"))
		.stderr(predicates::str::contains("did not match"));

	Ok(())
}

#[test]
fn warnings_are_silent_without_verbose() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("stale.cs");
	std::fs::write(
		&file,
		"// autoreplace for asm absent-pattern to replacement\nnothing to see here\n",
	)?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.assert()
		.success()
		.stderr(predicates::str::contains("warning:").not());

	Ok(())
}

#[test]
fn leftover_backup_is_used_for_recovery() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("version.cs");
	std::fs::write(&file, "// half-written garbage")?;
	std::fs::write(tmp.path().join("version.cs.bak"), COPYRIGHT_SOURCE)?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.arg("--set")
		.arg("year=2024")
		.assert()
		.success();

	let content = std::fs::read_to_string(&file)?;
	assert!(content.contains("© 2015–2024"));
	assert!(!content.contains("garbage"));
	assert!(!tmp.path().join("version.cs.bak").exists());

	Ok(())
}

#[test]
fn unknown_placeholder_is_preserved_verbatim() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("version.cs");
	std::fs::write(&file, COPYRIGHT_SOURCE)?;

	// No --set at all: the {year} token stays in the output untouched.
	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.assert()
		.success();

	let content = std::fs::read_to_string(&file)?;
	assert!(content.contains("// © 2015–{year} Example Corp"));

	Ok(())
}
