use restamp_core::AnyEmptyResult;

mod common;
use common::restamp_cmd;

#[test]
fn unsupported_extension_exits_3() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("version.xyz");
	std::fs::write(&file, "content\n")?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.assert()
		.failure()
		.code(3)
		.stderr(predicates::str::contains("no comment syntax known"));

	// The file is untouched and no backup was created.
	assert_eq!(std::fs::read_to_string(&file)?, "content\n");
	assert!(!tmp.path().join("version.xyz.bak").exists());

	Ok(())
}

#[test]
fn missing_file_exits_4() {
	restamp_cmd()
		.arg("/nonexistent/version.cs")
		.arg("--target")
		.arg("asm")
		.assert()
		.failure()
		.code(4)
		.stderr(predicates::str::contains("/nonexistent/version.cs"));
}

#[test]
fn malformed_placeholder_exits_2() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("version.cs");
	std::fs::write(&file, "class Version {}\n")?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.arg("--set")
		.arg("year2024")
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("year2024"));

	Ok(())
}

#[test]
fn duplicate_placeholder_exits_2() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("version.cs");
	std::fs::write(&file, "class Version {}\n")?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.arg("--set")
		.arg("year=2024")
		.arg("--set")
		.arg("year=2025")
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("duplicate placeholder"));

	Ok(())
}

#[test]
fn invalid_directive_pattern_exits_5() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("version.cs");
	std::fs::write(&file, "// autoreplace for asm [ to bar\nanything\n")?;

	restamp_cmd()
		.arg(&file)
		.arg("--target")
		.arg("asm")
		.assert()
		.failure()
		.code(5)
		.stderr(predicates::str::contains("not a valid regex"));

	// The transaction aborted after the backup was created; the backup is
	// deliberately left in place as the recovery point.
	assert!(tmp.path().join("version.cs.bak").exists());

	Ok(())
}

#[test]
fn placeholders_are_validated_before_any_file_access() {
	// Even with a missing file, a malformed placeholder wins: it is checked
	// before the engine runs, so the exit code is 2, not 4.
	restamp_cmd()
		.arg("/nonexistent/version.cs")
		.arg("--target")
		.arg("asm")
		.arg("--set")
		.arg("broken")
		.assert()
		.failure()
		.code(2);
}
