use assert_cmd::Command;

pub fn restamp_cmd() -> Command {
	let mut cmd = Command::cargo_bin("restamp").expect("restamp binary builds");
	cmd.env("NO_COLOR", "1");
	cmd
}
