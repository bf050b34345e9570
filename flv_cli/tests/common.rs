use assert_cmd::Command;

pub fn flv_cmd() -> Command {
	let mut cmd = Command::cargo_bin("flv").expect("flv binary builds");
	cmd.env("NO_COLOR", "1");
	cmd
}
