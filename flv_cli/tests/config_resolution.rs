mod common;

use flv_core::AnyEmptyResult;

#[test]
fn config_supplies_flavors_when_flags_do_not() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	let output = tmp.path().join("output");
	std::fs::create_dir_all(&input)?;
	std::fs::write(input.join("flv.toml"), "flavors = [\"dark\"]\n")?;
	std::fs::write(
		input.join("colors.xml"),
		"#[flavor]dark:\"#000\";light:\"#fff\";#[/flavor]\n",
	)?;

	common::flv_cmd()
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.assert()
		.success()
		.stdout(predicates::str::contains("active flavors: dark"));

	assert_eq!(
		std::fs::read_to_string(output.join("colors.xml"))?,
		"#000\n"
	);

	Ok(())
}

#[test]
fn flags_override_config_flavors() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	let output = tmp.path().join("output");
	std::fs::create_dir_all(&input)?;
	std::fs::write(input.join("flv.toml"), "flavors = [\"dark\"]\n")?;
	std::fs::write(
		input.join("colors.xml"),
		"#[flavor]dark:\"#000\";light:\"#fff\";#[/flavor]\n",
	)?;

	common::flv_cmd()
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("-f")
		.arg("light")
		.assert()
		.success()
		.stdout(predicates::str::contains("active flavors: light"));

	assert_eq!(
		std::fs::read_to_string(output.join("colors.xml"))?,
		"#fff\n"
	);

	Ok(())
}

#[test]
fn config_filters_restrict_substitution_targets() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	let output = tmp.path().join("output");
	std::fs::create_dir_all(&input)?;
	std::fs::write(
		input.join("flv.toml"),
		"flavors = [\"foo\"]\nfilters = [\"*.xml\"]\n",
	)?;
	let txt_content = "#[flavor]foo:\"bar\";#[/flavor]\n";
	std::fs::write(input.join("notes.txt"), txt_content)?;
	std::fs::write(input.join("data.xml"), txt_content)?;

	common::flv_cmd()
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.assert()
		.success();

	// Only the xml file was resolved; the txt file was byte-copied.
	assert_eq!(std::fs::read_to_string(output.join("data.xml"))?, "bar\n");
	assert_eq!(std::fs::read_to_string(output.join("notes.txt"))?, txt_content);

	Ok(())
}

#[test]
fn malformed_config_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	std::fs::create_dir_all(&input)?;
	std::fs::write(input.join("flv.toml"), "flavors = not valid toml")?;

	common::flv_cmd()
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(tmp.path().join("output"))
		.arg("-f")
		.arg("foo")
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("parse config"));

	Ok(())
}
