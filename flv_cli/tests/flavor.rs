mod common;

use flv_core::AnyEmptyResult;

#[test]
fn flavors_a_tree_end_to_end() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	let output = tmp.path().join("output");
	std::fs::create_dir_all(input.join("res"))?;
	std::fs::write(
		input.join("res/strings.xml"),
		"<TextView name=\"#[flavor]foo:\"bar\";test:\"string\";#[/flavor]\" />\n",
	)?;

	common::flv_cmd()
		.arg("--input")
		.arg(&input)
		.arg("--output")
		.arg(&output)
		.arg("--flavor")
		.arg("foo")
		.assert()
		.success()
		.stdout(predicates::str::contains("Finished processing"))
		.stdout(predicates::str::contains("1 flavored file(s) changed"));

	let content = std::fs::read_to_string(output.join("res/strings.xml"))?;
	assert_eq!(content, "<TextView name=\"bar\" />\n");

	Ok(())
}

#[test]
fn second_run_leaves_the_mirror_untouched() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	let output = tmp.path().join("output");
	std::fs::create_dir_all(&input)?;
	std::fs::write(
		input.join("colors.xml"),
		"<color>#[flavor]dark:\"#000\";light:\"#fff\";#[/flavor]</color>\n",
	)?;

	for _ in 0..2 {
		common::flv_cmd()
			.arg("-i")
			.arg(&input)
			.arg("-o")
			.arg(&output)
			.arg("-f")
			.arg("dark")
			.assert()
			.success();
	}

	// The second run rewrote nothing.
	common::flv_cmd()
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("-f")
		.arg("dark")
		.assert()
		.success()
		.stdout(predicates::str::contains("0 flavored file(s) changed, 1 unchanged"));

	Ok(())
}

#[test]
fn copy_all_rewrites_unchanged_outputs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	let output = tmp.path().join("output");
	std::fs::create_dir_all(&input)?;
	std::fs::write(input.join("a.xml"), "#[flavor]foo:\"x\";#[/flavor]\n")?;

	for _ in 0..2 {
		common::flv_cmd()
			.arg("-i")
			.arg(&input)
			.arg("-o")
			.arg(&output)
			.arg("-f")
			.arg("foo")
			.arg("--copy-all")
			.assert()
			.success()
			.stdout(predicates::str::contains("1 flavored file(s) changed, 0 unchanged"));
	}

	Ok(())
}

#[test]
fn files_outside_the_filter_are_copied_verbatim() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	let output = tmp.path().join("output");
	std::fs::create_dir_all(&input)?;
	let content = "#[flavor]foo:\"bar\";#[/flavor] must survive\n";
	std::fs::write(input.join("notes.txt"), content)?;

	common::flv_cmd()
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("-f")
		.arg("foo")
		.arg("--filter")
		.arg("*.xml")
		.assert()
		.success()
		.stdout(predicates::str::contains("1 file(s) copied"));

	assert_eq!(std::fs::read_to_string(output.join("notes.txt"))?, content);

	Ok(())
}

#[test]
fn marked_only_skips_scanning_unmarked_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	let output = tmp.path().join("output");
	std::fs::create_dir_all(&input)?;
	std::fs::write(
		input.join("marked.xml"),
		"<!-- flavored -->\n<a>#[flavor]foo:\"yes\";#[/flavor]</a>\n",
	)?;
	let unmarked_content = "<a>#[flavor]foo:\"yes\";#[/flavor]</a>\n";
	std::fs::write(input.join("unmarked.xml"), unmarked_content)?;

	common::flv_cmd()
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("-f")
		.arg("foo")
		.arg("--marked-only")
		.assert()
		.success();

	// The marked file is resolved, the unmarked one copied untouched.
	let marked = std::fs::read_to_string(output.join("marked.xml"))?;
	assert_eq!(marked, "<!-- flavored -->\n<a>yes</a>\n");
	let unmarked = std::fs::read_to_string(output.join("unmarked.xml"))?;
	assert_eq!(unmarked, unmarked_content);

	Ok(())
}

#[test]
fn parallel_mode_processes_every_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	let output = tmp.path().join("output");
	std::fs::create_dir_all(&input)?;
	for index in 0..12 {
		std::fs::write(
			input.join(format!("file{index}.xml")),
			format!("#[flavor]foo:\"{index}\";#[/flavor]\n"),
		)?;
	}

	common::flv_cmd()
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(&output)
		.arg("-f")
		.arg("foo")
		.arg("--parallel")
		.assert()
		.success()
		.stdout(predicates::str::contains("12 flavored file(s) changed"));

	assert_eq!(std::fs::read_to_string(output.join("file7.xml"))?, "7\n");

	Ok(())
}

#[test]
fn bare_invocation_prints_usage() {
	common::flv_cmd()
		.assert()
		.success()
		.stdout(predicates::str::contains("Usage"));
}

#[test]
fn missing_input_flag_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::flv_cmd()
		.arg("-o")
		.arg(tmp.path())
		.arg("-f")
		.arg("foo")
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("no input directory"));

	Ok(())
}

#[test]
fn missing_flavors_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("input");
	std::fs::create_dir_all(&input)?;

	common::flv_cmd()
		.arg("-i")
		.arg(&input)
		.arg("-o")
		.arg(tmp.path().join("output"))
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("no active flavors"));

	Ok(())
}

#[test]
fn nonexistent_input_directory_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::flv_cmd()
		.arg("-i")
		.arg(tmp.path().join("missing"))
		.arg("-o")
		.arg(tmp.path().join("output"))
		.arg("-f")
		.arg("foo")
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("does not exist"));

	Ok(())
}
