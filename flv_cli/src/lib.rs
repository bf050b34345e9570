use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
	author,
	version,
	about = "Mirror a source tree into a flavored copy by resolving embedded variant markers.",
	long_about = "flv mirrors an input directory into an output directory, rewriting text files \
	              that contain flavor marker statements into one concrete flavor while copying \
	              every other file byte for byte. Outputs that already match are left untouched, \
	              so re-running after small edits only rewrites what actually changed.\n\nMarker \
	              syntax:\n  #[flavor]name:\"content\";name:\"content\";#[/flavor]\n\nExample:\n  \
	              <TextView name=\"#[flavor]foo:\"bar\";test:\"string\";#[/flavor]\" />\n  with \
	              `--flavor foo` becomes\n  <TextView name=\"bar\" />\n\nWhen running with \
	              --marked-only, mark flavored files by adding \"flavored\" anywhere on the first \
	              line, e.g.\n  <?xml version=\"1.0\"?><!-- flavored -->"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct FlvCli {
	/// Input directory to mirror.
	#[arg(long, short = 'i')]
	pub input: Option<PathBuf>,

	/// Output (mirror) directory; contents will be overwritten.
	#[arg(long, short = 'o')]
	pub output: Option<PathBuf>,

	/// Flavor to apply. May be given multiple times; the first flavor a
	/// statement declares that is also active wins.
	#[arg(long = "flavor", short = 'f')]
	pub flavors: Vec<String>,

	/// File name glob selecting files to process; files not matching any
	/// filter are only copied. May be given multiple times. Defaults to
	/// `*.*` when neither flags nor flv.toml supply one.
	#[arg(long = "filter")]
	pub filters: Vec<String>,

	/// Only process files marked as flavored on their first line. Speeds
	/// up processing of large trees.
	#[arg(long, short = 'm', default_value_t = false)]
	pub marked_only: bool,

	/// Always rewrite every file, even when unchanged.
	#[arg(long, short = 'a', default_value_t = false)]
	pub copy_all: bool,

	/// Process files in parallel.
	#[arg(long, short = 'p', default_value_t = false)]
	pub parallel: bool,

	/// Enable verbose logging.
	#[arg(long, short = 'v', default_value_t = false)]
	pub verbose: bool,

	/// Enable very verbose logging (per-statement tracing).
	#[arg(long, default_value_t = false)]
	pub very_verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
