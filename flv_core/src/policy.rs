use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use sha2::Digest;
use sha2::Sha256;

use crate::FlvError;
use crate::FlvResult;

/// Gates whether a file participates in a run at all.
///
/// Implemented either by a policy type or directly by a closure taking
/// `(input, output, matches_filter)`.
pub trait InclusionPolicy: Send + Sync {
	/// Should `input` be processed to `output`? `matches_filter` carries
	/// the flavor filter's verdict for `input`.
	fn should_include(&self, input: &Path, output: &Path, matches_filter: bool) -> bool;

	/// Called after `input` has been processed and `output` written or
	/// confirmed unchanged. Not called for excluded or failed files.
	fn on_processed(&self, _input: &Path, _output: &Path) {}
}

/// Default inclusion policy: every file participates.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAll;

impl InclusionPolicy for IncludeAll {
	fn should_include(&self, _input: &Path, _output: &Path, _matches_filter: bool) -> bool {
		true
	}
}

impl<F> InclusionPolicy for F
where
	F: Fn(&Path, &Path, bool) -> bool + Send + Sync,
{
	fn should_include(&self, input: &Path, output: &Path, matches_filter: bool) -> bool {
		self(input, output, matches_filter)
	}
}

/// Decides whether a file is a substitution target or a plain copy
/// target.
pub trait FlavorFilter: Send + Sync {
	fn matches(&self, input: &Path) -> bool;
}

/// Default flavor filter: every file is a substitution target.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlavorAll;

impl FlavorFilter for FlavorAll {
	fn matches(&self, _input: &Path) -> bool {
		true
	}
}

impl<F> FlavorFilter for F
where
	F: Fn(&Path) -> bool + Send + Sync,
{
	fn matches(&self, input: &Path) -> bool {
		self(input)
	}
}

/// Flavor filter matching file names against a set of globs, optionally
/// requiring the file to carry the `flavored` marking on its first line.
///
/// Marked-only mode is an optimization for large trees: files that never
/// declared themselves flavored are copied without being opened for
/// statement scanning.
#[derive(Debug, Clone)]
pub struct GlobFlavorFilter {
	globs: GlobSet,
	marked_only: bool,
}

impl GlobFlavorFilter {
	pub fn new<I, S>(patterns: I, marked_only: bool) -> FlvResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut builder = GlobSetBuilder::new();

		for pattern in patterns {
			let pattern = pattern.as_ref();
			let glob = Glob::new(pattern).map_err(|error| FlvError::InvalidFilter {
				pattern: pattern.to_string(),
				reason: error.to_string(),
			})?;
			builder.add(glob);
		}

		let globs = builder.build().map_err(|error| FlvError::InvalidFilter {
			pattern: String::new(),
			reason: error.to_string(),
		})?;

		Ok(Self { globs, marked_only })
	}
}

impl FlavorFilter for GlobFlavorFilter {
	fn matches(&self, input: &Path) -> bool {
		let Some(name) = input.file_name() else {
			return false;
		};

		if !self.globs.is_match(Path::new(name)) {
			return false;
		}

		if self.marked_only {
			return is_marked(input);
		}

		true
	}
}

/// A file is marked when its first line contains the case-insensitive
/// substring `flavored` anywhere. Unreadable files count as unmarked.
pub fn is_marked(path: &Path) -> bool {
	let Ok(file) = File::open(path) else {
		return false;
	};

	let mut first_line = String::new();
	if BufReader::new(file).read_line(&mut first_line).is_err() {
		return false;
	}

	first_line.to_lowercase().contains("flavored")
}

/// Content-equality test between two files on disk.
pub trait FileComparator: Send + Sync {
	fn same_content(&self, file_a: &Path, file_b: &Path) -> FlvResult<bool>;
}

/// Default comparator: compares SHA-256 digests of both files' full
/// contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashComparator;

impl FileComparator for HashComparator {
	fn same_content(&self, file_a: &Path, file_b: &Path) -> FlvResult<bool> {
		Ok(hash_file(file_a)? == hash_file(file_b)?)
	}
}

/// Comparator that never reports equality, so every output is rewritten
/// even when unchanged. Backs the copy-all switch.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverEqual;

impl FileComparator for NeverEqual {
	fn same_content(&self, _file_a: &Path, _file_b: &Path) -> FlvResult<bool> {
		Ok(false)
	}
}

impl<F> FileComparator for F
where
	F: Fn(&Path, &Path) -> FlvResult<bool> + Send + Sync,
{
	fn same_content(&self, file_a: &Path, file_b: &Path) -> FlvResult<bool> {
		self(file_a, file_b)
	}
}

/// SHA-256 digest of a file's full contents.
fn hash_file(path: &Path) -> FlvResult<[u8; 32]> {
	let mut file = File::open(path)?;
	let mut hasher = Sha256::new();
	std::io::copy(&mut file, &mut hasher)?;
	Ok(hasher.finalize().into())
}
