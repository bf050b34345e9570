use std::fmt;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use tempfile::NamedTempFile;

use crate::FlvError;
use crate::FlvResult;
use crate::engine::ActiveFlavors;
use crate::engine::resolve_stream;
use crate::policy::FileComparator;
use crate::policy::FlavorAll;
use crate::policy::FlavorFilter;
use crate::policy::HashComparator;
use crate::policy::IncludeAll;
use crate::policy::InclusionPolicy;
use crate::session::LogSession;
use crate::walk::enumerate_files;

/// Terminal classification of how one input file was handled. Produced
/// once per file and never revised within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDisposition {
	/// Rewritten through the engine; the result replaced the output.
	FlavoredReplace,
	/// Rewritten through the engine; the result matched the existing
	/// output, which was left untouched.
	FlavoredSkipped,
	/// Copied verbatim because the flavor filter did not match.
	Copied,
	/// Excluded by the inclusion policy, or an unchanged copy target.
	Skipped,
	/// An I/O failure prevented processing this file; the run continues.
	Failed,
}

/// Aggregated outcome counters for one run.
///
/// Counters are atomic so concurrent file tasks can record dispositions
/// without further coordination; reads are only meaningful once the run
/// has completed.
#[derive(Debug, Default)]
pub struct RunSummary {
	flavored_replaced: AtomicUsize,
	flavored_skipped: AtomicUsize,
	copied: AtomicUsize,
	skipped: AtomicUsize,
	failed: AtomicUsize,
}

impl RunSummary {
	pub fn record(&self, disposition: FileDisposition) {
		let counter = match disposition {
			FileDisposition::FlavoredReplace => &self.flavored_replaced,
			FileDisposition::FlavoredSkipped => &self.flavored_skipped,
			FileDisposition::Copied => &self.copied,
			FileDisposition::Skipped => &self.skipped,
			FileDisposition::Failed => &self.failed,
		};
		counter.fetch_add(1, Ordering::Relaxed);
	}

	pub fn flavored_replaced(&self) -> usize {
		self.flavored_replaced.load(Ordering::Relaxed)
	}

	pub fn flavored_skipped(&self) -> usize {
		self.flavored_skipped.load(Ordering::Relaxed)
	}

	pub fn copied(&self) -> usize {
		self.copied.load(Ordering::Relaxed)
	}

	pub fn skipped(&self) -> usize {
		self.skipped.load(Ordering::Relaxed)
	}

	pub fn failed(&self) -> usize {
		self.failed.load(Ordering::Relaxed)
	}

	/// Total number of files that reached a terminal disposition.
	pub fn total(&self) -> usize {
		self.flavored_replaced()
			+ self.flavored_skipped()
			+ self.copied()
			+ self.skipped()
			+ self.failed()
	}
}

impl fmt::Display for RunSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} flavored file(s) changed, {} unchanged, {} file(s) copied, {} skipped, {} failed",
			self.flavored_replaced(),
			self.flavored_skipped(),
			self.copied(),
			self.skipped(),
			self.failed(),
		)
	}
}

/// Mirrors an input tree into a flavored output tree.
///
/// The three policies are pluggable: replace any of them with a custom
/// type or closure to change which files participate, which files are
/// substitution targets, and how outputs are compared against what is
/// already on disk.
pub struct FlavorProject {
	pub inclusion: Box<dyn InclusionPolicy>,
	pub filter: Box<dyn FlavorFilter>,
	pub comparator: Box<dyn FileComparator>,
}

impl Default for FlavorProject {
	fn default() -> Self {
		Self {
			inclusion: Box::new(IncludeAll),
			filter: Box::new(FlavorAll),
			comparator: Box::new(HashComparator),
		}
	}
}

impl FlavorProject {
	/// Mirror every file under `input_root` into `output_root`, resolving
	/// marker statements against `flavors` in files the flavor filter
	/// matches and copying the rest verbatim.
	///
	/// The output root is created if absent. In parallel mode each file's
	/// pipeline runs as an independent task with no ordering guarantee;
	/// a single file's I/O error is recorded as [`FileDisposition::Failed`]
	/// and does not abort the run.
	pub fn flavor_project(
		&self,
		input_root: &Path,
		output_root: &Path,
		flavors: &ActiveFlavors,
		parallel: bool,
	) -> FlvResult<RunSummary> {
		if !input_root.is_dir() {
			return Err(FlvError::MissingInput(input_root.display().to_string()));
		}

		fs::create_dir_all(output_root)?;

		let summary = RunSummary::default();

		enumerate_files(input_root, "*", true, parallel, |input| {
			let relative = input.strip_prefix(input_root).unwrap_or(input);
			let output = output_root.join(relative);
			let mut session = LogSession::new(relative.display().to_string());

			let disposition = match self.flavor_file(input, &output, flavors, &mut session) {
				Ok(disposition) => disposition,
				Err(error) => {
					session.error(format!("processing failed: {error}"));
					FileDisposition::Failed
				}
			};

			summary.record(disposition);
		})?;

		Ok(summary)
	}

	/// Run the per-file pipeline for one input/output pair.
	pub fn flavor_file(
		&self,
		input: &Path,
		output: &Path,
		flavors: &ActiveFlavors,
		session: &mut LogSession,
	) -> FlvResult<FileDisposition> {
		let should_flavor = self.filter.matches(input);

		if !self.inclusion.should_include(input, output, should_flavor) {
			session.verbose("skipping: excluded by inclusion policy");
			return Ok(FileDisposition::Skipped);
		}

		if let Some(parent) = output.parent() {
			fs::create_dir_all(parent)?;
		}

		if should_flavor {
			// Resolve into a private temp file in the destination
			// directory so the final replacement is a single rename on
			// the same filesystem; a reader of the output tree never
			// observes a partially written file.
			let temp_dir = output.parent().unwrap_or(Path::new("."));
			let mut temp = NamedTempFile::new_in(temp_dir)?;
			{
				let reader = BufReader::new(File::open(input)?);
				let mut writer = BufWriter::new(temp.as_file_mut());
				resolve_stream(reader, &mut writer, flavors, session)?;
				writer.flush()?;
			}

			if output.exists() && self.comparator.same_content(output, temp.path())? {
				session.verbose("existing output matches freshly produced content, not replacing");
				self.inclusion.on_processed(input, output);
				return Ok(FileDisposition::FlavoredSkipped);
			}

			temp.persist(output)
				.map_err(|error| FlvError::ReplaceFailed {
					path: output.display().to_string(),
					reason: error.to_string(),
				})?;
			self.inclusion.on_processed(input, output);
			Ok(FileDisposition::FlavoredReplace)
		} else {
			if output.exists() && self.comparator.same_content(input, output)? {
				session.verbose("existing output matches the input, skipping copy");
				return Ok(FileDisposition::Skipped);
			}

			fs::copy(input, output)?;
			self.inclusion.on_processed(input, output);
			Ok(FileDisposition::Copied)
		}
	}
}
