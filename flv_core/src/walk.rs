use std::fs;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobMatcher;
use rayon::prelude::*;

use crate::FlvError;
use crate::FlvResult;

/// Enumerate files under `root` and run `action` once per file, either
/// inline or on the rayon thread pool.
///
/// Discovery itself is always sequential and the file list is sorted
/// before dispatch, so the set of visited files is deterministic and
/// every file is dispatched exactly once in either mode. Parallel mode
/// gives no ordering guarantee between files.
pub fn enumerate_files<F>(
	root: &Path,
	pattern: &str,
	recursive: bool,
	parallel: bool,
	action: F,
) -> FlvResult<()>
where
	F: Fn(&Path) + Send + Sync,
{
	let files = collect_files(root, pattern, recursive)?;

	if parallel {
		files.par_iter().for_each(|file| action(file));
	} else {
		for file in &files {
			action(file);
		}
	}

	Ok(())
}

/// Collect every file under `root` whose file name matches `pattern`,
/// sorted for deterministic ordering.
pub fn collect_files(root: &Path, pattern: &str, recursive: bool) -> FlvResult<Vec<PathBuf>> {
	let matcher = Glob::new(pattern)
		.map_err(|error| FlvError::InvalidFilter {
			pattern: pattern.to_string(),
			reason: error.to_string(),
		})?
		.compile_matcher();

	let mut files = Vec::new();
	walk_dir(root, &matcher, recursive, &mut files)?;
	files.sort();

	Ok(files)
}

fn walk_dir(
	dir: &Path,
	matcher: &GlobMatcher,
	recursive: bool,
	files: &mut Vec<PathBuf>,
) -> FlvResult<()> {
	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();
		// The entry's own type, without following symlinks. Symlinked
		// directories are treated as plain entries so a link cycle can
		// never send the walk into a loop.
		let file_type = entry.file_type()?;

		if file_type.is_dir() {
			if recursive {
				walk_dir(&path, matcher, recursive, files)?;
			}
		} else if let Some(name) = path.file_name() {
			if matcher.is_match(Path::new(name)) {
				files.push(path);
			}
		}
	}

	Ok(())
}
