use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::FlvError;
use crate::FlvResult;

/// Supported config file locations in discovery order (highest precedence
/// first), relative to the input root.
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["flv.toml", ".flv.toml"];

/// Optional per-tree configuration.
///
/// A tree can pin its flavor defaults and filter set next to the sources
/// instead of repeating them on every invocation:
///
/// ```toml
/// flavors = ["themeblack"]
/// filters = ["*.smali", "*.xml"]
/// parallel = true
/// marked_only = true
/// ```
///
/// Command-line values win over config values; config fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlvConfig {
	/// Flavors applied when the command line supplies none.
	pub flavors: Vec<String>,
	/// File name globs selecting substitution targets.
	pub filters: Vec<String>,
	/// Process files in parallel.
	pub parallel: bool,
	/// Only scan files whose first line carries the `flavored` marking.
	pub marked_only: bool,
	/// Treat every file as changed, rewriting the whole mirror.
	pub copy_all: bool,
}

impl FlvConfig {
	/// Load the config from the first candidate file under `root`.
	/// Returns `None` when no candidate exists; a present but malformed
	/// file is an error.
	pub fn load(root: &Path) -> FlvResult<Option<Self>> {
		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if !path.is_file() {
				continue;
			}

			let raw = fs::read_to_string(&path)?;
			let config =
				toml::from_str(&raw).map_err(|error| FlvError::ConfigParse(error.to_string()))?;
			return Ok(Some(config));
		}

		Ok(None)
	}
}
