//! `flv_core` is the engine behind the [flv](https://github.com/flv-tool/flv) tree-flavoring
//! tool. It mirrors a source directory into an output directory, rewriting text files that
//! contain embedded variant markers into one concrete flavor while copying every other file
//! byte for byte.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Input tree
//!   → Traversal (collects the file list, dispatches sequentially or in parallel)
//!   → Flavor filter (glob match, optional first-line marking check)
//!   → Inclusion policy (gates participation entirely)
//!   → Substitution engine (resolves marker statements line by line into a temp file)
//!   → Comparator (suppresses the write when the output already matches)
//!   → Atomic replace / copy → RunSummary
//! ```
//!
//! ## Marker Syntax
//!
//! A marker statement declares content for several flavors inline:
//!
//! ```text
//! <TextView name="#[flavor]foo:"bar";test:"string";#[/flavor]" />
//! ```
//!
//! Running with the `foo` flavor active resolves the line to
//! `<TextView name="bar" />`. The first fragment *declared in the statement* whose name is
//! active wins; when none is active the statement resolves to the empty string. Statements
//! with a blank or unparsable expression are left in place verbatim.
//!
//! ## Key Types
//!
//! - [`FlavorProject`] — the orchestrator; owns the three pluggable policies.
//! - [`ActiveFlavors`] — the normalized flavor set for one run.
//! - [`FileDisposition`] / [`RunSummary`] — per-file outcomes and their aggregation.
//! - [`GlobFlavorFilter`], [`HashComparator`], [`IncludeAll`] — the stock policies.
//! - [`FlvConfig`] — optional `flv.toml` defaults loaded from the input root.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use flv_core::ActiveFlavors;
//! use flv_core::FlavorProject;
//! use flv_core::GlobFlavorFilter;
//!
//! # fn main() -> flv_core::FlvResult<()> {
//! let mut project = FlavorProject::default();
//! project.filter = Box::new(GlobFlavorFilter::new(["*.xml"], false)?);
//!
//! let flavors = ActiveFlavors::new(["themeblack"]);
//! let summary = project.flavor_project(Path::new("./src"), Path::new("./src-black"), &flavors, true)?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use policy::*;
pub use project::*;
pub use session::*;
pub use walk::*;

pub mod config;
mod engine;
mod error;
mod policy;
pub mod project;
mod session;
pub mod walk;
