use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum FlvError {
	#[error(transparent)]
	#[diagnostic(code(flv::io_error))]
	Io(#[from] std::io::Error),

	#[error("input directory does not exist: `{0}`")]
	#[diagnostic(
		code(flv::missing_input),
		help("check that the input path points at the project directory to mirror")
	)]
	MissingInput(String),

	#[error("no active flavors selected")]
	#[diagnostic(
		code(flv::no_flavors),
		help("pass at least one `--flavor <NAME>` or set `flavors` in flv.toml")
	)]
	NoActiveFlavors,

	#[error("invalid file filter `{pattern}`: {reason}")]
	#[diagnostic(
		code(flv::invalid_filter),
		help("filters are file name globs, e.g. `*.smali` or `strings?.xml`")
	)]
	InvalidFilter { pattern: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(flv::config_parse),
		help("check that flv.toml is valid TOML with `flavors` and/or `filters` keys")
	)]
	ConfigParse(String),

	#[error("failed to replace `{path}`: {reason}")]
	#[diagnostic(code(flv::replace_failed))]
	ReplaceFailed { path: String, reason: String },
}

pub type FlvResult<T> = Result<T, FlvError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
