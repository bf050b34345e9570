use std::process;

use clap::CommandFactory;
use clap::Parser;
use flv_cli::FlvCli;
use flv_core::ActiveFlavors;
use flv_core::FlavorProject;
use flv_core::FlvConfig;
use flv_core::FlvError;
use flv_core::GlobFlavorFilter;
use flv_core::NeverEqual;
use owo_colors::OwoColorize;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	// A bare invocation or `-?` prints the usage page.
	let wants_usage = std::env::args_os().len() <= 1
		|| std::env::args_os().nth(1).is_some_and(|arg| arg == "-?");
	if wants_usage {
		let _ = FlvCli::command().print_help();
		return;
	}

	let args = FlvCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(&args, use_color);

	if let Err(e) = run(&args) {
		// Render through miette for rich diagnostics with help text and
		// error codes.
		match e.downcast::<FlvError>() {
			Ok(flv_error) => {
				let report: miette::Report = (*flv_error).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Route session diagnostics to stderr. Flag verbosity picks the default
/// level; `RUST_LOG` overrides it entirely.
fn init_tracing(args: &FlvCli, use_color: bool) {
	let default_filter = if args.very_verbose {
		"trace"
	} else if args.verbose {
		"debug"
	} else {
		"warn"
	};

	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();
}

fn run(args: &FlvCli) -> Result<(), Box<dyn std::error::Error>> {
	let Some(input) = args.input.clone() else {
		return Err("no input directory given (use --input <DIR>)".into());
	};
	let Some(output) = args.output.clone() else {
		return Err("no output directory given (use --output <DIR>)".into());
	};

	// flv.toml next to the sources fills any gaps the flags leave.
	let config = FlvConfig::load(&input)?.unwrap_or_default();

	let flavor_names = if args.flavors.is_empty() {
		config.flavors.clone()
	} else {
		args.flavors.clone()
	};
	let flavors = ActiveFlavors::new(&flavor_names);
	if flavors.is_empty() {
		return Err(FlvError::NoActiveFlavors.into());
	}

	let mut filters = if args.filters.is_empty() {
		config.filters.clone()
	} else {
		args.filters.clone()
	};
	if filters.is_empty() {
		// Default to all files with an extension.
		filters.push("*.*".to_string());
	}

	let marked_only = args.marked_only || config.marked_only;
	let copy_all = args.copy_all || config.copy_all;
	let parallel = args.parallel || config.parallel;

	println!("input: {}, output: {}", input.display(), output.display());
	println!("filters: {}", filters.join(", "));
	println!("active flavors: {}", flavors.join(", "));

	let mut project = FlavorProject::default();
	project.filter = Box::new(GlobFlavorFilter::new(&filters, marked_only)?);
	if copy_all {
		project.comparator = Box::new(NeverEqual);
	}

	let summary = project.flavor_project(&input, &output, &flavors, parallel)?;
	println!("Finished processing: {summary}.");

	if summary.failed() > 0 {
		eprintln!(
			"{} {} file(s) failed; see the log output above",
			colored!("warning:", yellow),
			summary.failed()
		);
		process::exit(1);
	}

	Ok(())
}
