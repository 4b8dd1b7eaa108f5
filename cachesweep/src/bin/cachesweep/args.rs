//! Arguments

// Imports
use {
	cachesweep::plot,
	std::{
		ffi::OsString,
		path::{Path, PathBuf},
	},
};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Sweep
	#[clap(flatten)]
	pub sweep: Sweep,

	/// Simulator executable
	#[clap(long = "simulator", default_value = "./p5")]
	pub simulator: PathBuf,

	/// Argument passed to the simulator before the sweep arguments.
	///
	/// May be given multiple times.
	#[clap(long = "simulator-arg", allow_hyphen_values = true)]
	pub simulator_args: Vec<OsString>,

	/// Folder with the trace files
	#[clap(long = "trace-dir")]
	pub trace_dir: Option<PathBuf>,

	/// Results folder
	#[clap(long = "results-dir", default_value = "results")]
	pub results_dir: PathBuf,

	/// Only print the commands that would be run
	#[clap(long = "dry-run")]
	pub dry_run: bool,

	/// Don't show the chart on screen, only save it
	#[clap(long = "no-interactive")]
	pub no_interactive: bool,

	/// Output
	///
	/// Defaults to the configuration's output file.
	#[clap(flatten)]
	pub output: plot::Output,
}

impl Args {
	/// Returns the chart output, saving to `default_file` unless another file was given
	pub fn output(&self, default_file: &Path) -> plot::Output {
		plot::Output {
			file: Some(self.output.file.clone().unwrap_or_else(|| default_file.to_owned())),
			interactive: !self.no_interactive,
			..self.output.clone()
		}
	}
}

/// Sweep to run
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct Sweep {
	/// Built-in sweep
	#[clap(long = "preset", value_enum)]
	pub preset: Option<Preset>,

	/// Sweep config file
	#[clap(long = "config")]
	pub config_file: Option<PathBuf>,
}

/// Built-in sweep
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Preset {
	/// Bus write traffic against capacity, per associativity
	BusWriteTraffic,

	/// Miss rate against block size, per core count
	MissRate,
}
