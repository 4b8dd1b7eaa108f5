//! Arguments

// Imports
use {cachesweep::plot, std::path::PathBuf};

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

	/// Sweep data, as saved by `cachesweep`
	pub input_file: PathBuf,

	/// Interactive mode
	#[clap(long = "interactive")]
	pub interactive: bool,

	/// Output
	///
	/// Without an output file nor interactive mode, the sweep's own output file is used.
	#[clap(flatten)]
	pub output: plot::Output,
}
