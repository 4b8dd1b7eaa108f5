//! Creates graphs from `cachesweep`'s output

// Modules
mod args;

// Imports
use {
	anyhow::Context,
	args::Args,
	cachesweep::{plot, SweepData},
	cachesweep_util::logger,
	clap::Parser,
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Parse the sweep data
	let data = SweepData::load(&args.input_file).context("Unable to load input file")?;
	tracing::debug!(experiment = ?data.experiment, series = data.series.len(), "Loaded sweep data");

	// If we weren't told where to render, use the sweep's output file
	let mut output = args.output;
	output.interactive = args.interactive;
	if output.file.is_none() && !output.interactive {
		output.file = Some(data.plot.output_file.clone());
	}

	// Finally build the chart and render it
	let chart = plot::Chart::from_data(&data);
	plot::render(&chart, &output).context("Unable to render chart")?;

	Ok(())
}
