//! Runs a cache simulator sweep and plots it

// Modules
mod args;

// Imports
use {
	self::args::{Args, Preset},
	anyhow::Context,
	cachesweep::{plot, ProcessRunner, ResultsDir, Sweep, SweepConfig},
	cachesweep_util::logger,
	clap::Parser,
	std::fs,
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Get the sweep configuration
	let config = match (args.sweep.preset, &args.sweep.config_file) {
		(Some(Preset::BusWriteTraffic), _) => SweepConfig::bus_write_traffic(),
		(Some(Preset::MissRate), _) => SweepConfig::miss_rate(),
		(None, Some(config_file)) => {
			let config_file = fs::File::open(config_file).context("Unable to open config file")?;
			serde_json::from_reader::<_, SweepConfig>(config_file).context("Unable to parse config file")?
		},
		(None, None) => anyhow::bail!("Either a preset or a config file must be given"),
	};
	tracing::debug!(?config, "Sweep configuration");

	let sweep = Sweep::new(&config).context("Invalid sweep configuration")?;

	let mut runner = ProcessRunner::new(&args.simulator).with_prefix_args(&args.simulator_args);
	if let Some(trace_dir) = &args.trace_dir {
		runner = runner.with_trace_dir(trace_dir);
	}

	// If we're only doing a dry run, list every command and quit
	if args.dry_run {
		let results = ResultsDir::planned(&args.results_dir, &config.experiment);
		for (cmd, log_path) in sweep.commands(&runner, &results) {
			println!("{cmd:?} > {}", log_path.display());
		}
		return Ok(());
	}

	// Run the sweep
	let results = ResultsDir::create(&args.results_dir, &config.experiment).context("Unable to create results folder")?;
	tracing::info!(path = ?results.path(), "Running sweep {:?}", config.experiment);
	let data = sweep.run(&mut runner, &results).context("Unable to run sweep")?;

	// Then plot it
	let chart = plot::Chart::from_data(&data);
	let output = args.output(&config.plot.output_file);
	plot::render(&chart, &output).context("Unable to render chart")?;

	Ok(())
}
