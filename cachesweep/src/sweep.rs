//! Sweep

// Imports
use {
	crate::{
		config::ConfigError,
		FailurePolicy,
		LogScraper,
		ResultsDir,
		ProcessRunner,
		RunError,
		RunId,
		Runner,
		ScrapeError,
		Series,
		SweepConfig,
		SweepData,
	},
	anyhow::Context,
	std::{
		path::{Path, PathBuf},
		process::Command,
	},
};

/// Scale of every scraped metric.
///
/// The simulator reports metrics as percentages, which we convert into fractions.
pub const PERCENT_SCALE: f64 = 100.0;

/// Sweep over a configuration
#[derive(Debug)]
pub struct Sweep<'a> {
	/// Config
	config: &'a SweepConfig,

	/// Scraper
	scraper: LogScraper,
}

impl<'a> Sweep<'a> {
	/// Creates a new sweep over `config`.
	///
	/// # Errors
	/// Returns an error if `config` is invalid.
	pub fn new(config: &'a SweepConfig) -> Result<Self, ConfigError> {
		config.validate()?;

		Ok(Self {
			config,
			scraper: LogScraper::new(config.log_prefix_len),
		})
	}

	/// Runs every combination with `runner`, logging to `results`.
	///
	/// The sweep data is also saved to `results`.
	pub fn run<R: Runner>(&self, runner: &mut R, results: &ResultsDir) -> Result<SweepData, anyhow::Error> {
		let legend = self.config.legend;
		let series_len = self.config.series_len();
		let mut series = self
			.config
			.range(legend)
			.iter()
			.map(|&key| Series {
				key,
				values: Vec::with_capacity(series_len),
			})
			.collect::<Vec<_>>();

		let total_runs = series.len() * series_len;
		for (run_idx, run_id) in self.config.run_ids().enumerate() {
			let log_path = results.log_path(&run_id);
			let value = match self.measure(runner, &run_id, &log_path) {
				Ok(value) => Some(value / PERCENT_SCALE),
				Err(err) => match self.config.on_failure {
					FailurePolicy::Record => {
						tracing::warn!(%run_id, ?log_path, "Measurement unavailable: {:?}", anyhow::Error::new(err));
						None
					},
					FailurePolicy::Abort => {
						return Err(anyhow::Error::new(err).context(format!("Unable to measure run {run_id}")));
					},
				},
			};

			let progress = 100.0 * ((run_idx + 1) as f64 / total_runs as f64);
			tracing::info!("[{progress:.2}%] {run_id}: {}", self::display_value(value));

			let legend_key = legend.value(&run_id);
			let Some(series) = series.iter_mut().find(|series| series.key == legend_key) else {
				anyhow::bail!("Run {run_id} has unknown {legend} {legend_key}");
			};
			series.values.push(value);
		}

		for series in &series {
			tracing::info!(
				"{} {}: {}",
				legend,
				series.key,
				cachesweep_util::display_optionals(&series.values)
			);
		}

		let data = SweepData {
			experiment: self.config.experiment.clone(),
			protocol:   self.config.protocol,
			metric:     self.config.metric.clone(),
			legend,
			x_axis:     self.config.x_axis,
			x_values:   self.config.range(self.config.x_axis).to_vec(),
			series,
			plot:       self.config.plot.clone(),
		};

		let data_path = results.data_path();
		data.save(&data_path).context("Unable to save sweep data")?;
		tracing::debug!(?data_path, "Saved sweep data");

		Ok(data)
	}

	/// Returns the command and log path of every run, in sweep order, without running anything
	pub fn commands<'b>(
		&'b self,
		runner: &'b ProcessRunner,
		results: &'b ResultsDir,
	) -> impl Iterator<Item = (Command, PathBuf)> + 'b {
		self.config
			.run_ids()
			.map(move |run_id| (runner.command(&run_id), results.log_path(&run_id)))
	}

	/// Runs a single combination and scrapes its metric, as reported by the simulator
	fn measure<R: Runner>(&self, runner: &mut R, run_id: &RunId, log_path: &Path) -> Result<f64, MeasureError> {
		runner.run(run_id, log_path)?;
		let value = self.scraper.scrape_file(log_path, &self.config.metric)?;
		Ok(value)
	}
}

/// Displays an optional value, with `-` if missing
fn display_value(value: Option<f64>) -> impl std::fmt::Display {
	cachesweep_util::DisplayWrapper::new(move |f| match value {
		Some(value) => write!(f, "{value}"),
		None => write!(f, "-"),
	})
}

/// Error for [`Sweep::measure`]
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
	#[error("Unable to run simulator")]
	Run(#[from] RunError),

	#[error("Unable to scrape log")]
	Scrape(#[from] ScrapeError),
}
