//! Sweep data

// Imports
use {
	crate::{config::PlotConfig, Axis, Protocol},
	anyhow::Context,
	std::{
		fs,
		io::{self, Write},
		path::Path,
	},
};

/// Sweep data
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SweepData {
	pub experiment: String,
	pub protocol:   Protocol,
	pub metric:     String,
	pub legend:     Axis,
	pub x_axis:     Axis,

	/// Values of the x axis, in sweep order
	pub x_values: Vec<u32>,

	/// One series per legend key, in legend order
	pub series: Vec<Series>,

	pub plot: PlotConfig,
}

/// Metric values for a single legend key
#[derive(PartialEq, Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Series {
	/// Legend key
	pub key: u32,

	/// Values, aligned with [`SweepData::x_values`].
	///
	/// `None` if the run yielded no measurement.
	pub values: Vec<Option<f64>>,
}

impl SweepData {
	/// Loads sweep data from `path`
	pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
		let file = fs::File::open(path).with_context(|| format!("Unable to open sweep data {path:?}"))?;
		serde_json::from_reader(io::BufReader::new(file)).context("Unable to parse sweep data")
	}

	/// Saves sweep data to `path`
	pub fn save(&self, path: &Path) -> Result<(), anyhow::Error> {
		let file = fs::File::create(path).with_context(|| format!("Unable to create sweep data {path:?}"))?;
		let mut writer = io::BufWriter::new(file);
		serde_json::to_writer_pretty(&mut writer, self).context("Unable to write sweep data")?;
		writer.flush().context("Unable to flush sweep data")
	}

	/// Returns the series for legend key `key`
	#[must_use]
	pub fn series(&self, key: u32) -> Option<&Series> {
		self.series.iter().find(|series| series.key == key)
	}
}
