//! Configuration

// Imports
use {
	crate::RunId,
	itertools::Itertools,
	std::{fmt, path::PathBuf, str::FromStr},
};

/// Sweep configuration
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SweepConfig {
	/// Experiment name.
	///
	/// Names the folder under the results directory.
	pub experiment: String,

	/// Coherence protocol
	pub protocol: Protocol,

	/// Associativities
	pub associativity: Vec<u32>,

	/// Block sizes, as log2 exponents
	pub block_size: Vec<u32>,

	/// Capacities, as log2 exponents
	pub capacity: Vec<u32>,

	/// Core counts
	pub cores: Vec<u32>,

	/// Metric key to scrape from each log
	pub metric: String,

	/// Axis with one plotted line per value
	pub legend: Axis,

	/// Axis along the x axis
	pub x_axis: Axis,

	/// Characters skipped at the start of each log line before matching the key
	#[serde(default = "default_log_prefix_len")]
	pub log_prefix_len: usize,

	/// What to do when a run yields no measurement
	#[serde(default)]
	pub on_failure: FailurePolicy,

	/// Plot
	pub plot: PlotConfig,
}

/// Plot configuration
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PlotConfig {
	pub title:   String,
	pub x_label: String,
	pub y_label: String,

	/// Legend label for each line, with `{}` replaced by the legend key
	pub legend_label: String,

	/// Image written after the sweep
	pub output_file: PathBuf,
}

fn default_log_prefix_len() -> usize {
	2
}

impl SweepConfig {
	/// Bus write traffic against capacity for a write-back cache, one line per associativity
	#[must_use]
	pub fn bus_write_traffic() -> Self {
		Self {
			experiment:     "exp2".to_owned(),
			protocol:       Protocol::None,
			associativity:  vec![1, 2, 4],
			block_size:     vec![6],
			capacity:       (10..22).collect(),
			cores:          vec![1],
			metric:         crate::scraper::BUS_WRITE_TRAFFIC_WB.to_owned(),
			legend:         Axis::Associativity,
			x_axis:         Axis::Capacity,
			log_prefix_len: default_log_prefix_len(),
			on_failure:     FailurePolicy::default(),
			plot:           PlotConfig {
				title:        "Graph #2: Bus Write Traffic vs Cache Size (Write-Back Cache)".to_owned(),
				x_label:      "Capacity (bytes)".to_owned(),
				y_label:      "Bus Write Traffic".to_owned(),
				legend_label: "assoc {}".to_owned(),
				output_file:  PathBuf::from("graph2.png"),
			},
		}
	}

	/// Miss rate against block size under MSI, one line per core count
	#[must_use]
	pub fn miss_rate() -> Self {
		Self {
			experiment:     "exp4".to_owned(),
			protocol:       Protocol::Msi,
			associativity:  vec![4],
			block_size:     (2..15).collect(),
			capacity:       vec![16],
			cores:          vec![1, 2, 4],
			metric:         crate::scraper::MISS_RATE.to_owned(),
			legend:         Axis::Cores,
			x_axis:         Axis::BlockSize,
			log_prefix_len: default_log_prefix_len(),
			on_failure:     FailurePolicy::default(),
			plot:           PlotConfig {
				title:        "Graph #4: Miss Rate vs Block Size (MSI Protocol)".to_owned(),
				x_label:      "Block Size (bytes)".to_owned(),
				y_label:      "Miss Rate (fraction of all memory references)".to_owned(),
				legend_label: "{} core(s)".to_owned(),
				output_file:  PathBuf::from("graph4.png"),
			},
		}
	}

	/// Returns the range of `axis`
	#[must_use]
	pub fn range(&self, axis: Axis) -> &[u32] {
		match axis {
			Axis::Associativity => &self.associativity,
			Axis::BlockSize => &self.block_size,
			Axis::Capacity => &self.capacity,
			Axis::Cores => &self.cores,
		}
	}

	/// Returns all run identities, outer to inner: associativity, block size, capacity, cores.
	pub fn run_ids(&self) -> impl Iterator<Item = RunId> + '_ {
		let protocol = self.protocol;
		itertools::iproduct!(&self.associativity, &self.block_size, &self.capacity, &self.cores).map(
			move |(&associativity, &block_size, &capacity, &cores)| RunId {
				protocol,
				cores,
				capacity,
				block_size,
				associativity,
			},
		)
	}

	/// Number of points in each series
	#[must_use]
	pub fn series_len(&self) -> usize {
		Axis::ALL
			.iter()
			.filter(|&&axis| axis != self.legend)
			.map(|&axis| self.range(axis).len())
			.product()
	}

	/// Checks that every series will line up with the x axis and that no two runs share a log
	pub fn validate(&self) -> Result<(), ConfigError> {
		for axis in Axis::ALL {
			let range = self.range(axis);
			if range.is_empty() {
				return Err(ConfigError::EmptyRange { axis });
			}
			if let Some(&value) = range.iter().duplicates().next() {
				return Err(ConfigError::DuplicateValue { axis, value });
			}
		}

		if self.legend == self.x_axis {
			return Err(ConfigError::LegendIsXAxis { axis: self.legend });
		}

		let series_len = self.series_len();
		let x_len = self.range(self.x_axis).len();
		if series_len != x_len {
			return Err(ConfigError::MisalignedSeries { series_len, x_len });
		}

		Ok(())
	}
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Range for {axis} is empty")]
	EmptyRange { axis: Axis },

	#[error("Range for {axis} contains {value} more than once")]
	DuplicateValue { axis: Axis, value: u32 },

	#[error("Legend and x axis are both {axis}")]
	LegendIsXAxis { axis: Axis },

	#[error("Each series would have {series_len} points, but the x axis has {x_len} values")]
	MisalignedSeries { series_len: usize, x_len: usize },
}

/// Coherence protocol
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
	None,
	Vi,
	Msi,
}

impl Protocol {
	/// Name, as passed to the simulator
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Vi => "vi",
			Self::Msi => "msi",
		}
	}
}

impl fmt::Display for Protocol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Protocol {
	type Err = UnknownProtocol;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"none" => Ok(Self::None),
			"vi" => Ok(Self::Vi),
			"msi" => Ok(Self::Msi),
			_ => Err(UnknownProtocol(s.to_owned())),
		}
	}
}

/// Error for [`Protocol::from_str`]
#[derive(Debug, thiserror::Error)]
#[error("Unknown protocol {0:?}, expected one of `none`, `vi` or `msi`")]
pub struct UnknownProtocol(pub String);

/// Sweep axis
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
	Associativity,
	BlockSize,
	Capacity,
	Cores,
}

impl Axis {
	/// All axis, in sweep nesting order
	pub const ALL: [Self; 4] = [Self::Associativity, Self::BlockSize, Self::Capacity, Self::Cores];

	/// Returns this axis' value in `run_id`
	#[must_use]
	pub const fn value(self, run_id: &RunId) -> u32 {
		match self {
			Self::Associativity => run_id.associativity,
			Self::BlockSize => run_id.block_size,
			Self::Capacity => run_id.capacity,
			Self::Cores => run_id.cores,
		}
	}

	/// Whether the values of this axis are log2 exponents of a byte count
	#[must_use]
	pub const fn is_log2(self) -> bool {
		matches!(self, Self::BlockSize | Self::Capacity)
	}
}

impl fmt::Display for Axis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Associativity => "associativity",
			Self::BlockSize => "block size",
			Self::Capacity => "capacity",
			Self::Cores => "cores",
		})
	}
}

/// What to do when a run yields no measurement
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
	/// Record the point as unavailable and keep going
	#[default]
	Record,

	/// Stop the sweep
	Abort,
}
