//! Results directory

// Imports
use {
	crate::RunId,
	anyhow::Context,
	chrono::{DateTime, Local},
	std::{
		fs,
		path::{Path, PathBuf},
	},
};

/// Format of the timestamp naming each sweep's folder
pub const TIMESTAMP_FORMAT: &str = "%m.%d-%H_%M_%S";

/// Name of the sweep data file within the results folder
pub const DATA_FILE_NAME: &str = "data.json";

/// Folder holding every log of a single sweep, `<root>/<experiment>/<timestamp>/`
#[derive(Clone, Debug)]
pub struct ResultsDir {
	path: PathBuf,
}

impl ResultsDir {
	/// Creates the folder for a sweep starting now
	pub fn create(root: &Path, experiment: &str) -> Result<Self, anyhow::Error> {
		Self::create_at(root, experiment, &Local::now())
	}

	/// Creates the folder for a sweep starting at `time`
	pub fn create_at(root: &Path, experiment: &str, time: &DateTime<Local>) -> Result<Self, anyhow::Error> {
		let results = Self::new(root, experiment, time);
		fs::create_dir_all(&results.path)
			.with_context(|| format!("Unable to create results folder {:?}", results.path))?;
		tracing::debug!(path = ?results.path, "Created results folder");

		Ok(results)
	}

	/// Returns the folder a sweep starting now would use, without creating it
	#[must_use]
	pub fn planned(root: &Path, experiment: &str) -> Self {
		Self::new(root, experiment, &Local::now())
	}

	/// Returns the folder for a sweep starting at `time`, without creating it
	#[must_use]
	pub fn new(root: &Path, experiment: &str, time: &DateTime<Local>) -> Self {
		Self {
			path: root.join(experiment).join(self::timestamp(time)),
		}
	}

	/// Returns the folder path
	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns the log path for `run_id`
	#[must_use]
	pub fn log_path(&self, run_id: &RunId) -> PathBuf {
		self.path.join(run_id.log_file_name())
	}

	/// Returns the sweep data path
	#[must_use]
	pub fn data_path(&self) -> PathBuf {
		self.path.join(DATA_FILE_NAME)
	}
}

/// Formats `time` as a results folder name
#[must_use]
pub fn timestamp(time: &DateTime<Local>) -> String {
	time.format(TIMESTAMP_FORMAT).to_string()
}
