//! Log scraping
//!
//! Each metric occupies one log line: a fixed-width prefix, then the metric key
//! and its value separated by whitespace, e.g. `% miss_rate 12.5`.

// Imports
use std::{
	fs,
	io::{self, BufRead, BufReader},
	num::ParseFloatError,
	path::Path,
};

/// Bytes written back from the cache to the bus, for a write-back cache
pub const BUS_WRITE_TRAFFIC_WB: &str = "B_written_cache_to_bus_wb";

/// Miss rate, as a percentage of all memory references
pub const MISS_RATE: &str = "miss_rate";

/// Default prefix length of each log line
pub const DEFAULT_PREFIX_LEN: usize = 2;

/// Returns the value of `key` in the log at `path`, or `0.0` if unavailable
#[must_use]
pub fn get_stats(path: &Path, key: &str) -> f64 {
	LogScraper::default().scrape_file(path, key).unwrap_or(0.0)
}

/// Log scraper
#[derive(Clone, Copy, Debug)]
pub struct LogScraper {
	/// Characters skipped at the start of each line before matching the key
	prefix_len: usize,
}

impl Default for LogScraper {
	fn default() -> Self {
		Self::new(DEFAULT_PREFIX_LEN)
	}
}

impl LogScraper {
	/// Creates a scraper skipping `prefix_len` characters of each line
	#[must_use]
	pub const fn new(prefix_len: usize) -> Self {
		Self { prefix_len }
	}

	/// Scrapes `key` from the log at `path`
	pub fn scrape_file(&self, path: &Path, key: &str) -> Result<f64, ScrapeError> {
		let file = fs::File::open(path).map_err(ScrapeError::Io)?;
		self.scrape(BufReader::new(file), key)
	}

	/// Scrapes `key` from `reader`.
	///
	/// Only the first line matching `key` is considered, even if it's malformed.
	pub fn scrape(&self, reader: impl BufRead, key: &str) -> Result<f64, ScrapeError> {
		for (line_idx, line) in reader.lines().enumerate() {
			let line = line.map_err(ScrapeError::Io)?;
			let rest = self.strip_prefix(&line);
			if rest.starts_with(key) {
				return self::parse_value(rest, key, line_idx, &line);
			}
		}

		Err(ScrapeError::MetricNotFound { key: key.to_owned() })
	}

	/// Scrapes every key in `keys` from `reader` in a single pass.
	///
	/// Results are in the same order as `keys`.
	pub fn scrape_many(&self, reader: impl BufRead, keys: &[&str]) -> Result<Vec<Result<f64, ScrapeError>>, io::Error> {
		let mut values = keys.iter().map(|_| None).collect::<Vec<_>>();
		for (line_idx, line) in reader.lines().enumerate() {
			let line = line?;
			let rest = self.strip_prefix(&line);
			for (key, value) in keys.iter().zip(&mut values) {
				if value.is_none() && rest.starts_with(key) {
					*value = Some(self::parse_value(rest, key, line_idx, &line));
				}
			}

			if values.iter().all(Option::is_some) {
				break;
			}
		}

		let values = keys
			.iter()
			.zip(values)
			.map(|(key, value)| value.unwrap_or_else(|| Err(ScrapeError::MetricNotFound { key: (*key).to_owned() })))
			.collect();
		Ok(values)
	}

	/// Returns `line` without its prefix
	fn strip_prefix<'a>(&self, line: &'a str) -> &'a str {
		match line.char_indices().nth(self.prefix_len) {
			Some((idx, _)) => &line[idx..],
			None => "",
		}
	}
}

/// Parses the value of a line matching `key`.
///
/// `rest` is the line after its prefix, with the value being the token after the key.
fn parse_value(rest: &str, key: &str, line_idx: usize, line: &str) -> Result<f64, ScrapeError> {
	let malformed = |reason| ScrapeError::Malformed {
		key: key.to_owned(),
		line_idx,
		line: line.to_owned(),
		reason,
	};

	let value = rest
		.split_whitespace()
		.nth(1)
		.ok_or_else(|| malformed(MalformedReason::MissingValue))?;
	value
		.parse::<f64>()
		.map_err(|err| malformed(MalformedReason::NotANumber(err)))
}

/// Scrape error
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
	#[error("Metric {key:?} not found")]
	MetricNotFound { key: String },

	#[error("Metric {key:?} on line {} is malformed ({reason}): {line:?}", .line_idx + 1)]
	Malformed {
		key:      String,
		line_idx: usize,
		line:     String,
		reason:   MalformedReason,
	},

	#[error("Unable to read log")]
	Io(#[source] io::Error),
}

/// Reason for [`ScrapeError::Malformed`]
#[derive(Debug, thiserror::Error)]
pub enum MalformedReason {
	#[error("missing value")]
	MissingValue,

	#[error("value is not a number: {0}")]
	NotANumber(ParseFloatError),
}
