//! Run identity

// Imports
use {
	crate::{config::UnknownProtocol, Protocol},
	std::{fmt, num::ParseIntError, str::FromStr},
};

/// Identifies a single simulator run, and thus its log file
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct RunId {
	pub protocol:      Protocol,
	pub cores:         u32,
	/// Capacity, as a log2 exponent
	pub capacity:      u32,
	/// Block size, as a log2 exponent
	pub block_size:    u32,
	pub associativity: u32,
}

impl RunId {
	/// Extension of all log files
	pub const LOG_EXTENSION: &'static str = "out";

	/// Returns the log file name, `<protocol>-<cores>-<capacity>-<block size>-<associativity>.out`.
	///
	/// Every number is zero-padded to two digits.
	#[must_use]
	pub fn log_file_name(&self) -> String {
		format!("{self}.{}", Self::LOG_EXTENSION)
	}

	/// Returns the trace file fed to the simulator, which depends only on the core count
	#[must_use]
	pub fn trace_file_name(&self) -> String {
		format!("trace.{}t.long.txt", self.cores)
	}

	/// Parses a log file name created by [`Self::log_file_name`]
	pub fn from_log_file_name(file_name: &str) -> Result<Self, ParseRunIdError> {
		let stem = file_name
			.strip_suffix(Self::LOG_EXTENSION)
			.and_then(|stem| stem.strip_suffix('.'))
			.ok_or(ParseRunIdError::MissingExtension)?;
		stem.parse()
	}
}

impl fmt::Display for RunId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}-{:02}-{:02}-{:02}-{:02}",
			self.protocol, self.cores, self.capacity, self.block_size, self.associativity
		)
	}
}

impl FromStr for RunId {
	type Err = ParseRunIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let fields = s.split('-').collect::<Vec<_>>();
		let [protocol, cores, capacity, block_size, associativity] = fields[..] else {
			return Err(ParseRunIdError::FieldCount(fields.len()));
		};

		let parse_num = |field: &'static str, s: &str| {
			s.parse::<u32>()
				.map_err(|source| ParseRunIdError::Number { field, source })
		};

		Ok(Self {
			protocol:      protocol.parse()?,
			cores:         parse_num("cores", cores)?,
			capacity:      parse_num("capacity", capacity)?,
			block_size:    parse_num("block size", block_size)?,
			associativity: parse_num("associativity", associativity)?,
		})
	}
}

/// Error for [`RunId::from_str`]
#[derive(Debug, thiserror::Error)]
pub enum ParseRunIdError {
	#[error("Expected 5 fields separated by `-`, found {0}")]
	FieldCount(usize),

	#[error("Missing `.out` extension")]
	MissingExtension,

	#[error(transparent)]
	Protocol(#[from] UnknownProtocol),

	#[error("Unable to parse {field}")]
	Number {
		field:  &'static str,
		#[source]
		source: ParseIntError,
	},
}
