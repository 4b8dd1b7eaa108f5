//! Logger
//!
//! Logging goes to stderr, filtered by `RUST_LOG` (`info` by default), and
//! optionally to a file, filtered by `RUST_LOG_FILE` (`debug` by default).

// Imports
use {
	std::{fs, io, path::Path, sync::Mutex},
	tracing::metadata::LevelFilter,
	tracing_subscriber::{prelude::*, EnvFilter},
};

/// Initializes the global logger.
///
/// Any messages queued with [`pre_init`] are emitted right after.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let term_layer = tracing_subscriber::fmt::layer()
		.with_writer(io::stderr)
		.with_filter(self::env_filter("RUST_LOG", LevelFilter::INFO));

	let file_layer = match log_file.map(|path| self::open_log_file(path, log_file_append)) {
		Some(Ok(file)) => Some(
			tracing_subscriber::fmt::layer()
				.with_ansi(false)
				.with_writer(Mutex::new(file))
				.with_filter(self::env_filter("RUST_LOG_FILE", LevelFilter::DEBUG)),
		),
		Some(Err(err)) => {
			pre_init::warn(format!("Unable to open log file, logging only to stderr: {err}"));
			None
		},
		None => None,
	};

	// Note: Only fails if a global subscriber already exists, in which case we keep it.
	if let Err(err) = tracing_subscriber::registry()
		.with(term_layer)
		.with(file_layer)
		.try_init()
	{
		pre_init::debug(format!("Logger was already initialized: {err}"));
	}

	pre_init::flush();
}

/// Opens the log file, either appending or truncating it
fn open_log_file(path: &Path, append: bool) -> Result<fs::File, io::Error> {
	fs::OpenOptions::new()
		.create(true)
		.write(true)
		.append(append)
		.truncate(!append)
		.open(path)
}

/// Creates an env filter reading `var`, falling back to `default`
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
	EnvFilter::builder()
		.with_default_directive(default.into())
		.with_env_var(var)
		.from_env_lossy()
}

/// Messages logged before the logger exists
pub mod pre_init {
	// Imports
	use {
		std::sync::{Mutex, PoisonError},
		tracing::Level,
	};

	/// Queued messages
	static MESSAGES: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

	/// Queues a debug message
	pub fn debug(msg: impl Into<String>) {
		self::push(Level::DEBUG, msg.into());
	}

	/// Queues a warning message
	pub fn warn(msg: impl Into<String>) {
		self::push(Level::WARN, msg.into());
	}

	fn push(level: Level, msg: String) {
		MESSAGES.lock().unwrap_or_else(PoisonError::into_inner).push((level, msg));
	}

	/// Emits all queued messages
	pub(super) fn flush() {
		let messages = std::mem::take(&mut *MESSAGES.lock().unwrap_or_else(PoisonError::into_inner));
		for (level, msg) in messages {
			if level == Level::WARN {
				tracing::warn!("{msg}");
			} else {
				tracing::debug!("{msg}");
			}
		}
	}
}
