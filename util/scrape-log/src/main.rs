//! Scrapes metrics out of simulator logs, printing
//! `<log> <key> <value>` for every log and key.

// Imports
use {
	anyhow::Context,
	cachesweep::{scraper, LogScraper, RunId},
	cachesweep_util::logger,
	clap::Parser,
	std::{fs, io::BufReader, path::PathBuf},
};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
struct Args {
	/// Logs
	#[clap(required = true)]
	logs: Vec<PathBuf>,

	/// Metric keys
	#[clap(short = 'k', long = "key", required = true)]
	keys: Vec<String>,

	/// Characters skipped at the start of each log line
	#[clap(long = "prefix-len", default_value_t = scraper::DEFAULT_PREFIX_LEN)]
	prefix_len: usize,
}

fn main() -> Result<(), anyhow::Error> {
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));
	logger::init(None, false);

	let scraper = LogScraper::new(args.prefix_len);
	let keys = args.keys.iter().map(String::as_str).collect::<Vec<_>>();
	for log in &args.logs {
		// Note: Logs not named by a sweep are still scraped
		match log.file_name().and_then(|file_name| file_name.to_str()).map(RunId::from_log_file_name) {
			Some(Ok(run_id)) => tracing::debug!(?log, ?run_id, "Found run"),
			Some(Err(err)) => tracing::debug!(?log, ?err, "Log wasn't named after a run"),
			None => (),
		}

		let file = fs::File::open(log).with_context(|| format!("Unable to open log {log:?}"))?;
		let values = scraper
			.scrape_many(BufReader::new(file), &keys)
			.with_context(|| format!("Unable to read log {log:?}"))?;

		for (key, value) in keys.iter().zip(values) {
			match value {
				Ok(value) => println!("{} {key} {value}", log.display()),
				Err(err) => {
					tracing::warn!(?log, "{err}");
					println!("{} {key} unavailable", log.display());
				},
			}
		}
	}

	Ok(())
}
