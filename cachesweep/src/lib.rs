//! Cache simulator parameter sweeps (`cachesweep`)
//!
//! Runs an external cache simulator over the Cartesian product of its
//! parameters, scrapes a metric out of each run's log and plots it.

// Modules
pub mod config;
pub mod data;
pub mod plot;
pub mod results;
pub mod run_id;
pub mod runner;
pub mod scraper;
pub mod sweep;

// Exports
pub use self::{
	config::{Axis, FailurePolicy, Protocol, SweepConfig},
	data::{Series, SweepData},
	results::ResultsDir,
	run_id::RunId,
	runner::{ProcessRunner, RunError, Runner},
	scraper::{get_stats, LogScraper, ScrapeError},
	sweep::Sweep,
};
