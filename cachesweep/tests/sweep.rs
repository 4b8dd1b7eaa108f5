//! Sweep tests, driving the sweep with stub simulators

// Imports
use {
	cachesweep::{
		plot::Chart,
		Axis,
		FailurePolicy,
		ProcessRunner,
		ResultsDir,
		RunError,
		RunId,
		Runner,
		Series,
		Sweep,
		SweepConfig,
		SweepData,
	},
	std::{fs, io, path::Path},
	tempfile::TempDir,
};

/// Runner writing a log built from each run's identity
struct StubRunner<F> {
	/// Builds the log contents for a run
	log: F,

	/// All runs, in order
	runs: Vec<RunId>,
}

impl<F: FnMut(&RunId) -> Result<String, RunError>> StubRunner<F> {
	fn new(log: F) -> Self {
		Self { log, runs: vec![] }
	}
}

impl<F: FnMut(&RunId) -> Result<String, RunError>> Runner for StubRunner<F> {
	fn run(&mut self, run_id: &RunId, log_path: &Path) -> Result<(), RunError> {
		self.runs.push(*run_id);
		let contents = (self.log)(run_id)?;
		fs::write(log_path, contents).map_err(|source| RunError::CreateLog {
			path: log_path.to_owned(),
			source,
		})
	}
}

fn results_dir(experiment: &str) -> (TempDir, ResultsDir) {
	let root = tempfile::tempdir().expect("Unable to create temporary directory");
	let results = ResultsDir::create(root.path(), experiment).expect("Unable to create results folder");
	(root, results)
}

#[test]
fn constant_simulator_end_to_end() {
	let mut config = SweepConfig::bus_write_traffic();
	config.capacity = vec![10, 11];

	let (_root, results) = results_dir(&config.experiment);
	let mut runner = StubRunner::new(|_: &RunId| Ok("% B_written_cache_to_bus_wb 250\n".to_owned()));
	let data = Sweep::new(&config)
		.expect("Config was invalid")
		.run(&mut runner, &results)
		.expect("Unable to run sweep");

	assert_eq!(data.x_values, [10, 11]);
	assert_eq!(data.series.len(), 3);
	for (series, key) in data.series.iter().zip([1, 2, 4]) {
		assert_eq!(series, &Series {
			key,
			values: vec![Some(2.5), Some(2.5)],
		});
	}

	let chart = Chart::from_data(&data);
	for line in &chart.lines {
		assert_eq!(line.points, [(1024.0, 2.5), (2048.0, 2.5)]);
	}
	assert_eq!(chart.lines[1].label, "assoc 2");

	// Every run kept its own log
	for run_id in &runner.runs {
		assert!(results.log_path(run_id).is_file(), "Missing log for {run_id}");
	}
	assert_eq!(runner.runs.len(), 6);
}

#[test]
fn series_follow_iteration_order() {
	let mut config = SweepConfig::miss_rate();
	config.block_size = vec![6, 7, 8];
	config.cores = vec![2, 1];

	let (_root, results) = results_dir(&config.experiment);
	let mut runner = StubRunner::new(|run_id: &RunId| {
		Ok(format!(
			"% n_cpu_accesses 1000\n% miss_rate {}\n",
			run_id.block_size * 100 + run_id.cores
		))
	});
	let data = Sweep::new(&config)
		.expect("Config was invalid")
		.run(&mut runner, &results)
		.expect("Unable to run sweep");

	assert_eq!(data.legend, Axis::Cores);
	assert_eq!(data.x_values, [6, 7, 8]);
	assert_eq!(data.series, [
		Series {
			key:    2,
			values: vec![Some(6.02), Some(7.02), Some(8.02)],
		},
		Series {
			key:    1,
			values: vec![Some(6.01), Some(7.01), Some(8.01)],
		},
	]);

	// Cores are the innermost loop
	let runs = runner
		.runs
		.iter()
		.map(|run_id| (run_id.block_size, run_id.cores))
		.collect::<Vec<_>>();
	assert_eq!(runs, [(6, 2), (6, 1), (7, 2), (7, 1), (8, 2), (8, 1)]);
}

#[test]
fn unavailable_measurements_are_recorded() {
	let mut config = SweepConfig::bus_write_traffic();
	config.associativity = vec![1];
	config.capacity = vec![10, 11, 12, 13];

	let (_root, results) = results_dir(&config.experiment);
	let mut runner = StubRunner::new(|run_id: &RunId| match run_id.capacity {
		10 => Ok("% B_written_cache_to_bus_wb 0\n".to_owned()),
		11 => Err(RunError::Spawn {
			program: "./p5".into(),
			source:  io::Error::new(io::ErrorKind::NotFound, "no simulator"),
		}),
		12 => Ok("% n_hits 5\n".to_owned()),
		_ => Ok("% B_written_cache_to_bus_wb many\n".to_owned()),
	});
	let data = Sweep::new(&config)
		.expect("Config was invalid")
		.run(&mut runner, &results)
		.expect("Unable to run sweep");

	// A measured zero is kept apart from missing measurements
	assert_eq!(data.series[0].values, [Some(0.0), None, None, None]);
}

#[test]
fn abort_policy_stops_sweep() {
	let mut config = SweepConfig::bus_write_traffic();
	config.on_failure = FailurePolicy::Abort;

	let (_root, results) = results_dir(&config.experiment);
	let mut runner = StubRunner::new(|run_id: &RunId| match run_id.capacity {
		12 => Ok(String::new()),
		_ => Ok("% B_written_cache_to_bus_wb 100\n".to_owned()),
	});
	let res = Sweep::new(&config)
		.expect("Config was invalid")
		.run(&mut runner, &results);

	assert!(res.is_err());
	assert_eq!(runner.runs.len(), 3);
	assert!(!results.data_path().exists());
}

#[test]
fn sweep_data_is_saved() {
	let mut config = SweepConfig::miss_rate();
	config.block_size = vec![4, 5];

	let (_root, results) = results_dir(&config.experiment);
	let mut runner = StubRunner::new(|_: &RunId| Ok("  miss_rate 50 %\n".to_owned()));
	let data = Sweep::new(&config)
		.expect("Config was invalid")
		.run(&mut runner, &results)
		.expect("Unable to run sweep");

	let saved = SweepData::load(&results.data_path()).expect("Unable to load sweep data");
	assert_eq!(saved.series, data.series);
	assert_eq!(saved.x_axis, Axis::BlockSize);
	assert_eq!(saved.plot.output_file, config.plot.output_file);
	assert_eq!(saved.series[0].values, [Some(0.5), Some(0.5)]);
}

#[test]
fn invalid_config_is_rejected() {
	let mut config = SweepConfig::bus_write_traffic();
	config.block_size = vec![5, 6];

	assert!(Sweep::new(&config).is_err());
}

#[test]
fn commands_target_results_folder() {
	let mut config = SweepConfig::miss_rate();
	config.block_size = vec![2, 3];

	let root = tempfile::tempdir().expect("Unable to create temporary directory");
	let results = ResultsDir::planned(root.path(), &config.experiment);
	let runner = ProcessRunner::new("./p5");
	let sweep = Sweep::new(&config).expect("Config was invalid");

	let commands = sweep.commands(&runner, &results).collect::<Vec<_>>();
	assert_eq!(commands.len(), 6);

	let (cmd, log_path) = &commands[1];
	assert_eq!(cmd.get_program(), "./p5");
	assert_eq!(log_path, &results.path().join("msi-02-16-02-04.out"));
	assert!(log_path.starts_with(root.path().join("exp4")));

	// Nothing is run nor created
	assert!(!results.path().exists());
}

#[cfg(unix)]
mod process {
	use {super::*, cachesweep::Protocol};

	/// Writes a shell script simulator into `dir`
	fn script(dir: &Path, contents: &str) -> ProcessRunner {
		let path = dir.join("sim.sh");
		fs::write(&path, contents).expect("Unable to write script");
		ProcessRunner::new("sh").with_prefix_args([path])
	}

	fn run_id() -> RunId {
		RunId {
			protocol:      Protocol::Msi,
			cores:         1,
			capacity:      16,
			block_size:    4,
			associativity: 4,
		}
	}

	#[test]
	fn output_is_logged_and_truncated() {
		let dir = tempfile::tempdir().expect("Unable to create temporary directory");
		let mut runner = script(dir.path(), "echo \"% miss_rate 12.5\"\necho \"% args $*\"\necho oops >&2\n");
		let log_path = dir.path().join(run_id().log_file_name());

		runner.run(&run_id(), &log_path).expect("Unable to run simulator");
		runner.run(&run_id(), &log_path).expect("Unable to run simulator");

		let log = fs::read_to_string(&log_path).expect("Unable to read log");
		assert_eq!(
			log,
			"% miss_rate 12.5\n% args -t trace.1t.long.txt -p msi -n 1 -cache 16 4 4\noops\n"
		);
		assert_eq!(cachesweep::get_stats(&log_path, "miss_rate"), 12.5);
	}

	#[test]
	fn failure_is_reported() {
		let dir = tempfile::tempdir().expect("Unable to create temporary directory");
		let mut runner = script(dir.path(), "echo \"% miss_rate 12.5\"\nexit 3\n");
		let log_path = dir.path().join(run_id().log_file_name());

		let err = runner.run(&run_id(), &log_path).expect_err("Simulator should have failed");
		match err {
			RunError::SimulationFailed { status } => assert_eq!(status.code(), Some(3)),
			err => panic!("Unexpected error: {err:?}"),
		}
	}

	#[test]
	fn missing_simulator_is_reported() {
		let dir = tempfile::tempdir().expect("Unable to create temporary directory");
		let mut runner = ProcessRunner::new(dir.path().join("missing-simulator"));
		let log_path = dir.path().join(run_id().log_file_name());

		assert!(matches!(runner.run(&run_id(), &log_path), Err(RunError::Spawn { .. })));
	}
}
