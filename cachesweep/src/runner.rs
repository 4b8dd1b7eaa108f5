//! Simulator runner

// Imports
use {
	crate::RunId,
	std::{
		ffi::OsString,
		fs,
		io,
		path::{Path, PathBuf},
		process::{self, Command},
	},
};

/// Runs the simulator for a single run
pub trait Runner {
	/// Runs the simulator for `run_id`, writing its output to `log_path`.
	///
	/// Any previous contents of `log_path` are discarded.
	fn run(&mut self, run_id: &RunId, log_path: &Path) -> Result<(), RunError>;
}

/// Runs the simulator as an external process
#[derive(Clone, Debug)]
pub struct ProcessRunner {
	/// Simulator executable
	program: PathBuf,

	/// Arguments passed before the simulator arguments
	prefix_args: Vec<OsString>,

	/// Folder with the trace files
	trace_dir: Option<PathBuf>,
}

impl ProcessRunner {
	/// Creates a runner for the simulator at `program`
	pub fn new(program: impl Into<PathBuf>) -> Self {
		Self {
			program:     program.into(),
			prefix_args: vec![],
			trace_dir:   None,
		}
	}

	/// Passes `args` before the simulator arguments.
	///
	/// Useful when `program` is a wrapper, such as a shell running a script.
	#[must_use]
	pub fn with_prefix_args(mut self, args: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
		self.prefix_args = args.into_iter().map(Into::into).collect();
		self
	}

	/// Looks for trace files in `trace_dir` instead of the current directory
	#[must_use]
	pub fn with_trace_dir(mut self, trace_dir: impl Into<PathBuf>) -> Self {
		self.trace_dir = Some(trace_dir.into());
		self
	}

	/// Builds the command for `run_id`, without any output redirection.
	///
	/// `<program> <prefix args> -t <trace> -p <protocol> -n <cores> -cache <capacity> <block size> <associativity>`
	#[must_use]
	pub fn command(&self, run_id: &RunId) -> Command {
		let trace_file = match &self.trace_dir {
			Some(trace_dir) => trace_dir.join(run_id.trace_file_name()),
			None => PathBuf::from(run_id.trace_file_name()),
		};

		let mut cmd = Command::new(&self.program);
		cmd.args(&self.prefix_args)
			.arg("-t")
			.arg(trace_file)
			.args(["-p", run_id.protocol.as_str()])
			.arg("-n")
			.arg(run_id.cores.to_string())
			.arg("-cache")
			.arg(run_id.capacity.to_string())
			.arg(run_id.block_size.to_string())
			.arg(run_id.associativity.to_string());
		cmd
	}
}

impl Runner for ProcessRunner {
	fn run(&mut self, run_id: &RunId, log_path: &Path) -> Result<(), RunError> {
		// Note: Creating the file truncates any output from a previous run with the same identity.
		let log_file = fs::File::create(log_path).map_err(|source| RunError::CreateLog {
			path: log_path.to_owned(),
			source,
		})?;
		let log_file_stderr = log_file.try_clone().map_err(|source| RunError::CreateLog {
			path: log_path.to_owned(),
			source,
		})?;

		let mut cmd = self.command(run_id);
		cmd.stdin(process::Stdio::null())
			.stdout(log_file)
			.stderr(log_file_stderr);
		tracing::info!(?cmd, ?log_path, "Running simulator");

		let status = cmd.status().map_err(|source| RunError::Spawn {
			program: self.program.clone(),
			source,
		})?;
		tracing::debug!(%run_id, ?status, "Simulator exited");

		if !status.success() {
			return Err(RunError::SimulationFailed { status });
		}

		Ok(())
	}
}

/// Error for [`Runner::run`]
#[derive(Debug, thiserror::Error)]
pub enum RunError {
	#[error("Unable to create log file {path:?}")]
	CreateLog {
		path:   PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("Unable to spawn simulator {program:?}")]
	Spawn {
		program: PathBuf,
		#[source]
		source:  io::Error,
	},

	#[error("Simulator failed: {status}")]
	SimulationFailed { status: process::ExitStatus },
}

#[cfg(test)]
mod tests {
	use {super::*, crate::Protocol};

	fn run_id() -> RunId {
		RunId {
			protocol:      Protocol::Msi,
			cores:         2,
			capacity:      16,
			block_size:    5,
			associativity: 4,
		}
	}

	fn args(cmd: &Command) -> Vec<String> {
		cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()).collect()
	}

	#[test]
	fn command_line() {
		let cmd = ProcessRunner::new("./p5").command(&run_id());

		assert_eq!(cmd.get_program(), "./p5");
		assert_eq!(args(&cmd), [
			"-t",
			"trace.2t.long.txt",
			"-p",
			"msi",
			"-n",
			"2",
			"-cache",
			"16",
			"5",
			"4"
		]);
	}

	#[test]
	fn command_line_with_prefix_and_trace_dir() {
		let cmd = ProcessRunner::new("sh")
			.with_prefix_args(["sim.sh"])
			.with_trace_dir("traces")
			.command(&run_id());

		let args = args(&cmd);
		assert_eq!(args[..3], ["sim.sh", "-t", Path::new("traces").join("trace.2t.long.txt").to_str().unwrap()]);
		assert_eq!(args.len(), 11);
	}
}
