//! Plotting

// Imports
use {
	crate::{Axis, SweepData},
	gnuplot::{AxesCommon, Figure, PlotOption::Caption},
	std::path::PathBuf,
};

/// Chart of a sweep, one line per legend key
#[derive(PartialEq, Clone, Debug)]
pub struct Chart {
	pub title:   String,
	pub x_label: String,
	pub y_label: String,
	pub lines:   Vec<Line>,
}

/// Line of a chart
#[derive(PartialEq, Clone, Debug)]
pub struct Line {
	pub label:  String,
	pub points: Vec<(f64, f64)>,
}

impl Chart {
	/// Builds the chart for `data`.
	///
	/// Unavailable measurements are left out of their line.
	#[must_use]
	pub fn from_data(data: &SweepData) -> Self {
		let lines = data
			.series
			.iter()
			.map(|series| {
				let points = data
					.x_values
					.iter()
					.zip(&series.values)
					.filter_map(|(&x, &y)| match y {
						Some(y) => Some((self::x_value(data.x_axis, x), y)),
						None => {
							tracing::warn!(legend_key = series.key, x, "Skipping unavailable point");
							None
						},
					})
					.collect();

				Line {
					label: data.plot.legend_label.replace("{}", &series.key.to_string()),
					points,
				}
			})
			.collect();

		Self {
			title:   data.plot.title.clone(),
			x_label: data.plot.x_label.clone(),
			y_label: data.plot.y_label.clone(),
			lines,
		}
	}
}

/// Returns the plotted x value of `value` on `axis`.
///
/// Exponent axes are plotted as the byte count they stand for.
#[must_use]
pub fn x_value(axis: Axis, value: u32) -> f64 {
	if axis.is_log2() {
		f64::from(value).exp2()
	} else {
		f64::from(value)
	}
}

/// Output
#[derive(Clone, Debug)]
#[derive(clap::Args)]
pub struct Output {
	/// Interactive mode
	///
	/// Each binary has its own flag for this, as their defaults differ.
	#[clap(skip)]
	pub interactive: bool,

	/// Output file
	#[clap(short = 'o', long = "output")]
	pub file: Option<PathBuf>,

	/// Output file width
	#[clap(long = "output-width", default_value_t = 640)]
	pub width: u32,

	/// Output file height
	#[clap(long = "output-height", default_value_t = 480)]
	pub height: u32,
}

/// Renders `chart` to `output`, with a base 2 logarithmic x axis
pub fn render(chart: &Chart, output: &Output) -> Result<(), anyhow::Error> {
	let mut fg = Figure::new();
	fg.set_title(&chart.title);

	let axes = fg.axes2d();
	axes.set_x_log(Some(2.0))
		.set_x_label(&chart.x_label, &[])
		.set_y_label(&chart.y_label, &[]);
	for line in &chart.lines {
		axes.lines_points(
			line.points.iter().map(|&(x, _)| x),
			line.points.iter().map(|&(_, y)| y),
			&[Caption(line.label.as_str())],
		);
	}

	if let Some(file) = &output.file {
		fg.save_to_png(file, output.width, output.height)
			.map_err(|err| anyhow::anyhow!("Unable to save output file: {err:?}"))?;
		tracing::info!(?file, "Saved chart");
	}

	if output.interactive {
		// Note: The returned closer waits for the window to close when dropped
		let _closer = fg
			.show()
			.map_err(|err| anyhow::anyhow!("Unable to show chart: {err:?}"))?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::{Protocol, Series, SweepConfig},
	};

	fn data() -> SweepData {
		let config = SweepConfig::bus_write_traffic();
		SweepData {
			experiment: config.experiment,
			protocol:   Protocol::None,
			metric:     config.metric,
			legend:     Axis::Associativity,
			x_axis:     Axis::Capacity,
			x_values:   vec![10, 11, 12],
			series:     vec![
				Series {
					key:    1,
					values: vec![Some(2.5), Some(0.0), Some(1.25)],
				},
				Series {
					key:    4,
					values: vec![Some(0.5), None, Some(0.25)],
				},
			],
			plot:       config.plot,
		}
	}

	#[test]
	fn chart_lines() {
		let chart = Chart::from_data(&data());

		assert_eq!(chart.title, "Graph #2: Bus Write Traffic vs Cache Size (Write-Back Cache)");
		assert_eq!(chart.lines, [
			Line {
				label:  "assoc 1".to_owned(),
				points: vec![(1024.0, 2.5), (2048.0, 0.0), (4096.0, 1.25)],
			},
			Line {
				label:  "assoc 4".to_owned(),
				points: vec![(1024.0, 0.5), (4096.0, 0.25)],
			},
		]);
	}

	#[test]
	fn raw_axes_are_not_exponents() {
		assert_eq!(x_value(Axis::BlockSize, 6), 64.0);
		assert_eq!(x_value(Axis::Capacity, 0), 1.0);
		assert_eq!(x_value(Axis::Cores, 4), 4.0);
		assert_eq!(x_value(Axis::Associativity, 2), 2.0);
	}
}
