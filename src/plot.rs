//! Hand-off of computed series to plotly
//!
//! Nothing in the simulation depends on this module; it only renders what a run
//! already produced.

use std::fs;
use std::path::Path;

use num_complex::Complex64;
use plotly::common::Mode;
use plotly::layout::{Axis, AxisType};
use plotly::{Layout, Plot, Scatter};
use tracing::info;

use crate::error::{LinkError, Result};
use crate::vector_ops;
use crate::Bit;

/// A titled sequence of real values indexed by position
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub title: String,
    pub y_label: String,
    pub values: Vec<f64>,
    pub log_y: bool,
}

impl Series {
    pub fn from_bits(title: &str, bits: &[Bit]) -> Self {
        Series {
            title: title.to_string(),
            y_label: "Bit Value".to_string(),
            values: bits.iter().map(|&b| b as f64).collect(),
            log_y: false,
        }
    }

    /// Magnitudes of complex samples, drawn on a log axis
    pub fn from_magnitudes(title: &str, samples: &[Complex64]) -> Self {
        Series {
            title: title.to_string(),
            y_label: "Magnitude (log scale)".to_string(),
            values: vector_ops::magnitudes(samples),
            log_y: true,
        }
    }

    pub fn to_plot(&self) -> Plot {
        let index: Vec<f64> = (0..self.values.len()).map(|i| i as f64).collect();
        let trace = Scatter::new(index, self.values.clone())
            .mode(Mode::Lines)
            .name(self.title.as_str());

        let mut y_axis = Axis::new().title(self.y_label.as_str());
        if self.log_y {
            y_axis = y_axis.type_(AxisType::Log);
        }

        let layout = Layout::new()
            .title(self.title.as_str())
            .x_axis(Axis::new().title("Index"))
            .y_axis(y_axis)
            .auto_size(true);

        let mut plot = Plot::new();
        plot.add_trace(trace);
        plot.set_layout(layout);
        plot
    }
}

/// Render a series to a standalone HTML file
pub fn write_series_html(series: &Series, path: &Path) -> Result<()> {
    let html = series.to_plot().to_html();
    fs::write(path, html).map_err(|e| LinkError::Plot(format!("{}: {}", path.display(), e)))?;
    info!(title = %series.title, path = %path.display(), points = series.values.len(), "plot written");
    Ok(())
}
