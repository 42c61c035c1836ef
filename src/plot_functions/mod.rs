// src/plot_functions/mod.rs

pub mod plot_gyro_spectrums;
pub mod plot_setpoint_vs_gyro;
pub mod plot_step_response;

use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::analysis::AnalysisResult;

/// Renders every report chart into `output_dir` as `<root_name>_<chart>.svg`.
///
/// A failing chart is logged and skipped. Returns the paths that were written.
pub fn render_report_plots(
    result: &AnalysisResult,
    output_dir: &Path,
    root_name: &str,
) -> Vec<PathBuf> {
    type PlotFn = fn(&AnalysisResult, &Path, &str) -> Result<bool, Box<dyn Error>>;
    let charts: [(&str, PlotFn); 3] = [
        ("Gyro_Spectrum_stacked", plot_gyro_spectrums::plot_gyro_spectrums),
        ("Step_Response_stacked", plot_step_response::plot_step_response),
        ("SetpointVsGyro_stacked", plot_setpoint_vs_gyro::plot_setpoint_vs_gyro),
    ];

    let mut written = Vec::new();
    for (suffix, plot_fn) in charts {
        let output_path = output_dir.join(format!("{root_name}_{suffix}.svg"));
        match plot_fn(result, &output_path, root_name) {
            Ok(_) => written.push(output_path),
            Err(e) => warn!("Failed to render '{}': {}", output_path.display(), e),
        }
    }
    written
}

// src/plot_functions/mod.rs
