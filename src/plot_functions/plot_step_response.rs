// src/plot_functions/plot_step_response.rs

use std::error::Error;
use std::path::Path;

use crate::analysis::AnalysisResult;
use crate::constants::{COLOR_STEP_RESPONSE, LINE_WIDTH_PLOT, STEP_SIM_DURATION_S};
use crate::plot_framework::{calculate_range, draw_stacked_plot, finite_bounds, PlotConfig, PlotSeries};

/// Generates the stacked simulated step response plot for the recommended gains.
pub fn plot_step_response(
    result: &AnalysisResult,
    output_path: &Path,
    root_name: &str,
) -> Result<bool, Box<dyn Error>> {
    draw_stacked_plot(output_path, root_name, "Step Response", |axis| {
        let trace = result.step_response.get(axis)?;
        let (resp_min, resp_max) = finite_bounds(trace.response.iter().copied())?;
        let (y_min, y_max) = calculate_range(resp_min.min(0.0), resp_max.max(1.0));
        let pid = result.recommendations.pids.axis(axis);

        Some(PlotConfig {
            title: format!("{axis} Step Response (P:{} D:{})", pid.p, pid.d),
            x_range: 0.0..STEP_SIM_DURATION_S * 1000.0,
            y_range: y_min..y_max,
            series: vec![PlotSeries {
                data: trace.time.iter().copied().zip(trace.response.iter().copied()).collect(),
                label: "Simulated response".to_string(),
                color: *COLOR_STEP_RESPONSE,
                stroke_width: LINE_WIDTH_PLOT,
            }],
            x_label: "Time (ms)".to_string(),
            y_label: "Normalized Response".to_string(),
        })
    })
}
