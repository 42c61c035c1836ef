// src/plot_functions/plot_setpoint_vs_gyro.rs

use std::error::Error;
use std::path::Path;

use crate::analysis::AnalysisResult;
use crate::axis_names::Axis;
use crate::constants::{COLOR_GYRO, COLOR_SETPOINT, LINE_WIDTH_PLOT};
use crate::plot_framework::{calculate_range, draw_stacked_plot, finite_bounds, PlotConfig, PlotSeries};

/// Pairs snippet times with values, dropping rows where either is missing.
fn paired(time: &[Option<f64>], values: &[Option<f64>]) -> Vec<(f64, f64)> {
    time.iter()
        .zip(values.iter())
        .filter_map(|(t, v)| Some((*t.as_ref()?, *v.as_ref()?)))
        .collect()
}

/// Generates the stacked Setpoint vs Gyro plot (Orange, Blue) from the raw snippet.
/// The snippet only carries Roll and Pitch, so Yaw shows a placeholder.
pub fn plot_setpoint_vs_gyro(
    result: &AnalysisResult,
    output_path: &Path,
    root_name: &str,
) -> Result<bool, Box<dyn Error>> {
    let snippet = &result.raw_snippet;
    draw_stacked_plot(output_path, root_name, "Setpoint/Gyro", |axis| {
        let (setpoint, gyro) = match axis {
            Axis::Roll => (&snippet.roll_setpoint, &snippet.roll_gyro),
            Axis::Pitch => (&snippet.pitch_setpoint, &snippet.pitch_gyro),
            Axis::Yaw => return None,
        };
        let setpoint_data = paired(&snippet.time, setpoint);
        let gyro_data = paired(&snippet.time, gyro);

        let all_points = || setpoint_data.iter().chain(gyro_data.iter());
        let (time_min, time_max) = finite_bounds(all_points().map(|p| p.0))?;
        let (val_min, val_max) = finite_bounds(all_points().map(|p| p.1))?;
        let (y_min, y_max) = calculate_range(val_min, val_max);

        Some(PlotConfig {
            title: format!("{axis} Setpoint vs Gyro"),
            x_range: time_min..time_max,
            y_range: y_min..y_max,
            series: vec![
                PlotSeries {
                    data: setpoint_data,
                    label: "Setpoint".to_string(),
                    color: COLOR_SETPOINT,
                    stroke_width: LINE_WIDTH_PLOT,
                },
                PlotSeries {
                    data: gyro_data,
                    label: "Gyro".to_string(),
                    color: COLOR_GYRO,
                    stroke_width: LINE_WIDTH_PLOT,
                },
            ],
            x_label: "Time (ms)".to_string(),
            y_label: "Rate (deg/s)".to_string(),
        })
    })
}
