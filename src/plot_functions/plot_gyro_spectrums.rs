// src/plot_functions/plot_gyro_spectrums.rs

use std::error::Error;
use std::path::Path;

use crate::analysis::AnalysisResult;
use crate::constants::{
    COLOR_NOTCH_MARKER, COLOR_SPECTRUM, LINE_WIDTH_PLOT, SPECTRUM_BAND_MAX_HZ, SPECTRUM_BAND_MIN_HZ,
};
use crate::plot_framework::{draw_stacked_plot, finite_bounds, PlotConfig, PlotSeries};

/// Generates the stacked gyro noise spectrum plot, with a marker at each suggested notch.
pub fn plot_gyro_spectrums(
    result: &AnalysisResult,
    output_path: &Path,
    root_name: &str,
) -> Result<bool, Box<dyn Error>> {
    draw_stacked_plot(output_path, root_name, "Gyro Spectrum", |axis| {
        let spectrum = result.spectrum.get(axis)?;
        let (_, amp_max) = finite_bounds(spectrum.amps.iter().copied())?;
        let y_max = (amp_max * 1.15).max(1.0);

        let mut series = vec![PlotSeries {
            data: spectrum.freqs.iter().copied().zip(spectrum.amps.iter().copied()).collect(),
            label: "Gyro amplitude".to_string(),
            color: *COLOR_SPECTRUM,
            stroke_width: LINE_WIDTH_PLOT,
        }];

        for notch in result.recommendations.filters.iter().filter(|n| n.axis == axis) {
            let center = notch.center_hz as f64;
            series.push(PlotSeries {
                data: vec![(center, 0.0), (center, y_max)],
                label: format!("Notch {} Hz (cutoff {} Hz)", notch.center_hz, notch.cutoff_hz),
                color: *COLOR_NOTCH_MARKER,
                stroke_width: LINE_WIDTH_PLOT,
            });
        }

        let title = match result.noise_analysis.get(axis) {
            Some(peak) => format!(
                "{axis} Gyro Spectrum (peak {:.2} at {:.0} Hz)",
                peak.amplitude, peak.freq_hz
            ),
            None => format!("{axis} Gyro Spectrum"),
        };

        Some(PlotConfig {
            title,
            x_range: SPECTRUM_BAND_MIN_HZ..SPECTRUM_BAND_MAX_HZ,
            y_range: 0.0..y_max,
            series,
            x_label: "Frequency (Hz)".to_string(),
            y_label: "Amplitude".to_string(),
        })
    })
}
