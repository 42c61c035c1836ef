// src/analysis.rs
//
// The analysis pipeline: load -> resolve channels -> spectra -> tune ->
// {step response, safety metrics, raw snippet} -> report.

use serde::Serialize;
use serde_json::json;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::data_analysis::safety_metrics::{calculate_safety_metrics, AxisSafetyMetrics};
use crate::data_analysis::snippet::{extract_snippet, RawSnippet};
use crate::data_analysis::spectral_analysis::{analyze_noise, AxisSpectrum, NoisePeak};
use crate::data_analysis::step_response::{simulate_all_axes, StepResponseTrace};
use crate::data_analysis::tuning::{recommend_tune, TuningRecommendation, VehicleConfig};
use crate::data_input::channel_resolver::{
    estimate_sample_rate, ChannelResolver, SubstringChannelResolver,
};
use crate::data_input::log_parser::{parse_log, parse_log_file};
use crate::data_input::log_table::LogTable;
use crate::error::Result;
use crate::types::PerAxis;

/// Everything the report contains. Field names match the JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub status: &'static str,
    pub noise_analysis: PerAxis<NoisePeak>,
    pub spectrum: PerAxis<AxisSpectrum>,
    pub step_response: PerAxis<StepResponseTrace>,
    pub raw_snippet: RawSnippet,
    pub safety_metrics: PerAxis<AxisSafetyMetrics>,
    pub recommendations: TuningRecommendation,
    pub sampling_rate: f64,
    pub log_duration_sec: f64,
    pub drone_config: VehicleConfig,
    #[serde(skip)]
    pub total_noise_energy: f64,
}

/// Analyzes a log file with the declared vehicle parameters.
///
/// `weight` and `size` may be absent or blank; unknown tuning styles fall back to freestyle.
pub fn analyze(
    input_file_path: &Path,
    weight: Option<&str>,
    size: Option<&str>,
    tuning_style: &str,
) -> Result<AnalysisResult> {
    let config = VehicleConfig::new(weight, size, tuning_style);
    info!("Analyzing '{}'", input_file_path.display());
    let table = parse_log_file(input_file_path)?;
    analyze_table(&table, &config, &SubstringChannelResolver)
}

/// Analyzes a log read from any source.
pub fn analyze_reader<R: Read>(reader: R, config: &VehicleConfig) -> Result<AnalysisResult> {
    analyze_with_resolver(reader, config, &SubstringChannelResolver)
}

/// Same as [`analyze_reader`] with a caller-supplied channel mapping.
pub fn analyze_with_resolver<R: Read>(
    reader: R,
    config: &VehicleConfig,
    resolver: &dyn ChannelResolver,
) -> Result<AnalysisResult> {
    let table = parse_log(reader)?;
    analyze_table(&table, config, resolver)
}

/// Runs every analysis stage on an already-loaded table.
pub fn analyze_table(
    table: &LogTable,
    config: &VehicleConfig,
    resolver: &dyn ChannelResolver,
) -> Result<AnalysisResult> {
    let channels = resolver.resolve(table)?;
    let sampling_rate = estimate_sample_rate(table, channels.time());

    let noise = analyze_noise(table, &channels, sampling_rate);
    let recommendations = recommend_tune(config, &noise);
    let step_response = simulate_all_axes(&recommendations.pids);
    let safety_metrics =
        calculate_safety_metrics(recommendations.filter_slider_raw, &recommendations.pids, &noise);
    let raw_snippet = extract_snippet(table, &channels);

    if noise.spectra.is_empty() {
        warn!("No axis had enough gyro samples for spectral analysis");
    }

    Ok(AnalysisResult {
        status: "success",
        noise_analysis: noise.peaks(),
        sampling_rate,
        log_duration_sec: table.row_count() as f64 / sampling_rate,
        total_noise_energy: noise.total_noise_energy,
        spectrum: noise.spectra,
        step_response,
        raw_snippet,
        safety_metrics,
        recommendations,
        drone_config: config.clone(),
    })
}

/// Converts an analysis outcome to the report JSON.
///
/// Failures become `{"error": "<message>"}` with no other keys.
pub fn report_json(outcome: &Result<AnalysisResult>) -> serde_json::Value {
    match outcome {
        Ok(result) => serde_json::to_value(result)
            .unwrap_or_else(|e| json!({ "error": format!("Failed to serialize report: {e}") })),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

/// The report as a JSON string with fields and axes in declaration order.
pub fn report_string(outcome: &Result<AnalysisResult>) -> String {
    match outcome {
        Ok(result) => serde_json::to_string(result)
            .unwrap_or_else(|_| report_json(outcome).to_string()),
        Err(_) => report_json(outcome).to_string(),
    }
}
