// src/lib.rs - Library interface for internal module access

#![allow(non_snake_case)]

pub mod analysis;
pub mod axis_names;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod plot_framework;
pub mod plot_functions;
pub mod types;

pub use analysis::{
    analyze, analyze_reader, analyze_with_resolver, report_json, report_string, AnalysisResult,
};
pub use data_analysis::tuning::{TuningStyle, VehicleConfig};
pub use error::AnalysisError;

// Expose crate version, preferring a git-derived version when the build provides one.
pub fn crate_version() -> &'static str {
    option_env!("VERGEN_GIT_SEMVER").unwrap_or(env!("CARGO_PKG_VERSION"))
}
