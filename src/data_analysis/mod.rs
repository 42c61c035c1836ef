// src/data_analysis/mod.rs

pub mod fft_utils;
pub mod safety_metrics;
pub mod snippet;
pub mod spectral_analysis;
pub mod step_response;
pub mod tuning;

// src/data_analysis/mod.rs
