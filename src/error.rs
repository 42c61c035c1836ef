//! Error types for the log analysis pipeline.
//!
//! Only these conditions abort an analysis; everything else degrades to defaults.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Could not read log file: {0}")]
    UnreadableFile(String),

    #[error("Log contains no data rows after the header")]
    EmptyLog,

    #[error("Could not identify Gyro or Setpoint columns.")]
    UnresolvedChannels,
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::UnreadableFile(err.to_string())
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        AnalysisError::UnreadableFile(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
