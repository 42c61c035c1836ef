// src/data_analysis/snippet.rs

use serde::Serialize;

use crate::axis_names::Axis;
use crate::constants::{MICROS_PER_MILLI, SNIPPET_MAX_ROWS};
use crate::data_input::channel_resolver::AxisChannelSet;
use crate::data_input::log_table::LogTable;

/// Raw gyro/setpoint window for the setpoint-vs-gyro view. Missing cells stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawSnippet {
    /// Milliseconds from the start of the window, or row indices without a time column
    pub time: Vec<Option<f64>>,
    pub roll_gyro: Vec<Option<f64>>,
    pub roll_setpoint: Vec<Option<f64>>,
    pub pitch_gyro: Vec<Option<f64>>,
    pub pitch_setpoint: Vec<Option<f64>>,
}

/// Row range of the snippet: up to `SNIPPET_MAX_ROWS` rows centered on the log midpoint.
pub fn snippet_window(row_count: usize) -> std::ops::Range<usize> {
    let window = SNIPPET_MAX_ROWS.min(row_count);
    let start = (row_count / 2).saturating_sub(window / 2);
    let end = (start + window).min(row_count);
    start..end
}

/// Extracts the centered raw-data window for Roll and Pitch.
pub fn extract_snippet(table: &LogTable, channels: &AxisChannelSet) -> RawSnippet {
    let range = snippet_window(table.row_count());
    let column_window = |col: Option<usize>| -> Vec<Option<f64>> {
        col.and_then(|c| table.values(c).get(range.clone()))
            .map(<[Option<f64>]>::to_vec)
            .unwrap_or_default()
    };

    let time = match channels.time() {
        Some(time_col) => {
            let times = table.values(time_col).get(range.clone()).unwrap_or(&[]);
            let base = times.iter().flatten().next().copied();
            times
                .iter()
                .map(|t| match (t, base) {
                    (Some(t), Some(b)) => Some((t - b) / MICROS_PER_MILLI),
                    _ => None,
                })
                .collect()
        }
        None => (0..range.len()).map(|i| Some(i as f64)).collect(),
    };

    RawSnippet {
        time,
        roll_gyro: column_window(channels.gyro(Axis::Roll)),
        roll_setpoint: column_window(channels.setpoint(Axis::Roll)),
        pitch_gyro: column_window(channels.gyro(Axis::Pitch)),
        pitch_setpoint: column_window(channels.setpoint(Axis::Pitch)),
    }
}
