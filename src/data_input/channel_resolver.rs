// src/data_input/channel_resolver.rs

use tracing::{debug, info, warn};

use crate::axis_names::{Axis, AXIS_COUNT};
use crate::constants::{
    DEFAULT_SAMPLE_RATE_HZ, GYRO_COLUMN_PATTERN, MICROS_PER_SECOND, SETPOINT_COLUMN_PATTERN,
    TIME_COLUMN_PATTERN,
};
use crate::data_input::log_table::LogTable;
use crate::error::{AnalysisError, Result};

/// Column indices feeding one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisChannels {
    pub gyro: Option<usize>,
    pub setpoint: Option<usize>,
}

/// Which table columns carry gyro, setpoint and time data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisChannelSet {
    pub axes: [AxisChannels; AXIS_COUNT],
    pub time: Option<usize>,
}

impl AxisChannelSet {
    pub fn gyro(&self, axis: Axis) -> Option<usize> {
        self.axes[axis.index()].gyro
    }

    pub fn setpoint(&self, axis: Axis) -> Option<usize> {
        self.axes[axis.index()].setpoint
    }

    pub fn time(&self) -> Option<usize> {
        self.time
    }
}

/// Maps log columns onto control axes.
pub trait ChannelResolver {
    fn resolve(&self, table: &LogTable) -> Result<AxisChannelSet>;
}

/// Default resolver: substring matches on column names, assigned to Roll, Pitch, Yaw
/// in order of appearance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringChannelResolver;

impl ChannelResolver for SubstringChannelResolver {
    fn resolve(&self, table: &LogTable) -> Result<AxisChannelSet> {
        let gyro_cols: Vec<usize> = matching_columns(table, |name| name.contains(GYRO_COLUMN_PATTERN));
        let setpoint_cols: Vec<usize> =
            matching_columns(table, |name| name.contains(SETPOINT_COLUMN_PATTERN));

        if gyro_cols.is_empty() || setpoint_cols.is_empty() {
            warn!(
                "Channel resolution failed: {} gyro and {} setpoint columns found",
                gyro_cols.len(),
                setpoint_cols.len()
            );
            return Err(AnalysisError::UnresolvedChannels);
        }

        let mut channels = AxisChannelSet {
            time: table
                .column_names()
                .position(|name| name.to_lowercase().contains(TIME_COLUMN_PATTERN)),
            ..Default::default()
        };
        for axis in Axis::ALL {
            channels.axes[axis.index()] = AxisChannels {
                gyro: gyro_cols.get(axis.index()).copied(),
                setpoint: setpoint_cols.get(axis.index()).copied(),
            };
        }

        for axis in Axis::ALL {
            let column_name = |idx: Option<usize>| {
                idx.and_then(|i| table.column(i))
                    .map(|c| c.name.as_str())
                    .unwrap_or("Not Found")
            };
            debug!(
                "  {}: gyro '{}', setpoint '{}'",
                axis,
                column_name(channels.gyro(axis)),
                column_name(channels.setpoint(axis))
            );
        }
        if channels.time.is_none() {
            warn!("No time column found; sample rate defaults to {} Hz", DEFAULT_SAMPLE_RATE_HZ);
        }

        Ok(channels)
    }
}

fn matching_columns(table: &LogTable, predicate: impl Fn(&str) -> bool) -> Vec<usize> {
    table
        .column_names()
        .enumerate()
        .filter(|(_, name)| predicate(*name))
        .map(|(idx, _)| idx)
        .collect()
}

/// Estimates the sample rate from the time column (microseconds).
///
/// Uses the mean difference between adjacent rows where both timestamps are present.
/// Falls back to `DEFAULT_SAMPLE_RATE_HZ` when there is no time column or the mean
/// interval is not a finite positive number.
pub fn estimate_sample_rate(table: &LogTable, time_col: Option<usize>) -> f64 {
    let Some(time_col) = time_col else {
        return DEFAULT_SAMPLE_RATE_HZ;
    };

    let (total_delta, count) = table
        .values(time_col)
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Some(t0), Some(t1)) => Some(t1 - t0),
            _ => None,
        })
        .fold((0.0, 0usize), |(sum, n), delta| (sum + delta, n + 1));

    if count == 0 {
        warn!("Could not determine sample rate (need >= 2 timestamps); using {} Hz", DEFAULT_SAMPLE_RATE_HZ);
        return DEFAULT_SAMPLE_RATE_HZ;
    }

    let dt = (total_delta / count as f64) / MICROS_PER_SECOND;
    if dt.is_finite() && dt > 0.0 {
        let sample_rate = 1.0 / dt;
        info!("Estimated Sample Rate: {:.2} Hz", sample_rate);
        sample_rate
    } else {
        warn!("Mean time interval is not positive; using {} Hz", DEFAULT_SAMPLE_RATE_HZ);
        DEFAULT_SAMPLE_RATE_HZ
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(names: &[&str], rows: Vec<Vec<Option<f64>>>) -> LogTable {
        LogTable::from_rows(names.iter().map(|s| s.to_string()).collect(), rows, Vec::new())
    }

    #[test]
    fn test_positional_axis_assignment() {
        let t = table(
            &["loopIteration", "time", "setpoint[0]", "setpoint[1]", "gyroADC[0]", "gyroADC[1]", "gyroADC[2]"],
            vec![vec![Some(0.0); 7]],
        );
        let channels = SubstringChannelResolver.resolve(&t).unwrap();
        assert_eq!(channels.time(), Some(1));
        assert_eq!(channels.gyro(Axis::Roll), Some(4));
        assert_eq!(channels.gyro(Axis::Yaw), Some(6));
        assert_eq!(channels.setpoint(Axis::Pitch), Some(3));
        assert_eq!(channels.setpoint(Axis::Yaw), None);
    }

    #[test]
    fn test_matches_past_yaw_are_ignored() {
        let t = table(
            &[
                "time",
                "setpoint[0]",
                "setpoint[1]",
                "setpoint[2]",
                "setpoint[3]",
                "gyroADC[0]",
                "gyroADC[1]",
                "gyroADC[2]",
                "gyroADC[3]",
            ],
            vec![vec![Some(0.0); 9]],
        );
        let channels = SubstringChannelResolver.resolve(&t).unwrap();
        assert_eq!(channels.setpoint(Axis::Yaw), Some(3));
        assert_eq!(channels.gyro(Axis::Yaw), Some(7));
        assert!(channels
            .axes
            .iter()
            .all(|a| a.setpoint != Some(4) && a.gyro != Some(8)));
    }

    #[test]
    fn test_gyro_match_is_case_sensitive() {
        let t = table(&["time", "gyroadc[0]", "setpoint[0]"], vec![vec![Some(0.0); 3]]);
        assert!(matches!(
            SubstringChannelResolver.resolve(&t),
            Err(AnalysisError::UnresolvedChannels)
        ));
    }

    #[test]
    fn test_missing_setpoint_is_unresolved() {
        let t = table(&["time", "gyroADC[0]"], vec![vec![Some(0.0); 2]]);
        assert!(matches!(
            SubstringChannelResolver.resolve(&t),
            Err(AnalysisError::UnresolvedChannels)
        ));
    }

    #[test]
    fn test_time_column_is_case_insensitive() {
        let t = table(&["Time (us)", "gyroADC[0]", "setpoint[0]"], vec![vec![Some(0.0); 3]]);
        let channels = SubstringChannelResolver.resolve(&t).unwrap();
        assert_eq!(channels.time(), Some(0));
    }

    #[test]
    fn test_sample_rate_from_time_column() {
        // 2000 us spacing = 500 Hz, with a gap that must not contribute a difference
        let rows = vec![
            vec![Some(0.0)],
            vec![Some(2000.0)],
            vec![None],
            vec![Some(6000.0)],
            vec![Some(8000.0)],
        ];
        let t = table(&["time"], rows);
        let rate = estimate_sample_rate(&t, Some(0));
        assert!((rate - 500.0).abs() < 1e-9, "got {rate}");
    }

    #[test]
    fn test_sample_rate_defaults() {
        let t = table(&["time"], vec![vec![Some(5.0)], vec![Some(5.0)]]);
        assert_eq!(estimate_sample_rate(&t, Some(0)), DEFAULT_SAMPLE_RATE_HZ);
        assert_eq!(estimate_sample_rate(&t, None), DEFAULT_SAMPLE_RATE_HZ);
        let decreasing = table(&["time"], vec![vec![Some(10.0)], vec![Some(5.0)]]);
        assert_eq!(estimate_sample_rate(&decreasing, Some(0)), DEFAULT_SAMPLE_RATE_HZ);
    }
}
