// tests/common/mod.rs
// Synthetic Betaflight-style CSV logs for the integration tests.

#![allow(dead_code)]

use std::f64::consts::PI;

/// A logged channel: column name and its value for a given row index and sample rate.
pub struct Channel {
    pub name: &'static str,
    pub tone_hz: f64,
    pub amplitude: f64,
}

impl Channel {
    pub fn tone(name: &'static str, tone_hz: f64, amplitude: f64) -> Self {
        Self { name, tone_hz, amplitude }
    }

    pub fn flat(name: &'static str) -> Self {
        Self { name, tone_hz: 0.0, amplitude: 0.0 }
    }

    fn value(&self, row: usize, sample_rate: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.tone_hz * row as f64 / sample_rate).sin()
    }
}

/// Builds a log with the blackbox metadata preamble, a `loopIteration,time,...` header and
/// `rows` samples at `sample_rate` Hz (timestamps in microseconds).
pub fn build_log(channels: &[Channel], rows: usize, sample_rate: f64) -> String {
    let mut out = String::new();
    out.push_str("\"Product\",\"Blackbox flight data recorder by Nicholas Sherlock\"\n");
    out.push_str("\"Firmware revision\",\"Betaflight 4.5.0 (024f8e13d) STM32F7X2\"\n");
    out.push_str("\"Log start datetime\",\"2024-05-01T10:00:00.000+00:00\"\n");

    let mut header = vec!["loopIteration", "time"];
    header.extend(channels.iter().map(|c| c.name));
    out.push_str(&header.join(","));
    out.push('\n');

    let dt_us = 1_000_000.0 / sample_rate;
    for row in 0..rows {
        let mut fields = vec![row.to_string(), format!("{:.0}", row as f64 * dt_us)];
        fields.extend(channels.iter().map(|c| format!("{:.4}", c.value(row, sample_rate))));
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Roll and pitch only: a strong 150 Hz roll tone and a weak 80 Hz pitch tone.
pub fn roll_pitch_log(rows: usize, sample_rate: f64) -> String {
    build_log(
        &[
            Channel::flat("axisP[0]"),
            Channel::flat("axisP[1]"),
            Channel::flat("axisP[2]"),
            Channel::flat("axisD[0]"),
            Channel::flat("axisD[1]"),
            Channel::tone("setpoint[0]", 2.0, 200.0),
            Channel::tone("setpoint[1]", 3.0, 150.0),
            Channel::tone("gyroADC[0]", 150.0, 30.0),
            Channel::tone("gyroADC[1]", 80.0, 5.0),
            Channel::flat("motor[0]"),
            Channel::flat("motor[1]"),
        ],
        rows,
        sample_rate,
    )
}

/// All three axes with the given gyro tone amplitudes at 150/200/250 Hz.
pub fn three_axis_log(rows: usize, sample_rate: f64, amplitudes: [f64; 3]) -> String {
    build_log(
        &[
            Channel::flat("axisP[0]"),
            Channel::flat("axisP[1]"),
            Channel::flat("axisP[2]"),
            Channel::tone("setpoint[0]", 2.0, 200.0),
            Channel::tone("setpoint[1]", 3.0, 150.0),
            Channel::tone("setpoint[2]", 1.0, 100.0),
            Channel::flat("setpoint[3]"),
            Channel::tone("gyroADC[0]", 150.0, amplitudes[0]),
            Channel::tone("gyroADC[1]", 200.0, amplitudes[1]),
            Channel::tone("gyroADC[2]", 250.0, amplitudes[2]),
            Channel::flat("motor[0]"),
        ],
        rows,
        sample_rate,
    )
}
