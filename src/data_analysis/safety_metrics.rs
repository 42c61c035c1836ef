// src/data_analysis/safety_metrics.rs

use serde::Serialize;

use crate::axis_names::Axis;
use crate::constants::{
    HEAT_RISK_DIVISOR, HEAT_RISK_MAX, LATENCY_BASE_MS, OSCILLATION_HIGH_AMPLITUDE,
    OSCILLATION_MODERATE_AMPLITUDE,
};
use crate::data_analysis::spectral_analysis::NoiseAnalysis;
use crate::data_analysis::tuning::{round_to, PidGainSet};
use crate::types::PerAxis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OscillationRisk {
    Low,
    Moderate,
    High,
}

impl OscillationRisk {
    pub fn from_peak_amplitude(amplitude: f64) -> Self {
        if amplitude < OSCILLATION_MODERATE_AMPLITUDE {
            OscillationRisk::Low
        } else if amplitude < OSCILLATION_HIGH_AMPLITUDE {
            OscillationRisk::Moderate
        } else {
            OscillationRisk::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisSafetyMetrics {
    pub latency_ms: f64,
    pub heat_risk: f64,
    pub oscillation_risk: OscillationRisk,
}

/// Estimated filter latency for a slider position, rounded to 0.1 ms.
pub fn estimate_latency_ms(filter_slider: f64) -> f64 {
    round_to((1.0 / filter_slider) * LATENCY_BASE_MS, 1)
}

/// Motor heat risk from D gain and peak noise amplitude, in `[0, HEAT_RISK_MAX]`.
pub fn estimate_heat_risk(d_gain: u32, peak_amplitude: f64) -> f64 {
    round_to((d_gain as f64 * peak_amplitude) / HEAT_RISK_DIVISOR, 1).clamp(0.0, HEAT_RISK_MAX)
}

/// Safety indicators for every axis. Axes without a noise peak use amplitude 0.
pub fn calculate_safety_metrics(
    filter_slider: f64,
    pids: &PidGainSet,
    noise: &NoiseAnalysis,
) -> PerAxis<AxisSafetyMetrics> {
    let latency_ms = estimate_latency_ms(filter_slider);
    PerAxis::from_fn(|axis: Axis| {
        let noise_amp = noise.peak_amplitude(axis);
        AxisSafetyMetrics {
            latency_ms,
            heat_risk: estimate_heat_risk(pids.axis(axis).d, noise_amp),
            oscillation_risk: OscillationRisk::from_peak_amplitude(noise_amp),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oscillation_thresholds() {
        assert_eq!(OscillationRisk::from_peak_amplitude(0.0), OscillationRisk::Low);
        assert_eq!(OscillationRisk::from_peak_amplitude(19.99), OscillationRisk::Low);
        assert_eq!(OscillationRisk::from_peak_amplitude(20.0), OscillationRisk::Moderate);
        assert_eq!(OscillationRisk::from_peak_amplitude(49.99), OscillationRisk::Moderate);
        assert_eq!(OscillationRisk::from_peak_amplitude(50.0), OscillationRisk::High);
    }

    #[test]
    fn test_heat_risk_is_clamped() {
        assert_eq!(estimate_heat_risk(30, 30.0), 90.0);
        assert_eq!(estimate_heat_risk(32, 400.0), 100.0);
        assert_eq!(estimate_heat_risk(0, 400.0), 0.0);
        assert_eq!(estimate_heat_risk(30, 1.234), 3.7);
        // 0.25 rounds down to the even digit
        assert_eq!(estimate_heat_risk(1, 2.5), 0.2);
    }

    #[test]
    fn test_latency() {
        assert_eq!(estimate_latency_ms(1.0), 4.0);
        assert_eq!(estimate_latency_ms(0.5), 8.0);
        assert_eq!(estimate_latency_ms(1.3), 3.1);
    }

    #[test]
    fn test_axes_without_peak_default_to_low() {
        let metrics = calculate_safety_metrics(1.2, &PidGainSet::base(), &NoiseAnalysis::default());
        assert_eq!(metrics.len(), 3);
        for (_, m) in metrics.iter() {
            assert_eq!(m.heat_risk, 0.0);
            assert_eq!(m.oscillation_risk, OscillationRisk::Low);
            assert_eq!(m.latency_ms, 3.3);
        }
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["yaw"]["oscillation_risk"], "Low");
    }
}
