// src/data_analysis/step_response.rs

use ndarray::Array1;
use serde::Serialize;

use crate::axis_names::Axis;
use crate::constants::{STEP_SIM_DEFAULT_DAMPING, STEP_SIM_DURATION_S, STEP_SIM_SAMPLES};
use crate::data_analysis::tuning::PidGainSet;
use crate::types::PerAxis;

/// Simulated unit step response of one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResponseTrace {
    /// Sample times in milliseconds
    pub time: Vec<f64>,
    /// Normalized response (1.0 = setpoint reached)
    pub response: Vec<f64>,
}

/// Damping ratio and natural frequency of the second-order model for a P/D pair.
pub fn second_order_params(p: u32, d: u32) -> (f64, f64) {
    let p = p as f64;
    let d = d as f64;
    let damping = if p > 0.0 { (d / 2.0) / p.sqrt() } else { STEP_SIM_DEFAULT_DAMPING };
    let omega = p.sqrt() * 2.0;
    (damping, omega)
}

/// Second-order response value at time `t` (seconds).
///
/// The damping >= 1 branch decays with the undamped natural frequency.
pub fn second_order_response(damping: f64, omega: f64, t: f64) -> f64 {
    if damping < 1.0 {
        let root = (1.0 - damping * damping).sqrt();
        let wd = omega * root;
        1.0 - (-damping * omega * t).exp()
            * ((wd * t).cos() + (damping / root) * (wd * t).sin())
    } else {
        1.0 - (-omega * t).exp() * (1.0 + omega * t)
    }
}

/// Simulates the step response for one axis' final P and D gains.
pub fn simulate_step_response(p: u32, d: u32) -> StepResponseTrace {
    let (damping, omega) = second_order_params(p, d);
    let t_step = Array1::linspace(0.0, STEP_SIM_DURATION_S, STEP_SIM_SAMPLES);
    let response = t_step.mapv(|t| second_order_response(damping, omega, t));
    StepResponseTrace {
        time: t_step.mapv(|t| t * 1000.0).to_vec(),
        response: response.to_vec(),
    }
}

/// Simulated traces for all three axes.
pub fn simulate_all_axes(pids: &PidGainSet) -> PerAxis<StepResponseTrace> {
    PerAxis::from_fn(|axis: Axis| {
        let pid = pids.axis(axis);
        simulate_step_response(pid.p, pid.d)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_shape() {
        let trace = simulate_step_response(45, 30);
        assert_eq!(trace.time.len(), 50);
        assert_eq!(trace.response.len(), 50);
        assert_eq!(trace.time[0], 0.0);
        assert!((trace.time[49] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_response_starts_at_zero_for_all_axes() {
        let traces = simulate_all_axes(&PidGainSet::base());
        for (axis, trace) in traces.iter() {
            assert!(trace.response[0].abs() < 1e-12, "{axis} starts at {}", trace.response[0]);
        }
        assert_eq!(traces.len(), 3);
    }

    #[test]
    fn test_damping_branches() {
        // Roll base gains are overdamped
        let (damping, omega) = second_order_params(45, 30);
        assert!(damping >= 1.0);
        let t = 0.05;
        let expected = 1.0 - (-omega * t).exp() * (1.0 + omega * t);
        assert!((second_order_response(damping, omega, t) - expected).abs() < 1e-12);

        // Yaw has no D: undamped oscillation 1 - cos(wt)
        let (damping, omega) = second_order_params(45, 0);
        assert_eq!(damping, 0.0);
        assert!((second_order_response(damping, omega, t) - (1.0 - (omega * t).cos())).abs() < 1e-12);
    }

    #[test]
    fn test_zero_p_uses_default_damping() {
        let (damping, omega) = second_order_params(0, 10);
        assert_eq!(damping, 0.5);
        assert_eq!(omega, 0.0);
        let trace = simulate_step_response(0, 10);
        assert!(trace.response.iter().all(|v| v.abs() < 1e-12));
    }
}
