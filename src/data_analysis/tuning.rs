// src/data_analysis/tuning.rs
//
// Heuristic starting tune: size-scaled base PIDs, a filter slider driven by pilot
// style and gyro noise energy, and gyro notch suggestions for strong noise peaks.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::axis_names::{Axis, AXIS_COUNT};
use crate::constants::{
    BASE_PIDS, FILTER_SLIDER_BASE, FILTER_SLIDER_MAX, FILTER_SLIDER_MIN, LARGE_FRAME_MIN_IN,
    LARGE_FRAME_MULTIPLIER, MICRO_PROP_MAX_MM, MICRO_PROP_MULTIPLIER, MID_FRAME_MAX_IN,
    MID_FRAME_MULTIPLIER, NOISE_ENERGY_HIGH, NOISE_ENERGY_LOW, NOISE_OFFSET_HIGH,
    NOISE_OFFSET_LOW, NOTCH_CUTOFF_OFFSET_HZ, NOTCH_MIN_PEAK_AMPLITUDE, SMALL_FRAME_MAX_IN,
    SMALL_FRAME_MULTIPLIER, STYLE_OFFSET_CINEMATIC, STYLE_OFFSET_RACING,
};
use crate::data_analysis::spectral_analysis::NoiseAnalysis;

/// Pilot preference that biases the filter slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TuningStyle {
    #[default]
    Freestyle,
    Cinematic,
    Racing,
}

impl TuningStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            TuningStyle::Freestyle => "freestyle",
            TuningStyle::Cinematic => "cinematic",
            TuningStyle::Racing => "racing",
        }
    }

    /// Filter slider offset for this style
    pub fn slider_offset(self) -> f64 {
        match self {
            TuningStyle::Freestyle => 0.0,
            TuningStyle::Cinematic => STYLE_OFFSET_CINEMATIC,
            TuningStyle::Racing => STYLE_OFFSET_RACING,
        }
    }

    /// Parses a style name, falling back to freestyle for anything unrecognized.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|err| {
            warn!("{}; using freestyle", err);
            TuningStyle::default()
        })
    }
}

impl FromStr for TuningStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "freestyle" => Ok(TuningStyle::Freestyle),
            "cinematic" => Ok(TuningStyle::Cinematic),
            "racing" => Ok(TuningStyle::Racing),
            other => Err(format!("Unknown tuning style '{other}'")),
        }
    }
}

impl std::fmt::Display for TuningStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle parameters declared by the pilot. Echoed back in the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleConfig {
    /// Propeller size in mm ("65mm") or frame size in inches ("5\"", "5in")
    pub size: Option<String>,
    pub weight: Option<String>,
    pub style: TuningStyle,
}

impl VehicleConfig {
    /// Builds a config from raw user strings. Blank strings count as absent.
    pub fn new(weight: Option<&str>, size: Option<&str>, tuning_style: &str) -> Self {
        let non_blank = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            size: non_blank(size),
            weight: non_blank(weight),
            style: TuningStyle::parse_or_default(tuning_style),
        }
    }

    pub fn pid_multiplier(&self) -> f64 {
        size_multiplier(self.size.as_deref())
    }
}

/// P/I/D gains for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisPid {
    pub p: u32,
    pub i: u32,
    pub d: u32,
}

/// Gains for Roll, Pitch and Yaw. Serializes as `{"roll": {...}, "pitch": {...}, "yaw": {...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PidGainSet(pub [AxisPid; AXIS_COUNT]);

impl PidGainSet {
    pub fn base() -> Self {
        PidGainSet(BASE_PIDS.map(|[p, i, d]| AxisPid { p, i, d }))
    }

    /// Scales P and D by `multiplier`, truncating. I is left untouched.
    pub fn scaled(&self, multiplier: f64) -> Self {
        PidGainSet(self.0.map(|pid| AxisPid {
            p: (pid.p as f64 * multiplier) as u32,
            i: pid.i,
            d: (pid.d as f64 * multiplier) as u32,
        }))
    }

    pub fn axis(&self, axis: Axis) -> &AxisPid {
        &self.0[axis.index()]
    }
}

impl Serialize for PidGainSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AXIS_COUNT))?;
        for axis in Axis::ALL {
            map.serialize_entry(axis.key(), self.axis(axis))?;
        }
        map.end()
    }
}

/// A gyro notch suggestion targeting an axis' dominant noise peak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotchFilterSpec {
    #[serde(rename = "type")]
    pub filter_type: &'static str,
    pub axis: Axis,
    pub center_hz: u32,
    pub cutoff_hz: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuningRecommendation {
    pub filters: Vec<NotchFilterSpec>,
    /// Slider rounded to 2 decimals for reporting
    pub filter_slider: f64,
    pub pids: PidGainSet,
    /// Unrounded slider, used by the latency estimate
    #[serde(skip)]
    pub filter_slider_raw: f64,
}

/// PID multiplier from the declared size.
///
/// | unit | size  | multiplier |
/// |------|-------|------------|
/// | mm   | <= 75 | 1.8        |
/// | in   | <= 2.5| 1.5        |
/// | in   | <= 3.5| 1.2        |
/// | in   | >= 6  | 0.8        |
///
/// Anything else, including a missing or unparseable size, gives 1.0.
pub fn size_multiplier(size: Option<&str>) -> f64 {
    let Some(size) = size.map(str::trim).filter(|s| !s.is_empty()) else {
        return 1.0;
    };
    let lower = size.to_lowercase();
    let parse = |value: &str| value.trim().parse::<f64>().ok();

    if let Some(mm) = lower.strip_suffix("mm").and_then(parse) {
        return if mm <= MICRO_PROP_MAX_MM { MICRO_PROP_MULTIPLIER } else { 1.0 };
    }

    let inches = lower
        .strip_suffix('"')
        .or_else(|| lower.strip_suffix("inch"))
        .or_else(|| lower.strip_suffix("in"))
        .and_then(parse);
    match inches {
        Some(v) if v <= SMALL_FRAME_MAX_IN => SMALL_FRAME_MULTIPLIER,
        Some(v) if v <= MID_FRAME_MAX_IN => MID_FRAME_MULTIPLIER,
        Some(v) if v >= LARGE_FRAME_MIN_IN => LARGE_FRAME_MULTIPLIER,
        Some(_) => 1.0,
        None => {
            debug!("Size '{}' not recognized; PIDs left unscaled", size);
            1.0
        }
    }
}

/// Filter slider offset from the total in-band noise energy.
pub fn noise_slider_offset(total_noise_energy: f64) -> f64 {
    if total_noise_energy > NOISE_ENERGY_HIGH {
        NOISE_OFFSET_HIGH
    } else if total_noise_energy < NOISE_ENERGY_LOW {
        NOISE_OFFSET_LOW
    } else {
        0.0
    }
}

/// Unrounded filter slider, clamped to `[FILTER_SLIDER_MIN, FILTER_SLIDER_MAX]`.
pub fn calculate_filter_slider(style: TuningStyle, total_noise_energy: f64) -> f64 {
    (FILTER_SLIDER_BASE + style.slider_offset() + noise_slider_offset(total_noise_energy))
        .clamp(FILTER_SLIDER_MIN, FILTER_SLIDER_MAX)
}

/// Notch suggestions for every axis whose peak amplitude exceeds `NOTCH_MIN_PEAK_AMPLITUDE`.
pub fn recommend_notches(noise: &NoiseAnalysis) -> Vec<NotchFilterSpec> {
    Axis::ALL
        .into_iter()
        .filter_map(|axis| {
            let peak = noise.peak(axis)?;
            if peak.amplitude <= NOTCH_MIN_PEAK_AMPLITUDE {
                return None;
            }
            let center_hz = peak.freq_hz.max(0.0).floor() as u32;
            Some(NotchFilterSpec {
                filter_type: "gyro_notch",
                axis,
                center_hz,
                cutoff_hz: center_hz.saturating_sub(NOTCH_CUTOFF_OFFSET_HZ),
            })
        })
        .collect()
}

/// Combines vehicle size, pilot style and measured noise into a starting tune.
pub fn recommend_tune(config: &VehicleConfig, noise: &NoiseAnalysis) -> TuningRecommendation {
    let pid_multiplier = config.pid_multiplier();
    let pids = PidGainSet::base().scaled(pid_multiplier);
    let filter_slider_raw = calculate_filter_slider(config.style, noise.total_noise_energy);
    let filters = recommend_notches(noise);

    info!(
        "Tune: PID multiplier {:.2}, filter slider {:.2} ({} style), {} notch suggestion(s)",
        pid_multiplier,
        filter_slider_raw,
        config.style,
        filters.len()
    );

    TuningRecommendation {
        filters,
        filter_slider: round_to(filter_slider_raw, 2),
        pids,
        filter_slider_raw,
    }
}

/// Rounds to a fixed number of decimals for reporting. Halves go to the even digit.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::spectral_analysis::{AxisSpectrum, NoisePeak};

    fn noise_with_peaks(peaks: &[(Axis, f64, f64)], total: f64) -> NoiseAnalysis {
        let mut noise = NoiseAnalysis {
            total_noise_energy: total,
            ..Default::default()
        };
        for &(axis, freq_hz, amplitude) in peaks {
            noise.spectra.set(
                axis,
                AxisSpectrum {
                    freqs: vec![freq_hz],
                    amps: vec![amplitude],
                    peak: Some(NoisePeak { freq_hz, amplitude }),
                    band_energy: amplitude,
                },
            );
        }
        noise
    }

    #[test]
    fn test_size_multiplier_boundaries() {
        assert_eq!(size_multiplier(Some("75mm")), 1.8);
        assert_eq!(size_multiplier(Some("76mm")), 1.0);
        assert_eq!(size_multiplier(Some("2.5\"")), 1.5);
        assert_eq!(size_multiplier(Some("3.5\"")), 1.2);
        assert_eq!(size_multiplier(Some("6\"")), 0.8);
        assert_eq!(size_multiplier(Some("5\"")), 1.0);
        assert_eq!(size_multiplier(Some("5in")), 1.0);
        assert_eq!(size_multiplier(Some("3 inch")), 1.2);
        assert_eq!(size_multiplier(Some("7IN")), 0.8);
    }

    #[test]
    fn test_size_multiplier_degrades_gracefully() {
        assert_eq!(size_multiplier(None), 1.0);
        assert_eq!(size_multiplier(Some("")), 1.0);
        assert_eq!(size_multiplier(Some("big")), 1.0);
        assert_eq!(size_multiplier(Some("abcmm")), 1.0);
        assert_eq!(size_multiplier(Some("5")), 1.0);
    }

    #[test]
    fn test_pid_scaling_truncates_and_keeps_i() {
        let pids = PidGainSet::base().scaled(1.8);
        assert_eq!(pids.axis(Axis::Roll), &AxisPid { p: 81, i: 85, d: 54 });
        assert_eq!(pids.axis(Axis::Pitch), &AxisPid { p: 86, i: 90, d: 57 });
        assert_eq!(pids.axis(Axis::Yaw), &AxisPid { p: 81, i: 90, d: 0 });
        assert_eq!(PidGainSet::base().scaled(1.0), PidGainSet::base());
    }

    #[test]
    fn test_filter_slider_offsets_and_clamp() {
        assert!((calculate_filter_slider(TuningStyle::Racing, 300.0) - 1.3).abs() < 1e-12);
        assert!((calculate_filter_slider(TuningStyle::Racing, 100.0) - 1.5).abs() < 1e-12);
        assert!((calculate_filter_slider(TuningStyle::Freestyle, 600.0) - 0.6).abs() < 1e-12);
        // 1.0 - 0.3 - 0.4 clamps to the floor
        assert_eq!(calculate_filter_slider(TuningStyle::Cinematic, 600.0), 0.5);
        assert_eq!(noise_slider_offset(500.0), 0.0);
        assert_eq!(noise_slider_offset(150.0), 0.0);
    }

    #[test]
    fn test_notches_only_for_strong_peaks() {
        let noise = noise_with_peaks(
            &[(Axis::Roll, 150.7, 30.0), (Axis::Pitch, 210.0, 15.0), (Axis::Yaw, 25.3, 16.0)],
            61.0,
        );
        let notches = recommend_notches(&noise);
        assert_eq!(notches.len(), 2);
        assert_eq!(notches[0].axis, Axis::Roll);
        assert_eq!(notches[0].center_hz, 150);
        assert_eq!(notches[0].cutoff_hz, 130);
        assert_eq!(notches[1].axis, Axis::Yaw);
        assert_eq!(notches[1].center_hz, 25);
        assert_eq!(notches[1].cutoff_hz, 5);
        for notch in &notches {
            assert_eq!(notch.cutoff_hz, notch.center_hz.saturating_sub(20));
        }
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("Racing".parse::<TuningStyle>(), Ok(TuningStyle::Racing));
        assert!("aggressive".parse::<TuningStyle>().is_err());
        assert_eq!(TuningStyle::parse_or_default("aggressive"), TuningStyle::Freestyle);
        assert_eq!(TuningStyle::parse_or_default(""), TuningStyle::Freestyle);
    }

    #[test]
    fn test_vehicle_config_blank_strings_are_absent() {
        let config = VehicleConfig::new(Some(""), Some(" 65mm "), "cinematic");
        assert_eq!(config.weight, None);
        assert_eq!(config.size.as_deref(), Some("65mm"));
        assert_eq!(config.style, TuningStyle::Cinematic);
        assert_eq!(config.pid_multiplier(), 1.8);
    }

    #[test]
    fn test_recommendation_json_shape() {
        let config = VehicleConfig::new(None, Some("5in"), "racing");
        let noise = noise_with_peaks(&[(Axis::Roll, 150.0, 30.0)], 30.0);
        let rec = recommend_tune(&config, &noise);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["filter_slider"], 1.5);
        assert_eq!(json["pids"]["pitch"]["p"], 48);
        assert_eq!(json["filters"][0]["type"], "gyro_notch");
        assert_eq!(json["filters"][0]["axis"], "roll");
        assert!(json.get("filter_slider_raw").is_none());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(4.0 / 1.3, 1), 3.1);
    }

    #[test]
    fn test_round_to_halves_go_to_even() {
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.75, 1), 0.8);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(-0.25, 1), -0.2);
    }
}
