// src/constants.rs

use plotters::style::colors::{BLUE, RED};
use plotters::style::RGBColor;

// Sample rate assumed when the time column is missing or unusable.
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 1000.0;

// Blackbox timestamps are logged in microseconds.
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;
pub const MICROS_PER_MILLI: f64 = 1000.0;

// Header detection: a header line mentions "time" and has more than this many delimiters.
pub const HEADER_MIN_DELIMITERS: usize = 10;
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

// Column name patterns.
pub const GYRO_COLUMN_PATTERN: &str = "gyroADC";
pub const SETPOINT_COLUMN_PATTERN: &str = "setpoint";
pub const TIME_COLUMN_PATTERN: &str = "time";

// --- Spectral analysis ---
pub const SPECTRUM_MIN_SAMPLES: usize = 101; // Axes with fewer samples are skipped
pub const SPECTRUM_BAND_MIN_HZ: f64 = 20.0; // Exclusive
pub const SPECTRUM_BAND_MAX_HZ: f64 = 600.0; // Exclusive
pub const SPECTRUM_DISPLAY_POINTS: usize = 200;

// --- Tuning heuristics ---
// Base PIDs [P, I, D] for Roll, Pitch, Yaw.
pub const BASE_PIDS: [[u32; 3]; 3] = [[45, 85, 30], [48, 90, 32], [45, 90, 0]];

// Size scaling thresholds.
pub const MICRO_PROP_MAX_MM: f64 = 75.0;
pub const MICRO_PROP_MULTIPLIER: f64 = 1.8;
pub const SMALL_FRAME_MAX_IN: f64 = 2.5;
pub const SMALL_FRAME_MULTIPLIER: f64 = 1.5;
pub const MID_FRAME_MAX_IN: f64 = 3.5;
pub const MID_FRAME_MULTIPLIER: f64 = 1.2;
pub const LARGE_FRAME_MIN_IN: f64 = 6.0;
pub const LARGE_FRAME_MULTIPLIER: f64 = 0.8;

// Filter slider.
pub const FILTER_SLIDER_BASE: f64 = 1.0;
pub const FILTER_SLIDER_MIN: f64 = 0.5;
pub const FILTER_SLIDER_MAX: f64 = 2.0;
pub const STYLE_OFFSET_CINEMATIC: f64 = -0.3;
pub const STYLE_OFFSET_RACING: f64 = 0.3;
pub const NOISE_ENERGY_HIGH: f64 = 500.0;
pub const NOISE_ENERGY_LOW: f64 = 150.0;
pub const NOISE_OFFSET_HIGH: f64 = -0.4;
pub const NOISE_OFFSET_LOW: f64 = 0.2;

// Notch recommendation.
pub const NOTCH_MIN_PEAK_AMPLITUDE: f64 = 15.0;
pub const NOTCH_CUTOFF_OFFSET_HZ: u32 = 20;

// --- Step response simulation ---
pub const STEP_SIM_DURATION_S: f64 = 0.1;
pub const STEP_SIM_SAMPLES: usize = 50;
pub const STEP_SIM_DEFAULT_DAMPING: f64 = 0.5; // Used when P is zero

// --- Safety metrics ---
pub const LATENCY_BASE_MS: f64 = 4.0;
pub const HEAT_RISK_DIVISOR: f64 = 10.0;
pub const HEAT_RISK_MAX: f64 = 100.0;
pub const OSCILLATION_MODERATE_AMPLITUDE: f64 = 20.0;
pub const OSCILLATION_HIGH_AMPLITUDE: f64 = 50.0;

// --- Raw snippet ---
pub const SNIPPET_MAX_ROWS: usize = 500;

// --- Report charts ---
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 12;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 20;
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;

pub const COLOR_SPECTRUM: &RGBColor = &BLUE;
pub const COLOR_NOTCH_MARKER: &RGBColor = &RED;
pub const COLOR_STEP_RESPONSE: &RGBColor = &RED;
pub const COLOR_SETPOINT: RGBColor = RGBColor(255, 152, 0); // Orange
pub const COLOR_GYRO: RGBColor = RGBColor(3, 169, 244); // Light blue

// src/constants.rs
