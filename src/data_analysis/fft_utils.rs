// src/data_analysis/fft_utils.rs

use ndarray::Array1;
use realfft::num_complex::Complex64;
use realfft::RealFftPlanner;
use tracing::warn;

/// Number of bins produced by a real FFT of length `n`.
pub fn rfft_len(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        n / 2 + 1
    }
}

/// Computes the Fast Fourier Transform (FFT) of a real-valued signal.
/// Returns the unnormalized complex spectrum (`n / 2 + 1` bins). Handles empty input.
pub fn fft_forward(data: &Array1<f64>) -> Array1<Complex64> {
    if data.is_empty() {
        return Array1::zeros(0);
    }
    let n = data.len();
    let mut input = data.to_vec();
    let planner = RealFftPlanner::<f64>::new().plan_fft_forward(n);
    let mut output = planner.make_output_vec();
    if planner.process(&mut input, &mut output).is_err() {
        warn!("FFT forward processing failed for {} samples.", n);
        return Array1::zeros(rfft_len(n));
    }
    Array1::from(output)
}

/// Calculates the frequencies of the real FFT bins for `n` samples spaced `d` seconds apart.
pub fn fft_rfftfreq(n: usize, d: f64) -> Array1<f64> {
    if n == 0 || d <= 0.0 {
        return Array1::zeros(0);
    }
    let bin_width = 1.0 / (n as f64 * d);
    Array1::from_iter((0..rfft_len(n)).map(|k| k as f64 * bin_width))
}
