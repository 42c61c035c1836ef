// src/data_analysis/spectral_analysis.rs

use ndarray::Array1;
use serde::Serialize;
use tracing::{debug, info};

use crate::axis_names::Axis;
use crate::constants::{
    SPECTRUM_BAND_MAX_HZ, SPECTRUM_BAND_MIN_HZ, SPECTRUM_DISPLAY_POINTS, SPECTRUM_MIN_SAMPLES,
};
use crate::data_analysis::fft_utils;
use crate::data_input::channel_resolver::AxisChannelSet;
use crate::data_input::log_table::LogTable;
use crate::types::PerAxis;

/// Dominant in-band noise peak of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoisePeak {
    #[serde(rename = "peak_freq_hz")]
    pub freq_hz: f64,
    #[serde(rename = "peak_amplitude")]
    pub amplitude: f64,
}

/// Gyro amplitude spectrum of one axis, restricted to the analysis band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpectrum {
    /// Display frequencies (Hz), down-sampled to at most ~`SPECTRUM_DISPLAY_POINTS`
    pub freqs: Vec<f64>,
    /// Display amplitudes matching `freqs`
    pub amps: Vec<f64>,
    /// `None` when no FFT bin falls inside the band
    #[serde(skip)]
    pub peak: Option<NoisePeak>,
    /// Sum of all in-band amplitudes (before down-sampling)
    #[serde(skip)]
    pub band_energy: f64,
}

/// Per-axis spectra plus the noise energy summed over every analyzed axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoiseAnalysis {
    pub spectra: PerAxis<AxisSpectrum>,
    pub total_noise_energy: f64,
}

impl NoiseAnalysis {
    pub fn peak(&self, axis: Axis) -> Option<&NoisePeak> {
        self.spectra.get(axis).and_then(|s| s.peak.as_ref())
    }

    /// Peak amplitude of an axis, 0 when the axis has no recorded peak
    pub fn peak_amplitude(&self, axis: Axis) -> f64 {
        self.peak(axis).map_or(0.0, |p| p.amplitude)
    }

    /// Recorded peaks, for the `noise_analysis` section of the report
    pub fn peaks(&self) -> PerAxis<NoisePeak> {
        PerAxis(Axis::ALL.map(|axis| self.peak(axis).copied()))
    }
}

/// Computes the in-band amplitude spectrum of a gyro trace.
///
/// Amplitudes are `2/N * |X_k|` over the non-negative half of the FFT, kept for bins with
/// `SPECTRUM_BAND_MIN_HZ < f < SPECTRUM_BAND_MAX_HZ`. Returns `None` when fewer than
/// `SPECTRUM_MIN_SAMPLES` samples are available.
pub fn calculate_axis_spectrum(samples: &[f64], sample_rate: f64) -> Option<AxisSpectrum> {
    let n = samples.len();
    if n < SPECTRUM_MIN_SAMPLES {
        return None;
    }

    let spectrum = fft_utils::fft_forward(&Array1::from(samples.to_vec()));
    let frequencies = fft_utils::fft_rfftfreq(n, 1.0 / sample_rate);
    let scale = 2.0 / n as f64;
    let half = (n / 2).min(spectrum.len()).min(frequencies.len());

    let (band_freqs, band_amps): (Vec<f64>, Vec<f64>) = (0..half)
        .filter(|&k| frequencies[k] > SPECTRUM_BAND_MIN_HZ && frequencies[k] < SPECTRUM_BAND_MAX_HZ)
        .map(|k| (frequencies[k], spectrum[k].norm() * scale))
        .unzip();

    // First maximum wins ties
    let peak = band_freqs
        .iter()
        .zip(band_amps.iter())
        .fold(None::<NoisePeak>, |best, (&freq_hz, &amplitude)| match best {
            Some(b) if b.amplitude >= amplitude => Some(b),
            _ => Some(NoisePeak { freq_hz, amplitude }),
        });
    let band_energy: f64 = band_amps.iter().sum();

    let step = (band_freqs.len() / SPECTRUM_DISPLAY_POINTS).max(1);
    Some(AxisSpectrum {
        freqs: band_freqs.iter().step_by(step).copied().collect(),
        amps: band_amps.iter().step_by(step).copied().collect(),
        peak,
        band_energy,
    })
}

/// Runs the spectral analysis for every axis with a gyro column.
///
/// Missing samples are dropped before the FFT. The total noise energy is folded over
/// the analyzed axes.
pub fn analyze_noise(table: &LogTable, channels: &AxisChannelSet, sample_rate: f64) -> NoiseAnalysis {
    let analysis = Axis::ALL
        .into_iter()
        .filter_map(|axis| {
            let gyro_col = channels.gyro(axis)?;
            let samples: Vec<f64> = table.values(gyro_col).iter().flatten().copied().collect();
            match calculate_axis_spectrum(&samples, sample_rate) {
                Some(spectrum) => Some((axis, spectrum)),
                None => {
                    debug!(
                        "  Skipping {} spectrum: {} samples (need at least {}).",
                        axis,
                        samples.len(),
                        SPECTRUM_MIN_SAMPLES
                    );
                    None
                }
            }
        })
        .fold(NoiseAnalysis::default(), |mut acc, (axis, spectrum)| {
            match spectrum.peak {
                Some(peak) => debug!(
                    "  {} Gyro Spectrum: Primary Peak value {:.2} at {:.1} Hz",
                    axis, peak.amplitude, peak.freq_hz
                ),
                None => debug!("  {} Gyro Spectrum: No bins inside the analysis band.", axis),
            }
            acc.total_noise_energy += spectrum.band_energy;
            acc.spectra.set(axis, spectrum);
            acc
        });

    info!(
        "Spectral analysis: {} axes analyzed, total in-band noise energy {:.2}",
        analysis.spectra.len(),
        analysis.total_noise_energy
    );
    analysis
}
