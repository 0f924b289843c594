//! Gammatone Filter (ERB bank member)
//!
//! Closed-form pole/zero description of a 4th-order gammatone filter after
//! Slaney (1993), "An Efficient Implementation of the Patterson-Holdsworth
//! Auditory Filter Bank". The response is evaluated directly from the pole,
//! four real zeros and the DC gain normalization, with no generic filter
//! design step in between.
//!
//! The magnitude at unit-circle point `u` is
//!   |H(u)| = T^4 / gain * prod_k |u - z_k| * |(p - u)^2|^-4

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;

use super::response::{unit_circle, FrequencyResponse, TransferFunction};
use crate::error::{Result, SpectraError};
use crate::scales::{erb_bandwidth, EAR_Q, MIN_BANDWIDTH};

/// Bandwidth scale factor of the 4th-order gammatone
const BANDWIDTH_FACTOR: f64 = 1.019;

/// Pole, zeros and gain of one gammatone filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammatoneFilter {
    center_freq: f64,
    sampling_rate: f64,
    zeros: [f64; 4],
    pole: Complex64,
    gain: f64,
}

impl GammatoneFilter {
    /// Derive the filter centered at `center_freq` (Hz)
    pub fn new(center_freq: f64, sampling_rate: f64) -> Result<Self> {
        if !(sampling_rate > 0.0) {
            return Err(SpectraError::invalid_parameter(
                "sampling_rate",
                sampling_rate,
                "greater than 0",
            ));
        }

        let t = 1.0 / sampling_rate;
        let cf = center_freq;
        let b = BANDWIDTH_FACTOR * 2.0 * PI * erb_bandwidth(cf);

        let theta = 2.0 * PI * cf * t;
        let pole = Complex64::from_polar((-b * t).exp(), theta);

        let sqr_p = (3.0 + 2f64.powf(1.5)).sqrt();
        let sqr_m = (3.0 - 2f64.powf(1.5)).sqrt();

        let sin_cf = theta.sin();
        let cos_cf = theta.cos();
        let decay = (b * t).exp();
        let gt_cos = 2.0 * t * cos_cf / decay;
        let gt_sin = t * sin_cf / decay;

        let a11 = -(gt_cos + 2.0 * sqr_p * gt_sin) / 2.0;
        let a12 = -(gt_cos - 2.0 * sqr_p * gt_sin) / 2.0;
        let a13 = -(gt_cos + 2.0 * sqr_m * gt_sin) / 2.0;
        let a14 = -(gt_cos - 2.0 * sqr_m * gt_sin) / 2.0;
        let zeros = [-a11 / t, -a12 / t, -a13 / t, -a14 / t];

        let j = Complex64::i();
        let g1 = -2.0 * (4.0 * j * cf * PI * t).exp() * t;
        let g2 = 2.0 * (-(b * t) + 2.0 * j * cf * PI * t).exp() * t;
        let cx_exp = (4.0 * j * cf * PI * t).exp();

        let numerator = (g1 + g2 * (cos_cf - sqr_m * sin_cf))
            * (g1 + g2 * (cos_cf + sqr_m * sin_cf))
            * (g1 + g2 * (cos_cf - sqr_p * sin_cf))
            * (g1 + g2 * (cos_cf + sqr_p * sin_cf));
        let denominator =
            (-2.0 / (2.0 * b * t).exp() - 2.0 * cx_exp + 2.0 * (1.0 + cx_exp) / decay).powi(4);
        let gain = (numerator / denominator).norm();

        Ok(Self {
            center_freq,
            sampling_rate,
            zeros,
            pole,
            gain,
        })
    }

    /// Center frequency in Hz
    pub fn center_freq(&self) -> f64 {
        self.center_freq
    }

    /// The four real zeros
    pub fn zeros(&self) -> [f64; 4] {
        self.zeros
    }

    /// The (repeated) complex pole
    pub fn pole(&self) -> Complex64 {
        self.pole
    }

    /// DC gain normalization constant
    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl TransferFunction for GammatoneFilter {
    fn frequency_response(&self, fft_size: usize) -> Result<FrequencyResponse> {
        let t = 1.0 / self.sampling_rate;
        let scale = t.powi(4) / self.gain;

        let values = unit_circle(fft_size)?
            .into_iter()
            .map(|u| {
                let zeros: Complex64 = self.zeros.iter().map(|&z| u - z).product();
                let pole_term = (self.pole - u) * (self.pole - u);
                zeros * scale / pole_term.powi(4)
            })
            .collect();

        Ok(FrequencyResponse::new(fft_size, values))
    }
}

/// ERB-rate spaced center frequencies, ascending from `low_freq` towards
/// `high_freq`
///
/// The first center equals `low_freq`; the last stays one ERB step below
/// `high_freq`.
pub fn erb_center_frequencies(count: usize, low_freq: f64, high_freq: f64) -> Vec<f64> {
    let bw = EAR_Q * MIN_BANDWIDTH;
    let step = ((low_freq + bw).ln() - (high_freq + bw).ln()) / count as f64;

    (1..=count)
        .rev()
        .map(|i| -bw + (i as f64 * step).exp() * (high_freq + bw))
        .collect()
}
