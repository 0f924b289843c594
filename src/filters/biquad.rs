//! Biquad band-pass filter
//!
//! Coefficients follow the Audio EQ Cookbook band-pass with constant 0 dB
//! peak gain. Reference: https://www.w3.org/2011/audio/audio-eq-cookbook.html

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;

use super::response::{unit_circle, FrequencyResponse, TransferFunction};
use crate::error::{Result, SpectraError};

/// Biquad filter coefficients
/// Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
/// Normalized: all coefficients divided by a0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadFilter {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl BiquadFilter {
    /// Band-pass centered at `frequency`, given as a fraction of the
    /// sampling rate (0 < frequency < 0.5)
    ///
    /// # Errors
    /// `InvalidParameter` if `q` is not strictly positive.
    pub fn band_pass(frequency: f64, q: f64) -> Result<Self> {
        if !(q > 0.0) {
            return Err(SpectraError::invalid_parameter("q", q, "greater than 0"));
        }

        let w0 = 2.0 * PI * frequency;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);

        let a0 = 1.0 + alpha;
        Ok(Self {
            b0: alpha / a0,
            b1: 0.0,
            b2: -alpha / a0,
            a1: -2.0 * cos_w0 / a0,
            a2: (1.0 - alpha) / a0,
        })
    }

    /// Numerator coefficients `[b0, b1, b2]`
    pub fn numerator(&self) -> [f64; 3] {
        [self.b0, self.b1, self.b2]
    }

    /// Denominator coefficients `[1, a1, a2]`
    pub fn denominator(&self) -> [f64; 3] {
        [1.0, self.a1, self.a2]
    }
}

impl TransferFunction for BiquadFilter {
    fn frequency_response(&self, fft_size: usize) -> Result<FrequencyResponse> {
        let values = unit_circle(fft_size)?
            .into_iter()
            .map(|z| {
                let z1 = z.inv();
                let z2 = z1 * z1;
                let num = self.b0 + z1 * self.b1 + z2 * self.b2;
                let den = Complex64::new(1.0, 0.0) + z1 * self.a1 + z2 * self.a2;
                num / den
            })
            .collect();

        Ok(FrequencyResponse::new(fft_size, values))
    }
}
