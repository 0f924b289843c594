//! Frequency responses sampled on the FFT grid

use rustfft::num_complex::Complex64;

use crate::error::{Result, SpectraError};

/// Complex frequency response at `fft_size / 2 + 1` bins from DC to Nyquist
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    fft_size: usize,
    values: Vec<Complex64>,
}

impl FrequencyResponse {
    pub(crate) fn new(fft_size: usize, values: Vec<Complex64>) -> Self {
        debug_assert_eq!(values.len(), fft_size / 2 + 1);
        Self { fft_size, values }
    }

    /// FFT size the response was sampled for
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of bins (`fft_size / 2 + 1`)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the response holds no bins
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Complex response values
    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    /// Magnitude of each bin
    pub fn magnitude(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.norm()).collect()
    }
}

/// A linear time-invariant filter whose response can be sampled
pub trait TransferFunction {
    /// Evaluate the response at `fft_size / 2 + 1` linearly spaced bins
    fn frequency_response(&self, fft_size: usize) -> Result<FrequencyResponse>;
}

/// Points `e^{j 2 pi k / fft_size}` for `k = 0..=fft_size / 2`
pub(crate) fn unit_circle(fft_size: usize) -> Result<Vec<Complex64>> {
    if fft_size < 2 {
        return Err(SpectraError::invalid_parameter(
            "fft_size",
            fft_size,
            "at least 2",
        ));
    }
    let step = 2.0 * std::f64::consts::PI / fft_size as f64;
    Ok((0..=fft_size / 2)
        .map(|k| Complex64::from_polar(1.0, step * k as f64))
        .collect())
}
