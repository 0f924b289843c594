//! Real-valued sample sequence

use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpectraError};
use crate::signal::ComplexDiscreteSignal;

/// Single-channel, double-precision sample sequence with its sampling rate
///
/// The length is fixed at construction; sample values may be edited in place.
/// Operations in this crate never mutate their inputs and return new signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscreteSignal")]
pub struct DiscreteSignal {
    /// Sampling rate in Hz
    sampling_rate: u32,
    /// Sample data
    samples: Vec<f64>,
}

impl DiscreteSignal {
    /// Create a signal from existing samples
    ///
    /// # Errors
    /// Returns `InvalidSamplingRate` if `sampling_rate` is zero.
    pub fn new(sampling_rate: u32, samples: Vec<f64>) -> Result<Self> {
        validate_sampling_rate(sampling_rate)?;
        Ok(Self {
            sampling_rate,
            samples,
        })
    }

    /// Build from a sampling rate that is already known to be valid
    pub(crate) fn from_parts(sampling_rate: u32, samples: Vec<f64>) -> Self {
        Self {
            sampling_rate,
            samples,
        }
    }

    /// Create a silent signal of the given length
    pub fn zeros(sampling_rate: u32, length: usize) -> Result<Self> {
        Self::new(sampling_rate, vec![0.0; length])
    }

    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sampling_rate as f64
    }

    /// Get a reference to the samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Get a mutable reference to the samples
    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Consume the signal and return its samples
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Promote to a complex signal with zero imaginary part
    pub fn to_complex(&self) -> ComplexDiscreteSignal {
        ComplexDiscreteSignal::from_real(self)
    }

    /// Copy the samples into a complex buffer of `length` (zero-padded)
    pub(crate) fn to_buffer(&self, length: usize) -> Vec<Complex64> {
        let mut buffer = vec![Complex64::new(0.0, 0.0); length];
        for (dst, &src) in buffer.iter_mut().zip(&self.samples) {
            dst.re = src;
        }
        buffer
    }
}

/// Unchecked wire form, validated through [`DiscreteSignal::new`]
#[derive(Deserialize)]
struct RawDiscreteSignal {
    sampling_rate: u32,
    samples: Vec<f64>,
}

impl TryFrom<RawDiscreteSignal> for DiscreteSignal {
    type Error = SpectraError;

    fn try_from(raw: RawDiscreteSignal) -> Result<Self> {
        Self::new(raw.sampling_rate, raw.samples)
    }
}

pub(crate) fn validate_sampling_rate(sampling_rate: u32) -> Result<()> {
    if sampling_rate == 0 {
        return Err(SpectraError::InvalidSamplingRate { sampling_rate });
    }
    Ok(())
}
