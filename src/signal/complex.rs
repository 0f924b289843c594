//! Complex-valued sample sequence

use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpectraError};
use crate::signal::discrete::validate_sampling_rate;
use crate::signal::DiscreteSignal;

/// Complex sample sequence stored as parallel real/imaginary arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawComplexDiscreteSignal")]
pub struct ComplexDiscreteSignal {
    sampling_rate: u32,
    real: Vec<f64>,
    imag: Vec<f64>,
}

impl ComplexDiscreteSignal {
    /// Create a complex signal from its real and imaginary parts
    ///
    /// # Errors
    /// `LengthMismatch` if the parts differ in length, `InvalidSamplingRate`
    /// if the rate is zero.
    pub fn new(sampling_rate: u32, real: Vec<f64>, imag: Vec<f64>) -> Result<Self> {
        validate_sampling_rate(sampling_rate)?;
        if real.len() != imag.len() {
            return Err(SpectraError::LengthMismatch {
                expected: real.len(),
                actual: imag.len(),
            });
        }
        Ok(Self {
            sampling_rate,
            real,
            imag,
        })
    }

    /// Promote a real signal (imaginary part set to zero)
    pub fn from_real(signal: &DiscreteSignal) -> Self {
        Self {
            sampling_rate: signal.sampling_rate(),
            real: signal.samples().to_vec(),
            imag: vec![0.0; signal.len()],
        }
    }

    /// Split a complex buffer into real and imaginary parts
    pub(crate) fn from_buffer(sampling_rate: u32, buffer: &[Complex64]) -> Self {
        Self {
            sampling_rate,
            real: buffer.iter().map(|c| c.re).collect(),
            imag: buffer.iter().map(|c| c.im).collect(),
        }
    }

    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.real.len()
    }

    /// Whether the signal holds no samples
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Real parts
    pub fn real(&self) -> &[f64] {
        &self.real
    }

    /// Imaginary parts
    pub fn imag(&self) -> &[f64] {
        &self.imag
    }

    /// Interleave into a complex buffer of `length` (zero-padded or truncated)
    pub fn to_buffer(&self, length: usize) -> Vec<Complex64> {
        let mut buffer = vec![Complex64::new(0.0, 0.0); length];
        for (dst, (&re, &im)) in buffer.iter_mut().zip(self.real.iter().zip(&self.imag)) {
            *dst = Complex64::new(re, im);
        }
        buffer
    }

    /// Elementwise complex division `self / divisor`
    ///
    /// No regularization is applied here; a zero divisor sample yields
    /// non-finite values.
    pub fn divide(&self, divisor: &ComplexDiscreteSignal) -> Result<Self> {
        if divisor.len() != self.len() {
            return Err(SpectraError::LengthMismatch {
                expected: self.len(),
                actual: divisor.len(),
            });
        }

        let mut real = Vec::with_capacity(self.len());
        let mut imag = Vec::with_capacity(self.len());
        for i in 0..self.len() {
            let q = Complex64::new(self.real[i], self.imag[i])
                / Complex64::new(divisor.real[i], divisor.imag[i]);
            real.push(q.re);
            imag.push(q.im);
        }

        Ok(Self {
            sampling_rate: self.sampling_rate,
            real,
            imag,
        })
    }

    /// Discard the imaginary part
    pub fn to_real(&self) -> DiscreteSignal {
        DiscreteSignal::from_parts(self.sampling_rate, self.real.clone())
    }
}

/// Unchecked wire form, validated through [`ComplexDiscreteSignal::new`]
#[derive(Deserialize)]
struct RawComplexDiscreteSignal {
    sampling_rate: u32,
    real: Vec<f64>,
    imag: Vec<f64>,
}

impl TryFrom<RawComplexDiscreteSignal> for ComplexDiscreteSignal {
    type Error = SpectraError;

    fn try_from(raw: RawComplexDiscreteSignal) -> Result<Self> {
        Self::new(raw.sampling_rate, raw.real, raw.imag)
    }
}
