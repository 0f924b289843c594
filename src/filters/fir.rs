//! Linear-phase FIR design by frequency sampling
//!
//! The target magnitude (DC..Nyquist) is turned into a zero-phase impulse
//! response with an inverse FFT, centered in an odd-length kernel and
//! tapered with a Blackman window. The realized response is therefore a
//! smoothed version of the target: sharp band edges become ramps.

use std::f64::consts::TAU;

use rustfft::num_complex::Complex64;

use super::response::{FrequencyResponse, TransferFunction};
use crate::error::{Result, SpectraError};
use crate::transform::Fft;

/// Finite impulse response filter
#[derive(Debug, Clone, PartialEq)]
pub struct FirFilter {
    kernel: Vec<f64>,
}

impl FirFilter {
    /// Wrap an existing kernel
    pub fn new(kernel: Vec<f64>) -> Result<Self> {
        if kernel.is_empty() {
            return Err(SpectraError::EmptyKernel);
        }
        Ok(Self { kernel })
    }

    /// Design a filter with `order` taps whose magnitude approximates `magnitude`
    ///
    /// `magnitude` holds `n / 2 + 1` samples from DC to Nyquist for some
    /// power-of-two `n`; `order` must be odd and smaller than `n`.
    pub fn design(order: usize, magnitude: &[f64]) -> Result<Self> {
        if order % 2 == 0 {
            return Err(SpectraError::invalid_parameter("order", order, "an odd number"));
        }
        if magnitude.len() < 2 {
            return Err(SpectraError::invalid_parameter(
                "magnitude",
                format!("{} bins", magnitude.len()),
                "at least 2 bins",
            ));
        }

        let design_size = (magnitude.len() - 1) * 2;
        if order >= design_size {
            return Err(SpectraError::invalid_parameter(
                "order",
                order,
                &format!("less than {}", design_size),
            ));
        }

        let mut fft = Fft::new(design_size)?;

        // Hermitian zero-phase spectrum
        let mut spectrum = vec![Complex64::new(0.0, 0.0); design_size];
        for (k, &m) in magnitude.iter().enumerate() {
            spectrum[k].re = m;
        }
        for k in magnitude.len()..design_size {
            spectrum[k].re = magnitude[design_size - k];
        }

        fft.inverse(&mut spectrum)?;
        let scale = 1.0 / design_size as f64;

        // Center the circularly symmetric response in the kernel
        let middle = order / 2;
        let mut kernel = vec![0.0; order];
        for k in 0..=middle {
            let h = spectrum[k].re * scale;
            kernel[middle + k] = h;
            kernel[middle - k] = h;
        }

        apply_blackman(&mut kernel);

        Ok(Self { kernel })
    }

    /// Filter taps
    pub fn kernel(&self) -> &[f64] {
        &self.kernel
    }

    /// Number of taps
    pub fn len(&self) -> usize {
        self.kernel.len()
    }

    /// Always false; a filter holds at least one tap
    pub fn is_empty(&self) -> bool {
        self.kernel.is_empty()
    }
}

impl TransferFunction for FirFilter {
    fn frequency_response(&self, fft_size: usize) -> Result<FrequencyResponse> {
        if self.kernel.len() > fft_size {
            return Err(SpectraError::KernelTooLong {
                kernel_len: self.kernel.len(),
                fft_size,
            });
        }

        let mut fft = Fft::new(fft_size)?;
        let mut buffer = vec![Complex64::new(0.0, 0.0); fft_size];
        for (dst, &tap) in buffer.iter_mut().zip(&self.kernel) {
            dst.re = tap;
        }
        fft.forward(&mut buffer)?;
        buffer.truncate(fft_size / 2 + 1);

        Ok(FrequencyResponse::new(fft_size, buffer))
    }
}

/// Multiply by a symmetric Blackman window in place
fn apply_blackman(kernel: &mut [f64]) {
    let size = kernel.len();
    if size < 2 {
        return;
    }

    let scale = TAU / (size - 1) as f64;
    for (i, tap) in kernel.iter_mut().enumerate() {
        let t = i as f64 * scale;
        *tap *= 0.42 - 0.5 * t.cos() + 0.08 * (2.0 * t).cos();
    }
}
