//! In-place complex FFT of a fixed power-of-two size
//!
//! Both directions are unnormalized: running `forward` then `inverse` scales
//! the data by `size`. Callers apply the `1/size` factor where they need it.

use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex64;
use rustfft::{Fft as RustFft, FftPlanner};

use crate::error::{Result, SpectraError};

/// Planned forward/inverse transform pair with reusable scratch space
#[derive(Clone)]
pub struct Fft {
    size: usize,
    forward: Arc<dyn RustFft<f64>>,
    inverse: Arc<dyn RustFft<f64>>,
    scratch: Vec<Complex64>,
}

impl fmt::Debug for Fft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fft").field("size", &self.size).finish()
    }
}

impl Fft {
    /// Plan transforms of `size` points
    ///
    /// # Errors
    /// `InvalidFftSize` unless `size` is a non-zero power of two.
    pub fn new(size: usize) -> Result<Self> {
        if !is_power_of_two(size) {
            return Err(SpectraError::InvalidFftSize { size });
        }

        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);

        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        Ok(Self {
            size,
            forward,
            inverse,
            scratch: vec![Complex64::new(0.0, 0.0); scratch_len],
        })
    }

    /// Transform size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Unnormalized forward transform, in place
    pub fn forward(&mut self, buffer: &mut [Complex64]) -> Result<()> {
        self.check_len(buffer)?;
        self.forward.process_with_scratch(buffer, &mut self.scratch);
        Ok(())
    }

    /// Unnormalized inverse transform, in place
    pub fn inverse(&mut self, buffer: &mut [Complex64]) -> Result<()> {
        self.check_len(buffer)?;
        self.inverse.process_with_scratch(buffer, &mut self.scratch);
        Ok(())
    }

    fn check_len(&self, buffer: &[Complex64]) -> Result<()> {
        if buffer.len() != self.size {
            return Err(SpectraError::LengthMismatch {
                expected: self.size,
                actual: buffer.len(),
            });
        }
        Ok(())
    }
}

/// Whether `n` is a non-zero power of two
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Smallest power of two that is `>= n` (1 for `n == 0`)
#[inline]
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(matches!(
            Fft::new(300),
            Err(SpectraError::InvalidFftSize { size: 300 })
        ));
        assert!(Fft::new(0).is_err());
    }

    #[test]
    fn test_rejects_wrong_buffer_length() {
        let mut fft = Fft::new(8).unwrap();
        let mut buffer = vec![Complex64::new(0.0, 0.0); 4];
        assert!(matches!(
            fft.forward(&mut buffer),
            Err(SpectraError::LengthMismatch {
                expected: 8,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_impulse_has_flat_spectrum() {
        let mut fft = Fft::new(16).unwrap();
        let mut buffer = vec![Complex64::new(0.0, 0.0); 16];
        buffer[0].re = 1.0;

        fft.forward(&mut buffer).unwrap();

        for bin in &buffer {
            assert_abs_diff_eq!(bin.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(bin.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_inverse_is_unnormalized() {
        let mut fft = Fft::new(32).unwrap();
        let original: Vec<Complex64> = (0..32)
            .map(|i| Complex64::new((i as f64 * 0.3).sin(), 0.0))
            .collect();
        let mut buffer = original.clone();

        fft.forward(&mut buffer).unwrap();
        fft.inverse(&mut buffer).unwrap();

        for (x, y) in original.iter().zip(&buffer) {
            assert_abs_diff_eq!(x.re * 32.0, y.re, epsilon = 1e-9);
            assert_abs_diff_eq!(y.im, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_power_of_two_helpers() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(1024));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(12));
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(5), 8);
        assert_eq!(next_power_of_two(16), 16);
    }
}
