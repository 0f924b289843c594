//! Frequency-domain deconvolution

use log::warn;
use rustfft::num_complex::Complex64;

use crate::error::{Result, SpectraError};
use crate::signal::{ComplexDiscreteSignal, DiscreteSignal};
use crate::transform::{next_power_of_two, Fft};

/// Added to the real and imaginary part of every bin of both spectra
/// before division
pub const REGULARIZATION: f64 = 1e-10;

/// Recover `x` from `signal = x * kernel`
///
/// Both sequences are zero-padded to the next power of two of the signal
/// length, offset by [`REGULARIZATION`], divided bin by bin and transformed
/// back. The result holds `N - M + 1` samples.
///
/// Kernels whose spectrum comes near zero make the result unreliable; this
/// is logged as a warning and not treated as an error.
///
/// # Errors
/// - `EmptyKernel` if the kernel has no samples
/// - `KernelExceedsSignal` if the kernel is longer than the signal
pub fn deconvolve_complex(
    signal: &ComplexDiscreteSignal,
    kernel: &ComplexDiscreteSignal,
) -> Result<ComplexDiscreteSignal> {
    if kernel.is_empty() {
        return Err(SpectraError::EmptyKernel);
    }
    if kernel.len() > signal.len() {
        return Err(SpectraError::KernelExceedsSignal {
            kernel_len: kernel.len(),
            signal_len: signal.len(),
        });
    }

    let fft_size = next_power_of_two(signal.len());
    let mut fft = Fft::new(fft_size)?;

    let mut spectrum = signal.to_buffer(fft_size);
    let mut kernel_spectrum = kernel.to_buffer(fft_size);

    fft.forward(&mut spectrum)?;
    fft.forward(&mut kernel_spectrum)?;

    let weak_bins = kernel_spectrum
        .iter()
        .filter(|k| k.norm() < REGULARIZATION)
        .count();
    if weak_bins > 0 {
        warn!(
            "Deconvolution kernel is ill-conditioned: {} of {} bins below {:e}",
            weak_bins, fft_size, REGULARIZATION
        );
    }

    let sampling_rate = signal.sampling_rate();
    let quotient = regularized(sampling_rate, &spectrum)
        .divide(&regularized(sampling_rate, &kernel_spectrum))?;

    let mut spectrum = quotient.to_buffer(fft_size);
    fft.inverse(&mut spectrum)?;

    let scale = 1.0 / fft_size as f64;
    let length = signal.len() - kernel.len() + 1;
    let samples: Vec<Complex64> = spectrum[..length].iter().map(|c| *c * scale).collect();

    Ok(ComplexDiscreteSignal::from_buffer(sampling_rate, &samples))
}

/// Spectrum with [`REGULARIZATION`] added to both parts of every bin
fn regularized(sampling_rate: u32, spectrum: &[Complex64]) -> ComplexDiscreteSignal {
    let offset = Complex64::new(REGULARIZATION, REGULARIZATION);
    let shifted: Vec<Complex64> = spectrum.iter().map(|&c| c + offset).collect();
    ComplexDiscreteSignal::from_buffer(sampling_rate, &shifted)
}

/// Real-valued [`deconvolve_complex`]; the imaginary part of the result is
/// discarded
pub fn deconvolve(signal: &DiscreteSignal, kernel: &DiscreteSignal) -> Result<DiscreteSignal> {
    let result = deconvolve_complex(&signal.to_complex(), &kernel.to_complex())?;
    Ok(result.to_real())
}
