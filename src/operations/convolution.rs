//! Full linear convolution via a single FFT

use rustfft::num_complex::Complex64;

use crate::error::{Result, SpectraError};
use crate::signal::DiscreteSignal;
use crate::transform::{next_power_of_two, Fft};

/// Linear convolution `signal * kernel` of length `N + M - 1`
///
/// Both sequences are zero-padded to the next power of two that holds the
/// full result, so the circular product equals the linear one. The output
/// carries the signal's sampling rate.
pub fn convolve(signal: &DiscreteSignal, kernel: &DiscreteSignal) -> Result<DiscreteSignal> {
    if kernel.is_empty() {
        return Err(SpectraError::EmptyKernel);
    }
    if signal.is_empty() {
        return Ok(DiscreteSignal::from_parts(signal.sampling_rate(), Vec::new()));
    }

    let length = signal.len() + kernel.len() - 1;
    let fft_size = next_power_of_two(length);
    let mut fft = Fft::new(fft_size)?;

    let mut spectrum = signal.to_buffer(fft_size);
    let mut kernel_spectrum = kernel.to_buffer(fft_size);

    fft.forward(&mut spectrum)?;
    fft.forward(&mut kernel_spectrum)?;

    let scale = 1.0 / fft_size as f64;
    multiply_spectra(&mut spectrum, &kernel_spectrum, scale);

    fft.inverse(&mut spectrum)?;

    let samples = spectrum[..length].iter().map(|c| c.re).collect();
    Ok(DiscreteSignal::from_parts(signal.sampling_rate(), samples))
}

/// `block[j] = block[j] * kernel[j] * scale` for every bin
#[inline]
pub(crate) fn multiply_spectra(block: &mut [Complex64], kernel: &[Complex64], scale: f64) {
    for (b, &k) in block.iter_mut().zip(kernel) {
        *b = *b * k * scale;
    }
}
