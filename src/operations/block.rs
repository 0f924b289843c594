//! Block convolution: Overlap-Add and Overlap-Save
//!
//! Both algorithms convolve a long signal with a kernel of `m <= fft_size`
//! samples in blocks of `fft_size`, advancing by the hop size
//! `fft_size - m + 1`. The output has the input's length and equals the
//! direct-form convolution truncated to that length.
//!
//! The kernel spectrum and the block buffer are allocated once per
//! [`BlockConvolver`] and reused for every block of every signal it
//! processes.

use log::trace;
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::convolution::multiply_spectra;
use crate::error::{Result, SpectraError};
use crate::signal::DiscreteSignal;
use crate::transform::Fft;

/// Block convolution algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockMethod {
    /// Accumulate overlapping block tails
    #[default]
    OverlapAdd,
    /// Discard the wrapped-around head of each block
    OverlapSave,
}

/// Pre-transformed kernel plus reusable scratch for block convolution
#[derive(Debug, Clone)]
pub struct BlockConvolver {
    fft: Fft,
    kernel_len: usize,
    kernel_spectrum: Vec<Complex64>,
    block: Vec<Complex64>,
}

impl BlockConvolver {
    /// Prepare to convolve with `kernel` using blocks of `fft_size`
    ///
    /// # Errors
    /// - `EmptyKernel` if the kernel has no samples
    /// - `KernelTooLong` if the kernel is longer than `fft_size`
    /// - `InvalidFftSize` if `fft_size` is not a power of two
    pub fn new(kernel: &DiscreteSignal, fft_size: usize) -> Result<Self> {
        if kernel.is_empty() {
            return Err(SpectraError::EmptyKernel);
        }
        if kernel.len() > fft_size {
            return Err(SpectraError::KernelTooLong {
                kernel_len: kernel.len(),
                fft_size,
            });
        }

        let mut fft = Fft::new(fft_size)?;
        let mut kernel_spectrum = kernel.to_buffer(fft_size);
        fft.forward(&mut kernel_spectrum)?;

        Ok(Self {
            fft,
            kernel_len: kernel.len(),
            kernel_spectrum,
            block: vec![Complex64::new(0.0, 0.0); fft_size],
        })
    }

    /// Block size
    pub fn fft_size(&self) -> usize {
        self.fft.size()
    }

    /// Kernel length `m`
    pub fn kernel_len(&self) -> usize {
        self.kernel_len
    }

    /// Distance between consecutive blocks, `fft_size - m + 1`
    pub fn hop_size(&self) -> usize {
        self.fft.size() - self.kernel_len + 1
    }

    /// Convolve with the selected algorithm
    pub fn process(
        &mut self,
        signal: &DiscreteSignal,
        method: BlockMethod,
    ) -> Result<DiscreteSignal> {
        match method {
            BlockMethod::OverlapAdd => self.overlap_add(signal),
            BlockMethod::OverlapSave => self.overlap_save(signal),
        }
    }

    /// Overlap-Add block convolution
    pub fn overlap_add(&mut self, signal: &DiscreteSignal) -> Result<DiscreteSignal> {
        let samples = signal.samples();
        let length = samples.len();
        let hop_size = self.hop_size();

        let mut filtered = vec![0.0; length];
        let mut blocks = 0;

        let mut i = 0;
        while i + hop_size < length {
            self.convolve_block(samples, 0, i, hop_size)?;
            self.add_block(&mut filtered, i);
            blocks += 1;
            i += hop_size;
        }

        // last portion of data
        self.convolve_block(samples, 0, i, length - i)?;
        self.add_block(&mut filtered, i);

        trace!(
            "Overlap-add: {} samples, {} full blocks, hop {}",
            length,
            blocks,
            hop_size
        );

        Ok(DiscreteSignal::from_parts(signal.sampling_rate(), filtered))
    }

    /// Overlap-Save block convolution
    pub fn overlap_save(&mut self, signal: &DiscreteSignal) -> Result<DiscreteSignal> {
        let samples = signal.samples();
        let length = samples.len();
        let fft_size = self.fft.size();
        let hop_size = self.hop_size();

        // The signal is read as if preceded by m - 1 zeros
        let lead = self.kernel_len - 1;
        let padded_length = length + lead;

        let mut filtered = vec![0.0; length];
        let mut blocks = 0;

        let mut i = 0;
        while i + fft_size < padded_length {
            self.convolve_block(samples, lead, i, fft_size)?;
            self.save_block(&mut filtered, i);
            blocks += 1;
            i += hop_size;
        }

        // last portion of data
        self.convolve_block(samples, lead, i, padded_length - i)?;
        self.save_block(&mut filtered, i);

        trace!(
            "Overlap-save: {} samples, {} full blocks, hop {}",
            length,
            blocks,
            hop_size
        );

        Ok(DiscreteSignal::from_parts(signal.sampling_rate(), filtered))
    }

    /// Load `count` samples of the lead-padded signal starting at `start`,
    /// zero the rest of the block, and replace it by its circular
    /// convolution with the kernel
    fn convolve_block(
        &mut self,
        samples: &[f64],
        lead: usize,
        start: usize,
        count: usize,
    ) -> Result<()> {
        for (j, slot) in self.block.iter_mut().enumerate() {
            let position = start + j;
            *slot = if j < count && position >= lead {
                Complex64::new(samples[position - lead], 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            };
        }

        let scale = 1.0 / self.fft.size() as f64;

        self.fft.forward(&mut self.block)?;
        multiply_spectra(&mut self.block, &self.kernel_spectrum, scale);
        self.fft.inverse(&mut self.block)?;

        Ok(())
    }

    /// Overlap-Add output step: the first `m - 1` samples overlap the
    /// previous block's tail and are added, the rest are written
    fn add_block(&self, filtered: &mut [f64], start: usize) {
        let overlap = self.kernel_len - 1;
        let end = (start + self.block.len()).min(filtered.len());

        for (j, out) in filtered[start..end].iter_mut().enumerate() {
            if j < overlap {
                *out += self.block[j].re;
            } else {
                *out = self.block[j].re;
            }
        }
    }

    /// Overlap-Save output step: skip the `m - 1` wrapped-around samples and
    /// write the valid ones
    fn save_block(&self, filtered: &mut [f64], start: usize) {
        let skip = self.kernel_len - 1;
        let end = (start + self.hop_size()).min(filtered.len());

        for (out, value) in filtered[start..end].iter_mut().zip(&self.block[skip..]) {
            *out = value.re;
        }
    }
}

/// Overlap-Add convolution of `signal` with `kernel`
pub fn overlap_add(
    signal: &DiscreteSignal,
    kernel: &DiscreteSignal,
    fft_size: usize,
) -> Result<DiscreteSignal> {
    BlockConvolver::new(kernel, fft_size)?.overlap_add(signal)
}

/// Overlap-Save convolution of `signal` with `kernel`
pub fn overlap_save(
    signal: &DiscreteSignal,
    kernel: &DiscreteSignal,
    fft_size: usize,
) -> Result<DiscreteSignal> {
    BlockConvolver::new(kernel, fft_size)?.overlap_save(signal)
}

/// Block convolution with the selected algorithm
pub fn block_convolve(
    signal: &DiscreteSignal,
    kernel: &DiscreteSignal,
    fft_size: usize,
    method: BlockMethod,
) -> Result<DiscreteSignal> {
    BlockConvolver::new(kernel, fft_size)?.process(signal, method)
}
