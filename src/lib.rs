//! Spectra - Frequency-Domain Signal Processing
//!
//! Spectra builds spectral filterbanks and performs FFT-based convolution
//! and deconvolution of single-channel, double-precision sample sequences.
//!
//! # Architecture
//!
//! - [`scales`]: Herz/Mel/Bark/ERB conversions and the critical-band table
//! - [`filters`]: band-pass, FIR and gammatone transfer functions sampled
//!   on a half spectrum
//! - [`filterbank`]: rectangular/triangular banks and their Fourier, Mel,
//!   Bark, critical-band and ERB specializations
//! - [`operations`]: full convolution, Overlap-Add / Overlap-Save block
//!   convolution, deconvolution
//! - [`transform`]: the in-place FFT the operations are built on

pub mod error;
pub mod filterbank;
pub mod filters;
pub mod operations;
pub mod scales;
pub mod signal;
pub mod transform;

pub use error::{Result, SpectraError};
pub use filterbank::{Filterbank, FilterbankConfig};
pub use operations::{
    block_convolve, convolve, deconvolve, deconvolve_complex, overlap_add, overlap_save,
    BlockConvolver, BlockMethod,
};
pub use signal::{ComplexDiscreteSignal, DiscreteSignal};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
