//! Convolution and deconvolution
//!
//! - [`convolve`] - full linear convolution in one FFT
//! - [`BlockConvolver`] / [`overlap_add`] / [`overlap_save`] - streaming
//!   block convolution with a fixed FFT size
//! - [`deconvolve`] / [`deconvolve_complex`] - regularized spectral division

mod block;
mod convolution;
mod deconvolution;

pub use block::{block_convolve, overlap_add, overlap_save, BlockConvolver, BlockMethod};
pub use convolution::convolve;
pub use deconvolution::{deconvolve, deconvolve_complex, REGULARIZATION};
