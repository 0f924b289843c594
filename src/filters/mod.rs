//! Filter Primitives
//!
//! Filters used to shape filterbank bands. Each one exposes its frequency
//! response on the FFT grid through [`TransferFunction`].

mod biquad;
mod fir;
mod gammatone;
mod response;

pub use biquad::BiquadFilter;
pub use fir::FirFilter;
pub use gammatone::{erb_center_frequencies, GammatoneFilter};
pub use response::{FrequencyResponse, TransferFunction};
