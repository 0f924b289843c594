//! Transform Primitives
//!
//! FFT backed by `rustfft`, planned once per size.

mod fft;

pub use fft::{is_power_of_two, next_power_of_two, Fft};
