//! Sample Sequences
//!
//! Single-channel real and complex signals with an associated sampling rate.

mod complex;
mod discrete;

pub use complex::ComplexDiscreteSignal;
pub use discrete::DiscreteSignal;
