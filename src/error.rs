//! Error handling for Spectra
//!
//! Every fallible operation returns [`Result`]. Degenerate frequency ranges are
//! corrected silently and never show up here.

use thiserror::Error;

/// Result type alias for Spectra operations
pub type Result<T> = std::result::Result<T, SpectraError>;

/// Main error type for Spectra operations
#[derive(Error, Debug)]
pub enum SpectraError {
    // Transform Errors
    #[error("Invalid FFT size: {size} (must be a power of two)")]
    InvalidFftSize { size: usize },

    #[error("Buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    // Convolution Errors
    #[error("Kernel length {kernel_len} must not exceed the FFT size {fft_size}")]
    KernelTooLong { kernel_len: usize, fft_size: usize },

    #[error("Kernel contains no samples")]
    EmptyKernel,

    #[error("Kernel length {kernel_len} exceeds signal length {signal_len}")]
    KernelExceedsSignal {
        kernel_len: usize,
        signal_len: usize,
    },

    // Filterbank Errors
    #[error("Invalid filterbank breakpoints: {reason}")]
    InvalidBreakpoints { reason: String },

    #[error("Invalid parameter: {param} = {value} (expected {expected})")]
    InvalidParameter {
        param: String,
        value: String,
        expected: String,
    },

    // Signal Errors
    #[error("Invalid sampling rate: {sampling_rate} Hz")]
    InvalidSamplingRate { sampling_rate: u32 },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SpectraError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SpectraError::InvalidFftSize { .. } => "INVALID_FFT_SIZE",
            SpectraError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            SpectraError::KernelTooLong { .. } => "KERNEL_TOO_LONG",
            SpectraError::EmptyKernel => "EMPTY_KERNEL",
            SpectraError::KernelExceedsSignal { .. } => "KERNEL_EXCEEDS_SIGNAL",
            SpectraError::InvalidBreakpoints { .. } => "INVALID_BREAKPOINTS",
            SpectraError::InvalidParameter { .. } => "INVALID_PARAMETER",
            SpectraError::InvalidSamplingRate { .. } => "INVALID_SAMPLING_RATE",
            SpectraError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::InvalidFftSize { .. } => "Use a power-of-two FFT size (256, 512, 1024, ...)",
            Self::KernelTooLong { .. } => "Increase the FFT size or shorten the kernel",
            Self::EmptyKernel => "Provide a kernel with at least one sample",
            Self::KernelExceedsSignal { .. } => "The signal must be at least as long as the kernel",
            Self::InvalidBreakpoints { .. } => {
                "Use fewer bands, a larger FFT size or a wider frequency range"
            }
            Self::InvalidSamplingRate { .. } => "Sampling rate must be a positive number of Hz",
            _ => "Check the error details and try again",
        }
    }

    pub(crate) fn invalid_parameter(
        param: &str,
        value: impl ToString,
        expected: &str,
    ) -> Self {
        SpectraError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SpectraError::KernelTooLong {
            kernel_len: 600,
            fft_size: 512,
        };
        assert_eq!(err.error_code(), "KERNEL_TOO_LONG");
        assert!(err.to_string().contains("600"));
    }

    #[test]
    fn test_recovery_hints() {
        let err = SpectraError::InvalidFftSize { size: 300 };
        assert!(err.recovery_hint().contains("power-of-two"));

        let err = SpectraError::LengthMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.recovery_hint(), "Check the error details and try again");
    }

    #[test]
    fn test_invalid_parameter_helper() {
        let err = SpectraError::invalid_parameter("filter_count", 0, "at least 1");
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: filter_count = 0 (expected at least 1)"
        );
    }
}
