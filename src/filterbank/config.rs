//! Serializable filterbank descriptions

use serde::{Deserialize, Serialize};

use super::{bark, critical_bands, critical_bands_rectangular, erb, fourier, mel, Filterbank};
use crate::error::Result;

/// Q used by the biquad critical-band bank when none is configured
pub const DEFAULT_CRITICAL_BAND_Q: f64 = 2.0;

fn default_q() -> Option<f64> {
    Some(DEFAULT_CRITICAL_BAND_Q)
}

/// Parameters of one filterbank, tagged by `kind`
///
/// Frequencies are in Hz. Omitted `low_freq` / `high_freq` default to 0,
/// which the builders read as "0 Hz" and "Nyquist" respectively.
///
/// ```
/// use spectra::filterbank::FilterbankConfig;
///
/// let config = FilterbankConfig::from_json(
///     r#"{"kind": "mel", "filter_count": 24, "fft_size": 512, "sampling_rate": 16000}"#,
/// ).unwrap();
/// let bank = config.build().unwrap();
/// assert_eq!(bank.band_count(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterbankConfig {
    Fourier {
        filter_count: usize,
        fft_size: usize,
    },
    Mel {
        filter_count: usize,
        fft_size: usize,
        sampling_rate: u32,
        #[serde(default)]
        low_freq: f64,
        #[serde(default)]
        high_freq: f64,
    },
    Bark {
        filter_count: usize,
        fft_size: usize,
        sampling_rate: u32,
        #[serde(default)]
        low_freq: f64,
        #[serde(default)]
        high_freq: f64,
    },
    Erb {
        filter_count: usize,
        fft_size: usize,
        sampling_rate: u32,
        #[serde(default)]
        low_freq: f64,
        #[serde(default)]
        high_freq: f64,
    },
    CriticalBands {
        fft_size: usize,
        sampling_rate: u32,
        #[serde(default)]
        low_freq: f64,
        #[serde(default)]
        high_freq: f64,
        /// `null` derives Q from each band's edges
        #[serde(default = "default_q")]
        q: Option<f64>,
    },
    CriticalBandsRectangular {
        fft_size: usize,
        sampling_rate: u32,
        #[serde(default)]
        low_freq: f64,
        #[serde(default)]
        high_freq: f64,
    },
}

impl FilterbankConfig {
    /// Build the described filterbank
    pub fn build(&self) -> Result<Filterbank> {
        match *self {
            FilterbankConfig::Fourier {
                filter_count,
                fft_size,
            } => fourier(filter_count, fft_size),
            FilterbankConfig::Mel {
                filter_count,
                fft_size,
                sampling_rate,
                low_freq,
                high_freq,
            } => mel(filter_count, fft_size, sampling_rate, low_freq, high_freq),
            FilterbankConfig::Bark {
                filter_count,
                fft_size,
                sampling_rate,
                low_freq,
                high_freq,
            } => bark(filter_count, fft_size, sampling_rate, low_freq, high_freq),
            FilterbankConfig::Erb {
                filter_count,
                fft_size,
                sampling_rate,
                low_freq,
                high_freq,
            } => erb(filter_count, fft_size, sampling_rate, low_freq, high_freq),
            FilterbankConfig::CriticalBands {
                fft_size,
                sampling_rate,
                low_freq,
                high_freq,
                q,
            } => critical_bands(fft_size, sampling_rate, low_freq, high_freq, q),
            FilterbankConfig::CriticalBandsRectangular {
                fft_size,
                sampling_rate,
                low_freq,
                high_freq,
            } => critical_bands_rectangular(fft_size, sampling_rate, low_freq, high_freq),
        }
    }

    /// Kind identifier as used in the `kind` tag
    pub fn kind(&self) -> &'static str {
        match self {
            FilterbankConfig::Fourier { .. } => "fourier",
            FilterbankConfig::Mel { .. } => "mel",
            FilterbankConfig::Bark { .. } => "bark",
            FilterbankConfig::Erb { .. } => "erb",
            FilterbankConfig::CriticalBands { .. } => "critical_bands",
            FilterbankConfig::CriticalBandsRectangular { .. } => "critical_bands_rectangular",
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
