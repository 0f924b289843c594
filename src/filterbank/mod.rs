//! Spectral Filterbanks
//!
//! A filterbank is an ordered set of per-band weight vectors over the bins
//! of a half spectrum (`fft_size / 2 + 1` bins, DC to Nyquist). Bands are
//! ordered by ascending center frequency.
//!
//! Builders:
//! - [`rectangular`] / [`triangular`] - generic shapes from bin positions
//! - [`fourier`] - equal-width rectangular bands
//! - [`mel`] / [`bark`] - triangular bands evenly spaced on a perceptual scale
//! - [`critical_bands`] - biquad band-pass filters at critical-band centers
//! - [`critical_bands_rectangular`] - FIR-realized critical-band rectangles
//! - [`erb`] - gammatone filters on ERB-rate spacing

mod banks;
mod config;
mod shapes;

pub use banks::{bark, critical_bands, critical_bands_rectangular, erb, fourier, mel};
pub use config::FilterbankConfig;
pub use shapes::{rectangular, triangular};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpectraError};

/// Ordered collection of band weight vectors of equal length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filterbank {
    bands: Vec<Vec<f64>>,
    band_length: usize,
}

impl Filterbank {
    pub(crate) fn from_bands(bands: Vec<Vec<f64>>, band_length: usize) -> Self {
        debug_assert!(bands.iter().all(|band| band.len() == band_length));
        Self { bands, band_length }
    }

    /// Number of bands
    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Whether the bank holds no bands
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Number of frequency bins per band
    pub fn band_length(&self) -> usize {
        self.band_length
    }

    /// Weights of one band
    pub fn band(&self, index: usize) -> Option<&[f64]> {
        self.bands.get(index).map(Vec::as_slice)
    }

    /// All bands in ascending frequency order
    pub fn bands(&self) -> &[Vec<f64>] {
        &self.bands
    }

    /// Iterate over the bands
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.bands.iter().map(Vec::as_slice)
    }

    /// Consume the bank and return its weight vectors
    pub fn into_bands(self) -> Vec<Vec<f64>> {
        self.bands
    }

    /// Weighted sum of `spectrum` under each band
    ///
    /// # Errors
    /// `LengthMismatch` if `spectrum` does not have `band_length` bins.
    pub fn apply(&self, spectrum: &[f64]) -> Result<Vec<f64>> {
        if spectrum.len() != self.band_length {
            return Err(SpectraError::LengthMismatch {
                expected: self.band_length,
                actual: spectrum.len(),
            });
        }

        Ok(self
            .bands
            .iter()
            .map(|band| band.iter().zip(spectrum).map(|(w, s)| w * s).sum())
            .collect())
    }
}

impl<'a> IntoIterator for &'a Filterbank {
    type Item = &'a Vec<f64>;
    type IntoIter = std::slice::Iter<'a, Vec<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sums_band_energy() {
        let bank = rectangular(2, 4, &[0, 2, 4]).unwrap();
        let energies = bank.apply(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(energies, vec![3.0, 7.0]);
    }

    #[test]
    fn test_apply_rejects_wrong_length() {
        let bank = rectangular(2, 4, &[0, 2, 4]).unwrap();
        assert!(matches!(
            bank.apply(&[1.0, 2.0]),
            Err(SpectraError::LengthMismatch {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_accessors() {
        let bank = triangular(1, 5, &[0, 2, 4]).unwrap();
        assert_eq!(bank.band_count(), 1);
        assert_eq!(bank.band_length(), 5);
        assert!(bank.band(1).is_none());
        assert_eq!((&bank).into_iter().count(), 1);
        assert_eq!(bank.into_bands()[0], vec![0.0, 0.5, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let bank = fourier(2, 8).unwrap();
        let json = serde_json::to_string(&bank).unwrap();
        let back: Filterbank = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bank);
    }
}
