//! Frequency-scale specializations of the generic band shapes

use std::f64::consts::{LN_2, PI};

use log::debug;

use super::shapes::{rectangular, triangular};
use super::Filterbank;
use crate::error::{Result, SpectraError};
use crate::filters::{
    erb_center_frequencies, BiquadFilter, FirFilter, GammatoneFilter, TransferFunction,
};
use crate::scales::{
    bark_to_herz, critical_band_frequencies, herz_to_bark, herz_to_mel, mel_to_herz,
    FrequencyRange,
};
use crate::transform::is_power_of_two;

/// Equal-width rectangular bands tiling all `fft_size / 2 + 1` bins
pub fn fourier(filter_count: usize, fft_size: usize) -> Result<Filterbank> {
    if filter_count == 0 {
        return Err(SpectraError::invalid_parameter("filter_count", 0, "at least 1"));
    }
    check_fft_size(fft_size)?;

    let size = fft_size / 2 + 1;
    let edges: Vec<usize> = (0..=filter_count).map(|f| f * size / filter_count).collect();

    rectangular(filter_count, size, &edges)
}

/// Triangular bands evenly spaced on the mel scale
///
/// `high_freq <= low_freq` (including the default 0) selects Nyquist and a
/// negative `low_freq` is clamped to 0.
pub fn mel(
    filter_count: usize,
    fft_size: usize,
    sampling_rate: u32,
    low_freq: f64,
    high_freq: f64,
) -> Result<Filterbank> {
    warped_triangular(
        filter_count,
        fft_size,
        sampling_rate,
        FrequencyRange::resolve(low_freq, high_freq, sampling_rate as f64),
        herz_to_mel,
        mel_to_herz,
    )
}

/// Triangular bands evenly spaced on the Bark scale
pub fn bark(
    filter_count: usize,
    fft_size: usize,
    sampling_rate: u32,
    low_freq: f64,
    high_freq: f64,
) -> Result<Filterbank> {
    warped_triangular(
        filter_count,
        fft_size,
        sampling_rate,
        FrequencyRange::resolve(low_freq, high_freq, sampling_rate as f64),
        herz_to_bark,
        bark_to_herz,
    )
}

fn warped_triangular(
    filter_count: usize,
    fft_size: usize,
    sampling_rate: u32,
    range: FrequencyRange,
    to_scale: fn(f64) -> f64,
    from_scale: fn(f64) -> f64,
) -> Result<Filterbank> {
    check_grid(fft_size, sampling_rate)?;

    let herz_resolution = sampling_rate as f64 / fft_size as f64;
    let start = to_scale(range.low);
    let step = (to_scale(range.high) - start) / (filter_count + 1) as f64;

    let points: Vec<usize> = (0..filter_count + 2)
        .map(|i| herz_to_bin(from_scale(start + i as f64 * step), herz_resolution))
        .collect();

    debug!(
        "Triangular bank: {} bands over {:.1}..{:.1} Hz, bins {:?}",
        filter_count, range.low, range.high, points
    );

    triangular(filter_count, fft_size / 2 + 1, &points)
}

/// Biquad band-pass filters at the critical-band centers inside the range
///
/// With `Some(q)` (q > 0) every band uses that quality factor; otherwise Q is
/// derived from each band's edge bandwidth so the -3 dB points meet the
/// neighbouring edges.
pub fn critical_bands(
    fft_size: usize,
    sampling_rate: u32,
    low_freq: f64,
    high_freq: f64,
    q: Option<f64>,
) -> Result<Filterbank> {
    check_grid(fft_size, sampling_rate)?;

    let fs = sampling_rate as f64;
    let bands = critical_band_frequencies(low_freq, high_freq, fs);
    if bands.is_empty() {
        debug!("Critical band bank is empty for {}..{} Hz", low_freq, high_freq);
    }

    let half_ln2 = LN_2 / 2.0;

    let responses = (0..bands.count())
        .map(|i| {
            let freq = bands.centers[i] / fs;
            let band_q = match q {
                Some(q) if q > 0.0 => q,
                _ => {
                    let omega = 2.0 * PI * freq;
                    let bw = 2.0 * PI * (bands.edges[i + 1] - bands.edges[i]) / fs;
                    1.0 / (2.0 * (half_ln2 * bw * omega / omega.sin()).sinh())
                }
            };

            let filter = BiquadFilter::band_pass(freq, band_q)?;
            Ok(filter.frequency_response(fft_size)?.magnitude())
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Filterbank::from_bands(responses, fft_size / 2 + 1))
}

/// Critical-band rectangles realized as order `fft_size - 1` FIR filters
///
/// Each band reports the magnitude of the designed filter, a trapezoid with
/// smoothed edges, not the ideal rectangle it was designed from.
pub fn critical_bands_rectangular(
    fft_size: usize,
    sampling_rate: u32,
    low_freq: f64,
    high_freq: f64,
) -> Result<Filterbank> {
    check_grid(fft_size, sampling_rate)?;
    if !is_power_of_two(fft_size) {
        return Err(SpectraError::InvalidFftSize { size: fft_size });
    }

    let size = fft_size / 2 + 1;
    let bands = critical_band_frequencies(low_freq, high_freq, sampling_rate as f64);
    if bands.is_empty() {
        debug!("Critical band bank is empty for {}..{} Hz", low_freq, high_freq);
        return Ok(Filterbank::from_bands(Vec::new(), size));
    }

    let herz_resolution = sampling_rate as f64 / fft_size as f64;
    let edges: Vec<usize> = bands
        .edges
        .iter()
        .map(|&f| herz_to_bin(f, herz_resolution).min(size))
        .collect();

    let masks = rectangular(bands.count(), size, &edges)?;

    let responses = masks
        .iter()
        .map(|mask| {
            let filter = FirFilter::design(fft_size - 1, mask)?;
            Ok(filter.frequency_response(fft_size)?.magnitude())
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Filterbank::from_bands(responses, size))
}

/// Gammatone filters on ERB-rate spacing between `low_freq` and `high_freq`
pub fn erb(
    filter_count: usize,
    fft_size: usize,
    sampling_rate: u32,
    low_freq: f64,
    high_freq: f64,
) -> Result<Filterbank> {
    check_grid(fft_size, sampling_rate)?;

    let fs = sampling_rate as f64;
    let range = FrequencyRange::resolve(low_freq, high_freq, fs);
    let centers = erb_center_frequencies(filter_count, range.low, range.high);

    debug!(
        "ERB bank: {} gammatone bands over {:.1}..{:.1} Hz",
        filter_count, range.low, range.high
    );

    let responses = centers
        .iter()
        .map(|&cf| {
            let filter = GammatoneFilter::new(cf, fs)?;
            Ok(filter.frequency_response(fft_size)?.magnitude())
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Filterbank::from_bands(responses, fft_size / 2 + 1))
}

/// Bin index of a frequency: `floor(freq / resolution)`
#[inline]
fn herz_to_bin(freq: f64, herz_resolution: f64) -> usize {
    (freq / herz_resolution).floor().max(0.0) as usize
}

fn check_fft_size(fft_size: usize) -> Result<()> {
    if fft_size < 2 {
        return Err(SpectraError::invalid_parameter("fft_size", fft_size, "at least 2"));
    }
    Ok(())
}

fn check_grid(fft_size: usize, sampling_rate: u32) -> Result<()> {
    check_fft_size(fft_size)?;
    if sampling_rate == 0 {
        return Err(SpectraError::InvalidSamplingRate { sampling_rate });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn peak_bin(band: &[f64]) -> usize {
        band.iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn test_fourier_four_bands_of_eight() {
        let bank = fourier(4, 8).unwrap();
        assert_eq!(bank.band_count(), 4);
        assert_eq!(bank.band_length(), 5);

        assert_eq!(bank.band(0).unwrap(), &[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(bank.band(1).unwrap(), &[0.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(bank.band(2).unwrap(), &[0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(bank.band(3).unwrap(), &[0.0, 0.0, 0.0, 1.0, 1.0]);

        for bin in 0..5 {
            let total: f64 = bank.iter().map(|band| band[bin]).sum();
            assert_eq!(total, 1.0);
        }
    }

    #[test]
    fn test_fourier_rejects_zero_bands() {
        assert!(fourier(0, 512).is_err());
    }

    #[test]
    fn test_mel_bank_shape() {
        let bank = mel(24, 512, 16000, 0.0, 0.0).unwrap();
        assert_eq!(bank.band_count(), 24);
        assert_eq!(bank.band_length(), 257);

        // Breakpoints 0, 2, 5, 7, ... so band 0 peaks at bin 2
        assert_eq!(bank.band(0).unwrap()[2], 1.0);
        assert_eq!(bank.band(0).unwrap()[0], 0.0);
        assert_eq!(bank.band(0).unwrap()[5], 0.0);

        let mut prev = 0;
        for band in bank.iter() {
            let peak = peak_bin(band);
            assert_eq!(band[peak], 1.0);
            assert!(peak > prev);
            prev = peak;
        }
    }

    #[test]
    fn test_mel_band_range() {
        let bank = mel(10, 512, 16000, 300.0, 3400.0).unwrap();
        // First breakpoint is floor(300 / 31.25) = 9
        let first = bank.band(0).unwrap();
        assert!(first[..=9].iter().all(|&w| w == 0.0));
        assert_eq!(first[13], 1.0);
        // Nothing above the last breakpoint (bin 108)
        assert!(bank.iter().all(|band| band[108..].iter().all(|&w| w == 0.0)));
    }

    #[test]
    fn test_mel_negative_low_is_clamped() {
        let clamped = mel(12, 512, 16000, -50.0, 0.0).unwrap();
        let default = mel(12, 512, 16000, 0.0, 8000.0).unwrap();
        assert_eq!(clamped, default);
    }

    #[test]
    fn test_mel_too_many_bands_fails_fast() {
        // 40 bands on a 64-point grid repeat low breakpoints
        let err = mel(40, 64, 16000, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, SpectraError::InvalidBreakpoints { .. }));
    }

    #[test]
    fn test_bark_bank_shape() {
        let bank = bark(16, 512, 16000, 0.0, 0.0).unwrap();
        assert_eq!(bank.band_count(), 16);
        // Breakpoints 0, 3, 6, 10, ...
        assert_eq!(bank.band(0).unwrap()[3], 1.0);
        assert_eq!(bank.band(1).unwrap()[6], 1.0);
        assert!(bank.iter().flatten().all(|&w| (0.0..=1.0).contains(&w)));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        assert!(mel(10, 0, 16000, 0.0, 0.0).is_err());
        assert!(matches!(
            bark(10, 512, 0, 0.0, 0.0),
            Err(SpectraError::InvalidSamplingRate { .. })
        ));
    }

    #[test]
    fn test_critical_bands_fixed_q() {
        let bank = critical_bands(512, 16000, 0.0, 8000.0, Some(2.0)).unwrap();
        assert_eq!(bank.band_count(), 21);
        assert_eq!(bank.band_length(), 257);

        // 1000 Hz center sits exactly on bin 32
        let band = bank.band(8).unwrap();
        assert_abs_diff_eq!(band[32], 1.0, epsilon = 1e-9);
        assert_eq!(peak_bin(band), 32);
    }

    #[test]
    fn test_critical_bands_analytic_q() {
        let fixed = critical_bands(512, 16000, 0.0, 8000.0, Some(2.0)).unwrap();
        let derived = critical_bands(512, 16000, 0.0, 8000.0, None).unwrap();
        let non_positive = critical_bands(512, 16000, 0.0, 8000.0, Some(0.0)).unwrap();

        assert_eq!(derived, non_positive);
        assert_ne!(derived, fixed);
        assert_eq!(derived.band_count(), 21);
        assert!(derived.iter().flatten().all(|w| w.is_finite()));
    }

    #[test]
    fn test_critical_bands_above_nyquist_are_dropped() {
        // 20 kHz exceeds the 11025 Hz Nyquist limit; bands stop at 10500 Hz
        let derived = critical_bands(512, 22050, 0.0, 20000.0, None).unwrap();
        let fixed = critical_bands(512, 22050, 0.0, 20000.0, Some(2.0)).unwrap();
        let rectangular = critical_bands_rectangular(512, 22050, 0.0, 20000.0).unwrap();

        assert_eq!(derived.band_count(), 23);
        assert_eq!(fixed.band_count(), 23);
        assert_eq!(rectangular.band_count(), 23);
        assert!(derived.iter().flatten().all(|w| w.is_finite()));
    }

    #[test]
    fn test_critical_bands_empty_range() {
        let bank = critical_bands(512, 16000, 60.0, 140.0, None).unwrap();
        assert!(bank.is_empty());
        let bank = critical_bands_rectangular(512, 16000, 60.0, 140.0).unwrap();
        assert!(bank.is_empty());
        assert_eq!(bank.band_length(), 257);
    }

    #[test]
    fn test_critical_bands_rectangular_shape() {
        let bank = critical_bands_rectangular(512, 16000, 0.0, 8000.0).unwrap();
        assert_eq!(bank.band_count(), 21);

        // 4400..5300 Hz covers bins 140..169; the middle is flat near 1
        let band = bank.band(18).unwrap();
        assert_abs_diff_eq!(band[155], 1.0, epsilon = 0.01);
        assert!(band[100] < 0.01);
        assert!(band[220] < 0.01);
    }

    #[test]
    fn test_critical_bands_rectangular_requires_power_of_two() {
        assert!(matches!(
            critical_bands_rectangular(500, 16000, 0.0, 0.0),
            Err(SpectraError::InvalidFftSize { size: 500 })
        ));
    }

    #[test]
    fn test_erb_single_band_peaks_at_center() {
        // A single ERB band sits at the lower bound
        let bank = erb(1, 512, 16000, 1000.0, 4000.0).unwrap();
        assert_eq!(bank.band_count(), 1);
        assert_eq!(peak_bin(bank.band(0).unwrap()), 32);
    }

    #[test]
    fn test_erb_bands_ascend() {
        let bank = erb(4, 512, 16000, 100.0, 6000.0).unwrap();
        let centers = erb_center_frequencies(4, 100.0, 6000.0);

        let mut prev = 0;
        for (band, cf) in bank.iter().zip(centers) {
            let peak = peak_bin(band);
            let nearest = (cf / 31.25).round() as usize;
            assert!(peak.abs_diff(nearest) <= 1, "peak {} vs {}", peak, nearest);
            assert!(peak >= prev);
            prev = peak;
        }
    }
}
