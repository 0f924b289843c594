//! Frequency Scale Conversions
//!
//! Provides conversions between Hz and perceptual scales:
//! - Mel (pitch perception)
//! - Bark (critical bands)
//! - ERB (equivalent rectangular bandwidth)
//!
//! plus the tabulated critical-band partition and the frequency-range clamp
//! shared by all filterbank builders.

use log::debug;

//=============================================================================
// Mel Scale (Pitch Perception)
// Natural-log form, 1127.01048 * ln(1 + f/700)
//=============================================================================

const MEL_FACTOR: f64 = 1127.01048;

/// Convert frequency in Hz to Mel scale
#[inline]
pub fn herz_to_mel(herz: f64) -> f64 {
    MEL_FACTOR * (herz / 700.0 + 1.0).ln()
}

/// Convert Mel scale to frequency in Hz
#[inline]
pub fn mel_to_herz(mel: f64) -> f64 {
    700.0 * ((mel / MEL_FACTOR).exp() - 1.0)
}

//=============================================================================
// Bark Scale (Critical Bands)
// Based on Traunmüller (1990) formula
//=============================================================================

/// Convert frequency in Hz to Bark scale
#[inline]
pub fn herz_to_bark(herz: f64) -> f64 {
    26.81 * herz / (1960.0 + herz) - 0.53
}

/// Convert Bark scale to frequency in Hz
#[inline]
pub fn bark_to_herz(bark: f64) -> f64 {
    1960.0 / (26.81 / (bark + 0.53) - 1.0)
}

//=============================================================================
// ERB Scale (Equivalent Rectangular Bandwidth)
// Glasberg & Moore (1990), first-order form
//=============================================================================

/// Asymptotic filter quality of the auditory filters
pub const EAR_Q: f64 = 9.26449;

/// Minimum ERB bandwidth in Hz
pub const MIN_BANDWIDTH: f64 = 24.7;

/// ERB bandwidth at the given center frequency (Hz)
#[inline]
pub fn erb_bandwidth(center_freq: f64) -> f64 {
    center_freq / EAR_Q + MIN_BANDWIDTH
}

//=============================================================================
// Frequency Range
//=============================================================================

/// Analysis frequency range after leniency corrections
///
/// Negative lower bounds become 0 Hz and an upper bound at or below the lower
/// bound becomes the Nyquist frequency. Neither case is an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange {
    /// Lower bound in Hz
    pub low: f64,
    /// Upper bound in Hz
    pub high: f64,
}

impl FrequencyRange {
    /// Apply the clamping rules to a requested range
    pub fn resolve(low_freq: f64, high_freq: f64, sampling_rate: f64) -> Self {
        let mut low = low_freq;
        let mut high = high_freq;

        if low < 0.0 {
            debug!("Lower frequency {} Hz clamped to 0 Hz", low);
            low = 0.0;
        }
        if high <= low {
            high = sampling_rate / 2.0;
            debug!(
                "Upper frequency {} Hz not above {} Hz, using Nyquist {} Hz",
                high_freq, low, high
            );
        }

        Self { low, high }
    }
}

//=============================================================================
// Critical Bands
//=============================================================================

/// Critical band edge frequencies in Hz
pub const CRITICAL_BAND_EDGES: [f64; 26] = [
    20.0, 100.0, 200.0, 300.0, 400.0, 510.0, 630.0, 770.0, 920.0, 1080.0, 1270.0, 1480.0, 1720.0,
    2000.0, 2320.0, 2700.0, 3150.0, 3700.0, 4400.0, 5300.0, 6400.0, 7700.0, 9500.0, 12000.0,
    15500.0, 20500.0,
];

/// Critical band center frequencies in Hz
pub const CRITICAL_BAND_CENTERS: [f64; 25] = [
    50.0, 150.0, 250.0, 350.0, 450.0, 570.0, 700.0, 840.0, 1000.0, 1170.0, 1370.0, 1600.0,
    1850.0, 2150.0, 2500.0, 2900.0, 3400.0, 4000.0, 4800.0, 5800.0, 7000.0, 8500.0, 10500.0,
    13500.0, 17500.0,
];

/// Critical bands that fit inside a frequency range
///
/// Band `i` is centered at `centers[i]` and bounded by `edges[i]` and
/// `edges[i + 1]`, so `edges` always holds one entry more than `centers`
/// (except for the empty set, where both are empty).
///
/// Note: only the edge slice carries the extra entry. `centers` holds exactly
/// one frequency per band, never a trailing `count + 1`-th center.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriticalBands {
    /// Center frequencies in Hz, ascending
    pub centers: Vec<f64>,
    /// Edge frequencies in Hz, ascending
    pub edges: Vec<f64>,
}

impl CriticalBands {
    /// Number of bands
    pub fn count(&self) -> usize {
        self.centers.len()
    }

    /// Whether no band fits in the range
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

/// Select the contiguous run of critical bands whose centers lie in
/// `[low_freq, high_freq]` (after the usual range clamping)
///
/// Centers at or above the Nyquist frequency are dropped silently. Returns
/// an empty set when no center falls in range.
pub fn critical_band_frequencies(
    low_freq: f64,
    high_freq: f64,
    sampling_rate: f64,
) -> CriticalBands {
    let range = FrequencyRange::resolve(low_freq, high_freq, sampling_rate);
    let nyquist = sampling_rate / 2.0;

    if range.high >= nyquist {
        debug!(
            "Critical bands limited to centers below Nyquist {} Hz (requested {} Hz)",
            nyquist, range.high
        );
    }

    let start = CRITICAL_BAND_CENTERS
        .iter()
        .position(|&f| f >= range.low);
    let end = CRITICAL_BAND_CENTERS
        .iter()
        .rposition(|&f| f <= range.high && f < nyquist);

    match (start, end) {
        (Some(start), Some(end)) if start <= end => CriticalBands {
            centers: CRITICAL_BAND_CENTERS[start..=end].to_vec(),
            edges: CRITICAL_BAND_EDGES[start..=end + 1].to_vec(),
        },
        _ => {
            debug!(
                "No critical band center in {}..{} Hz",
                range.low, range.high
            );
            CriticalBands::default()
        }
    }
}
