//! Generic band shapes built from precomputed bin positions

use super::Filterbank;
use crate::error::{Result, SpectraError};

/// Rectangular bands: band `i` has weight 1 on bins `[edges[i], edges[i+1])`
///
/// `edges` must hold `filter_count + 1` non-decreasing bin indices no larger
/// than `length`. Equal neighbours produce an empty band.
pub fn rectangular(filter_count: usize, length: usize, edges: &[usize]) -> Result<Filterbank> {
    check_point_count(edges, filter_count + 1)?;
    check_upper_bound(edges, length)?;

    if let Some(i) = edges.windows(2).position(|pair| pair[1] < pair[0]) {
        return Err(SpectraError::InvalidBreakpoints {
            reason: format!(
                "edges must not decrease: bin {} is followed by bin {} at position {}",
                edges[i],
                edges[i + 1],
                i + 1
            ),
        });
    }

    let bands = edges
        .windows(2)
        .map(|pair| {
            let mut band = vec![0.0; length];
            band[pair[0]..pair[1]].fill(1.0);
            band
        })
        .collect();

    Ok(Filterbank::from_bands(bands, length))
}

/// Triangular bands: band `i` rises linearly from 0 at `points[i]` to 1 at
/// `points[i+1]` and falls back to 0 at `points[i+2]`
///
/// `points` must hold `filter_count + 2` strictly increasing bin indices no
/// larger than `length`; repeated points would make a ramp of zero width.
pub fn triangular(filter_count: usize, length: usize, points: &[usize]) -> Result<Filterbank> {
    check_point_count(points, filter_count + 2)?;
    check_upper_bound(points, length)?;

    if let Some(i) = points.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(SpectraError::InvalidBreakpoints {
            reason: format!(
                "points must be strictly increasing: bin {} is followed by bin {} at position {}",
                points[i],
                points[i + 1],
                i + 1
            ),
        });
    }

    let bands = points
        .windows(3)
        .map(|triple| {
            let (left, center, right) = (triple[0], triple[1], triple[2]);
            let mut band = vec![0.0; length];
            for j in left..center {
                band[j] = (j - left) as f64 / (center - left) as f64;
            }
            for j in center..right {
                band[j] = (right - j) as f64 / (right - center) as f64;
            }
            band
        })
        .collect();

    Ok(Filterbank::from_bands(bands, length))
}

fn check_point_count(points: &[usize], expected: usize) -> Result<()> {
    if points.len() != expected {
        return Err(SpectraError::InvalidBreakpoints {
            reason: format!("expected {} bin positions, got {}", expected, points.len()),
        });
    }
    Ok(())
}

fn check_upper_bound(points: &[usize], length: usize) -> Result<()> {
    if let Some(&bin) = points.iter().find(|&&bin| bin > length) {
        return Err(SpectraError::InvalidBreakpoints {
            reason: format!("bin {} lies beyond the band length {}", bin, length),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_tiles_without_gaps() {
        let bank = rectangular(3, 10, &[0, 2, 5, 10]).unwrap();
        assert_eq!(bank.band_count(), 3);

        for bin in 0..10 {
            let active: Vec<f64> = bank
                .iter()
                .map(|band| band[bin])
                .filter(|&w| w != 0.0)
                .collect();
            assert_eq!(active, vec![1.0], "bin {} covered {:?}", bin, active);
        }
        assert_eq!(bank.band(1).unwrap(), &[0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rectangular_allows_empty_band() {
        let bank = rectangular(2, 4, &[1, 1, 3]).unwrap();
        assert!(bank.band(0).unwrap().iter().all(|&w| w == 0.0));
        assert_eq!(bank.band(1).unwrap(), &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_rectangular_rejects_decreasing_edges() {
        let err = rectangular(2, 8, &[0, 5, 3]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_BREAKPOINTS");
    }

    #[test]
    fn test_rectangular_rejects_wrong_count() {
        assert!(rectangular(3, 8, &[0, 2, 4]).is_err());
    }

    #[test]
    fn test_triangular_shape() {
        let bank = triangular(2, 8, &[0, 2, 4, 7]).unwrap();

        assert_eq!(bank.band(0).unwrap(), &[0.0, 0.5, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0]);

        let second = bank.band(1).unwrap();
        assert_eq!(second[2], 0.0);
        assert_eq!(second[3], 0.5);
        assert_eq!(second[4], 1.0);
        assert!((second[5] - 2.0 / 3.0).abs() < 1e-12);
        assert!((second[6] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(second[7], 0.0);
    }

    #[test]
    fn test_triangular_centers_and_edges() {
        let points = [1, 4, 6, 9, 13, 16];
        let bank = triangular(4, 17, &points).unwrap();

        for (i, band) in bank.iter().enumerate() {
            assert_eq!(band[points[i]], 0.0);
            assert_eq!(band[points[i + 1]], 1.0);
            assert_eq!(band[points[i + 2]], 0.0);
        }
    }

    #[test]
    fn test_triangular_rejects_repeated_points() {
        let err = triangular(2, 8, &[0, 2, 2, 5]).unwrap_err();
        assert!(matches!(err, SpectraError::InvalidBreakpoints { .. }));
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn test_triangular_rejects_out_of_range() {
        assert!(triangular(1, 5, &[0, 3, 6]).is_err());
        assert!(triangular(1, 5, &[0, 3, 5]).is_ok());
    }
}
