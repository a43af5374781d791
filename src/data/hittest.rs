//! Nearest-point hit testing for the map hover tooltip

use crate::data::NormalizedPoint;

/// Index of the point nearest to `pointer` within `tolerance`, or `None`.
///
/// `pointer` and `tolerance` are in the same normalized display units as the
/// points. An empty point set always reports `None`; that is a valid outcome,
/// not an error.
pub fn nearest_within(
    points: &[NormalizedPoint],
    pointer: (f64, f64),
    tolerance: f64,
) -> Option<usize> {
    let tolerance_sq = tolerance * tolerance;
    let mut best: Option<(usize, f64)> = None;

    for (index, point) in points.iter().enumerate() {
        let dx = point.x - pointer.0;
        let dy = point.y - pointer.1;
        let dist_sq = dx * dx + dy * dy;

        if dist_sq > tolerance_sq {
            continue;
        }
        if best.is_none_or(|(_, best_sq)| dist_sq < best_sq) {
            best = Some((index, dist_sq));
        }
    }

    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, record_index: usize) -> NormalizedPoint {
        NormalizedPoint { x, y, record_index }
    }

    #[test]
    fn test_empty_set_reports_none() {
        assert_eq!(nearest_within(&[], (0.5, 0.5), 10.0), None);
        assert_eq!(nearest_within(&[], (0.0, 0.0), 0.0), None);
    }

    #[test]
    fn test_hit_within_tolerance() {
        let points = vec![point(0.2, 0.2, 0), point(0.8, 0.8, 1)];

        assert_eq!(nearest_within(&points, (0.21, 0.2), 0.05), Some(0));
        assert_eq!(nearest_within(&points, (0.79, 0.81), 0.05), Some(1));
    }

    #[test]
    fn test_miss_outside_tolerance() {
        let points = vec![point(0.2, 0.2, 0)];
        assert_eq!(nearest_within(&points, (0.5, 0.5), 0.05), None);
    }

    #[test]
    fn test_picks_the_closest_of_two_candidates() {
        let points = vec![point(0.20, 0.20, 0), point(0.25, 0.25, 1)];

        assert_eq!(nearest_within(&points, (0.24, 0.24), 0.2), Some(1));
        assert_eq!(nearest_within(&points, (0.21, 0.21), 0.2), Some(0));
    }

    #[test]
    fn test_boundary_distance_counts_as_hit() {
        let points = vec![point(0.0, 0.0, 0)];
        assert_eq!(nearest_within(&points, (0.3, 0.4), 0.5), Some(0));
    }
}
