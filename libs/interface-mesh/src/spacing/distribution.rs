//! # Distribution Generator
//!
//! Turns a normalized stretching law into a strictly increasing sequence of
//! parameters in `[0, 1]`.
//!
//! ## Algorithm
//!
//! 1. Grow geometric layers from both ends while the increment stays within
//!    the max edge length.
//! 2. If the two stretched regions leave a gap, fill it uniformly.
//! 3. Otherwise regrow both ends with a target edge derived at the 50%
//!    crossing; fill the gap with the mean target if one appears, or give up
//!    stretching for a uniform distribution.

use super::law::SpacingLaw;
use crate::diagnostic::DistributionFallback;
use config::constants::{EPSILON, MAX_STRETCHING_LAYERS, TARGET_EDGE_DECAY_POWER};

/// Result of [`distribute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// Parameters, first 0.0, last 1.0.
    pub values: Vec<f64>,
    /// Set when stretching could not be applied as requested.
    pub fallback: Option<DistributionFallback>,
}

/// Geometric layers grown from `start` with first increment `ds`.
///
/// A negative `ds` grows towards 0. Growth stops before the increment
/// exceeds `max_edge` (relative tolerance `EPSILON`) or the next value leaves
/// `(0, 1]`. The returned list
/// always holds `start` and `start + ds`.
pub fn stretching_layers(start: f64, ds: f64, growth: f64, max_edge: f64) -> Vec<f64> {
    let mut layers = vec![start, start + ds];
    let mut increment = ds;

    for _ in 0..MAX_STRETCHING_LAYERS {
        if increment.abs() > max_edge * (1.0 + EPSILON) {
            break;
        }
        let last = layers[layers.len() - 1];
        let next = last + increment * growth;
        increment *= growth;
        if next > 0.0 && next <= 1.0 {
            layers.push(next);
        } else {
            break;
        }
    }

    layers
}

/// Start layers, a uniform middle bounded by `max_edge`, end layers.
fn growth_distribution(start: &[f64], end: &[f64], max_edge: f64) -> Vec<f64> {
    let d_start = start[start.len() - 1];
    let d_end = end[end.len() - 1];

    let gap = d_end - d_start;
    let intervals = interval_count(gap, max_edge);
    let step = gap / intervals as f64;

    let mut values = Vec::with_capacity(start.len() + intervals + end.len());
    values.extend_from_slice(start);
    for k in 1..intervals {
        values.push(d_start + k as f64 * step);
    }
    values.push(d_end);
    values.extend(end.iter().rev().skip(1));

    if let Some(last) = values.last_mut() {
        *last = 1.0;
    }
    values
}

/// Reduced target edge at the 50% crossing of a stretched region.
///
/// Falls back to the first increment when the region never crosses 0.5.
fn target_edge(layers: &[f64], growth: f64) -> f64 {
    let first = layers[1] - layers[0];
    let decay = (1.0 / growth).powi(TARGET_EDGE_DECAY_POWER);

    let crossing = if first > 0.0 {
        layers.iter().position(|&v| v >= 0.5)
    } else {
        layers.iter().position(|&v| v <= 0.5)
    };

    match crossing {
        Some(i) if i > 0 => (decay * (layers[i] - layers[i - 1])).abs(),
        _ => first.abs(),
    }
}

/// Fewest intervals of at most `max_edge` covering `length`.
///
/// A ratio within `EPSILON` of an integer is not rounded up.
fn interval_count(length: f64, max_edge: f64) -> usize {
    ((length / max_edge - EPSILON).ceil() as usize).max(1)
}

/// `n` equal intervals over `[0, 1]`.
fn uniform(intervals: usize) -> Vec<f64> {
    let intervals = intervals.max(1);
    let mut values: Vec<f64> = (0..intervals).map(|k| k as f64 / intervals as f64).collect();
    values.push(1.0);
    values
}

/// Builds the distribution of a law normalized to unit length.
///
/// # Example
///
/// ```rust
/// use interface_mesh::spacing::{distribute, SpacingLaw};
///
/// let distribution = distribute(&SpacingLaw::from_array([0.001, 1.2, 0.001, 1.2, 0.05]));
/// assert_eq!(distribution.values[0], 0.0);
/// assert_eq!(*distribution.values.last().unwrap(), 1.0);
/// assert!(distribution.fallback.is_none());
/// ```
pub fn distribute(law: &SpacingLaw) -> Distribution {
    let start = stretching_layers(0.0, law.start_spacing, law.start_growth, law.max_edge);
    let end = stretching_layers(1.0, -law.end_spacing, law.end_growth, law.max_edge);

    if !overlap(&start, &end) {
        return Distribution {
            values: growth_distribution(&start, &end, law.max_edge),
            fallback: None,
        };
    }

    let start_target = target_edge(&start, law.start_growth);
    let end_target = target_edge(&end, law.end_growth);

    let start = stretching_layers(0.0, law.start_spacing, law.start_growth, start_target);
    let end = stretching_layers(1.0, -law.end_spacing, law.end_growth, end_target);

    if !overlap(&start, &end) {
        let mean = 0.5 * (start_target + end_target);
        return Distribution {
            values: growth_distribution(&start, &end, mean),
            fallback: Some(DistributionFallback::ReducedTarget),
        };
    }

    Distribution {
        values: uniform(interval_count(1.0, law.max_edge)),
        fallback: Some(DistributionFallback::Uniform),
    }
}

/// The stretched regions leave no gap.
#[inline]
fn overlap(start: &[f64], end: &[f64]) -> bool {
    start[start.len() - 1] >= end[end.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_valid(values: &[f64]) {
        assert!(values.len() >= 2);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[values.len() - 1], 1.0);
        for pair in values.windows(2) {
            assert!(pair[1] > pair[0], "not increasing: {pair:?}");
        }
    }

    #[test]
    fn test_stretching_layers_geometric() {
        let layers = stretching_layers(0.0, 0.1, 2.0, 0.5);
        // 0.7 + 0.8 leaves the unit interval
        assert_eq!(layers.len(), 4);
        assert_relative_eq!(layers[3], 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_stretching_layers_from_end() {
        let layers = stretching_layers(1.0, -0.1, 1.0, 0.1);
        assert!(layers.windows(2).all(|w| w[1] < w[0]));
        assert!(layers.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_uniform_law() {
        // Unit growth fills the segment from both ends
        let distribution = distribute(&SpacingLaw::uniform(0.1));
        assert_valid(&distribution.values);
        assert_eq!(distribution.values.len(), 11);
        assert_eq!(distribution.fallback, Some(DistributionFallback::Uniform));
        assert_relative_eq!(distribution.values[3], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_stretched_law() {
        let law = SpacingLaw::from_array([0.001, 1.2, 0.002, 1.2, 0.05]);
        let distribution = distribute(&law);
        assert_valid(&distribution.values);
        assert!(distribution.fallback.is_none());
        assert_relative_eq!(distribution.values[1], 0.001, epsilon = 1e-12);
        let n = distribution.values.len();
        assert_relative_eq!(1.0 - distribution.values[n - 2], 0.002, epsilon = 1e-12);
        // The last stretched layer may overshoot the max edge by one growth step
        for pair in distribution.values.windows(2) {
            assert!(pair[1] - pair[0] <= 0.05 * 1.2 + 1e-12);
        }
    }

    #[test]
    fn test_edge_larger_than_segment() {
        let distribution = distribute(&SpacingLaw::uniform(2.0));
        assert_eq!(distribution.values, vec![0.0, 1.0]);
        assert_eq!(distribution.fallback, Some(DistributionFallback::Uniform));
    }

    #[test]
    fn test_overlapping_growth_uses_reduced_target() {
        // Strong growth from both ends meets before reaching the max edge
        let law = SpacingLaw::from_array([0.05, 1.5, 0.05, 1.5, 0.6]);
        let distribution = distribute(&law);
        assert_valid(&distribution.values);
        assert_eq!(distribution.fallback, Some(DistributionFallback::ReducedTarget));
    }

    #[test]
    fn test_default_law_is_uniform_for_any_length() {
        let cases: [(f64, f64); 10] = [
            (0.1, 1.0),
            (0.05, 1.0),
            (0.1, 2.0),
            (0.2, 1.0),
            (0.25, 1.0),
            (0.1, 0.5),
            (0.02, 1.0),
            (0.125, 3.0),
            (0.3, 0.9),
            (0.07, 2.1),
        ];
        for (spacing, length) in cases {
            let intervals = (length / spacing).round() as usize;
            let distribution = distribute(&SpacingLaw::uniform(spacing).normalized(length));
            assert_valid(&distribution.values);
            assert_eq!(
                distribution.values.len(),
                intervals + 1,
                "spacing {spacing} over {length}"
            );
            assert_eq!(distribution.fallback, Some(DistributionFallback::Uniform));
            for pair in distribution.values.windows(2) {
                assert_relative_eq!(pair[1] - pair[0], 1.0 / intervals as f64, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_non_integer_ratio_rounds_up() {
        let distribution = distribute(&SpacingLaw::uniform(0.07));
        assert_valid(&distribution.values);
        // 1 / 0.07 = 14.29
        assert_eq!(distribution.values.len(), 16);
    }

    #[test]
    fn test_touching_regions_overlap() {
        assert!(overlap(&[0.0, 0.5], &[1.0, 0.5]));
        assert!(!overlap(&[0.0, 0.4], &[1.0, 0.6]));
    }

    #[test]
    fn test_target_edge_without_crossing() {
        let layers = vec![0.0, 0.1, 0.2];
        assert_relative_eq!(target_edge(&layers, 1.0), 0.1, epsilon = 1e-12);
    }
}
