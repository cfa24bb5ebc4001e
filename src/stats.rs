//! Distribution statistics behind the histogram and box-plot recipes.

use serde::Serialize;

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Splits `values` into `bins` equal-width buckets between the observed
/// minimum and maximum. Every bucket is half-open except the last, which also
/// takes the maximum. A constant sample is centred in a unit-wide range.
///
/// Values are placed by comparing against the reported edges, so a value
/// equal to an edge always lands in the bucket that starts there.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (mut low, mut high) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if low == high {
        low -= 0.5;
        high += 0.5;
    }
    let mut width = (high - low) / bins as f64;
    if !width.is_finite() {
        // The span itself overflows; divide before subtracting.
        width = high / bins as f64 - low / bins as f64;
    }
    let edges = (0..bins)
        .map(|idx| low + width * idx as f64)
        .chain(std::iter::once(high))
        .collect::<Vec<_>>();
    let mut result = edges
        .windows(2)
        .map(|pair| HistogramBin {
            lower: pair[0],
            upper: pair[1],
            count: 0,
        })
        .collect::<Vec<_>>();
    let inner_edges = &edges[1..bins];
    for value in values {
        let idx = inner_edges.partition_point(|edge| *edge <= *value);
        result[idx].count += 1;
    }
    result
}

/// Linear interpolation between closest ranks over an ascending slice.
pub fn percentile_sorted(sorted: &[f64], fraction: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = fraction.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        Some(sorted[lower])
    } else {
        let weight = rank - lower as f64;
        Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
    }
}

pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = percentile_sorted(&sorted, 0.25)?;
    let median = percentile_sorted(&sorted, 0.5)?;
    let q3 = percentile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
    let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;
    let inside = sorted
        .iter()
        .copied()
        .filter(|v| *v >= low_fence && *v <= high_fence);
    let whisker_low = inside.clone().next().unwrap_or(q1);
    let whisker_high = inside.last().unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();
    Some(BoxSummary {
        count: sorted.len(),
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        whisker_low,
        whisker_high,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_spans_min_to_max() {
        let bins = histogram(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins[0].lower, 1.0);
        assert_eq!(bins[4].upper, 6.0);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1, 1, 1, 2]);
    }

    #[test]
    fn histogram_of_constant_sample_uses_unit_range() {
        let bins = histogram(&[3.0, 3.0], 5);
        assert_eq!(bins[0].lower, 2.5);
        assert_eq!(bins[4].upper, 3.5);
        assert_eq!(bins[2].count, 2);
    }

    #[test]
    fn values_on_edges_use_the_bucket_they_open() {
        let bins = histogram(&[1.0, 1.1, 1.2, 1.3, 1.4, 1.5], 5);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1, 1, 1, 2]);
        assert_eq!(bins[2].lower, 1.2);
    }

    #[test]
    fn tenth_step_ratings_agree_with_reported_edges() {
        for start in 10..40 {
            for end in (start + 2)..=50 {
                let values = (start..=end).map(|tenth| tenth as f64 / 10.0).collect::<Vec<_>>();
                let bins = histogram(&values, 5);
                let last = bins.len() - 1;
                for (idx, bin) in bins.iter().enumerate() {
                    let inside = |v: f64| {
                        v >= bin.lower && (v < bin.upper || (idx == last && v == bin.upper))
                    };
                    let expected = values.iter().filter(|v| inside(**v)).count();
                    assert_eq!(bin.count, expected, "range {start}..{end} bin {idx}");
                }
            }
        }
    }

    #[test]
    fn extreme_spans_stay_finite() {
        let bins = histogram(&[-1e308, 0.0, 1e308], 5);
        assert!(bins.iter().all(|b| b.lower.is_finite() && b.upper.is_finite()));
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(histogram(&[], 5).is_empty());
    }

    #[test]
    fn percentile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_sorted(&data, 0.5), Some(2.5));
        assert_eq!(percentile_sorted(&data, 0.25), Some(1.75));
        assert_eq!(percentile_sorted(&[], 0.5), None);
    }

    #[test]
    fn box_summary_flags_outliers() {
        let summary = box_summary(&[3.0, 3.1, 3.2, 3.3, 3.4, 1.0]).expect("summary");
        assert_eq!(summary.count, 6);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.outliers, vec![1.0]);
        assert_eq!(summary.whisker_low, 3.0);
        assert_eq!(summary.whisker_high, 3.4);
    }
}
