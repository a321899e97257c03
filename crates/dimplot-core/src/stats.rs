use serde::{Deserialize, Serialize};

/// Five-number summary of one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

impl Statistics {
    /// Summarizes `values` in any order. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Summarizes already ascending `sorted` values.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        let (&min, &max) = (sorted.first()?, sorted.last()?);
        Some(Self {
            min,
            q1: quantile_sorted(sorted, 0.25)?,
            median: quantile_sorted(sorted, 0.5)?,
            q3: quantile_sorted(sorted, 0.75)?,
            max,
            count: sorted.len(),
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear-interpolation quantile over ascending `sorted` values (d3 `quantileSorted`).
///
/// For fraction `p` over `n` values the rank is `p * (n - 1)`; the result interpolates between
/// the two bracketing ranks.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || p.is_nan() {
        return None;
    }
    if p <= 0.0 || n < 2 {
        return Some(sorted[0]);
    }
    if p >= 1.0 {
        return Some(sorted[n - 1]);
    }

    let i = (n - 1) as f64 * p;
    let i0 = i.floor() as usize;
    let v0 = sorted[i0];
    let v1 = sorted[i0 + 1];
    let t = i - i0 as f64;
    let gap = v1 - v0;
    if gap.is_finite() {
        Some(v0 + gap * t)
    } else {
        // The gap between values of opposite sign near f64::MAX overflows.
        Some(v0 * (1.0 - t) + v1 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantiles_span_the_whole_f64_range() {
        let s = Statistics::from_values(&[1.7e308, -1.7e308]).unwrap();
        assert_eq!(s.median, 0.0);
        assert!((s.q1 / -0.85e308 - 1.0).abs() < 1e-12);
        assert!((s.q3 / 0.85e308 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quantile_sorted_matches_d3() {
        let v = [3.0, 6.0, 7.0, 8.0, 8.0, 10.0, 13.0, 15.0, 16.0, 20.0];
        assert_eq!(quantile_sorted(&v, 0.0), Some(3.0));
        assert_eq!(quantile_sorted(&v, 0.25), Some(7.25));
        assert_eq!(quantile_sorted(&v, 0.5), Some(9.0));
        assert_eq!(quantile_sorted(&v, 0.75), Some(14.5));
        assert_eq!(quantile_sorted(&v, 1.0), Some(20.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&v, f64::NAN), None);
    }

    #[test]
    fn five_values() {
        let s = Statistics::from_values(&[5.0, 1.0, 4.0, 2.0, 3.0]).unwrap();
        assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (1.0, 2.0, 3.0, 4.0, 5.0));
        assert_eq!(s.count, 5);
        assert_eq!(s.iqr(), 2.0);
    }

    #[test]
    fn single_value_collapses_every_statistic() {
        let s = Statistics::from_values(&[7.0]).unwrap();
        assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (7.0, 7.0, 7.0, 7.0, 7.0));
    }

    #[test]
    fn two_values_interpolate() {
        let s = Statistics::from_values(&[8.0, 2.0]).unwrap();
        assert_eq!(s.min, 2.0);
        assert_eq!(s.q1, 3.5);
        assert_eq!(s.median, 5.0);
        assert_eq!(s.q3, 6.5);
        assert_eq!(s.max, 8.0);
    }

    #[test]
    fn ties_and_negatives() {
        let s = Statistics::from_values(&[-1.0, -1.0, 0.0, 2.0]).unwrap();
        assert_eq!(s.min, -1.0);
        assert_eq!(s.q1, -1.0);
        assert_eq!(s.median, -0.5);
        assert_eq!(s.q3, 0.5);
        assert_eq!(s.max, 2.0);
    }

    #[test]
    fn empty_has_no_summary() {
        assert!(Statistics::from_values(&[]).is_none());
    }
}
