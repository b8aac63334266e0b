use serde::{Deserialize, Serialize};

/// Percentile `q` (0-100) of already sorted values, linearly interpolated
/// between the two closest ranks.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (sorted.len() - 1) as f64 * (q / 100.0).clamp(0.0, 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64))
}

/// Five-number summary used to draw one box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value inside the lower 1.5×IQR fence
    pub lower: f64,
    /// Largest value inside the upper 1.5×IQR fence
    pub upper: f64,
}

impl BoxStats {
    /// Compute quartiles and Tukey whiskers. `None` for an empty group.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 25.0)?;
        let median = percentile(&sorted, 50.0)?;
        let q3 = percentile(&sorted, 75.0)?;
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let lower = sorted.iter().copied().find(|v| *v >= low_fence)?;
        let upper = sorted.iter().rev().copied().find(|v| *v <= high_fence)?;

        Some(Self {
            q1,
            median,
            q3,
            lower,
            upper,
        })
    }
}
