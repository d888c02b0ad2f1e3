//! Adaptive motion thresholds
//!
//! Derives per-clip cutoffs separating the phase regimes from the motion
//! distribution itself, so a quiet clip and a frantic clip both get usable
//! boundaries. Degenerate distributions fall back to fixed defaults.

use serde::{Deserialize, Serialize};

/// Per-clip motion cutoffs for phase boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipThresholds {
    /// Explore tends to sit below this.
    pub low: f64,
    /// Pursue tends to sit around or above this.
    pub pursue: f64,
    /// Execute tends to sit above this.
    pub spike: f64,
}

impl Default for ClipThresholds {
    fn default() -> Self {
        Self {
            low: 0.22,
            pursue: 0.30,
            spike: 0.40,
        }
    }
}

impl ClipThresholds {
    /// Estimate cutoffs from a clip's motion distribution.
    ///
    /// Uses the p30/p55/p90 percentiles with floors keeping the three
    /// cutoffs apart. Falls back to the fixed defaults when fewer than 5
    /// samples are available, when the signal is effectively constant, or
    /// when the p30..p90 span is too narrow to support adaptive cutoffs
    /// (near-constant input would otherwise produce exaggerated scores).
    pub fn estimate(motion: &[f64]) -> Self {
        if motion.len() < 5 {
            return Self::default();
        }
        if population_std(motion) < 1e-6 {
            return Self::default();
        }

        let mut sorted = motion.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let p30 = percentile(&sorted, 30.0);
        let p55 = percentile(&sorted, 55.0);
        let p90 = percentile(&sorted, 90.0);

        if p90 - p30 < 0.08 {
            return Self::default();
        }

        let low = p30.max(0.18);
        let pursue = p55.max(low + 0.06);
        let spike = p90.max(pursue + 0.08).max(0.32);

        Self { low, pursue, spike }
    }
}

fn population_std(values: &[f64]) -> f64 {
    let len = values.len() as f64;
    let mean = values.iter().sum::<f64>() / len;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / len;
    variance.sqrt()
}

/// Linear-interpolated percentile over pre-sorted values.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
