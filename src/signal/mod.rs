//! Signal conditioning
//!
//! Denoises raw per-frame signals and derives adaptive per-clip motion
//! cutoffs before any phase scoring happens:
//! - Trailing and centered moving averages
//! - Percentile-based threshold estimation with fixed fallbacks

pub mod rolling;
pub mod thresholds;

pub use rolling::{rolling_mean, smooth_signal};
pub use thresholds::ClipThresholds;
