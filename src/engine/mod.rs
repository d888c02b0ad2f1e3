//! Segmentation entry points
//!
//! The two high-level decoders over aligned signal channels:
//! - [`segment_phases`]: heuristic scoring against adaptive thresholds
//! - [`segment_phases_with_model`]: log-probability decoding from an
//!   externally trained classifier
//!
//! Both share the transition model, the DP recurrence, and the
//! stabilization pipeline.

pub mod heuristic;
pub mod learned;

pub use heuristic::segment_phases;
pub use learned::segment_phases_with_model;

/// Fewest aligned samples worth decoding.
pub(crate) const MIN_SAMPLES: usize = 4;
