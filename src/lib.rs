//! # Intent Segmenter
//!
//! A segmentation engine that turns behavioral time series extracted from
//! gameplay video into a small ordered vocabulary of intent phases
//! (Explore, Pursue, Execute, Outcome) describing what a player is doing
//! over time.
//!
//! ## Overview
//!
//! The engine consumes already-extracted, aligned numeric signals (motion,
//! interaction, entropy, and optionally audio energy/flux), decodes a
//! per-frame phase sequence with a Viterbi-style dynamic program, and then
//! stabilizes the result: undersized segments are merged, flicker is
//! collapsed, phase ordering is made legal, the full time range is covered,
//! and each segment receives a human-readable explanation.
//!
//! Two decoding variants share the same recurrence: a heuristic variant
//! scoring rolling-mean signals against adaptive per-clip thresholds, and a
//! model variant decoding log probabilities from an externally trained
//! classifier.
//!
//! ## Quick Start
//!
//! ```
//! use intent_segmenter::{segment_phases, Phase, SegmenterConfig};
//!
//! let times: Vec<f64> = (0..40).map(|i| i as f64 * 0.5).collect();
//! let motion = vec![0.15; 40];
//!
//! let segments = segment_phases(&times, &motion, None, None, &SegmenterConfig::default());
//!
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments[0].phase, Phase::Explore);
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`signal`]: Rolling-mean smoothing and adaptive threshold estimation
//! - [`decode`]: Transition costs, emission scoring, and the DP decoder
//! - [`segment`]: Phase/segment types, conversions, and short-segment merging
//! - [`stabilize`]: The post-decode stabilization pipeline
//! - [`model`]: Feature assembly and the trained-classifier bundle
//! - [`engine`]: High-level heuristic and model segmentation entry points
//! - [`insights`]: Clip-level structure summaries over final segments
//! - [`app`]: Configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Signals   │───▶│ Thresholds/ │───▶│  Emission   │───▶│  DP Decode  │
//! │  (aligned)  │    │  Smoothing  │    │   Scoring   │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Final     │◀───│  Explain &  │◀───│  Stabilize  │◀───│   Segment   │
//! │  Segments   │    │   Insights  │    │             │    │   Builder   │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! ## Determinism
//!
//! The engine is pure, synchronous, and single-threaded: identical inputs
//! and configuration produce byte-identical output across runs, so the
//! surrounding job pipeline can retry the same clip and expect idempotent
//! results. Video/audio decoding, feature extraction, model training, and
//! persistence live outside this crate.

pub mod signal;
pub mod decode;
pub mod segment;
pub mod stabilize;
pub mod model;
pub mod engine;
pub mod insights;
pub mod app;

// Re-export commonly used types
pub use app::config::SegmenterConfig;
pub use decode::transition::TransitionCostTable;
pub use decode::viterbi::viterbi_decode;
pub use engine::{segment_phases, segment_phases_with_model};
pub use insights::{compute_intent_insights, derive_transitions, IntentInsights, PhaseTransition};
pub use model::bundle::{ModelBundle, PhaseClassifier};
pub use model::features::{align_signal, build_feature_matrix, FeatureMatrix};
pub use segment::convert::{segments_to_frame_labels, sequence_to_segments};
pub use segment::merge::{merge_short_segments, MinDurations};
pub use segment::types::{Phase, Segment};
pub use signal::rolling::{rolling_mean, smooth_signal};
pub use signal::thresholds::ClipThresholds;

/// Result type alias for the intent segmenter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the intent segmenter
///
/// The segmentation core itself never fails for input satisfying its
/// documented preconditions; degenerate input yields an empty segment list
/// instead. These variants cover the configuration layer and model-bundle
/// construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Model error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
