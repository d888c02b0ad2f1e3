//! Phase sequence decoding
//!
//! Turns per-frame evidence into a maximum-score phase sequence:
//! - Directed transition penalties between phases
//! - Rule-based emission scoring against adaptive thresholds
//! - A generic Viterbi-style decoder shared by the heuristic and
//!   trained-classifier variants

pub mod transition;
pub mod emission;
pub mod viterbi;

pub use emission::EmissionScorer;
pub use transition::TransitionCostTable;
pub use viterbi::viterbi_decode;
