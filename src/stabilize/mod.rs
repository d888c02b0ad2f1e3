//! Segment stabilization
//!
//! Turns a raw decoded segment list into temporally coherent, bounded,
//! explainable output. Runs after the decoder in both the heuristic and
//! trained-classifier variants.

pub mod pipeline;
mod explain;

pub use pipeline::Stabilizer;
