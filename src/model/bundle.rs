//! Classifier bundle
//!
//! Wraps an externally trained per-frame phase classifier together with the
//! ordered phase vocabulary it emits. Loading trained artifacts from disk
//! is the caller's concern; a caller with no artifact simply falls back to
//! the heuristic engine.

use super::features::FeatureMatrix;
use crate::segment::types::Phase;
use crate::{Error, Result};

/// Per-frame phase probability source backing the model decoder.
///
/// `predict` returns one row per feature-matrix frame with one probability
/// per phase of the bundle's vocabulary, in vocabulary order.
pub trait PhaseClassifier {
    fn predict(&self, features: &FeatureMatrix) -> Vec<Vec<f64>>;
}

/// A trained classifier plus the ordered phase vocabulary it emits.
pub struct ModelBundle {
    model: Box<dyn PhaseClassifier>,
    phases: Vec<Phase>,
}

impl ModelBundle {
    /// Bundle a classifier with its vocabulary.
    ///
    /// The vocabulary must be non-empty and free of duplicates.
    pub fn new(model: Box<dyn PhaseClassifier>, phases: Vec<Phase>) -> Result<Self> {
        if phases.is_empty() {
            return Err(Error::Model("phase vocabulary must not be empty".to_string()));
        }
        for (i, phase) in phases.iter().enumerate() {
            if phases[..i].contains(phase) {
                return Err(Error::Model(format!(
                    "duplicate phase {} in vocabulary",
                    phase
                )));
            }
        }
        Ok(Self { model, phases })
    }

    /// Ordered phase vocabulary.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Per-frame per-phase probabilities for the aligned features.
    pub fn predict(&self, features: &FeatureMatrix) -> Vec<Vec<f64>> {
        self.model.predict(features)
    }
}

impl std::fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle")
            .field("phases", &self.phases)
            .finish_non_exhaustive()
    }
}
