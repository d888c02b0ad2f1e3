//! Model-backed segmentation engine

use tracing::{debug, warn};

use super::MIN_SAMPLES;
use crate::decode::viterbi::viterbi_decode;
use crate::model::bundle::ModelBundle;
use crate::model::features::build_feature_matrix;
use crate::segment::convert::{nearest_index, sequence_to_segments};
use crate::segment::merge::MinDurations;
use crate::segment::types::{Phase, Segment};
use crate::signal::thresholds::ClipThresholds;
use crate::stabilize::pipeline::Stabilizer;

/// Segment intent phases using a trained classifier's probabilities.
///
/// The five channels are stacked into a feature matrix truncated to the
/// shortest one, the classifier's per-frame probabilities are clipped to
/// [1e-9, 1] and decoded as log scores with the shared transition model
/// scaled by `penalty_scale`, and the result runs through stabilization
/// with `min_durations` (model-tuned floors when `None`). No smoothing is
/// applied to the signals. Fewer than 4 aligned samples, an empty feature
/// matrix, or classifier output that does not line up with the frames and
/// vocabulary all yield an empty result.
pub fn segment_phases_with_model(
    times: &[f64],
    motion: &[f64],
    interaction: &[f64],
    entropy: &[f64],
    audio_energy: &[f64],
    audio_flux: &[f64],
    bundle: &ModelBundle,
    min_durations: Option<MinDurations>,
    penalty_scale: f64,
) -> Vec<Segment> {
    if times.is_empty() || motion.is_empty() {
        return Vec::new();
    }

    let mut features = build_feature_matrix(motion, interaction, entropy, audio_energy, audio_flux);
    if features.is_empty() {
        return Vec::new();
    }

    let used_len = times.len().min(features.len());
    if used_len < MIN_SAMPLES {
        return Vec::new();
    }
    let times = &times[..used_len];
    let motion = &motion[..used_len];
    features.truncate(used_len);

    let probs = bundle.predict(&features);
    let states = bundle.phases().len();
    if probs.len() < used_len || probs[..used_len].iter().any(|row| row.len() != states) {
        warn!(
            "classifier returned {} rows for {} frames with a {}-phase vocabulary; refusing to decode",
            probs.len(),
            used_len,
            states
        );
        return Vec::new();
    }

    let log_probs: Vec<Vec<f64>> = probs[..used_len]
        .iter()
        .map(|row| row.iter().map(|&p| p.clamp(1e-9, 1.0).ln()).collect())
        .collect();

    let phase_seq = viterbi_decode(&log_probs, bundle.phases(), penalty_scale);
    let segments = sequence_to_segments(times, &phase_seq);
    debug!(
        "model decode produced {} raw segments over {} frames",
        segments.len(),
        used_len
    );

    // Legality checks and explanations reason over the raw motion series;
    // model mode has no smoothed signal.
    let thresholds = ClipThresholds::estimate(motion);
    let zeros = vec![0.0; used_len];
    let stabilizer = Stabilizer {
        times,
        motion,
        interaction: &zeros,
        entropy: &zeros,
        multisignal: false,
        thresholds,
        min_durations: min_durations.unwrap_or_else(MinDurations::model),
        flicker_max_s: None,
    };
    let mut segments = stabilizer.stabilize(segments);
    attach_confidence(&mut segments, times, &probs[..used_len], bundle.phases());
    segments
}

/// Mean predicted probability of each segment's phase across its span.
fn attach_confidence(
    segments: &mut [Segment],
    times: &[f64],
    probs: &[Vec<f64>],
    phases: &[Phase],
) {
    for seg in segments.iter_mut() {
        let Some(col) = phases.iter().position(|&p| p == seg.phase) else {
            continue;
        };
        let a = nearest_index(times, seg.start);
        let b = nearest_index(times, seg.end);
        let (a, b) = if b < a { (b, a) } else { (a, b) };
        let window = &probs[a..=b];
        let mean = window.iter().map(|row| row[col]).sum::<f64>() / window.len() as f64;
        seg.confidence = Some(mean as f32);
    }
}
