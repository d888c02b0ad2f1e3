//! Heuristic segmentation engine

use tracing::debug;

use super::MIN_SAMPLES;
use crate::app::config::SegmenterConfig;
use crate::decode::emission::EmissionScorer;
use crate::decode::transition::TransitionCostTable;
use crate::decode::viterbi::decode_sequence;
use crate::segment::convert::sequence_to_segments;
use crate::segment::types::{round2, Phase, Segment};
use crate::signal::rolling::rolling_mean;
use crate::signal::thresholds::ClipThresholds;
use crate::stabilize::pipeline::Stabilizer;

/// Segment intent phases from a motion signal and optional companion
/// channels.
///
/// `interaction` and `entropy` are normalized to [0, 1] by the upstream
/// feature pipeline; supplying either one enables the multisignal scoring
/// rules. All channels are truncated to the shortest aligned length before
/// decoding, never padded. Fewer than 4 aligned samples yield an empty
/// result — a valid outcome for degenerate clips, not an error.
pub fn segment_phases(
    times: &[f64],
    motion: &[f64],
    interaction: Option<&[f64]>,
    entropy: Option<&[f64]>,
    config: &SegmenterConfig,
) -> Vec<Segment> {
    let mut length = times.len().min(motion.len());
    if let Some(channel) = interaction {
        length = length.min(channel.len());
    }
    if let Some(channel) = entropy {
        length = length.min(channel.len());
    }
    if length < MIN_SAMPLES {
        return Vec::new();
    }

    let times = &times[..length];
    let motion = &motion[..length];
    let multisignal = interaction.is_some() || entropy.is_some();
    let interaction = channel_or_zeros(interaction, length);
    let entropy = channel_or_zeros(entropy, length);

    let rolling_motion = rolling_mean(motion, config.rolling_window);
    let rolling_interaction = rolling_mean(&interaction, config.rolling_window);
    let rolling_entropy = rolling_mean(&entropy, config.rolling_window);

    let thresholds = ClipThresholds::estimate(&rolling_motion);
    debug!(
        "estimated clip thresholds: low={:.3} pursue={:.3} spike={:.3}",
        thresholds.low, thresholds.pursue, thresholds.spike
    );

    let scorer = EmissionScorer::new(thresholds, multisignal);
    let costs = TransitionCostTable::with_scale(config.penalty_scale);
    let phases = &Phase::ALL;
    let phase_seq = decode_sequence(length, phases, &costs, |t, curr, prev| {
        scorer.score(
            phases[curr],
            rolling_motion[t],
            phases[prev],
            rolling_interaction[t],
            rolling_entropy[t],
        )
    });

    let mut segments = sequence_to_segments(times, &phase_seq);
    for seg in &mut segments {
        seg.start = round2(seg.start);
        seg.end = round2(seg.end);
    }
    debug!(
        "decoded {} frames into {} raw segments",
        length,
        segments.len()
    );

    let stabilizer = Stabilizer {
        times,
        motion: &rolling_motion,
        interaction: &rolling_interaction,
        entropy: &rolling_entropy,
        multisignal,
        thresholds,
        min_durations: config.min_durations,
        flicker_max_s: Some(config.flicker_max_s),
    };
    stabilizer.stabilize(segments)
}

fn channel_or_zeros(channel: Option<&[f64]>, length: usize) -> Vec<f64> {
    channel
        .map(|c| c[..length].to_vec())
        .unwrap_or_else(|| vec![0.0; length])
}
