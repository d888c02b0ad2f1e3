//! Short-segment merging

use serde::{Deserialize, Serialize};

use super::types::{Phase, Segment};

/// Minimum allowed duration per phase, in seconds.
///
/// Segments shorter than their phase's floor are treated as decoding noise
/// and absorbed into a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinDurations {
    pub explore_s: f64,
    pub pursue_s: f64,
    pub execute_s: f64,
    pub outcome_s: f64,
}

impl MinDurations {
    /// Floors tuned for the heuristic decoder.
    pub fn heuristic() -> Self {
        Self {
            explore_s: 2.0,
            pursue_s: 1.2,
            execute_s: 0.5,
            outcome_s: 0.8,
        }
    }

    /// Floors tuned for the trained-classifier decoder.
    pub fn model() -> Self {
        Self {
            explore_s: 1.6,
            pursue_s: 1.0,
            execute_s: 0.5,
            outcome_s: 0.7,
        }
    }

    /// No floors; every decoded run survives.
    pub fn none() -> Self {
        Self {
            explore_s: 0.0,
            pursue_s: 0.0,
            execute_s: 0.0,
            outcome_s: 0.0,
        }
    }

    /// Floor for a single phase.
    pub fn for_phase(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Explore => self.explore_s,
            Phase::Pursue => self.pursue_s,
            Phase::Execute => self.execute_s,
            Phase::Outcome => self.outcome_s,
        }
    }
}

impl Default for MinDurations {
    fn default() -> Self {
        Self::heuristic()
    }
}

/// Absorb segments shorter than their phase floor into a neighbor until the
/// list is stable.
///
/// The previous neighbor is preferred. An undersized Outcome first looks
/// for a neighbor that is not Execute, so a burst does not swallow its own
/// resolution. The absorbing segment's span grows to the union of both and
/// a merge note is recorded on it. Terminates because every merge strictly
/// shrinks the list.
pub fn merge_short_segments(segments: Vec<Segment>, mins: &MinDurations) -> Vec<Segment> {
    let mut segments = segments;
    let mut changed = true;
    while changed {
        changed = false;
        let mut i = 0;
        while i < segments.len() {
            let duration = segments[i].duration();
            let min_required = mins.for_phase(segments[i].phase);
            if duration + 1e-6 < min_required {
                if let Some(target) = merge_target(&segments, i) {
                    let (start, end, phase) = (segments[i].start, segments[i].end, segments[i].phase);
                    let note = format!("Merged short {} into {}.", phase, segments[target].phase);
                    segments[target].start = segments[target].start.min(start);
                    segments[target].end = segments[target].end.max(end);
                    segments[target].push_note(&note);
                    segments.remove(i);
                    changed = true;
                    i = i.saturating_sub(1);
                    continue;
                }
            }
            i += 1;
        }
    }
    segments
}

fn merge_target(segments: &[Segment], i: usize) -> Option<usize> {
    let candidate = if segments[i].phase == Phase::Outcome {
        if i + 1 < segments.len() && segments[i + 1].phase != Phase::Execute {
            i + 1
        } else if i > 0 && segments[i - 1].phase != Phase::Execute {
            i - 1
        } else if i > 0 {
            i - 1
        } else {
            i + 1
        }
    } else if i > 0 {
        i - 1
    } else {
        i + 1
    };
    (candidate < segments.len()).then_some(candidate)
}
