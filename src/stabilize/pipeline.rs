//! The stabilization pipeline
//!
//! Order matters and each step runs to a fixed point:
//! 1. Merge segments shorter than their phase floor
//! 2. Collapse A,B,A flicker (heuristic mode)
//! 3. Enforce Outcome legality against the Execute history
//! 4. Demote diffuse Execute segments (heuristic multisignal mode)
//! 5. Clamp coverage to the full time range
//! 6. Enforce legal ordering (Outcome is absorbing)
//! 7. Synthesize per-segment explanations

use tracing::debug;

use super::explain::build_reason;
use crate::segment::convert::nearest_index;
use crate::segment::merge::{merge_short_segments, MinDurations};
use crate::segment::types::{round2, Phase, Segment};
use crate::signal::thresholds::ClipThresholds;

/// Signal context and policy for one stabilization run.
///
/// The motion slice is whatever signal the decoder reasoned over: the
/// rolling mean in heuristic mode, the raw series in model mode. All slices
/// share the same length as `times`.
pub struct Stabilizer<'a> {
    /// Frame timestamps in seconds, sorted ascending.
    pub times: &'a [f64],
    /// Motion signal the pipeline reasons over.
    pub motion: &'a [f64],
    /// Smoothed interaction signal, zero-filled when absent.
    pub interaction: &'a [f64],
    /// Smoothed entropy signal, zero-filled when absent.
    pub entropy: &'a [f64],
    /// Whether interaction/entropy carry real data.
    pub multisignal: bool,
    /// Motion cutoffs for legality checks and explanations.
    pub thresholds: ClipThresholds,
    /// Per-phase duration floors.
    pub min_durations: MinDurations,
    /// Collapse flicker segments shorter than this; `None` disables the
    /// step entirely (model mode).
    pub flicker_max_s: Option<f64>,
}

impl Stabilizer<'_> {
    /// Run the full pipeline over freshly decoded segments.
    pub fn stabilize(&self, segments: Vec<Segment>) -> Vec<Segment> {
        let decoded = segments.len();
        let mut segments = merge_short_segments(segments, &self.min_durations);
        if let Some(max_s) = self.flicker_max_s {
            self.collapse_flicker(&mut segments, max_s);
        }
        self.enforce_outcome_legality(&mut segments);
        if self.multisignal {
            self.demote_diffuse_executes(&mut segments);
        }
        self.clamp_coverage(&mut segments);
        self.enforce_ordering(&mut segments);
        self.explain(&mut segments);
        debug!(
            "stabilized {} decoded segments down to {}",
            decoded,
            segments.len()
        );
        segments
    }

    /// Collapse any A,B,C triple where A and C share a phase and B is a
    /// sub-threshold blip, repeating until no triple remains.
    fn collapse_flicker(&self, segments: &mut Vec<Segment>, max_s: f64) {
        let mut changed = true;
        while changed {
            changed = false;
            let mut i = 1;
            while i + 1 < segments.len() {
                let sandwiched = segments[i - 1].phase == segments[i + 1].phase
                    && segments[i - 1].phase != segments[i].phase;
                if sandwiched && segments[i].duration() < max_s {
                    let note = format!("Collapsed short {} flicker.", segments[i].phase);
                    segments[i - 1].end = segments[i + 1].end;
                    segments[i - 1].push_note(&note);
                    segments.remove(i + 1);
                    segments.remove(i);
                    changed = true;
                    i = (i - 1).max(1);
                    continue;
                }
                i += 1;
            }
        }
    }

    /// An Outcome is only legal after an Execute. Without any Execute every
    /// Outcome becomes Explore; with an Execute but no Outcome, the first
    /// post-Execute segment whose average motion sits below the low cutoff
    /// is promoted to Outcome.
    fn enforce_outcome_legality(&self, segments: &mut [Segment]) {
        let has_execute = segments.iter().any(|s| s.phase == Phase::Execute);
        if !has_execute {
            for seg in segments.iter_mut() {
                if seg.phase == Phase::Outcome {
                    seg.phase = Phase::Explore;
                    seg.push_note("Outcome without Execute converted to Explore.");
                }
            }
            return;
        }
        if segments.iter().any(|s| s.phase == Phase::Outcome) {
            return;
        }
        let Some(execute_index) = segments.iter().position(|s| s.phase == Phase::Execute) else {
            return;
        };
        for seg in segments.iter_mut().skip(execute_index + 1) {
            let (start_idx, end_idx) = self.span_indices(seg);
            let window = &self.motion[start_idx..=end_idx];
            let avg = window.iter().sum::<f64>() / window.len() as f64;
            if avg < self.thresholds.low {
                seg.phase = Phase::Outcome;
                seg.push_note("Outcome inferred after Execute collapse.");
                break;
            }
        }
    }

    /// Demote an Execute whose span shows diffuse, chaotic motion rather
    /// than a concentrated burst.
    fn demote_diffuse_executes(&self, segments: &mut [Segment]) {
        for seg in segments.iter_mut() {
            if seg.phase != Phase::Execute {
                continue;
            }
            let (start_idx, end_idx) = self.span_indices(seg);
            let interaction = &self.interaction[start_idx..=end_idx];
            let entropy = &self.entropy[start_idx..=end_idx];
            let avg_interaction = interaction.iter().sum::<f64>() / interaction.len() as f64;
            let avg_entropy = entropy.iter().sum::<f64>() / entropy.len() as f64;
            if avg_interaction <= 0.3 && avg_entropy >= 0.4 {
                seg.phase = Phase::Pursue;
                seg.push_note("Execute softened due to low interaction/entropy context.");
            }
        }
    }

    /// Guarantee the output covers [times[0], times[last]] with no interior
    /// gaps.
    fn clamp_coverage(&self, segments: &mut Vec<Segment>) {
        if segments.is_empty() {
            return;
        }
        let clip_start = self.times[0];
        let clip_end = self.times[self.times.len() - 1];

        if segments[0].start > clip_start + 1e-6 {
            let mut lead = Segment::new(round2(clip_start), segments[0].start, Phase::Explore);
            lead.why = "Inserted to cover clip start.".to_string();
            segments.insert(0, lead);
        }
        for i in 1..segments.len() {
            if segments[i].start > segments[i - 1].end {
                segments[i].start = segments[i - 1].end;
                segments[i].push_note("Start clamped to close gap.");
            }
        }
        let last = segments.len() - 1;
        if segments[last].end < clip_end - 1e-6 {
            segments[last].end = round2(clip_end);
            segments[last].push_note("Extended to cover clip end.");
        }

        debug_assert!(segments[0].start <= clip_start + 1e-6);
        debug_assert!(segments[last].end >= clip_end - 1e-6);
    }

    /// Once the sequence enters Outcome it stays there; any later segment
    /// with a different phase is forced back to Outcome.
    fn enforce_ordering(&self, segments: &mut [Segment]) {
        for i in 1..segments.len() {
            if segments[i - 1].phase == Phase::Outcome && segments[i].phase != Phase::Outcome {
                segments[i].phase = Phase::Outcome;
                segments[i].push_note("Illegal Outcome transition blocked; staying Outcome.");
            }
        }
    }

    /// Prepend the per-phase template sentence to whatever machine notes
    /// accumulated during the earlier steps.
    fn explain(&self, segments: &mut [Segment]) {
        for seg in segments.iter_mut() {
            let (start_idx, end_idx) = self.span_indices(seg);
            let window = &self.motion[start_idx..=end_idx];
            let avg = window.iter().sum::<f64>() / window.len() as f64;
            let peak = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let base = build_reason(seg.phase, avg, peak);
            seg.why = if seg.why.is_empty() {
                base
            } else {
                format!("{} {}", base, seg.why)
            };
        }
    }

    fn span_indices(&self, seg: &Segment) -> (usize, usize) {
        let a = nearest_index(self.times, seg.start);
        let b = nearest_index(self.times, seg.end);
        if b < a {
            (b, a)
        } else {
            (a, b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64, phase: Phase) -> Segment {
        Segment::new(start, end, phase)
    }

    fn stabilizer<'a>(
        times: &'a [f64],
        motion: &'a [f64],
        interaction: &'a [f64],
        entropy: &'a [f64],
        multisignal: bool,
    ) -> Stabilizer<'a> {
        Stabilizer {
            times,
            motion,
            interaction,
            entropy,
            multisignal,
            thresholds: ClipThresholds::default(),
            min_durations: MinDurations::none(),
            flicker_max_s: Some(0.8),
        }
    }

    #[test]
    fn test_flicker_triple_collapses() {
        let times: Vec<f64> = (0..12).map(|i| i as f64 * 0.5).collect();
        let motion = vec![0.1; 12];
        let zeros = vec![0.0; 12];
        let st = stabilizer(&times, &motion, &zeros, &zeros, false);

        let segments = vec![
            seg(0.0, 2.5, Phase::Explore),
            seg(2.5, 3.0, Phase::Pursue),
            seg(3.0, 5.5, Phase::Explore),
        ];
        let out = st.stabilize(segments);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].phase, Phase::Explore);
        assert_eq!(out[0].start, 0.0);
        assert_eq!(out[0].end, 5.5);
        assert!(out[0].why.contains("Collapsed short Pursue flicker."));
    }

    #[test]
    fn test_flicker_step_disabled_when_unset() {
        let times: Vec<f64> = (0..12).map(|i| i as f64 * 0.5).collect();
        let motion = vec![0.1; 12];
        let zeros = vec![0.0; 12];
        let mut st = stabilizer(&times, &motion, &zeros, &zeros, false);
        st.flicker_max_s = None;

        let segments = vec![
            seg(0.0, 2.5, Phase::Explore),
            seg(2.5, 3.0, Phase::Pursue),
            seg(3.0, 5.5, Phase::Explore),
        ];
        let out = st.stabilize(segments);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_outcome_without_execute_becomes_explore() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let motion = vec![0.1; 10];
        let zeros = vec![0.0; 10];
        let st = stabilizer(&times, &motion, &zeros, &zeros, false);

        let segments = vec![
            seg(0.0, 5.0, Phase::Explore),
            seg(5.0, 9.0, Phase::Outcome),
        ];
        let out = st.stabilize(segments);

        assert!(out.iter().all(|s| s.phase == Phase::Explore));
        assert!(out[1]
            .why
            .contains("Outcome without Execute converted to Explore."));
    }

    #[test]
    fn test_outcome_inferred_after_execute_collapse() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        // Calm after the burst between t=4 and t=9.
        let motion = vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.1, 0.1, 0.1, 0.1, 0.1];
        let zeros = vec![0.0; 10];
        let st = stabilizer(&times, &motion, &zeros, &zeros, false);

        let segments = vec![
            seg(0.0, 4.0, Phase::Execute),
            seg(5.0, 9.0, Phase::Explore),
        ];
        let out = st.stabilize(segments);

        assert_eq!(out.last().map(|s| s.phase), Some(Phase::Outcome));
        assert!(out
            .last()
            .map(|s| s.why.contains("Outcome inferred after Execute collapse."))
            .unwrap_or(false));
    }

    #[test]
    fn test_execute_demoted_on_diffuse_context() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let motion = vec![0.5; 10];
        let interaction = vec![0.2; 10];
        let entropy = vec![0.5; 10];
        let st = stabilizer(&times, &motion, &interaction, &entropy, true);

        let segments = vec![seg(0.0, 9.0, Phase::Execute)];
        let out = st.stabilize(segments);

        assert_eq!(out[0].phase, Phase::Pursue);
        assert!(out[0]
            .why
            .contains("Execute softened due to low interaction/entropy context."));
    }

    #[test]
    fn test_execute_kept_without_multisignal() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let motion = vec![0.5; 10];
        let zeros = vec![0.0; 10];
        let st = stabilizer(&times, &motion, &zeros, &zeros, false);

        let segments = vec![seg(0.0, 9.0, Phase::Execute)];
        let out = st.stabilize(segments);
        assert_eq!(out[0].phase, Phase::Execute);
    }

    #[test]
    fn test_coverage_inserts_leading_explore_and_closes_gaps() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let motion = vec![0.1; 10];
        let zeros = vec![0.0; 10];
        let st = stabilizer(&times, &motion, &zeros, &zeros, false);

        let segments = vec![
            seg(2.0, 4.0, Phase::Pursue),
            seg(5.0, 8.0, Phase::Pursue),
        ];
        let out = st.stabilize(segments);

        assert_eq!(out[0].phase, Phase::Explore);
        assert_eq!(out[0].start, 0.0);
        assert!(out[0].why.contains("Inserted to cover clip start."));
        for pair in out.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(out.last().map(|s| s.end), Some(9.0));
        assert!(out
            .last()
            .map(|s| s.why.contains("Extended to cover clip end."))
            .unwrap_or(false));
    }

    #[test]
    fn test_outcome_is_absorbing() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let motion = vec![0.1; 10];
        let zeros = vec![0.0; 10];
        let st = stabilizer(&times, &motion, &zeros, &zeros, false);

        let segments = vec![
            seg(0.0, 3.0, Phase::Execute),
            seg(3.0, 5.0, Phase::Outcome),
            seg(5.0, 7.0, Phase::Explore),
            seg(7.0, 9.0, Phase::Pursue),
        ];
        let out = st.stabilize(segments);

        let first_outcome = out.iter().position(|s| s.phase == Phase::Outcome);
        assert!(first_outcome.is_some());
        for seg in out.iter().skip(first_outcome.unwrap_or(0)) {
            assert_eq!(seg.phase, Phase::Outcome);
        }
    }

    #[test]
    fn test_every_segment_gets_an_explanation() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let motion = vec![0.1; 10];
        let zeros = vec![0.0; 10];
        let st = stabilizer(&times, &motion, &zeros, &zeros, false);

        let out = st.stabilize(vec![seg(0.0, 9.0, Phase::Explore)]);
        assert!(out.iter().all(|s| !s.why.is_empty()));
        assert!(out[0].why.starts_with("Mostly calm movement"));
    }

    #[test]
    fn test_template_precedes_machine_notes() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let motion = vec![0.1; 10];
        let zeros = vec![0.0; 10];
        let st = stabilizer(&times, &motion, &zeros, &zeros, false);

        let segments = vec![
            seg(2.0, 6.0, Phase::Explore),
            seg(6.0, 9.0, Phase::Explore),
        ];
        let out = st.stabilize(segments);

        // The inserted lead carries its note after the template sentence.
        assert!(out[0].why.starts_with("Mostly calm movement"));
        assert!(out[0].why.ends_with("Inserted to cover clip start."));
    }
}
