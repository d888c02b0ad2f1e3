//! Core phase and segment types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral intent phase for a span of gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Sustained low or moderate motion while scanning for opportunities.
    Explore,
    /// Directed mid-level motion toward a target.
    Pursue,
    /// A sharp motion burst carrying out an attempt.
    Execute,
    /// Motion collapse right after a burst while the result plays out.
    Outcome,
}

impl Phase {
    /// All phases in canonical decoding order.
    pub const ALL: [Phase; 4] = [Phase::Explore, Phase::Pursue, Phase::Execute, Phase::Outcome];

    /// Stable index into phase-keyed tables.
    pub fn index(self) -> usize {
        match self {
            Phase::Explore => 0,
            Phase::Pursue => 1,
            Phase::Execute => 2,
            Phase::Outcome => 3,
        }
    }

    /// The phase name as it appears in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Explore => "Explore",
            Phase::Pursue => "Pursue",
            Phase::Execute => "Execute",
            Phase::Outcome => "Outcome",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A maximal contiguous span sharing one phase label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Span start in seconds from clip start.
    pub start: f64,
    /// Span end in seconds; always >= `start`.
    pub end: f64,
    /// Phase label for the span.
    pub phase: Phase,
    /// Human-readable explanation, followed by any machine notes recorded
    /// while the segment was stabilized.
    pub why: String,
    /// Mean classifier probability over the span (model variant only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Segment {
    /// Segment with an empty explanation.
    pub fn new(start: f64, end: f64, phase: Phase) -> Self {
        Self {
            start,
            end,
            phase,
            why: String::new(),
            confidence: None,
        }
    }

    /// Span duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Append a machine note to the explanation.
    pub(crate) fn push_note(&mut self, note: &str) {
        if self.why.is_empty() {
            self.why = note.to_string();
        } else {
            self.why = format!("{} {}", self.why, note);
        }
    }
}

/// Round to centiseconds, the resolution segment bounds are reported at.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display_matches_serialized_name() {
        for phase in Phase::ALL {
            assert_eq!(phase.to_string(), phase.as_str());
        }
    }

    #[test]
    fn test_phase_index_is_canonical_order() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn test_phase_serializes_as_bare_name() {
        let json = serde_json::to_string(&Phase::Execute).unwrap();
        assert_eq!(json, "\"Execute\"");
    }

    #[test]
    fn test_segment_duration() {
        let seg = Segment::new(1.5, 4.0, Phase::Pursue);
        assert!((seg.duration() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_segment_confidence_omitted_when_absent() {
        let seg = Segment::new(0.0, 1.0, Phase::Explore);
        let json = serde_json::to_string(&seg).unwrap();
        assert!(json.contains("\"why\""));
        assert!(!json.contains("confidence"));
    }

    #[test]
    fn test_segment_confidence_serialized_when_present() {
        let mut seg = Segment::new(0.0, 1.0, Phase::Execute);
        seg.confidence = Some(0.75);
        let json = serde_json::to_string(&seg).unwrap();
        assert!(json.contains("\"confidence\":0.75"));
    }

    #[test]
    fn test_push_note_accumulates_in_order() {
        let mut seg = Segment::new(0.0, 1.0, Phase::Explore);
        seg.push_note("First note.");
        seg.push_note("Second note.");
        assert_eq!(seg.why, "First note. Second note.");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(7.800000000000001), 7.8);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(3.0), 3.0);
    }
}
