//! Clip-level insight synthesis
//!
//! Pure summaries over a stabilized segment list: a headline describing the
//! clip's intent structure, a volatility band for how often intent
//! switches, and per-boundary transition records.

use serde::{Deserialize, Serialize};

use crate::segment::types::{round2, Phase, Segment};

/// Volatility banding for intent switching frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityLabel {
    Low,
    Medium,
    High,
}

/// Switching-rate summary for a clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volatility {
    pub label: VolatilityLabel,
    pub score: f64,
}

/// Headline summary of a clip's intent structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentInsights {
    pub headline: String,
    pub volatility: Volatility,
    pub transitions: usize,
    pub avg_segment_s: f64,
}

/// One boundary between consecutive segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub id: String,
    pub time: f64,
    pub from_phase: Phase,
    pub to_phase: Phase,
    pub hesitation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub why: String,
}

/// Summarize the structure of a stabilized segment list.
///
/// Fewer than two segments carry no structure worth describing and produce
/// the placeholder summary.
pub fn compute_intent_insights(segments: &[Segment]) -> IntentInsights {
    if segments.len() < 2 {
        return IntentInsights {
            headline: "Insufficient data to infer intent structure.".to_string(),
            volatility: Volatility {
                label: VolatilityLabel::Low,
                score: 0.0,
            },
            transitions: 0,
            avg_segment_s: 0.0,
        };
    }

    let total_duration = segments[segments.len() - 1].end;
    let transitions = segments.len() - 1;
    let avg_segment = total_duration / segments.len() as f64;
    let volatility_score = transitions as f64 / total_duration.max(1.0);

    let label = if volatility_score < 0.05 {
        VolatilityLabel::Low
    } else if volatility_score < 0.15 {
        VolatilityLabel::Medium
    } else {
        VolatilityLabel::High
    };

    let execute_ratio = segments
        .iter()
        .filter(|s| s.phase == Phase::Execute)
        .count() as f64
        / segments.len() as f64;

    let headline = if volatility_score > 0.15 {
        "Rapid intent switching suggests opportunistic play."
    } else if execute_ratio < 0.2 {
        "Gameplay dominated by exploration with infrequent execution."
    } else {
        "Structured gameplay with clear execution phases."
    }
    .to_string();

    IntentInsights {
        headline,
        volatility: Volatility {
            label,
            score: round3(volatility_score),
        },
        transitions,
        avg_segment_s: round2(avg_segment),
    }
}

/// Derive boundary records from consecutive segment pairs.
///
/// A boundary counts as hesitation when the phase repeats across it or when
/// both segments carry confidence scores within 0.15 of each other; the
/// transition confidence is the weaker of the two when both are present.
pub fn derive_transitions(segments: &[Segment]) -> Vec<PhaseTransition> {
    let mut transitions = Vec::new();
    for i in 1..segments.len() {
        let prev = &segments[i - 1];
        let curr = &segments[i];

        let close_confidence = match (prev.confidence, curr.confidence) {
            (Some(a), Some(b)) => (a - b).abs() < 0.15,
            _ => false,
        };
        let hesitation = prev.phase == curr.phase || close_confidence;
        let confidence = match (prev.confidence, curr.confidence) {
            (Some(a), Some(b)) => Some(a.min(b)),
            _ => None,
        };

        transitions.push(PhaseTransition {
            id: i.to_string(),
            time: curr.start,
            from_phase: prev.phase,
            to_phase: curr.phase,
            hesitation,
            confidence,
            why: if hesitation {
                "Phase boundary with unstable confidence"
            } else {
                "Clear phase transition"
            }
            .to_string(),
        });
    }
    transitions
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
