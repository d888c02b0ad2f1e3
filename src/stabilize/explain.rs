//! Per-segment explanation templates

use crate::segment::types::Phase;

/// Fixed explanation sentence for a stabilized segment, built from the
/// span's average and peak of the pipeline's motion signal.
pub(crate) fn build_reason(phase: Phase, avg: f64, peak: f64) -> String {
    match phase {
        Phase::Explore => format!(
            "Mostly calm movement (avg motion {:.2}), below the clip's low baseline.",
            avg
        ),
        Phase::Pursue => format!(
            "Sustained active movement (avg motion {:.2}) without a spike.",
            avg
        ),
        Phase::Execute => format!(
            "A clear burst of motion (peak {:.2}) above the clip's spike level.",
            peak
        ),
        Phase::Outcome => {
            "Movement drops right after a burst, suggesting resolution/cooldown.".to_string()
        }
    }
}
