//! Conversions between per-frame labels and segment lists

use super::types::{Phase, Segment};

/// Collapse a per-frame phase sequence into maximal same-phase runs.
///
/// Each run becomes one segment spanning the timestamps of its first and
/// last frame. Empty input yields an empty list; mismatched lengths are
/// truncated to the shorter side.
pub fn sequence_to_segments(times: &[f64], phase_seq: &[Phase]) -> Vec<Segment> {
    let len = times.len().min(phase_seq.len());
    if len == 0 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut start_idx = 0;
    for i in 1..len {
        if phase_seq[i] != phase_seq[start_idx] {
            segments.push(Segment::new(times[start_idx], times[i - 1], phase_seq[start_idx]));
            start_idx = i;
        }
    }
    segments.push(Segment::new(times[start_idx], times[len - 1], phase_seq[start_idx]));
    segments
}

/// Expand a segment list back into one phase label per timestamp.
///
/// Timestamps past a segment's end fall into the next segment; everything
/// beyond the last segment keeps its label. Empty input yields an empty
/// list.
pub fn segments_to_frame_labels(times: &[f64], segments: &[Segment]) -> Vec<Phase> {
    if times.is_empty() || segments.is_empty() {
        return Vec::new();
    }

    let mut labels = Vec::with_capacity(times.len());
    let mut seg_idx = 0;
    for &t in times {
        while seg_idx < segments.len() - 1 && t >= segments[seg_idx].end {
            seg_idx += 1;
        }
        labels.push(segments[seg_idx].phase);
    }
    labels
}

/// Index of the frame whose timestamp brackets `target`, clamped to the
/// series bounds. `times` must be sorted ascending and non-empty.
pub(crate) fn nearest_index(times: &[f64], target: f64) -> usize {
    let len = times.len();
    if target <= times[0] {
        return 0;
    }
    if target >= times[len - 1] {
        return len - 1;
    }

    let mut low: i64 = 0;
    let mut high: i64 = len as i64 - 1;
    while low <= high {
        let mid = ((low + high) / 2) as usize;
        let value = times[mid];
        if value == target {
            return mid;
        }
        if value < target {
            low = mid as i64 + 1;
        } else {
            high = mid as i64 - 1;
        }
    }
    (low.max(0) as usize).min(len - 1)
}
