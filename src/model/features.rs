//! Feature assembly for the trained classifier

/// Number of signal channels the classifier consumes.
pub const FEATURE_CHANNELS: usize = 5;

/// Row-major (frames × channels) matrix of aligned signal features.
///
/// Column order: motion, interaction, entropy, audio energy, audio flux.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMatrix {
    rows: Vec<[f32; FEATURE_CHANNELS]>,
}

impl FeatureMatrix {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-frame feature rows.
    pub fn rows(&self) -> &[[f32; FEATURE_CHANNELS]] {
        &self.rows
    }

    /// Drop rows past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.rows.truncate(len);
    }
}

/// Stack the five signal channels into a feature matrix.
///
/// Channels are truncated to the shortest one; when no common sample
/// exists the matrix is explicitly empty rather than an error.
pub fn build_feature_matrix(
    motion: &[f64],
    interaction: &[f64],
    entropy: &[f64],
    audio_energy: &[f64],
    audio_flux: &[f64],
) -> FeatureMatrix {
    let min_len = motion
        .len()
        .min(interaction.len())
        .min(entropy.len())
        .min(audio_energy.len())
        .min(audio_flux.len());

    let mut rows = Vec::with_capacity(min_len);
    for i in 0..min_len {
        rows.push([
            motion[i] as f32,
            interaction[i] as f32,
            entropy[i] as f32,
            audio_energy[i] as f32,
            audio_flux[i] as f32,
        ]);
    }
    FeatureMatrix { rows }
}

/// Linearly interpolate a source series onto target timestamps.
///
/// Outside the source range the aligned value is zero. `source_times` must
/// be sorted ascending; mismatched source lengths are truncated to the
/// shorter side, and an empty source aligns to all zeros.
pub fn align_signal(target_times: &[f64], source_times: &[f64], source_values: &[f64]) -> Vec<f64> {
    let len = source_times.len().min(source_values.len());
    if len == 0 {
        return vec![0.0; target_times.len()];
    }
    let source_times = &source_times[..len];
    let source_values = &source_values[..len];

    target_times
        .iter()
        .map(|&t| {
            if t < source_times[0] || t > source_times[len - 1] {
                return 0.0;
            }
            let idx = source_times.partition_point(|&s| s <= t);
            if idx >= len {
                return source_values[len - 1];
            }
            let t0 = source_times[idx - 1];
            let t1 = source_times[idx];
            let v0 = source_values[idx - 1];
            let v1 = source_values[idx];
            if t1 <= t0 {
                v0
            } else {
                v0 + (v1 - v0) * (t - t0) / (t1 - t0)
            }
        })
        .collect()
}
