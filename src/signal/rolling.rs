//! Moving-average smoothing
//!
//! Raw per-frame signals are noisy enough to flip phase decisions frame to
//! frame. The decoder smooths every channel with a trailing rolling mean so
//! a frame's value never depends on frames that come after it; the centered
//! variant is for display and offline analysis of the same signals.

/// Trailing rolling mean with the window clipped at the left boundary.
///
/// Each output sample averages the last `window` samples ending at that
/// index. The output has the same length as the input; a window of 0 or 1
/// returns the input unchanged.
pub fn rolling_mean(signal: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 {
        return signal.to_vec();
    }

    let mut smoothed = Vec::with_capacity(signal.len());
    for i in 0..signal.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &signal[start..=i];
        smoothed.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }
    smoothed
}

/// Centered moving average, clipped at both boundaries.
///
/// The window extends `window / 2` samples to either side of each index.
/// The output has the same length as the input; a window of 0 or 1 returns
/// the input unchanged.
pub fn smooth_signal(signal: &[f64], window: usize) -> Vec<f64> {
    if signal.is_empty() || window <= 1 {
        return signal.to_vec();
    }

    let half = window / 2;
    let len = signal.len();
    let mut smoothed = Vec::with_capacity(len);
    for i in 0..len {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(len);
        let slice = &signal[start..end];
        smoothed.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }
    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_mean_window_one_is_identity() {
        let signal = vec![0.1, 0.5, 0.9];
        assert_eq!(rolling_mean(&signal, 1), signal);
        assert_eq!(rolling_mean(&signal, 0), signal);
    }

    #[test]
    fn test_rolling_mean_is_trailing() {
        let signal = vec![1.0, 2.0, 3.0, 4.0];
        let smoothed = rolling_mean(&signal, 2);

        // First sample has no predecessor, the rest average pairs.
        assert_eq!(smoothed, vec![1.0, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_rolling_mean_clips_at_left_boundary() {
        let signal = vec![3.0, 3.0, 3.0, 9.0];
        let smoothed = rolling_mean(&signal, 7);

        assert_eq!(smoothed.len(), signal.len());
        assert_eq!(smoothed[0], 3.0);
        assert!((smoothed[3] - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_rolling_mean_preserves_constant_signal() {
        let signal = vec![0.4; 20];
        let smoothed = rolling_mean(&signal, 7);
        for value in smoothed {
            assert!((value - 0.4).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rolling_mean_empty_signal() {
        assert!(rolling_mean(&[], 7).is_empty());
    }

    #[test]
    fn test_smooth_signal_is_centered() {
        let signal = vec![0.0, 0.0, 3.0, 0.0, 0.0];
        let smoothed = smooth_signal(&signal, 3);

        assert_eq!(smoothed, vec![0.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_smooth_signal_window_one_is_identity() {
        let signal = vec![0.2, 0.8, 0.4];
        assert_eq!(smooth_signal(&signal, 1), signal);
    }

    #[test]
    fn test_smooth_signal_preserves_length() {
        let signal: Vec<f64> = (0..33).map(|i| i as f64 * 0.01).collect();
        assert_eq!(smooth_signal(&signal, 5).len(), signal.len());
    }
}
