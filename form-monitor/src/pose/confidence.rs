//! Confidence Filter - gates analysis on tracking quality
//!
//! Averages key-landmark visibility per frame, then over a short rolling
//! window. Scoring on top of unreliable tracking only produces noise, so
//! the analyzer skips it while the rolling value is below threshold.

use std::collections::VecDeque;

use super::landmarks::{Landmark, KEY_LANDMARKS};

/// Default number of frames in the rolling window
pub const CONFIDENCE_FRAMES: usize = 10;

/// Rolling landmark confidence (0-100)
pub struct ConfidenceFilter {
    /// Ring buffer of recent per-frame readings
    history: VecDeque<f32>,
    /// Maximum readings kept
    window: usize,
}

impl ConfidenceFilter {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            history: VecDeque::with_capacity(window + 1),
            window,
        }
    }

    /// Confidence of a single frame: mean key-landmark visibility scaled to 0-100
    ///
    /// Missing landmarks and garbage visibility count as 0.
    pub fn frame_confidence(landmarks: &[Landmark]) -> f32 {
        let total: f32 = KEY_LANDMARKS
            .iter()
            .map(|&idx| landmarks.get(idx).map_or(0.0, Landmark::clamped_visibility))
            .sum();
        total / KEY_LANDMARKS.len() as f32 * 100.0
    }

    /// Push this frame's reading, returns the rolling average
    pub fn update(&mut self, landmarks: &[Landmark]) -> u8 {
        self.history.push_back(Self::frame_confidence(landmarks));

        // Keep only the window
        while self.history.len() > self.window {
            self.history.pop_front();
        }

        self.average()
    }

    /// Rolling average without adding a reading (0 when empty)
    pub fn average(&self) -> u8 {
        if self.history.is_empty() {
            return 0;
        }
        let mean = self.history.iter().sum::<f32>() / self.history.len() as f32;
        mean.round().clamp(0.0, 100.0) as u8
    }

    /// Number of readings currently held
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Clear history (on session stop)
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for ConfidenceFilter {
    fn default() -> Self {
        Self::new(CONFIDENCE_FRAMES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::landmarks::LANDMARK_COUNT;

    fn frame(visibility: f32) -> Vec<Landmark> {
        vec![Landmark::new(0.5, 0.5, 0.0, visibility); LANDMARK_COUNT]
    }

    #[test]
    fn test_frame_confidence_scaled() {
        assert!((ConfidenceFilter::frame_confidence(&frame(0.8)) - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_only_key_landmarks_count() {
        let mut landmarks = frame(1.0);
        // Face mesh points other than the nose do not matter
        for idx in 1..=10 {
            landmarks[idx].visibility = 0.0;
        }
        assert!((ConfidenceFilter::frame_confidence(&landmarks) - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_missing_and_nan_count_as_zero() {
        assert_eq!(ConfidenceFilter::frame_confidence(&[]), 0.0);
        assert_eq!(ConfidenceFilter::frame_confidence(&frame(f32::NAN)), 0.0);
    }

    #[test]
    fn test_rolling_window() {
        let mut filter = ConfidenceFilter::new(4);
        for _ in 0..4 {
            filter.update(&frame(0.2));
        }
        assert_eq!(filter.average(), 20);

        // Two good frames: (20 + 20 + 100 + 100) / 4
        filter.update(&frame(1.0));
        assert_eq!(filter.update(&frame(1.0)), 60);
        assert_eq!(filter.len(), 4);

        filter.update(&frame(1.0));
        assert_eq!(filter.update(&frame(1.0)), 100);
    }

    #[test]
    fn test_clear() {
        let mut filter = ConfidenceFilter::default();
        filter.update(&frame(0.9));
        filter.clear();
        assert!(filter.is_empty());
        assert_eq!(filter.average(), 0);
    }
}
