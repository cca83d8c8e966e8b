//! Monitor configuration - tunable thresholds for one session
//!
//! Every field has a default, so the host may pass a partial object
//! (or nothing at all) from JavaScript.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pose::MIN_ANGLE_VISIBILITY;

/// Thresholds and window sizes used by a form monitoring session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitorConfig {
    /// Minimum time between two analyses (ms) - 33ms ≈ 30 fps
    pub analysis_interval_ms: f64,
    /// Rolling confidence (0-100) below which scoring is skipped
    pub min_confidence: u8,
    /// A joint must be strictly above this visibility to be measured
    /// (0.7 to 1; the angle kernel already rejects anything below 0.7)
    pub joint_visibility: f32,
    /// Degrees outside the ideal range before a correction is suggested
    pub deviation_tolerance_deg: f32,
    /// Maximum number of suggestions per analysis
    pub max_suggestions: usize,
    /// Number of analyses kept in the session history
    pub history_capacity: usize,
    /// Number of most recent analyses used for session statistics
    pub stats_window: usize,
    /// Number of frames in the rolling confidence buffer
    pub confidence_window: usize,
    /// Number of prior scores averaged for the improvement value
    pub improvement_window: usize,
    /// Minimum time between two spoken messages (ms)
    pub feedback_cooldown_ms: f64,
    /// Score required for perfect form
    pub perfect_score: u8,
    /// Confidence required for perfect form
    pub perfect_confidence: u8,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            analysis_interval_ms: 33.0,
            min_confidence: 50,
            joint_visibility: 0.7,
            deviation_tolerance_deg: 5.0,
            max_suggestions: 3,
            history_capacity: 100,
            stats_window: 50,
            confidence_window: 10,
            improvement_window: 5,
            feedback_cooldown_ms: 4000.0,
            perfect_score: 95,
            perfect_confidence: 85,
        }
    }
}

impl MonitorConfig {
    /// Reject values that would break the analyzer's invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.analysis_interval_ms.is_finite() || self.analysis_interval_ms < 0.0 {
            return Err(ConfigError::InvalidInterval(self.analysis_interval_ms));
        }
        if !self.feedback_cooldown_ms.is_finite() || self.feedback_cooldown_ms < 0.0 {
            return Err(ConfigError::InvalidInterval(self.feedback_cooldown_ms));
        }
        if !(MIN_ANGLE_VISIBILITY..=1.0).contains(&self.joint_visibility) {
            return Err(ConfigError::InvalidVisibility(self.joint_visibility));
        }
        if !self.deviation_tolerance_deg.is_finite() || self.deviation_tolerance_deg < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.deviation_tolerance_deg));
        }
        for (name, value) in [
            ("minConfidence", self.min_confidence),
            ("perfectScore", self.perfect_score),
            ("perfectConfidence", self.perfect_confidence),
        ] {
            if value > 100 {
                return Err(ConfigError::OutOfPercentRange { name, value });
            }
        }
        for (name, value) in [
            ("historyCapacity", self.history_capacity),
            ("statsWindow", self.stats_window),
            ("confidenceWindow", self.confidence_window),
            ("improvementWindow", self.improvement_window),
        ] {
            if value == 0 {
                return Err(ConfigError::EmptyWindow(name));
            }
        }
        if self.stats_window > self.history_capacity {
            return Err(ConfigError::WindowExceedsHistory {
                window: self.stats_window,
                capacity: self.history_capacity,
            });
        }
        Ok(())
    }
}
