//! Per-frame analysis result

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::MonitorConfig;
use crate::exercise::AngleKind;

pub const LOW_VISIBILITY_ISSUE: &str = "Low visibility detected";
pub const LOW_VISIBILITY_SUGGESTION: &str = "Improve lighting and make sure your full body is in frame";
pub const UNMEASURABLE_ISSUE: &str = "Unable to measure key joints";
pub const UNMEASURABLE_SUGGESTION: &str = "Turn so the camera can see the joints used in this exercise";

/// Outcome of analyzing one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnalysis {
    /// Composite form score (0-100)
    pub score: u8,
    /// Ordered, de-duplicated problems found this frame
    pub issues: Vec<String>,
    /// Ordered, de-duplicated corrections (at most `max_suggestions`)
    pub suggestions: Vec<String>,
    /// Measured angles in degrees, only those that were measurable
    pub angles: BTreeMap<AngleKind, f32>,
    /// Host clock (ms) when the frame was analyzed
    pub timestamp: f64,
    pub perfect_form: bool,
    /// Score minus the mean of the previous few scores
    pub improvement: f32,
    /// Rolling landmark confidence (0-100)
    pub confidence: u8,
}

impl FormAnalysis {
    /// Result returned while tracking is too unreliable to score
    pub fn low_confidence(confidence: u8, timestamp: f64) -> Self {
        Self {
            score: 0,
            issues: vec![LOW_VISIBILITY_ISSUE.to_string()],
            suggestions: vec![LOW_VISIBILITY_SUGGESTION.to_string()],
            angles: BTreeMap::new(),
            timestamp,
            perfect_form: false,
            improvement: 0.0,
            confidence,
        }
    }

    /// Result returned when none of the profile's angles could be measured
    pub fn unmeasurable(confidence: u8, timestamp: f64) -> Self {
        Self {
            issues: vec![UNMEASURABLE_ISSUE.to_string()],
            suggestions: vec![UNMEASURABLE_SUGGESTION.to_string()],
            ..Self::low_confidence(confidence, timestamp)
        }
    }

    /// Scored at all (not a degraded result)
    pub fn is_scored(&self) -> bool {
        !self.angles.is_empty()
    }
}

/// Perfect form needs both a high score and trustworthy tracking
pub fn is_perfect_form(score: u8, confidence: u8, config: &MonitorConfig) -> bool {
    score >= config.perfect_score && confidence >= config.perfect_confidence
}

/// Append to an ordered set
pub(crate) fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}
