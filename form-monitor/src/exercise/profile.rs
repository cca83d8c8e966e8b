//! Exercise profile types
//!
//! A profile says which joint angles matter for an exercise, what range is
//! good form, how much each angle counts, and what to tell the user when
//! an angle drifts out of range.

use serde::{Deserialize, Serialize};

use crate::pose::{
    LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST,
    RIGHT_ANKLE, RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};

use super::registry::Exercise;

// ============================================================================
// MEASURABLE ANGLES
// ============================================================================

/// A joint angle the analyzer knows how to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AngleKind {
    LeftElbow,
    RightElbow,
    /// Shoulder → hip → ankle, straight body line
    BodyAlignment,
    LeftKnee,
    RightKnee,
    /// Shoulder → hip → knee, torso against thigh
    LeftHip,
    RightHip,
}

impl AngleKind {
    pub const ALL: [AngleKind; 7] = [
        AngleKind::LeftElbow,
        AngleKind::RightElbow,
        AngleKind::BodyAlignment,
        AngleKind::LeftKnee,
        AngleKind::RightKnee,
        AngleKind::LeftHip,
        AngleKind::RightHip,
    ];

    /// Landmark triple (first, vertex, last)
    pub fn landmarks(&self) -> [usize; 3] {
        match self {
            AngleKind::LeftElbow => [LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST],
            AngleKind::RightElbow => [RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST],
            AngleKind::BodyAlignment => [LEFT_SHOULDER, LEFT_HIP, LEFT_ANKLE],
            AngleKind::LeftKnee => [LEFT_HIP, LEFT_KNEE, LEFT_ANKLE],
            AngleKind::RightKnee => [RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE],
            AngleKind::LeftHip => [LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE],
            AngleKind::RightHip => [RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE],
        }
    }

    /// Wire name, matches the serde representation
    pub fn name(&self) -> &'static str {
        match self {
            AngleKind::LeftElbow => "leftElbow",
            AngleKind::RightElbow => "rightElbow",
            AngleKind::BodyAlignment => "bodyAlignment",
            AngleKind::LeftKnee => "leftKnee",
            AngleKind::RightKnee => "rightKnee",
            AngleKind::LeftHip => "leftHip",
            AngleKind::RightHip => "rightHip",
        }
    }

    /// Human readable label for issue text
    pub fn label(&self) -> &'static str {
        match self {
            AngleKind::LeftElbow => "Left elbow",
            AngleKind::RightElbow => "Right elbow",
            AngleKind::BodyAlignment => "Body alignment",
            AngleKind::LeftKnee => "Left knee",
            AngleKind::RightKnee => "Right knee",
            AngleKind::LeftHip => "Left hip",
            AngleKind::RightHip => "Right hip",
        }
    }
}

/// Which side of the ideal range a measurement fell on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    Below,
    Above,
}

// ============================================================================
// PROFILE TABLE ENTRIES
// ============================================================================

/// Acceptable range (degrees) and weight for one angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngleSpec {
    pub angle: AngleKind,
    pub min: f32,
    pub max: f32,
    pub weight: f32,
}

impl JointAngleSpec {
    pub const fn new(angle: AngleKind, min: f32, max: f32, weight: f32) -> Self {
        Self { angle, min, max, weight }
    }

    /// Direction and size (degrees) of the deviation, `None` when in range
    pub fn deviation(&self, value: f32) -> Option<(Deviation, f32)> {
        if value < self.min {
            Some((Deviation::Below, self.min - value))
        } else if value > self.max {
            Some((Deviation::Above, value - self.max))
        } else {
            None
        }
    }
}

/// Canned correction for one angle deviating in one direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub angle: AngleKind,
    pub deviation: Deviation,
    pub message: &'static str,
}

/// Left/right comparison for bilateral exercises
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryCheck {
    pub left: AngleKind,
    pub right: AngleKind,
    /// Largest acceptable left/right difference in degrees
    pub tolerance_deg: f32,
    pub issue: &'static str,
    pub suggestion: &'static str,
}

/// Form definition for one exercise
#[derive(Debug)]
pub struct ExerciseProfile {
    pub exercise: Exercise,
    pub angles: &'static [JointAngleSpec],
    /// Angles whose deviation is reported as an issue, not only a suggestion
    pub critical_points: &'static [AngleKind],
    pub corrections: &'static [Correction],
    pub symmetry: &'static [SymmetryCheck],
}

impl ExerciseProfile {
    pub fn name(&self) -> &'static str {
        self.exercise.name()
    }

    pub fn spec(&self, angle: AngleKind) -> Option<&JointAngleSpec> {
        self.angles.iter().find(|spec| spec.angle == angle)
    }

    pub fn correction(&self, angle: AngleKind, deviation: Deviation) -> Option<&'static str> {
        self.corrections
            .iter()
            .find(|c| c.angle == angle && c.deviation == deviation)
            .map(|c| c.message)
    }

    pub fn is_critical(&self, angle: AngleKind) -> bool {
        self.critical_points.contains(&angle)
    }
}
