//! Landmark data model
//!
//! One frame from the pose provider is an ordered slice of 33 landmarks
//! (MediaPipe Pose). Missing joints show up as low visibility, not absence.

use serde::{Deserialize, Serialize};

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

/// Number of landmarks in one pose frame
pub const LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Kinematically important landmarks used for the confidence estimate
/// (nose for orientation, then the limbs)
pub const KEY_LANDMARKS: [usize; 13] = [
    NOSE,
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
];

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single tracked body keypoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    pub z: f32, // Relative depth
    pub visibility: f32, // 0-1
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// Position and visibility are all real numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.visibility.is_finite()
    }

    /// Visibility clamped to 0-1, with garbage treated as invisible
    pub fn clamped_visibility(&self) -> f32 {
        if self.visibility.is_finite() {
            self.visibility.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
