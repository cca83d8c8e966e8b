//! Pose module - landmark model, joint geometry and tracking quality
//!
//! Re-exports only. All logic in submodules.

mod landmarks;
mod angles;
mod confidence;
mod one_euro;

pub use landmarks::{
    Landmark,
    LANDMARK_COUNT, KEY_LANDMARKS,
    NOSE, LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
};
pub use angles::{angle_between, joint_angle, MIN_ANGLE_VISIBILITY, UNMEASURABLE};
pub use confidence::{ConfidenceFilter, CONFIDENCE_FRAMES};
pub use one_euro::OneEuroFilter;
