//! Exercise module - form profiles and scoring
//!
//! Re-exports only. All logic in submodules.

mod profile;
mod registry;
mod scoring;

pub use profile::{AngleKind, Correction, Deviation, ExerciseProfile, JointAngleSpec, SymmetryCheck};
pub use registry::{get_profile, supported_exercises, Exercise};
pub use scoring::{composite_score, sub_score, PENALTY_PER_DEGREE};
