//! Built-in exercise profiles
//!
//! Closed set: adding an exercise means adding a variant and its table.
//! Lookup by display name is exact; anything else is "not supported".

use super::profile::{
    AngleKind, Correction, Deviation, ExerciseProfile, JointAngleSpec, SymmetryCheck,
};
use super::profile::AngleKind::*;
use super::profile::Deviation::*;

/// Supported exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exercise {
    PushUps,
    Squats,
    Burpees,
    Lunges,
    Plank,
}

impl Exercise {
    pub const ALL: [Exercise; 5] = [
        Exercise::PushUps,
        Exercise::Squats,
        Exercise::Burpees,
        Exercise::Lunges,
        Exercise::Plank,
    ];

    /// Exact display-name match
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|exercise| exercise.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Exercise::PushUps => "Push-ups",
            Exercise::Squats => "Squats",
            Exercise::Burpees => "Burpees",
            Exercise::Lunges => "Lunges",
            Exercise::Plank => "Plank",
        }
    }

    pub fn profile(&self) -> &'static ExerciseProfile {
        match self {
            Exercise::PushUps => &PUSH_UPS,
            Exercise::Squats => &SQUATS,
            Exercise::Burpees => &BURPEES,
            Exercise::Lunges => &LUNGES,
            Exercise::Plank => &PLANK,
        }
    }
}

/// Profile for an exercise display name, `None` when unsupported
pub fn get_profile(exercise_name: &str) -> Option<&'static ExerciseProfile> {
    Exercise::from_name(exercise_name).map(|exercise| exercise.profile())
}

/// Display names of every supported exercise
pub fn supported_exercises() -> Vec<&'static str> {
    Exercise::ALL.iter().map(Exercise::name).collect()
}

const fn fix(angle: AngleKind, deviation: Deviation, message: &'static str) -> Correction {
    Correction { angle, deviation, message }
}

// ============================================================================
// PUSH-UPS
// ============================================================================

static PUSH_UPS: ExerciseProfile = ExerciseProfile {
    exercise: Exercise::PushUps,
    angles: &[
        JointAngleSpec::new(LeftElbow, 45.0, 90.0, 2.0),
        JointAngleSpec::new(RightElbow, 45.0, 90.0, 2.0),
        JointAngleSpec::new(BodyAlignment, 175.0, 180.0, 3.0),
    ],
    critical_points: &[BodyAlignment, LeftElbow, RightElbow],
    corrections: &[
        fix(LeftElbow, Above, "Lower your chest closer to the ground"),
        fix(RightElbow, Above, "Lower your chest closer to the ground"),
        fix(LeftElbow, Below, "Don't drop too low - stop when your elbows reach 90°"),
        fix(RightElbow, Below, "Don't drop too low - stop when your elbows reach 90°"),
        fix(BodyAlignment, Below, "Keep your body in a straight line - engage your core"),
    ],
    symmetry: &[SymmetryCheck {
        left: LeftElbow,
        right: RightElbow,
        tolerance_deg: 15.0,
        issue: "Uneven arm bend",
        suggestion: "Push evenly through both arms",
    }],
};

// ============================================================================
// SQUATS
// ============================================================================

static SQUATS: ExerciseProfile = ExerciseProfile {
    exercise: Exercise::Squats,
    angles: &[
        JointAngleSpec::new(LeftKnee, 80.0, 95.0, 3.0),
        JointAngleSpec::new(RightKnee, 80.0, 95.0, 3.0),
        JointAngleSpec::new(LeftHip, 60.0, 100.0, 1.5),
        JointAngleSpec::new(RightHip, 60.0, 100.0, 1.5),
    ],
    critical_points: &[LeftKnee, RightKnee],
    corrections: &[
        fix(LeftKnee, Above, "Go deeper - your squat depth is too shallow"),
        fix(RightKnee, Above, "Go deeper - your squat depth is too shallow"),
        fix(LeftKnee, Below, "Don't sink too low - stop when your thighs are parallel"),
        fix(RightKnee, Below, "Don't sink too low - stop when your thighs are parallel"),
        fix(LeftHip, Below, "Keep your chest up - avoid leaning too far forward"),
        fix(RightHip, Below, "Keep your chest up - avoid leaning too far forward"),
        fix(LeftHip, Above, "Sit back into your hips as you descend"),
        fix(RightHip, Above, "Sit back into your hips as you descend"),
    ],
    symmetry: &[SymmetryCheck {
        left: LeftKnee,
        right: RightKnee,
        tolerance_deg: 10.0,
        issue: "Uneven knee bend",
        suggestion: "Distribute your weight evenly on both legs",
    }],
};

// ============================================================================
// BURPEES
// ============================================================================

static BURPEES: ExerciseProfile = ExerciseProfile {
    exercise: Exercise::Burpees,
    angles: &[
        JointAngleSpec::new(BodyAlignment, 160.0, 180.0, 3.0),
        JointAngleSpec::new(LeftHip, 150.0, 180.0, 2.0),
        JointAngleSpec::new(LeftKnee, 150.0, 180.0, 1.0),
    ],
    critical_points: &[BodyAlignment],
    corrections: &[
        fix(BodyAlignment, Below, "Keep your hips in line during the plank phase"),
        fix(LeftHip, Below, "Fully extend your hips at the top"),
        fix(LeftKnee, Below, "Straighten your legs when you jump back"),
    ],
    symmetry: &[],
};

// ============================================================================
// LUNGES
// ============================================================================

static LUNGES: ExerciseProfile = ExerciseProfile {
    exercise: Exercise::Lunges,
    angles: &[
        JointAngleSpec::new(LeftKnee, 85.0, 100.0, 3.0),
        JointAngleSpec::new(RightKnee, 85.0, 100.0, 3.0),
        JointAngleSpec::new(LeftHip, 85.0, 130.0, 1.0),
    ],
    critical_points: &[LeftKnee, RightKnee],
    corrections: &[
        fix(LeftKnee, Above, "Lower your back knee closer to the floor"),
        fix(RightKnee, Above, "Lower your back knee closer to the floor"),
        fix(LeftKnee, Below, "Don't let your front knee travel past your toes"),
        fix(RightKnee, Below, "Don't let your front knee travel past your toes"),
        fix(LeftHip, Below, "Keep your torso upright"),
    ],
    // Staggered stance, the legs are not expected to match
    symmetry: &[],
};

// ============================================================================
// PLANK
// ============================================================================

static PLANK: ExerciseProfile = ExerciseProfile {
    exercise: Exercise::Plank,
    angles: &[
        JointAngleSpec::new(BodyAlignment, 170.0, 180.0, 3.0),
        JointAngleSpec::new(LeftHip, 165.0, 180.0, 2.0),
        JointAngleSpec::new(LeftElbow, 80.0, 100.0, 1.0),
    ],
    critical_points: &[BodyAlignment],
    corrections: &[
        fix(BodyAlignment, Below, "Keep a straight line from shoulders to ankles"),
        fix(LeftHip, Below, "Lower your hips - avoid piking up"),
        fix(LeftElbow, Below, "Stack your elbows under your shoulders"),
        fix(LeftElbow, Above, "Stack your elbows under your shoulders"),
    ],
    symmetry: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact_names() {
        assert_eq!(get_profile("Push-ups").map(|p| p.exercise), Some(Exercise::PushUps));
        assert_eq!(get_profile("Squats").map(|p| p.exercise), Some(Exercise::Squats));
        assert_eq!(get_profile("Burpees").map(|p| p.exercise), Some(Exercise::Burpees));
    }

    #[test]
    fn test_unknown_names() {
        assert!(get_profile("Yoga Pose X").is_none());
        assert!(get_profile("squats").is_none());
        assert!(get_profile("Push-ups ").is_none());
        assert!(get_profile("").is_none());
    }

    #[test]
    fn test_every_exercise_round_trips_by_name() {
        for exercise in Exercise::ALL {
            assert_eq!(Exercise::from_name(exercise.name()), Some(exercise));
            assert_eq!(exercise.profile().exercise, exercise);
        }
        assert_eq!(supported_exercises().len(), Exercise::ALL.len());
    }

    #[test]
    fn test_profiles_are_consistent() {
        for exercise in Exercise::ALL {
            let profile = exercise.profile();
            assert!(!profile.angles.is_empty(), "{} has no angles", profile.name());

            for spec in profile.angles {
                assert!(spec.weight > 0.0);
                assert!(spec.min <= spec.max);
                assert!((0.0..=180.0).contains(&spec.min) && (0.0..=180.0).contains(&spec.max));
            }
            for correction in profile.corrections {
                assert!(
                    profile.spec(correction.angle).is_some(),
                    "{}: correction for unmeasured {:?}", profile.name(), correction.angle
                );
            }
            for &critical in profile.critical_points {
                assert!(profile.spec(critical).is_some());
            }
            for check in profile.symmetry {
                assert!(profile.spec(check.left).is_some() && profile.spec(check.right).is_some());
                assert!(check.tolerance_deg > 0.0);
            }
        }
    }

    #[test]
    fn test_squat_shallow_correction() {
        let squats = get_profile("Squats").unwrap();
        let message = squats.correction(LeftKnee, Above).unwrap();
        assert!(message.contains("too shallow"));
    }
}
