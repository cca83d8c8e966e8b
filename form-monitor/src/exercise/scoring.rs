//! Form scoring - weighted deviation-to-score transform
//!
//! Each measured angle gets a 0-100 sub-score: 100 inside its range, minus
//! 2 points per degree outside it. The composite is the weight-averaged
//! sub-score over the angles that were actually measured.

use std::collections::BTreeMap;

use super::profile::{AngleKind, JointAngleSpec};

/// Points lost per degree outside the ideal range
pub const PENALTY_PER_DEGREE: f32 = 2.0;

/// Sub-score (0-100) for one angle against its spec
pub fn sub_score(angle: f32, spec: &JointAngleSpec) -> f32 {
    match spec.deviation(angle) {
        None => 100.0,
        Some((_, degrees)) => (100.0 - degrees * PENALTY_PER_DEGREE).max(0.0),
    }
}

/// Composite score (0-100) over the measured angles
///
/// Angles without a spec, and specs without a measurement, are ignored.
/// Nothing measurable scores 0.
pub fn composite_score(angles: &BTreeMap<AngleKind, f32>, specs: &[JointAngleSpec]) -> u8 {
    let mut weighted = 0.0f32;
    let mut total_weight = 0.0f32;

    for spec in specs {
        let Some(&angle) = angles.get(&spec.angle) else {
            continue;
        };
        if !angle.is_finite() || !(spec.weight > 0.0) {
            continue;
        }
        weighted += sub_score(angle, spec) * spec.weight;
        total_weight += spec.weight;
    }

    if total_weight <= 0.0 {
        return 0;
    }

    (weighted / total_weight).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::get_profile;
    use crate::exercise::AngleKind::*;

    fn angles(values: &[(AngleKind, f32)]) -> BTreeMap<AngleKind, f32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_in_range_is_perfect() {
        let spec = JointAngleSpec::new(LeftElbow, 45.0, 90.0, 2.0);
        assert_eq!(sub_score(45.0, &spec), 100.0);
        assert_eq!(sub_score(90.0, &spec), 100.0);
        assert_eq!(sub_score(67.5, &spec), 100.0);
    }

    #[test]
    fn test_linear_penalty() {
        let spec = JointAngleSpec::new(LeftElbow, 45.0, 90.0, 2.0);
        assert!(sub_score(100.0, &spec) <= 80.0);
        assert_eq!(sub_score(100.0, &spec), 80.0);
        assert_eq!(sub_score(40.0, &spec), 90.0);
        assert_eq!(sub_score(170.0, &spec), 0.0);
    }

    #[test]
    fn test_weighted_average() {
        let specs = [
            JointAngleSpec::new(LeftKnee, 80.0, 95.0, 3.0),
            JointAngleSpec::new(LeftHip, 60.0, 100.0, 1.0),
        ];
        // knee 50 (weight 3), hip 100 (weight 1) -> 250 / 4 = 62.5 -> 63
        let score = composite_score(&angles(&[(LeftKnee, 120.0), (LeftHip, 80.0)]), &specs);
        assert_eq!(score, 63);
    }

    #[test]
    fn test_unmeasured_angles_do_not_zero_score() {
        let specs = get_profile("Push-ups").unwrap().angles;
        assert_eq!(composite_score(&angles(&[(LeftElbow, 70.0)]), specs), 100);
    }

    #[test]
    fn test_nothing_measured_scores_zero() {
        let specs = get_profile("Squats").unwrap().angles;
        assert_eq!(composite_score(&BTreeMap::new(), specs), 0);
        // Angle without a spec in this profile
        assert_eq!(composite_score(&angles(&[(LeftElbow, 70.0)]), specs), 0);
        assert_eq!(composite_score(&angles(&[(LeftKnee, f32::NAN)]), specs), 0);
    }

    #[test]
    fn test_bounded_and_deterministic() {
        let specs = get_profile("Squats").unwrap().angles;
        for step in 0..=36 {
            let value = step as f32 * 5.0;
            let measured = angles(&[(LeftKnee, value), (RightKnee, 180.0 - value), (LeftHip, value)]);
            let first = composite_score(&measured, specs);
            assert!(first <= 100);
            assert_eq!(first, composite_score(&measured, specs));
        }
    }

    #[test]
    fn test_push_up_good_form() {
        let specs = get_profile("Push-ups").unwrap().angles;
        let score = composite_score(
            &angles(&[(LeftElbow, 70.0), (RightElbow, 72.0), (BodyAlignment, 178.0)]),
            specs,
        );
        assert!(score >= 95);
    }

    #[test]
    fn test_squat_shallow_sub_score() {
        let squats = get_profile("Squats").unwrap();
        let spec = squats.spec(LeftKnee).unwrap();
        assert!(sub_score(120.0, spec) <= 50.0);
    }
}
