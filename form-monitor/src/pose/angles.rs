//! Joint angle calculation
//!
//! Angle at a vertex landmark between the rays towards its two neighbours,
//! e.g. shoulder→elbow←wrist for the elbow.

use super::landmarks::Landmark;

/// Visibility below this makes a landmark unusable for geometry
pub const MIN_ANGLE_VISIBILITY: f32 = 0.7;

/// Sentinel returned by [`angle_between`] when the angle cannot be measured
pub const UNMEASURABLE: f32 = 0.0;

/// Calculate the angle at `b` in degrees (0-180), or `None` when unmeasurable
///
/// Unmeasurable means: a landmark is missing, not finite, below
/// [`MIN_ANGLE_VISIBILITY`], or coincides with the vertex.
/// The result is rounded to one decimal place.
pub fn joint_angle(a: Option<&Landmark>, b: Option<&Landmark>, c: Option<&Landmark>) -> Option<f32> {
    let (a, b, c) = (a?, b?, c?);

    for lm in [a, b, c] {
        if !lm.is_finite() || lm.visibility < MIN_ANGLE_VISIBILITY {
            return None;
        }
    }

    // Rays from the vertex
    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    // Handle degenerate case
    if v1.0.hypot(v1.1) < 1e-6 || v2.0.hypot(v2.1) < 1e-6 {
        return None;
    }

    let mut angle = (v2.1.atan2(v2.0) - v1.1.atan2(v1.0)).abs().to_degrees();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }

    if !angle.is_finite() {
        return None;
    }

    Some((angle * 10.0).round() / 10.0)
}

/// Same as [`joint_angle`] but returns [`UNMEASURABLE`] (0°) instead of `None`
pub fn angle_between(a: Option<&Landmark>, b: Option<&Landmark>, c: Option<&Landmark>) -> f32 {
    joint_angle(a, b, c).unwrap_or(UNMEASURABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y, 0.0, 1.0)
    }

    #[test]
    fn test_straight_line() {
        let angle = angle_between(Some(&lm(0.0, 0.0)), Some(&lm(0.5, 0.0)), Some(&lm(1.0, 0.0)));
        assert_eq!(angle, 180.0);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_between(Some(&lm(0.0, 0.0)), Some(&lm(0.5, 0.0)), Some(&lm(0.5, 0.5)));
        assert_eq!(angle, 90.0);
    }

    #[test]
    fn test_reflex_is_folded_below_180() {
        // atan2 difference here is 270°, which must fold to 90°
        let angle = angle_between(Some(&lm(0.0, -1.0)), Some(&lm(0.0, 0.0)), Some(&lm(-1.0, 0.0)));
        assert_eq!(angle, 90.0);
    }

    #[test]
    fn test_rounded_to_one_decimal() {
        let angle = angle_between(Some(&lm(1.0, 0.0)), Some(&lm(0.0, 0.0)), Some(&lm(1.0, 0.3)));
        assert_eq!(angle, (angle * 10.0).round() / 10.0);
        assert!((angle - 16.7).abs() < 0.01);
    }

    #[test]
    fn test_range_and_determinism() {
        let points = [
            (0.1, 0.9), (0.4, 0.2), (0.7, 0.7), (0.95, 0.05), (0.3, 0.31), (0.5, 0.5),
        ];
        for &a in &points {
            for &b in &points {
                for &c in &points {
                    let (a, b, c) = (lm(a.0, a.1), lm(b.0, b.1), lm(c.0, c.1));
                    let first = angle_between(Some(&a), Some(&b), Some(&c));
                    let second = angle_between(Some(&a), Some(&b), Some(&c));
                    assert!((0.0..=180.0).contains(&first));
                    assert_eq!(first.to_bits(), second.to_bits());
                }
            }
        }
    }

    #[test]
    fn test_low_visibility_returns_zero() {
        let hidden = Landmark::new(0.5, 0.5, 0.0, 0.69);
        assert_eq!(angle_between(Some(&lm(0.0, 0.0)), Some(&hidden), Some(&lm(1.0, 0.0))), 0.0);
        assert_eq!(angle_between(Some(&hidden), Some(&lm(0.5, 0.0)), Some(&lm(1.0, 0.0))), 0.0);
        assert_eq!(angle_between(Some(&lm(0.0, 0.0)), Some(&lm(0.5, 0.0)), Some(&hidden)), 0.0);
    }

    #[test]
    fn test_missing_and_nan_return_zero() {
        assert_eq!(angle_between(None, Some(&lm(0.5, 0.0)), Some(&lm(1.0, 0.0))), 0.0);
        let nan = Landmark::new(f32::NAN, 0.0, 0.0, 1.0);
        assert_eq!(angle_between(Some(&nan), Some(&lm(0.5, 0.0)), Some(&lm(1.0, 0.0))), 0.0);
        let nan_vis = Landmark::new(0.0, 0.0, 0.0, f32::NAN);
        assert_eq!(angle_between(Some(&nan_vis), Some(&lm(0.5, 0.0)), Some(&lm(1.0, 0.0))), 0.0);
    }

    #[test]
    fn test_coincident_points_unmeasurable() {
        assert_eq!(joint_angle(Some(&lm(0.5, 0.5)), Some(&lm(0.5, 0.5)), Some(&lm(1.0, 0.0))), None);
    }
}
