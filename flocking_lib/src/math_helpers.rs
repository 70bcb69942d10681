use glam::Vec2;

/// Rescaling that refuses to invent a direction for the zero vector.
pub trait ScaleToLength {
    /// Returns a vector with the same direction and magnitude `length`,
    /// or `None` if `self` has no direction to preserve.
    fn scale_to_length(&self, length: f32) -> Option<Self>
    where
        Self: Sized;
}

impl ScaleToLength for Vec2 {
    #[inline]
    fn scale_to_length(&self, length: f32) -> Option<Self> {
        let current = self.length();
        if current == 0. || !current.is_finite() {
            None
        } else {
            Some(*self * (length / current))
        }
    }
}

/// Clamps the magnitude of a steering force, leaving smaller forces untouched.
#[inline]
pub fn limit_force(force: Vec2, max_force: f32) -> Vec2 {
    if force.length() > max_force {
        force.scale_to_length(max_force).unwrap_or(Vec2::ZERO)
    } else {
        force
    }
}

/// Angle of a vector in radians, measured from the positive x axis
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Wraps a single coordinate onto the half-open range [0, max).
///
/// Leaving through the far edge lands on 0, leaving through 0 lands on the
/// largest coordinate still inside the world. Coordinates already inside are
/// returned as they are.
#[inline]
pub fn wrap_coordinate(value: f32, max: f32) -> f32 {
    if value >= max {
        0.
    } else if value < 0. {
        last_below(max)
    } else {
        value
    }
}

/// The largest f32 strictly smaller than a positive finite `max`.
#[inline]
pub fn last_below(max: f32) -> f32 {
    debug_assert!(max > 0. && max.is_finite());
    f32::from_bits(max.to_bits() - 1)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;
    use rstest::rstest;

    use super::{heading, last_below, limit_force, wrap_coordinate, ScaleToLength};

    macro_rules! assert_eqf32 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-5_f32)
        };
    }

    #[test]
    fn scale_to_length_keeps_direction() {
        let v = Vec2::new(3., 4.).scale_to_length(10.).unwrap();
        assert_eqf32!(v.x, 6.);
        assert_eqf32!(v.y, 8.);
    }

    #[test]
    fn scale_to_length_refuses_zero() {
        assert_eq!(Vec2::ZERO.scale_to_length(4.), None);
    }

    #[rstest]
    #[case(Vec2::new(0.05, 0.05))]
    #[case(Vec2::new(0.1, 0.))]
    #[case(Vec2::ZERO)]
    fn limit_force_leaves_small_forces(#[case] force: Vec2) {
        assert_eq!(limit_force(force, 0.1), force);
    }

    #[rstest]
    #[case(Vec2::new(3., -4.))]
    #[case(Vec2::new(-0.2, 0.))]
    #[case(Vec2::new(1e6, 1e6))]
    fn limit_force_clamps_large_forces(#[case] force: Vec2) {
        let limited = limit_force(force, 0.1);
        assert!(limited.length() <= 0.1 + 1e-6);
        assert_eqf32!(limited.length(), 0.1);
        // same direction
        assert_eqf32!(heading(limited), heading(force));
    }

    #[test]
    fn heading_of_axes() {
        assert_eqf32!(heading(Vec2::new(1., 0.)), 0.);
        assert_eqf32!(heading(Vec2::new(0., 1.)), std::f32::consts::FRAC_PI_2);
        assert_eqf32!(heading(Vec2::new(-1., 0.)), std::f32::consts::PI);
    }

    #[rstest]
    #[case(801., 0.)]
    #[case(800., 0.)]
    #[case(0., 0.)]
    #[case(400.5, 400.5)]
    fn wraps_coordinate(#[case] value: f32, #[case] expected: f32) {
        assert_eq!(wrap_coordinate(value, 800.), expected);
    }

    #[test]
    fn wraps_negative_to_far_edge() {
        let wrapped = wrap_coordinate(-0.5, 800.);
        assert!(wrapped < 800.);
        assert_eqf32!(wrapped, 800.);
        assert_eq!(wrapped, last_below(800.));
    }
}
