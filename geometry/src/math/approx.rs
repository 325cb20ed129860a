use glam::Vec3;

/// Relative tolerance used by `is_equal_approx`, floored to an absolute tolerance near zero.
pub const CMP_EPSILON: f32 = 0.00001;

pub trait ApproxEq {
    fn is_equal_approx(&self, other: &Self) -> bool;
}

impl ApproxEq for f32 {
    fn is_equal_approx(&self, other: &f32) -> bool {
        // Also catches matching infinities
        if self == other {
            return true;
        }

        let tolerance = (CMP_EPSILON * self.abs()).max(CMP_EPSILON);
        (self - other).abs() < tolerance
    }
}

impl ApproxEq for Vec3 {
    fn is_equal_approx(&self, other: &Vec3) -> bool {
        self.x.is_equal_approx(&other.x)
            && self.y.is_equal_approx(&other.y)
            && self.z.is_equal_approx(&other.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tolerance_scales_with_magnitude() {
        assert!(1.0_f32.is_equal_approx(&1.000001));
        assert!(!1.0_f32.is_equal_approx(&1.001));

        // 1e-5 relative at 1e6 is 10 units
        assert!(1_000_000.0_f32.is_equal_approx(&1_000_005.0));
        assert!(!1_000_000.0_f32.is_equal_approx(&1_000_050.0));

        // Near zero the absolute floor applies
        assert!(0.0_f32.is_equal_approx(&0.000001));
        assert!(!0.0_f32.is_equal_approx(&0.001));
    }

    #[test]
    fn test_infinities_and_nan() {
        assert!(f32::INFINITY.is_equal_approx(&f32::INFINITY));
        assert!(!f32::INFINITY.is_equal_approx(&f32::NEG_INFINITY));
        assert!(!f32::NAN.is_equal_approx(&f32::NAN));
    }

    #[test]
    fn test_vec3_componentwise() {
        let a = Vec3::new(0.1 + 0.2, 1.0, -2.5);
        assert!(a.is_equal_approx(&Vec3::new(0.3, 1.0, -2.5)));
        assert!(!a.is_equal_approx(&Vec3::new(0.3, 1.0, 2.5)));
    }
}
