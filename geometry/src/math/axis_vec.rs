use glam::Vec3;

use crate::math::axis::Axis;

// Lets the slab loops address vector components by `Axis` instead of bare indices

pub trait AxisVec3: Copy + Sized {
    type Element: Copy;

    fn get_axis(&self, axis: Axis) -> Self::Element;
    fn get_axis_mut(&mut self, axis: Axis) -> &mut Self::Element;

    fn set_axis(&mut self, axis: Axis, value: Self::Element) {
        *self.get_axis_mut(axis) = value;
    }

    fn with_axis(mut self, axis: Axis, value: Self::Element) -> Self {
        self.set_axis(axis, value);
        self
    }
}

impl AxisVec3 for Vec3 {
    type Element = f32;

    fn get_axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn get_axis_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_access() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.get_axis(Axis::X), 1.0);
        assert_eq!(v.get_axis(Axis::Y), 2.0);
        assert_eq!(v.get_axis(Axis::Z), 3.0);

        v.set_axis(Axis::Y, -4.0);
        *v.get_axis_mut(Axis::Z) += 1.0;
        assert_eq!(v, Vec3::new(1.0, -4.0, 4.0));
    }

    #[test]
    fn test_with_axis() {
        assert_eq!(Vec3::ZERO.with_axis(Axis::Y, 5.0), Vec3::new(0.0, 5.0, 0.0));
    }
}
