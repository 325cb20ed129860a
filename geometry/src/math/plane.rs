use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::approx::ApproxEq;

/// Plane in Hessian normal form. Points with a positive `distance_to_point` lie on the side the
/// normal faces.
#[derive(Copy, Clone, Pod, Zeroable, Debug, Default, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub const fn new(normal: Vec3, distance: f32) -> Plane {
        Plane { normal, distance }
    }

    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Plane {
        let ab = b - a;
        let ac = c - a;
        let normal = ab.cross(ac).normalize();
        Self::from_point_normal(a, normal)
    }

    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Plane {
        Plane {
            normal,
            distance: -normal.dot(point),
        }
    }

    pub fn flip(&self) -> Plane {
        Plane {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    pub fn is_equal_approx(&self, other: &Plane) -> bool {
        self.normal.is_equal_approx(&other.normal) && self.distance.is_equal_approx(&other.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_point_normal() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 4.0, 0.0), Vec3::Y);
        assert_eq!(plane, Plane::new(Vec3::Y, -4.0));
        assert_eq!(plane.distance_to_point(Vec3::new(10.0, 4.0, -3.0)), 0.0);
        assert_eq!(plane.distance_to_point(Vec3::new(0.0, 7.0, 0.0)), 3.0);
        assert_eq!(plane.distance_to_point(Vec3::new(0.0, 2.0, 0.0)), -2.0);
    }

    #[test]
    fn test_from_points_winding() {
        // Counter-clockwise when seen from +Z
        let plane = Plane::from_points(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        );
        assert!(plane.is_equal_approx(&Plane::new(Vec3::Z, -1.0)));
    }

    #[test]
    fn test_flip() {
        let plane = Plane::new(Vec3::X, -2.0);
        let flipped = plane.flip();
        let point = Vec3::new(5.0, 0.0, 0.0);
        assert_eq!(flipped.distance_to_point(point), -plane.distance_to_point(point));
    }
}
