use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::{approx::ApproxEq, axis::Axis, axis_vec::AxisVec3, plane::Plane};

/// Stand-in for an unbounded ray parameter in the slab loop.
const RAY_T_MAX: f32 = 1e20;

/// Axis-aligned box stored as a corner and a size.
///
/// `size` is allowed to be zero or negative. A negative component means `position` is the high
/// end on that axis, so queries that reason about extents work on the normalized bounds (see
/// [`AABB::abs`]), while equality compares the raw fields.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct AABB {
    pub position: Vec3,
    pub size: Vec3,
}

/// First boundary crossing reported by [`AABB::find_intersects_ray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersection {
    /// The ray origin was strictly inside the box. Origins on a face count as outside.
    pub inside: bool,
    pub point: Vec3,
    /// Outward normal of the face the ray enters through.
    pub normal: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentIntersection {
    pub point: Vec3,
    /// Zero when the segment starts inside the box.
    pub normal: Vec3,
}

impl AABB {
    pub const fn new(position: Vec3, size: Vec3) -> AABB {
        AABB { position, size }
    }

    /// Smallest box with non-negative size spanning two arbitrary points.
    pub fn from_corners(point1: Vec3, point2: Vec3) -> AABB {
        let min = point1.min(point2);
        let max = point1.max(point2);
        AABB::new(min, max - min)
    }

    pub const fn position(&self) -> Vec3 {
        self.position
    }

    pub const fn size(&self) -> Vec3 {
        self.size
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_size(&mut self, size: Vec3) {
        self.size = size;
    }

    pub fn end(&self) -> Vec3 {
        self.position + self.size
    }

    /// Moves the end corner, keeping `position` fixed. The size may flip sign.
    pub fn set_end(&mut self, end: Vec3) {
        self.size = end - self.position;
    }

    pub fn center(&self) -> Vec3 {
        self.position + self.size * 0.5
    }

    /// Signed volume; negative when an odd number of size components are negative.
    pub fn volume(&self) -> f32 {
        self.size.x * self.size.y * self.size.z
    }

    pub fn has_volume(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0 && self.size.z > 0.0
    }

    pub fn has_surface(&self) -> bool {
        self.size.x != 0.0 || self.size.y != 0.0 || self.size.z != 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.size.is_finite()
    }

    pub fn is_equal_approx(&self, other: &AABB) -> bool {
        self.position.is_equal_approx(&other.position) && self.size.is_equal_approx(&other.size)
    }

    /// Per-axis low and high corners regardless of the sign of `size`.
    fn bounds(&self) -> (Vec3, Vec3) {
        let end = self.end();
        (self.position.min(end), self.position.max(end))
    }

    /// The same region with a non-negative size.
    pub fn abs(&self) -> AABB {
        let (min, max) = self.bounds();
        AABB::new(min, max - min)
    }

    pub fn has_point(&self, point: Vec3) -> bool {
        let (min, max) = self.bounds();
        point.cmpge(min).all() && point.cmple(max).all()
    }

    fn has_point_strict(&self, point: Vec3) -> bool {
        let (min, max) = self.bounds();
        point.cmpgt(min).all() && point.cmplt(max).all()
    }

    /// Touching faces count as intersecting.
    pub fn intersects(&self, other: &AABB) -> bool {
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        a_min.cmple(b_max).all() && b_min.cmple(a_max).all()
    }

    /// Overlapping region, or `AABB::default()` when the boxes are disjoint.
    pub fn intersection(&self, other: &AABB) -> AABB {
        if !self.intersects(other) {
            return AABB::default();
        }

        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        let min = a_min.max(b_min);
        let max = a_max.min(b_max);
        AABB::new(min, max - min)
    }

    pub fn encloses(&self, other: &AABB) -> bool {
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        a_min.cmple(b_min).all() && a_max.cmpge(b_max).all()
    }

    pub fn merge(&self, other: &AABB) -> AABB {
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        let min = a_min.min(b_min);
        let max = a_max.max(b_max);
        AABB::new(min, max - min)
    }

    pub fn expand(&self, point: Vec3) -> AABB {
        self.merge(&AABB::new(point, Vec3::ZERO))
    }

    /// Moves every face outward by `by` (inward when negative). No clamping: shrinking past zero
    /// inverts the size.
    pub fn grow(&self, by: f32) -> AABB {
        AABB::new(
            self.position - Vec3::splat(by),
            self.size + Vec3::splat(by * 2.0),
        )
    }

    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        let center = self.center();
        let reach = (self.size * 0.5).abs() * plane.normal.signum();

        let furthest = plane.distance_to_point(center + reach);
        let nearest = plane.distance_to_point(center - reach);
        furthest >= 0.0 && nearest <= 0.0
    }

    /// Interval of signed distances from `plane` covered by the box.
    pub fn project_range_in_plane(&self, plane: &Plane) -> (f32, f32) {
        let half_extents = (self.size * 0.5).abs();
        let length = plane.normal.abs().dot(half_extents);
        let distance = plane.distance_to_point(self.center());
        (distance - length, distance + length)
    }

    pub fn intersects_segment(&self, from: Vec3, to: Vec3) -> bool {
        self.find_intersects_segment(from, to).is_some()
    }

    pub fn find_intersects_segment(&self, from: Vec3, to: Vec3) -> Option<SegmentIntersection> {
        let (box_min, box_max) = self.bounds();
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;
        let mut hit_axis = Axis::X;
        let mut hit_sign = 0.0;

        for axis in Axis::ALL {
            let seg_from = from.get_axis(axis);
            let seg_to = to.get_axis(axis);
            let begin = box_min.get_axis(axis);
            let end = box_max.get_axis(axis);
            let length = seg_to - seg_from;

            let (c_min, c_max, sign) = if seg_from < seg_to {
                if seg_from > end || seg_to < begin {
                    return None;
                }
                let c_min = if seg_from < begin {
                    (begin - seg_from) / length
                } else {
                    0.0
                };
                let c_max = if seg_to > end {
                    (end - seg_from) / length
                } else {
                    1.0
                };
                (c_min, c_max, -1.0)
            } else {
                // Also covers a segment that doesn't move on this axis
                if seg_to > end || seg_from < begin {
                    return None;
                }
                let c_min = if seg_from > end {
                    (end - seg_from) / length
                } else {
                    0.0
                };
                let c_max = if seg_to < begin {
                    (begin - seg_from) / length
                } else {
                    1.0
                };
                (c_min, c_max, 1.0)
            };

            if c_min > t_min {
                t_min = c_min;
                hit_axis = axis;
                hit_sign = sign;
            }
            if c_max < t_max {
                t_max = c_max;
            }
            if t_max < t_min {
                return None;
            }
        }

        Some(SegmentIntersection {
            point: from + (to - from) * t_min,
            normal: Vec3::ZERO.with_axis(hit_axis, hit_sign),
        })
    }

    pub fn intersects_ray(&self, from: Vec3, dir: Vec3) -> bool {
        self.find_intersects_ray(from, dir).is_some()
    }

    /// Slab test for a ray starting at `from`.
    ///
    /// When the origin is inside or on the face the ray leaves through, the reported point is where
    /// the ray line entered the box, which lies behind the origin. A zero direction degrades to a point containment test and reports
    /// `from` with a zero normal.
    pub fn find_intersects_ray(&self, from: Vec3, dir: Vec3) -> Option<RayIntersection> {
        if dir == Vec3::ZERO {
            return self.has_point(from).then(|| RayIntersection {
                inside: self.has_point_strict(from),
                point: from,
                normal: Vec3::ZERO,
            });
        }

        let (box_min, box_max) = self.bounds();
        let mut t_min = -RAY_T_MAX;
        let mut t_max = RAY_T_MAX;
        let mut hit_axis = Axis::X;

        for axis in Axis::ALL {
            let origin = from.get_axis(axis);
            let d = dir.get_axis(axis);
            let low = box_min.get_axis(axis);
            let high = box_max.get_axis(axis);

            if d == 0.0 {
                if origin < low || origin > high {
                    return None;
                }
                continue;
            }

            let mut t1 = (low - origin) / d;
            let mut t2 = (high - origin) / d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            // Later axes win ties, so a degenerate slab still resolves to its own face
            if t1 >= t_min {
                t_min = t1;
                hit_axis = axis;
            }
            if t2 < t_max {
                if t2 < 0.0 {
                    return None;
                }
                t_max = t2;
            }
            if t_min > t_max {
                return None;
            }
        }

        let entering_positive = dir.get_axis(hit_axis) > 0.0;
        let face = if entering_positive {
            box_min.get_axis(hit_axis)
        } else {
            box_max.get_axis(hit_axis)
        };

        // Snap onto the face to drop the rounding error of `from + dir * t`
        let point = (from + dir * t_min).with_axis(hit_axis, face);
        let normal = Vec3::ZERO.with_axis(hit_axis, if entering_positive { -1.0 } else { 1.0 });

        Some(RayIntersection {
            inside: self.has_point_strict(from),
            point,
            normal,
        })
    }

    /// Conservative overlap test against a convex volume bounded by inward-facing `planes`.
    ///
    /// `points` are the corners of the volume. When given, they are used to reject boxes that the
    /// plane pass alone can't separate. Pass an empty slice to skip that pass.
    pub fn intersects_convex_shape(&self, planes: &[Plane], points: &[Vec3]) -> bool {
        let center = self.center();
        let half_extents = (self.size * 0.5).abs();

        for plane in planes {
            let corner = center + half_extents * plane.normal.signum();
            if plane.distance_to_point(corner) < 0.0 {
                return false;
            }
        }

        if points.is_empty() {
            return true;
        }

        let (min, max) = self.bounds();
        for axis in Axis::ALL {
            let low = min.get_axis(axis);
            let high = max.get_axis(axis);
            if points.iter().all(|p| p.get_axis(axis) > high)
                || points.iter().all(|p| p.get_axis(axis) < low)
            {
                return false;
            }
        }

        true
    }

    /// The whole box lies on the inner side of every plane.
    pub fn inside_convex_shape(&self, planes: &[Plane]) -> bool {
        let center = self.center();
        let half_extents = (self.size * 0.5).abs();

        planes.iter().all(|plane| {
            let corner = center - half_extents * plane.normal.signum();
            plane.distance_to_point(corner) >= 0.0
        })
    }

    pub fn longest_axis_index(&self) -> Axis {
        let size = self.size.abs();
        let mut longest = Axis::X;
        for axis in [Axis::Y, Axis::Z] {
            if size.get_axis(axis) > size.get_axis(longest) {
                longest = axis;
            }
        }
        longest
    }

    pub fn longest_axis(&self) -> Vec3 {
        self.longest_axis_index().unit_vector()
    }

    pub fn longest_axis_size(&self) -> f32 {
        self.size.abs().get_axis(self.longest_axis_index())
    }

    pub fn shortest_axis_index(&self) -> Axis {
        let size = self.size.abs();
        let mut shortest = Axis::X;
        for axis in [Axis::Y, Axis::Z] {
            if size.get_axis(axis) < size.get_axis(shortest) {
                shortest = axis;
            }
        }
        shortest
    }

    pub fn shortest_axis(&self) -> Vec3 {
        self.shortest_axis_index().unit_vector()
    }

    pub fn shortest_axis_size(&self) -> f32 {
        self.size.abs().get_axis(self.shortest_axis_index())
    }

    /// Corner furthest along `dir`. Components that are zero pick the low bound.
    pub fn support(&self, dir: Vec3) -> Vec3 {
        let (min, max) = self.bounds();
        Vec3::select(dir.cmpgt(Vec3::ZERO), max, min)
    }

    /// Corner `index` in `0..8`. Bit 2 selects the end on X, bit 1 on Y and bit 0 on Z.
    pub fn try_endpoint(&self, index: i32) -> Result<Vec3, GeometryError> {
        if !(0..8).contains(&index) {
            return Err(GeometryError::EndpointIndexOutOfRange(index));
        }

        let end = self.end();
        let pick = |bit: i32, axis: Axis| {
            if index & bit != 0 {
                end.get_axis(axis)
            } else {
                self.position.get_axis(axis)
            }
        };
        Ok(Vec3::new(pick(4, Axis::X), pick(2, Axis::Y), pick(1, Axis::Z)))
    }

    /// Like [`AABB::try_endpoint`], but logs an invalid index and returns the origin.
    pub fn endpoint(&self, index: i32) -> Vec3 {
        self.try_endpoint(index).unwrap_or_else(|err| {
            log::error!("{}", err);
            Vec3::ZERO
        })
    }

    /// Edge `index` in `0..12` as a `(from, to)` pair of corners.
    pub fn try_edge(&self, index: i32) -> Result<(Vec3, Vec3), GeometryError> {
        let p = self.position;
        let e = self.end();
        let corner = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);

        let edge = match index {
            0 => (corner(e.x, p.y, p.z), corner(p.x, p.y, p.z)),
            1 => (corner(e.x, p.y, e.z), corner(e.x, p.y, p.z)),
            2 => (corner(p.x, p.y, e.z), corner(e.x, p.y, e.z)),
            3 => (corner(p.x, p.y, p.z), corner(p.x, p.y, e.z)),
            4 => (corner(p.x, e.y, p.z), corner(e.x, e.y, p.z)),
            5 => (corner(e.x, e.y, p.z), corner(e.x, e.y, e.z)),
            6 => (corner(e.x, e.y, e.z), corner(p.x, e.y, e.z)),
            7 => (corner(p.x, e.y, e.z), corner(p.x, e.y, p.z)),
            8 => (corner(p.x, p.y, e.z), corner(p.x, e.y, e.z)),
            9 => (corner(p.x, p.y, p.z), corner(p.x, e.y, p.z)),
            10 => (corner(e.x, p.y, p.z), corner(e.x, e.y, p.z)),
            11 => (corner(e.x, p.y, e.z), corner(e.x, e.y, e.z)),
            _ => return Err(GeometryError::EdgeIndexOutOfRange(index)),
        };
        Ok(edge)
    }

    pub fn edge(&self, index: i32) -> (Vec3, Vec3) {
        self.try_edge(index).unwrap_or_else(|err| {
            log::error!("{}", err);
            (Vec3::ZERO, Vec3::ZERO)
        })
    }

    /// Bounding box of this box after `transform`, with a non-negative size.
    pub fn transformed(&self, transform: &Affine3A) -> AABB {
        let (min, max) = self.bounds();
        let mut t_min = Vec3::from(transform.translation);
        let mut t_max = t_min;

        for row_axis in Axis::ALL {
            let row = Vec3::from(transform.matrix3.row(row_axis.index()));
            for column_axis in Axis::ALL {
                let m = row.get_axis(column_axis);
                let a = m * min.get_axis(column_axis);
                let b = m * max.get_axis(column_axis);
                *t_min.get_axis_mut(row_axis) += a.min(b);
                *t_max.get_axis_mut(row_axis) += a.max(b);
            }
        }

        AABB::new(t_min, t_max - t_min)
    }
}

impl ApproxEq for AABB {
    fn is_equal_approx(&self, other: &AABB) -> bool {
        AABB::is_equal_approx(self, other)
    }
}

/// Prints a vector as `(x, y, z)`, the form used inside the [`AABB`] display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayVec3(pub Vec3);

impl fmt::Display for DisplayVec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DisplayVec3(v) = self;
        // Debug formatting keeps the trailing ".0" on integral values
        write!(f, "({:?}, {:?}, {:?})", v.x, v.y, v.z)
    }
}

impl fmt::Display for AABB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[P: {}, S: {}]",
            DisplayVec3(self.position),
            DisplayVec3(self.size)
        )
    }
}
