pub mod aabb;
pub mod approx;
pub mod axis;
pub mod axis_vec;
pub mod frustum;
pub mod plane;

pub use aabb::{AABB, DisplayVec3, RayIntersection, SegmentIntersection};
pub use approx::ApproxEq;
pub use axis::Axis;
pub use plane::Plane;
