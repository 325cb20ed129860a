pub mod config;
pub mod error;
pub mod math;

pub use error::GeometryError;
pub use math::{AABB, ApproxEq, DisplayVec3, Axis, Plane, RayIntersection, SegmentIntersection};
