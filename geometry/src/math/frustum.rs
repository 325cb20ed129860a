use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4Swizzles, vec4};

use crate::math::aabb::AABB;
use crate::math::plane::Plane;

/// NDC depth of the near and far planes under a reversed-Z projection.
const NEAR_DEPTH: f32 = 1.0;
const FAR_DEPTH: f32 = 0.00001;

/// Corner indices for each face, wound so the normal points inward after the optional flip.
/// Corner index bits: 0 selects right, 1 selects top, 2 selects far.
const FACES: [([usize; 3], bool); 6] = [
    ([0, 6, 4], false), // left
    ([1, 5, 3], false), // right
    ([0, 1, 4], true),  // bottom
    ([2, 3, 6], false), // top
    ([0, 1, 2], false), // near
    ([4, 5, 6], true),  // far
];

/// Convex view volume usable with [`AABB::intersects_convex_shape`].
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far. Normals point inward.
    pub planes: [Plane; 6],
    pub corners: [Vec3; 8],
}

impl Frustum {
    pub fn from_inverse_view_projection(inverse_view_projection: &Mat4) -> Frustum {
        let corners: [Vec3; 8] = std::array::from_fn(|i| {
            let ndc = vec4(
                if i & 1 != 0 { 1.0 } else { -1.0 },
                if i & 2 != 0 { 1.0 } else { -1.0 },
                if i & 4 != 0 { FAR_DEPTH } else { NEAR_DEPTH },
                1.0,
            );
            let world = *inverse_view_projection * ndc;
            (world / world.w).xyz()
        });

        let planes = FACES.map(|([a, b, c], flip)| {
            let plane = Plane::from_points(corners[a], corners[b], corners[c]);
            if flip { plane.flip() } else { plane }
        });

        Frustum { planes, corners }
    }

    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.intersects_convex_shape(&self.planes, &self.corners)
    }

    pub fn contains_aabb(&self, aabb: &AABB) -> bool {
        aabb.inside_convex_shape(&self.planes)
    }
}
