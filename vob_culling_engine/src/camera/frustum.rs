/// Frustum - six clipping planes for visibility tests.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes

use glam::{Mat4, Vec3, Vec4};
use crate::culling::BoundingSphere;

/// Six frustum planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method. Works for both perspective
    /// and orthographic projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        // Row i of the matrix, as a Vec4 (glam stores columns)
        let row = |i: usize| vp.row(i);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        let mut planes = [
            r3 + r0, // left
            r3 - r0, // right
            r3 + r1, // bottom
            r3 - r1, // top
            r3 + r2, // near
            r3 - r2, // far
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from `point` to plane `index` (positive = inside).
    pub fn signed_distance(&self, index: usize, point: Vec3) -> f32 {
        let plane = self.planes[index];
        plane.truncate().dot(point) + plane.w
    }

    /// Test if a bounding sphere intersects this frustum.
    ///
    /// Conservative: may report spheres near frustum corners as visible,
    /// never reports a visible sphere as outside.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let center = sphere.center;
        (0..self.planes.len())
            .all(|i| self.signed_distance(i, center) >= -sphere.radius)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
