/// Bounding volumes used to place scene objects into culling buckets.
///
/// Local geometry is reported by the host as a `VobGeometry`, reduced to a
/// local-space AABB and turned into a world-space `BoundingSphere` once,
/// when the scene is prepared.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

// ===== AABB =====

/// Axis-Aligned Bounding Box in local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Build from a centre and the full edge lengths.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self { min: center - half, max: center + half }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Longest edge.
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }
}

// ===== GEOMETRY SOURCES =====

/// Kind of geometry the host found on an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VobGeometry {
    /// Bounds of the object's (first) mesh
    Mesh(AABB),
    /// Bounds of a particle emitter
    Particles(AABB),
    /// Light source; culled by its range
    Light { range: f32 },
}

impl VobGeometry {
    /// Local-space bounds used for the bounding sphere.
    ///
    /// Lights cover a cube of edge `2 * range` centred on the origin.
    pub fn local_bounds(&self) -> AABB {
        match *self {
            VobGeometry::Mesh(bounds) | VobGeometry::Particles(bounds) => bounds,
            VobGeometry::Light { range } => {
                AABB::from_center_size(Vec3::ZERO, Vec3::splat(range * 2.0))
            }
        }
    }
}

// ===== BOUNDING SPHERE =====

/// World-space bounding sphere.
///
/// `#[repr(C)]` + `Pod` so a bucket's sphere array can be handed to a
/// debug renderer with `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere around local `bounds` placed by `world`.
    ///
    /// The centre is the transformed bounds centre; the radius is half the
    /// largest local edge (scale is not applied).
    pub fn from_local_bounds(world: &Mat4, bounds: &AABB) -> Self {
        Self {
            center: world.transform_point3(bounds.center()),
            radius: bounds.max_dimension() * 0.5,
        }
    }

    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    /// Distance from `point` to the sphere surface (0 when inside).
    pub fn surface_distance(&self, point: Vec3) -> f32 {
        (self.center.distance(point) - self.radius).max(0.0)
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
