/// Camera - the reference point the spatial trackers measure against.
///
/// A passive data container. The host sets the position every frame
/// (usually the player's head or the main camera) and, when frustum
/// culling is wanted, a frustum extracted from its view-projection.

use glam::{Mat4, Vec3};
use super::frustum::Frustum;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    frustum: Option<Frustum>,
}

impl Camera {
    /// Distance-only camera (no frustum test).
    pub fn at(position: Vec3) -> Self {
        Self { position, frustum: None }
    }

    /// Camera with an explicit frustum.
    pub fn new(position: Vec3, frustum: Frustum) -> Self {
        Self { position, frustum: Some(frustum) }
    }

    /// Camera whose frustum is extracted from `view_projection`.
    pub fn from_view_projection(position: Vec3, view_projection: &Mat4) -> Self {
        Self::new(position, Frustum::from_view_projection(view_projection))
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn frustum(&self) -> Option<&Frustum> {
        self.frustum.as_ref()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// `None` disables the frustum test.
    pub fn set_frustum(&mut self, frustum: Option<Frustum>) {
        self.frustum = frustum;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
