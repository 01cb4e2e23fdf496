//! Camera module - culling reference point and view frustum.
//!
//! Passive data containers consumed by the spatial trackers.
//! The culling engine does NOT drive cameras: the host computes
//! the camera state each frame and hands it over.

mod camera;
mod frustum;

pub use camera::Camera;
pub use frustum::Frustum;
