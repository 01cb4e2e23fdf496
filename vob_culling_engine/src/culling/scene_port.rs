/// Ports to the host scene.
///
/// The culling engine never owns scene objects. It refers to them by
/// `VobKey` and reaches the host through these traits: geometry for
/// registration, transforms and the active flag for visibility, and the
/// physics world for settle detection.

use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use super::bounds::VobGeometry;

// ===== KEYS =====

new_key_type! {
    /// Stable identity of a scene object (vob) in the host scene.
    pub struct VobKey;
}

new_key_type! {
    /// Handle of a rigid body in the host physics world.
    pub struct BodyKey;
}

// ===== PORTS =====

/// Object transforms and the active/visible flag.
pub trait VobHost {
    /// Whether the handle still refers to a live object.
    fn is_alive(&self, vob: VobKey) -> bool;

    /// Current world transform, `None` for dead handles.
    fn world_matrix(&self, vob: VobKey) -> Option<Mat4>;

    /// Current world position (transform translation).
    fn world_position(&self, vob: VobKey) -> Option<Vec3> {
        self.world_matrix(vob).map(|m| m.w_axis.truncate())
    }

    /// Show or hide the object.
    fn set_active(&mut self, vob: VobKey, active: bool);
}

/// Local geometry lookup used to size objects.
pub trait GeometryProvider {
    /// `None` when no mesh, particle emitter or light is found on the object.
    fn vob_geometry(&self, vob: VobKey) -> Option<VobGeometry>;
}

/// Physics world queries used to detect when a released object settles.
pub trait PhysicsProvider {
    /// Rigid body attached to the object, `None` for objects without physics.
    fn rigid_body(&self, vob: VobKey) -> Option<BodyKey>;

    /// Instantaneous linear velocity. `None` once the body no longer exists.
    fn linear_velocity(&self, body: BodyKey) -> Option<Vec3>;
}

/// Everything the culling manager needs from the host scene.
pub trait VobScene: VobHost + GeometryProvider + PhysicsProvider {}

impl<T: VobHost + GeometryProvider + PhysicsProvider + ?Sized> VobScene for T {}
