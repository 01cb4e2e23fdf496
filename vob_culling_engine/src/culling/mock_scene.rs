/// Mock host scene for unit tests.
///
/// Objects and rigid bodies live in SlotMaps, like a real host would keep
/// them. Every object starts active; `set_active` calls are counted so
/// tests can assert that suppressed objects were never touched.

use glam::{Mat4, Vec3};
use slotmap::SlotMap;
use super::bounds::{AABB, VobGeometry};
use super::scene_port::{BodyKey, GeometryProvider, PhysicsProvider, VobHost, VobKey};

pub struct MockVob {
    pub world: Mat4,
    pub geometry: Option<VobGeometry>,
    pub active: bool,
    pub alive: bool,
    pub body: Option<BodyKey>,
    /// Number of set_active calls received
    pub active_writes: usize,
}

pub struct MockBody {
    pub velocity: Vec3,
}

pub struct MockScene {
    pub vobs: SlotMap<VobKey, MockVob>,
    pub bodies: SlotMap<BodyKey, MockBody>,
}

impl MockScene {
    pub fn new() -> Self {
        Self {
            vobs: SlotMap::with_key(),
            bodies: SlotMap::with_key(),
        }
    }

    pub fn add_vob(&mut self, world: Mat4, geometry: Option<VobGeometry>) -> VobKey {
        self.vobs.insert(MockVob {
            world,
            geometry,
            active: true,
            alive: true,
            body: None,
            active_writes: 0,
        })
    }

    /// Cube mesh of edge `diameter` centred at `position`.
    pub fn add_mesh_vob(&mut self, position: Vec3, diameter: f32) -> VobKey {
        let bounds = AABB::from_center_size(Vec3::ZERO, Vec3::splat(diameter));
        self.add_vob(Mat4::from_translation(position), Some(VobGeometry::Mesh(bounds)))
    }

    /// Attach a rigid body moving at `velocity`.
    pub fn add_body(&mut self, vob: VobKey, velocity: Vec3) -> BodyKey {
        let body = self.bodies.insert(MockBody { velocity });
        self.vobs[vob].body = Some(body);
        body
    }

    pub fn set_velocity(&mut self, body: BodyKey, velocity: Vec3) {
        self.bodies[body].velocity = velocity;
    }

    pub fn remove_body(&mut self, body: BodyKey) {
        self.bodies.remove(body);
    }

    pub fn move_vob(&mut self, vob: VobKey, position: Vec3) {
        self.vobs[vob].world = Mat4::from_translation(position);
    }

    pub fn destroy(&mut self, vob: VobKey) {
        self.vobs[vob].alive = false;
    }

    pub fn is_active(&self, vob: VobKey) -> bool {
        self.vobs[vob].active
    }

    pub fn active_writes(&self, vob: VobKey) -> usize {
        self.vobs[vob].active_writes
    }
}

impl VobHost for MockScene {
    fn is_alive(&self, vob: VobKey) -> bool {
        self.vobs.get(vob).map_or(false, |v| v.alive)
    }

    fn world_matrix(&self, vob: VobKey) -> Option<Mat4> {
        self.vobs.get(vob).filter(|v| v.alive).map(|v| v.world)
    }

    fn set_active(&mut self, vob: VobKey, active: bool) {
        if let Some(v) = self.vobs.get_mut(vob) {
            v.active = active;
            v.active_writes += 1;
        }
    }
}

impl GeometryProvider for MockScene {
    fn vob_geometry(&self, vob: VobKey) -> Option<VobGeometry> {
        self.vobs.get(vob).and_then(|v| v.geometry)
    }
}

impl PhysicsProvider for MockScene {
    fn rigid_body(&self, vob: VobKey) -> Option<BodyKey> {
        self.vobs.get(vob).and_then(|v| v.body)
    }

    fn linear_velocity(&self, body: BodyKey) -> Option<Vec3> {
        self.bodies.get(body).map(|b| b.velocity)
    }
}
