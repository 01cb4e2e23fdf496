/// Debug drawing of bucket spheres.
///
/// Editor/debug only. Drawing reads the buckets and never changes engine
/// state.

use glam::Vec3;
use super::bounds::BoundingSphere;
use super::bucket::BucketRegistry;
use super::size_class::SizeClass;

/// Sink for wire spheres, implemented by the host's gizmo or line renderer.
pub trait DebugDrawer {
    fn draw_wire_sphere(&mut self, center: Vec3, radius: f32, color: [f32; 3]);
}

/// Wire colour of each bucket's spheres.
pub fn bucket_color(class: SizeClass) -> [f32; 3] {
    match class {
        SizeClass::Small => [0.5, 0.0, 0.0],
        SizeClass::Medium => [0.4, 0.0, 0.0],
        SizeClass::Large => [0.3, 0.0, 0.0],
    }
}

/// Raw bytes of a sphere array (16 bytes per sphere), for GPU upload.
pub fn sphere_bytes(spheres: &[BoundingSphere]) -> &[u8] {
    bytemuck::cast_slice(spheres)
}

/// Draw every sphere of every bucket in its bucket colour.
pub fn draw_buckets(registry: &BucketRegistry, drawer: &mut dyn DebugDrawer) -> usize {
    let mut drawn = 0;
    for bucket in registry.buckets() {
        let color = bucket_color(bucket.size_class());
        for sphere in bucket.spheres() {
            drawer.draw_wire_sphere(sphere.center, sphere.radius, color);
            drawn += 1;
        }
    }
    drawn
}

#[cfg(test)]
#[path = "debug_draw_tests.rs"]
mod tests;
