use glam::{Mat4, Vec3};
use super::*;

// ============================================================================
// AABB
// ============================================================================

#[test]
fn test_aabb_center_and_size() {
    let aabb = AABB {
        min: Vec3::new(-1.0, 0.0, 2.0),
        max: Vec3::new(3.0, 1.0, 4.0),
    };
    assert_eq!(aabb.center(), Vec3::new(1.0, 0.5, 3.0));
    assert_eq!(aabb.size(), Vec3::new(4.0, 1.0, 2.0));
    assert_eq!(aabb.max_dimension(), 4.0);
}

#[test]
fn test_aabb_from_center_size() {
    let aabb = AABB::from_center_size(Vec3::new(1.0, 1.0, 1.0), Vec3::splat(2.0));
    assert_eq!(aabb.min, Vec3::ZERO);
    assert_eq!(aabb.max, Vec3::splat(2.0));
}

// ============================================================================
// VobGeometry
// ============================================================================

#[test]
fn test_light_bounds_cover_twice_the_range() {
    let bounds = VobGeometry::Light { range: 7.5 }.local_bounds();
    assert_eq!(bounds.center(), Vec3::ZERO);
    assert_eq!(bounds.size(), Vec3::splat(15.0));
}

#[test]
fn test_mesh_and_particle_bounds_pass_through() {
    let aabb = AABB::from_center_size(Vec3::Y, Vec3::ONE);
    assert_eq!(VobGeometry::Mesh(aabb).local_bounds(), aabb);
    assert_eq!(VobGeometry::Particles(aabb).local_bounds(), aabb);
}

// ============================================================================
// BoundingSphere
// ============================================================================

#[test]
fn test_sphere_radius_is_half_largest_edge() {
    let aabb = AABB::from_center_size(Vec3::ZERO, Vec3::new(1.0, 4.0, 2.0));
    let sphere = BoundingSphere::from_local_bounds(&Mat4::IDENTITY, &aabb);
    assert_eq!(sphere.radius, 2.0);
    assert_eq!(sphere.diameter(), 4.0);
}

#[test]
fn test_sphere_center_is_transformed_bounds_center() {
    let aabb = AABB::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::ONE);
    let world = Mat4::from_translation(Vec3::new(10.0, 0.0, -5.0));
    let sphere = BoundingSphere::from_local_bounds(&world, &aabb);
    assert_eq!(sphere.center, Vec3::new(10.0, 1.0, -5.0));
}

#[test]
fn test_surface_distance() {
    let sphere = BoundingSphere::new(Vec3::ZERO, 2.0);
    assert_eq!(sphere.surface_distance(Vec3::new(5.0, 0.0, 0.0)), 3.0);
    assert_eq!(sphere.surface_distance(Vec3::new(1.0, 0.0, 0.0)), 0.0);
}

#[test]
fn test_sphere_array_casts_to_bytes() {
    let spheres = [
        BoundingSphere::new(Vec3::ZERO, 1.0),
        BoundingSphere::new(Vec3::ONE, 2.0),
    ];
    let bytes: &[u8] = bytemuck::cast_slice(&spheres);
    assert_eq!(bytes.len(), 2 * 16);

    let floats: &[f32] = bytemuck::cast_slice(&spheres);
    assert_eq!(floats, &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 2.0]);
}
