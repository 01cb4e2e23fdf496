use glam::Vec3;
use crate::culling::BoundingSphere;
use super::*;

fn thresholds() -> SizeThresholds {
    SizeThresholds::new(2.0, 20.0)
}

// ============================================================================
// Classification bands
// ============================================================================

#[test]
fn test_classify_bands() {
    let t = thresholds();
    assert_eq!(t.classify_diameter(0.5), SizeClass::Small);
    assert_eq!(t.classify_diameter(5.0), SizeClass::Medium);
    assert_eq!(t.classify_diameter(50.0), SizeClass::Large);
}

#[test]
fn test_boundary_resolves_to_smaller_class() {
    let t = thresholds();
    assert_eq!(t.classify_diameter(2.0), SizeClass::Small);
    assert_eq!(t.classify_diameter(20.0), SizeClass::Medium);
}

#[test]
fn test_just_above_boundary() {
    let t = thresholds();
    assert_eq!(t.classify_diameter(2.0001), SizeClass::Medium);
    assert_eq!(t.classify_diameter(20.0001), SizeClass::Large);
}

#[test]
fn test_zero_diameter_is_small() {
    assert_eq!(thresholds().classify_diameter(0.0), SizeClass::Small);
}

#[test]
fn test_classify_uses_sphere_diameter() {
    let t = thresholds();
    // radius 1.0 → diameter 2.0 → boundary → Small
    assert_eq!(t.classify(&BoundingSphere::new(Vec3::ZERO, 1.0)), SizeClass::Small);
    assert_eq!(t.classify(&BoundingSphere::new(Vec3::ZERO, 1.5)), SizeClass::Medium);
}

#[test]
fn test_classification_is_monotonic() {
    let t = thresholds();
    let mut previous = SizeClass::Small;
    for step in 0..400 {
        let class = t.classify_diameter(step as f32 * 0.1);
        assert!(class >= previous, "class must never shrink as the diameter grows");
        previous = class;
    }
    assert_eq!(previous, SizeClass::Large);
}

// ============================================================================
// SizeClass helpers
// ============================================================================

#[test]
fn test_size_class_index_matches_all_order() {
    for (i, class) in SizeClass::ALL.iter().enumerate() {
        assert_eq!(class.index(), i);
    }
}

#[test]
fn test_size_class_display() {
    assert_eq!(SizeClass::Medium.to_string(), "Medium");
}
