use std::time::Duration;
use crate::culling::SizeClass;
use super::*;

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_default_config() {
    let config = CullingConfig::default();
    assert!(config.enable_mesh_culling);
    assert!(!config.show_debug_spheres);
    assert_eq!(config.small, CullingGroupConfig::new(1.0, 50.0));
    assert_eq!(config.medium, CullingGroupConfig::new(5.0, 100.0));
    assert_eq!(config.large.culling_distance, 200.0);
    assert_eq!(config.release_delay(), Duration::from_secs(1));
    assert!(config.validate().is_ok());
}

#[test]
fn test_disabled_only_flips_the_switch() {
    let config = CullingConfig::disabled();
    assert!(!config.enable_mesh_culling);
    assert_eq!(config.distances(), CullingConfig::default().distances());
}

#[test]
fn test_thresholds_and_distances() {
    let config = CullingConfig::default();
    let thresholds = config.thresholds();
    assert_eq!(thresholds.classify_diameter(1.0), SizeClass::Small);
    assert_eq!(thresholds.classify_diameter(5.0), SizeClass::Medium);
    assert_eq!(thresholds.classify_diameter(5.1), SizeClass::Large);
    assert_eq!(config.distances(), [50.0, 100.0, 200.0]);
}

// ============================================================================
// TOML
// ============================================================================

#[test]
fn test_empty_toml_gives_defaults() {
    let config = CullingConfig::from_toml_str("").unwrap();
    assert_eq!(config, CullingConfig::default());
}

#[test]
fn test_partial_toml_overrides_fields() {
    let text = r#"
        show_debug_spheres = true
        release_delay_secs = 0.5

        [small]
        maximum_object_size = 2.0

        [medium]
        maximum_object_size = 20.0
        culling_distance = 80.0
    "#;
    let config = CullingConfig::from_toml_str(text).unwrap();

    assert!(config.show_debug_spheres);
    assert!(config.enable_mesh_culling);
    assert_eq!(config.small.maximum_object_size, 2.0);
    // Fields missing from a table take the group default
    assert_eq!(config.small.culling_distance, CullingGroupConfig::default().culling_distance);
    assert_eq!(config.medium, CullingGroupConfig::new(20.0, 80.0));
    assert_eq!(config.release_delay(), Duration::from_millis(500));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let err = CullingConfig::from_toml_str("enable_mesh_culling = maybe").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let err = CullingConfig::from_toml_str("release_delay_secs = \"soon\"").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_small_larger_than_medium_is_rejected() {
    let mut config = CullingConfig::default();
    config.small.maximum_object_size = 10.0;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_equal_thresholds_are_accepted() {
    let mut config = CullingConfig::default();
    config.small.maximum_object_size = 5.0;
    assert!(config.validate().is_ok());
}

#[test]
fn test_non_positive_threshold_is_rejected() {
    let mut config = CullingConfig::default();
    config.small.maximum_object_size = 0.0;
    assert!(config.validate().is_err());

    let mut config = CullingConfig::default();
    config.medium.maximum_object_size = f32::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_negative_distance_is_rejected() {
    let mut config = CullingConfig::default();
    config.large.culling_distance = -1.0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("large.culling_distance"));
}

#[test]
fn test_negative_delay_is_rejected() {
    let mut config = CullingConfig::default();
    config.release_delay_secs = -0.1;
    assert!(config.validate().is_err());
}

#[test]
fn test_unrepresentable_delay_is_rejected() {
    let mut config = CullingConfig::default();
    config.release_delay_secs = 1.0e30;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

    config.release_delay_secs = f32::INFINITY;
    assert!(config.validate().is_err());
    config.release_delay_secs = f32::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_huge_delay_in_toml_is_rejected_not_panicking() {
    let err = CullingConfig::from_toml_str("release_delay_secs = 1.0e30").unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_release_delay_saturates_on_unvalidated_values() {
    let mut config = CullingConfig::default();
    config.release_delay_secs = 1.0e30;
    assert_eq!(config.release_delay(), Duration::MAX);
    config.release_delay_secs = -3.0;
    assert_eq!(config.release_delay(), Duration::ZERO);
    config.release_delay_secs = f32::NAN;
    assert_eq!(config.release_delay(), Duration::ZERO);
}

#[test]
fn test_invalid_values_in_toml_fail_validation() {
    let err = CullingConfig::from_toml_str("[small]\nmaximum_object_size = 50.0").unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
