/// Size classification of scene objects.
///
/// Every object lands in exactly one bucket, picked once at registration
/// from its bounding-sphere diameter.

use std::fmt;
use super::bounds::BoundingSphere;

/// Bucket an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// All classes, in bucket search order.
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Position of this class in `ALL`.
    pub fn index(self) -> usize {
        match self {
            SizeClass::Small => 0,
            SizeClass::Medium => 1,
            SizeClass::Large => 2,
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SizeClass::Small => "Small",
            SizeClass::Medium => "Medium",
            SizeClass::Large => "Large",
        };
        f.write_str(name)
    }
}

/// Diameter thresholds separating the three classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeThresholds {
    /// Largest diameter still classified as Small
    pub small_max: f32,
    /// Largest diameter still classified as Medium
    pub medium_max: f32,
}

impl SizeThresholds {
    pub fn new(small_max: f32, medium_max: f32) -> Self {
        Self { small_max, medium_max }
    }

    /// Classify a diameter. Upper bounds are inclusive: a diameter equal to
    /// a threshold belongs to the smaller class.
    pub fn classify_diameter(&self, diameter: f32) -> SizeClass {
        if diameter <= self.small_max {
            SizeClass::Small
        } else if diameter <= self.medium_max {
            SizeClass::Medium
        } else {
            SizeClass::Large
        }
    }

    pub fn classify(&self, sphere: &BoundingSphere) -> SizeClass {
        self.classify_diameter(sphere.diameter())
    }
}

#[cfg(test)]
#[path = "size_class_tests.rs"]
mod tests;
