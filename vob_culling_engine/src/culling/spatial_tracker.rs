/// Spatial trackers - per-bucket visibility primitives.
///
/// A SpatialTracker watches one bucket's sphere array against the camera
/// and reports, by sphere index, which objects became visible or hidden
/// since the previous update. Implementations range from a plain distance
/// check to BVH- or platform-backed occlusion culling; the manager only
/// relies on the contract below.

use crate::camera::Camera;
use super::bounds::BoundingSphere;

/// Visibility change of one sphere, addressed by its index in the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub index: usize,
    pub visible: bool,
}

/// Per-bucket visibility primitive.
///
/// The bucket owns the sphere array and passes it to every `update`, so a
/// sphere moved by the manager is seen on the next frame.
pub trait SpatialTracker: Send {
    /// (Re)configure for `sphere_count` spheres culled beyond `culling_distance`.
    ///
    /// Forgets all previously reported visibility.
    fn register(&mut self, sphere_count: usize, culling_distance: f32);

    /// Test `spheres` against `camera` and append index-based changes to `events`.
    fn update(
        &mut self,
        spheres: &[BoundingSphere],
        camera: &Camera,
        events: &mut Vec<VisibilityChange>,
    );

    /// Forget the last reported visibility of `index`, so the next
    /// `update` reports it again. Called after a sphere is moved by hand.
    fn invalidate(&mut self, index: usize);

    /// Release the tracker. A disposed tracker reports nothing.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;

    /// Number of registered spheres.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds a fresh tracker for each bucket.
pub type TrackerFactory = Box<dyn Fn() -> Box<dyn SpatialTracker> + Send + Sync>;

/// Factory producing `DistanceTracker`s.
pub fn distance_tracker_factory() -> TrackerFactory {
    Box::new(|| Box::new(DistanceTracker::new()) as Box<dyn SpatialTracker>)
}

/// Distance + frustum tracker.
///
/// A sphere is visible when its surface lies within the culling distance
/// of the camera and, if the camera carries a frustum, it intersects that
/// frustum. O(n) per update; no spatial structure.
pub struct DistanceTracker {
    /// Last reported visibility per index (`None` = never reported)
    reported: Vec<Option<bool>>,
    culling_distance: f32,
    disposed: bool,
}

impl DistanceTracker {
    pub fn new() -> Self {
        Self {
            reported: Vec::new(),
            culling_distance: 0.0,
            disposed: false,
        }
    }

    pub fn culling_distance(&self) -> f32 {
        self.culling_distance
    }

    fn is_visible(&self, sphere: &BoundingSphere, camera: &Camera) -> bool {
        if sphere.surface_distance(camera.position()) > self.culling_distance {
            return false;
        }
        camera.frustum().map_or(true, |frustum| frustum.intersects_sphere(sphere))
    }
}

impl Default for DistanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialTracker for DistanceTracker {
    fn register(&mut self, sphere_count: usize, culling_distance: f32) {
        self.reported = vec![None; sphere_count];
        self.culling_distance = culling_distance;
        self.disposed = false;
    }

    fn update(
        &mut self,
        spheres: &[BoundingSphere],
        camera: &Camera,
        events: &mut Vec<VisibilityChange>,
    ) {
        if self.disposed {
            return;
        }
        debug_assert_eq!(
            spheres.len(),
            self.reported.len(),
            "sphere array length changed without register()"
        );

        for (index, sphere) in spheres.iter().enumerate().take(self.reported.len()) {
            let visible = self.is_visible(sphere, camera);
            if self.reported[index] != Some(visible) {
                self.reported[index] = Some(visible);
                events.push(VisibilityChange { index, visible });
            }
        }
    }

    fn invalidate(&mut self, index: usize) {
        if let Some(reported) = self.reported.get_mut(index) {
            *reported = None;
        }
    }

    fn dispose(&mut self) {
        self.reported.clear();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn len(&self) -> usize {
        self.reported.len()
    }
}

#[cfg(test)]
#[path = "spatial_tracker_tests.rs"]
mod tests;
