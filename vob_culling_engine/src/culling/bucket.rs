/// Buckets - per-size-class object lists with their spatial tracker.
///
/// A Bucket keeps two index-aligned arrays (objects and bounding spheres)
/// and the SpatialTracker watching those spheres. Index `i` refers to the
/// same object until the next full rebuild, so trackers and the
/// manipulation state can address objects by index alone.
///
/// The BucketRegistry owns the three buckets for a scene session and
/// rebuilds them on every scene load.

use glam::Vec3;
use rustc_hash::FxHashSet;
use crate::error::{Error, Result};
use crate::camera::Camera;
use crate::{engine_bail, engine_debug, engine_error, engine_info, engine_trace, engine_warn};
use super::bounds::BoundingSphere;
use super::scene_port::{VobKey, VobScene};
use super::size_class::{SizeClass, SizeThresholds};
use super::spatial_tracker::{SpatialTracker, TrackerFactory, VisibilityChange};

const SOURCE: &str = "vobcull::Buckets";

// ===== BUCKET =====

pub struct Bucket {
    size_class: SizeClass,
    culling_distance: f32,
    vobs: Vec<VobKey>,
    spheres: Vec<BoundingSphere>,
    tracker: Box<dyn SpatialTracker>,
}

impl Bucket {
    fn new(size_class: SizeClass, culling_distance: f32, tracker: Box<dyn SpatialTracker>) -> Self {
        Self {
            size_class,
            culling_distance,
            vobs: Vec::new(),
            spheres: Vec::new(),
            tracker,
        }
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    pub fn culling_distance(&self) -> f32 {
        self.culling_distance
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.vobs.len(), self.spheres.len());
        self.vobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Objects, index-aligned with `spheres()`.
    pub fn vobs(&self) -> &[VobKey] {
        &self.vobs
    }

    /// Bounding spheres, index-aligned with `vobs()`.
    pub fn spheres(&self) -> &[BoundingSphere] {
        &self.spheres
    }

    pub fn vob(&self, index: usize) -> Option<VobKey> {
        self.vobs.get(index).copied()
    }

    pub fn sphere(&self, index: usize) -> Option<&BoundingSphere> {
        self.spheres.get(index)
    }

    /// Index of `vob` in this bucket (linear search).
    pub fn index_of(&self, vob: VobKey) -> Option<usize> {
        self.vobs.iter().position(|&candidate| candidate == vob)
    }

    pub fn tracker(&self) -> &dyn SpatialTracker {
        self.tracker.as_ref()
    }

    fn push(&mut self, vob: VobKey, sphere: BoundingSphere) {
        self.vobs.push(vob);
        self.spheres.push(sphere);
    }

    fn clear(&mut self) {
        self.vobs.clear();
        self.spheres.clear();
    }

    /// Move the sphere at `index` to `center`. Radius is kept and the
    /// tracker re-reports the index on its next update.
    ///
    /// Panics if `index` is out of range: the caller's (class, index) pair
    /// no longer matches this bucket, which must never happen.
    fn set_sphere_center(&mut self, index: usize, center: Vec3) {
        assert!(
            index < self.spheres.len(),
            "{} bucket has no sphere {} (len {})",
            self.size_class,
            index,
            self.spheres.len()
        );
        self.spheres[index].center = center;
        self.tracker.invalidate(index);
    }

    fn register_tracker(&mut self) {
        self.tracker.register(self.spheres.len(), self.culling_distance);
    }

    fn update_tracker(&mut self, camera: &Camera, events: &mut Vec<VisibilityChange>) {
        self.tracker.update(&self.spheres, camera, events);
    }
}

// ===== PREPARE SUMMARY =====

/// Outcome of a bucket rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
    /// Live objects without resolvable geometry
    pub skipped: Vec<VobKey>,
}

impl PrepareSummary {
    /// Objects placed in any bucket.
    pub fn registered(&self) -> usize {
        self.small + self.medium + self.large
    }

    fn count_mut(&mut self, class: SizeClass) -> &mut usize {
        match class {
            SizeClass::Small => &mut self.small,
            SizeClass::Medium => &mut self.medium,
            SizeClass::Large => &mut self.large,
        }
    }
}

// ===== REGISTRY =====

/// Lifecycle of the registry's trackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// No trackers allocated yet
    Uninitialized,
    /// Trackers allocated; buckets may be filled
    Active,
    /// Trackers disposed for good
    ShutDown,
}

pub struct BucketRegistry {
    thresholds: SizeThresholds,
    /// Culling distance per class, indexed by `SizeClass::index()`
    distances: [f32; 3],
    factory: TrackerFactory,
    buckets: Vec<Bucket>,
    state: RegistryState,
}

impl BucketRegistry {
    pub fn new(thresholds: SizeThresholds, distances: [f32; 3], factory: TrackerFactory) -> Self {
        Self {
            thresholds,
            distances,
            factory,
            buckets: Vec::new(),
            state: RegistryState::Uninitialized,
        }
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn thresholds(&self) -> SizeThresholds {
        self.thresholds
    }

    /// Allocate one empty bucket and tracker per class. No-op once active.
    pub fn allocate(&mut self) -> Result<()> {
        match self.state {
            RegistryState::Active => Ok(()),
            RegistryState::ShutDown => {
                engine_bail!(SOURCE, "Cannot allocate trackers after shutdown")
            }
            RegistryState::Uninitialized => {
                self.buckets = self.fresh_buckets();
                self.state = RegistryState::Active;
                Ok(())
            }
        }
    }

    fn fresh_buckets(&self) -> Vec<Bucket> {
        SizeClass::ALL
            .iter()
            .map(|&class| Bucket::new(class, self.distances[class.index()], (self.factory)()))
            .collect()
    }

    pub fn bucket(&self, class: SizeClass) -> Option<&Bucket> {
        self.buckets.get(class.index())
    }

    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    /// Total objects across all buckets.
    pub fn vob_count(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    /// Fill the buckets from `vobs`, in input order.
    ///
    /// Any previous contents are discarded first. Dead handles are skipped
    /// silently; live objects without geometry are logged and reported in
    /// the summary. Each tracker is re-registered afterwards.
    pub fn prepare(&mut self, vobs: &[VobKey], scene: &dyn VobScene) -> Result<PrepareSummary> {
        if self.state != RegistryState::Active {
            engine_bail!(SOURCE, "Cannot prepare buckets in state {:?}", self.state);
        }

        for bucket in &mut self.buckets {
            bucket.clear();
        }

        let mut summary = PrepareSummary::default();
        let mut seen: FxHashSet<VobKey> = FxHashSet::default();

        for &vob in vobs {
            if !scene.is_alive(vob) {
                engine_trace!(SOURCE, "Skipping destroyed object {:?}", vob);
                continue;
            }
            if !seen.insert(vob) {
                engine_warn!(SOURCE, "Object {:?} listed twice, keeping first entry", vob);
                continue;
            }

            let sphere = match resolve_sphere(vob, scene) {
                Ok(sphere) => sphere,
                Err(err) => {
                    engine_error!(SOURCE, "{}. Skipping...", err);
                    summary.skipped.push(vob);
                    continue;
                }
            };
            let class = self.thresholds.classify(&sphere);
            self.buckets[class.index()].push(vob, sphere);
            *summary.count_mut(class) += 1;
        }

        for bucket in &mut self.buckets {
            bucket.register_tracker();
        }

        engine_info!(
            SOURCE,
            "Buckets ready: {} small, {} medium, {} large, {} skipped",
            summary.small, summary.medium, summary.large, summary.skipped.len()
        );

        Ok(summary)
    }

    /// Find `vob`'s (class, index). Buckets are searched Small → Medium → Large
    /// and the first match wins.
    pub fn locate(&self, vob: VobKey) -> Option<(SizeClass, usize)> {
        self.buckets
            .iter()
            .find_map(|bucket| bucket.index_of(vob).map(|index| (bucket.size_class(), index)))
    }

    /// Run every tracker against `camera`, handing each bucket's events to `on_events`.
    pub fn update_trackers(
        &mut self,
        camera: &Camera,
        events: &mut Vec<VisibilityChange>,
        mut on_events: impl FnMut(&Bucket, &[VisibilityChange]),
    ) {
        for bucket in &mut self.buckets {
            events.clear();
            bucket.update_tracker(camera, events);
            if !events.is_empty() {
                on_events(&*bucket, events.as_slice());
            }
        }
    }

    /// Write `center` into the sphere slot of (class, index).
    ///
    /// Panics when the slot does not exist.
    pub fn sync_sphere_position(&mut self, class: SizeClass, index: usize, center: Vec3) {
        let bucket = self.buckets.get_mut(class.index());
        assert!(bucket.is_some(), "no {} bucket while syncing sphere {}", class, index);
        if let Some(bucket) = bucket {
            bucket.set_sphere_center(index, center);
        }
    }

    /// Dispose the trackers and start over with empty buckets and new trackers.
    pub fn reset(&mut self) {
        if self.state != RegistryState::Active {
            return;
        }
        for bucket in &mut self.buckets {
            bucket.tracker.dispose();
        }
        self.buckets = self.fresh_buckets();
        engine_debug!(SOURCE, "Buckets reset");
    }

    /// Dispose the trackers permanently. Further `prepare` calls fail.
    pub fn shutdown(&mut self) {
        for bucket in &mut self.buckets {
            bucket.tracker.dispose();
            bucket.clear();
        }
        self.state = RegistryState::ShutDown;
    }
}

/// World-space bounding sphere of a live object.
fn resolve_sphere(vob: VobKey, scene: &dyn VobScene) -> Result<BoundingSphere> {
    let geometry = scene.vob_geometry(vob).ok_or_else(|| {
        Error::GeometryNotFound(format!("no mesh, particles or light on {:?}", vob))
    })?;
    let world = scene.world_matrix(vob).ok_or_else(|| {
        Error::GeometryNotFound(format!("no transform for {:?}", vob))
    })?;
    Ok(BoundingSphere::from_local_bounds(&world, &geometry.local_bounds()))
}

#[cfg(test)]
#[path = "bucket_tests.rs"]
mod tests;
