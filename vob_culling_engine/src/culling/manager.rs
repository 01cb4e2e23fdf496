/// VobCullingManager - distance culling of scene objects by size bucket
///
/// The manager ties together the bucket registry, the manipulation state
/// machine, the visibility dispatcher and the frame scheduler. It is an
/// explicit instance owned by the scene orchestrator, which forwards scene
/// lifecycle signals and drives it once per frame with `update`.
///
/// # Lifecycle
///
/// ```text
/// new → init → [prepare_vob_culling → on_scene_ready → update*
///              → on_scene_unloaded]* → destroy
/// ```
///
/// With `enable_mesh_culling = false` every operation is a no-op and no
/// trackers are allocated.

use std::time::Duration;
use crate::camera::Camera;
use crate::config::CullingConfig;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_info, engine_trace};
use super::bucket::{Bucket, BucketRegistry, PrepareSummary};
use super::debug_draw::{self, DebugDrawer};
use super::dispatcher::{DispatchStats, VisibilityDispatcher};
use super::manipulation::{ManipulationEntry, ManipulationStateMachine, VobTrackingState};
use super::scene_port::{VobKey, VobScene};
use super::scheduler::FrameScheduler;
use super::size_class::SizeClass;
use super::spatial_tracker::{distance_tracker_factory, TrackerFactory, VisibilityChange};

const SOURCE: &str = "vobcull::VobCullingManager";

pub struct VobCullingManager {
    config: CullingConfig,
    registry: BucketRegistry,
    manipulation: ManipulationStateMachine,
    dispatcher: VisibilityDispatcher,
    /// Release timers; payload is the released object
    scheduler: FrameScheduler<VobKey>,
    /// Reference point of the current scene, `None` until the scene is ready
    camera: Option<Camera>,
    /// Reused tracker event buffer
    events: Vec<VisibilityChange>,
    initialized: bool,
    destroyed: bool,
}

impl VobCullingManager {
    /// Create a manager using `DistanceTracker` for every bucket.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration fails validation.
    pub fn new(config: CullingConfig) -> Result<Self> {
        Self::with_tracker_factory(config, distance_tracker_factory())
    }

    /// Create a manager whose buckets use trackers built by `factory`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration fails validation.
    pub fn with_tracker_factory(config: CullingConfig, factory: TrackerFactory) -> Result<Self> {
        config.validate()?;

        let registry = BucketRegistry::new(config.thresholds(), config.distances(), factory);
        let manipulation = ManipulationStateMachine::new(config.release_delay());

        Ok(Self {
            config,
            registry,
            manipulation,
            dispatcher: VisibilityDispatcher::new(),
            scheduler: FrameScheduler::new(),
            camera: None,
            events: Vec::new(),
            initialized: false,
            destroyed: false,
        })
    }

    pub fn config(&self) -> &CullingConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enable_mesh_culling
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ===== LIFECYCLE =====

    /// Allocate the three trackers and start the frame scheduler.
    ///
    /// Idempotent. Does nothing when culling is disabled.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` after `destroy`.
    pub fn init(&mut self) -> Result<()> {
        if !self.is_enabled() {
            engine_info!(SOURCE, "Mesh culling disabled, not initializing");
            return Ok(());
        }
        if self.destroyed {
            engine_bail!(SOURCE, "Cannot initialize a destroyed culling manager");
        }
        if self.initialized {
            return Ok(());
        }

        self.registry.allocate()?;
        self.scheduler.start();
        self.initialized = true;

        engine_info!(
            SOURCE,
            "Culling initialized (small <= {} m @ {} m, medium <= {} m @ {} m, large @ {} m)",
            self.config.small.maximum_object_size, self.config.small.culling_distance,
            self.config.medium.maximum_object_size, self.config.medium.culling_distance,
            self.config.large.culling_distance
        );
        Ok(())
    }

    /// Sort `vobs` into the size buckets and register the trackers.
    ///
    /// Previous bucket contents are discarded, and so is any manipulation
    /// state since it refers to the old bucket indices.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` before `init` or after `destroy`.
    /// Objects without geometry are not an error: they are logged and
    /// listed in `PrepareSummary::skipped`.
    pub fn prepare_vob_culling(&mut self, vobs: &[VobKey], scene: &dyn VobScene) -> Result<PrepareSummary> {
        if !self.is_enabled() {
            return Ok(PrepareSummary::default());
        }
        if !self.initialized {
            engine_bail!(SOURCE, "prepare_vob_culling called before init");
        }

        self.clear_manipulation();
        self.registry.prepare(vobs, scene)
    }

    /// Scene is going away: drop all buckets, manipulation entries and
    /// pending timers. The scheduler itself keeps running.
    pub fn on_scene_unloaded(&mut self) {
        if !self.initialized {
            return;
        }
        self.registry.reset();
        self.clear_manipulation();
        self.camera = None;
        engine_debug!(SOURCE, "Scene unloaded, culling state reset");
    }

    /// Scene is ready and `camera` is the reference point for distance checks.
    pub fn on_scene_ready(&mut self, camera: Camera) {
        if !self.initialized {
            return;
        }
        self.camera = Some(camera);
    }

    /// Update the reference point (camera moved).
    pub fn set_camera(&mut self, camera: Camera) {
        if !self.initialized {
            return;
        }
        self.camera = Some(camera);
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Dispose all trackers for good.
    pub fn destroy(&mut self) {
        if !self.initialized {
            return;
        }
        self.registry.shutdown();
        self.manipulation.clear();
        self.scheduler.stop();
        self.camera = None;
        self.initialized = false;
        self.destroyed = true;
        engine_info!(SOURCE, "Culling destroyed");
    }

    // ===== MANIPULATION =====

    /// The object is being moved by something other than its tracker's
    /// knowledge (grabbed, carried): stop toggling its visibility.
    ///
    /// Objects that are not in any bucket are ignored.
    pub fn start_track_vob_position_updates(&mut self, vob: VobKey) {
        if !self.initialized {
            return;
        }
        self.manipulation.start(vob, &self.registry, &mut self.scheduler);
    }

    /// Manipulation ended. After the release delay the object waits for its
    /// rigid body to come to rest, then its sphere is moved to its final
    /// position and visibility tracking resumes.
    pub fn stop_track_vob_position_updates(&mut self, vob: VobKey) {
        if !self.initialized {
            return;
        }
        self.manipulation.stop(vob, &mut self.scheduler);
    }

    // ===== FRAME =====

    /// Advance one frame.
    ///
    /// Order within a frame:
    /// 1. tracker updates and visibility dispatch (only once a camera is set)
    /// 2. entries of destroyed objects dropped, then release timers that
    ///    came due (Paused → Cooldown)
    /// 3. cooldown poll (Cooldown → Tracked for objects at rest)
    pub fn update(&mut self, delta: Duration, scene: &mut dyn VobScene) {
        if !self.initialized {
            return;
        }

        if let Some(camera) = self.camera.as_ref() {
            let dispatcher = &mut self.dispatcher;
            let manipulation = &self.manipulation;
            self.registry.update_trackers(camera, &mut self.events, |bucket, changes| {
                dispatcher.dispatch(bucket, changes, manipulation, &mut *scene);
            });
        }

        self.manipulation.prune_destroyed(&mut self.scheduler, &*scene);

        let Some(tick) = self.scheduler.advance(delta) else {
            return;
        };
        for vob in tick.fired {
            self.manipulation.on_release_timer(vob, &*scene);
        }

        let settled = self.manipulation.poll_cooldowns(&mut self.registry, &*scene);
        if !settled.is_empty() {
            engine_trace!(SOURCE, "Frame {}: {} object(s) resumed tracking", tick.frame, settled.len());
        }
    }

    // ===== DEBUG =====

    /// Draw every bucket sphere. Does nothing unless `show_debug_spheres` is set.
    pub fn draw_debug(&self, drawer: &mut dyn DebugDrawer) {
        if !self.initialized || !self.config.show_debug_spheres {
            return;
        }
        debug_draw::draw_buckets(&self.registry, drawer);
    }

    // ===== INTROSPECTION =====

    pub fn manipulation_state(&self, vob: VobKey) -> VobTrackingState {
        self.manipulation.state(vob)
    }

    pub fn manipulation_entry(&self, vob: VobKey) -> Option<&ManipulationEntry> {
        self.manipulation.entry(vob)
    }

    pub fn is_paused(&self, vob: VobKey) -> bool {
        self.manipulation_state(vob) == VobTrackingState::Paused
    }

    pub fn is_cooling_down(&self, vob: VobKey) -> bool {
        self.manipulation_state(vob) == VobTrackingState::Cooldown
    }

    /// Release timers armed and not yet fired.
    pub fn pending_release_count(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn bucket(&self, class: SizeClass) -> Option<&Bucket> {
        self.registry.bucket(class)
    }

    pub fn locate(&self, vob: VobKey) -> Option<(SizeClass, usize)> {
        self.registry.locate(vob)
    }

    pub fn dispatch_stats(&self) -> DispatchStats {
        self.dispatcher.stats()
    }

    fn clear_manipulation(&mut self) {
        self.manipulation.clear();
        self.scheduler.clear();
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
