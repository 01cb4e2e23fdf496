/// Manipulation state machine.
///
/// Objects are Tracked by default. A start signal (the object is grabbed)
/// moves it to Paused; a stop signal arms a one-shot release timer which,
/// when it fires, moves the object to Cooldown. Cooldown objects are polled
/// every tick until their rigid body reports zero velocity, at which point
/// their sphere is resynchronised and they return to Tracked.
///
/// Paused and Cooldown objects both have a `ManipulationEntry`; having an
/// entry is what suppresses visibility dispatch for the object.

use std::time::Duration;
use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::{engine_debug, engine_trace, engine_warn};
use super::bucket::BucketRegistry;
use super::scene_port::{BodyKey, VobKey, VobScene};
use super::scheduler::{FrameScheduler, TimerKey};
use super::size_class::SizeClass;

const SOURCE: &str = "vobcull::Manipulation";

// ===== STATES =====

/// Sub-state of an object under manipulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManipulationState {
    /// Held, or released but still waiting for the release timer
    Paused {
        release_timer: Option<TimerKey>,
    },
    /// Released and waiting for its body to come to rest
    Cooldown {
        /// `None` for objects without physics; those settle on the next poll
        body: Option<BodyKey>,
    },
}

/// Where a manipulated object lives in the buckets and what it is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManipulationEntry {
    pub size_class: SizeClass,
    pub index: usize,
    pub state: ManipulationState,
}

/// Public view of an object's tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VobTrackingState {
    Tracked,
    Paused,
    Cooldown,
}

// ===== STATE MACHINE =====

pub struct ManipulationStateMachine {
    entries: FxHashMap<VobKey, ManipulationEntry>,
    release_delay: Duration,
}

impl ManipulationStateMachine {
    pub fn new(release_delay: Duration) -> Self {
        Self {
            entries: FxHashMap::default(),
            release_delay,
        }
    }

    pub fn release_delay(&self) -> Duration {
        self.release_delay
    }

    pub fn entry(&self, vob: VobKey) -> Option<&ManipulationEntry> {
        self.entries.get(&vob)
    }

    pub fn state(&self, vob: VobKey) -> VobTrackingState {
        match self.entries.get(&vob).map(|entry| entry.state) {
            None => VobTrackingState::Tracked,
            Some(ManipulationState::Paused { .. }) => VobTrackingState::Paused,
            Some(ManipulationState::Cooldown { .. }) => VobTrackingState::Cooldown,
        }
    }

    /// Whether visibility changes for `vob` must be ignored.
    pub fn is_suppressed(&self, vob: VobKey) -> bool {
        self.entries.contains_key(&vob)
    }

    /// Objects with an entry (Paused or Cooldown).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Objects currently in Cooldown.
    pub fn cooldown_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry.state, ManipulationState::Cooldown { .. }))
            .count()
    }

    /// Objects released and waiting for their release timer.
    pub fn pending_release_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry.state, ManipulationState::Paused { release_timer: Some(_) }))
            .count()
    }

    /// Start manipulating `vob`: the object enters (or stays in) Paused.
    ///
    /// A pending release timer is cancelled and a Cooldown object leaves
    /// the poll set. Objects absent from every bucket are ignored.
    pub fn start(&mut self, vob: VobKey, registry: &BucketRegistry, scheduler: &mut FrameScheduler<VobKey>) {
        if let Some(entry) = self.entries.get_mut(&vob) {
            match entry.state {
                ManipulationState::Paused { release_timer: None } => {}
                ManipulationState::Paused { release_timer: Some(timer) } => {
                    scheduler.cancel(timer);
                    engine_trace!(SOURCE, "{:?} grabbed again before release, timer cancelled", vob);
                }
                ManipulationState::Cooldown { .. } => {
                    engine_trace!(SOURCE, "{:?} grabbed during cooldown", vob);
                }
            }
            entry.state = ManipulationState::Paused { release_timer: None };
            return;
        }

        let Some((size_class, index)) = registry.locate(vob) else {
            engine_debug!(SOURCE, "{:?} is not culled, ignoring manipulation start", vob);
            return;
        };

        self.entries.insert(vob, ManipulationEntry {
            size_class,
            index,
            state: ManipulationState::Paused { release_timer: None },
        });
    }

    /// Stop manipulating `vob`: arm the release timer once.
    ///
    /// No-op if a timer is already pending, the object is cooling down, or
    /// it was never started.
    pub fn stop(&mut self, vob: VobKey, scheduler: &mut FrameScheduler<VobKey>) {
        let Some(entry) = self.entries.get_mut(&vob) else {
            engine_debug!(SOURCE, "{:?} is not under manipulation, ignoring stop", vob);
            return;
        };

        if let ManipulationState::Paused { release_timer: None } = entry.state {
            let timer = scheduler.schedule(self.release_delay, vob);
            entry.state = ManipulationState::Paused { release_timer: Some(timer) };
        }
    }

    /// Release timer of `vob` fired: Paused → Cooldown.
    pub fn on_release_timer(&mut self, vob: VobKey, scene: &dyn VobScene) {
        let Some(entry) = self.entries.get_mut(&vob) else {
            return;
        };
        if !matches!(entry.state, ManipulationState::Paused { release_timer: Some(_) }) {
            return;
        }

        let body = scene.rigid_body(vob);
        entry.state = ManipulationState::Cooldown { body };
        engine_trace!(SOURCE, "{:?} entered cooldown (body: {:?})", vob, body);
    }

    /// Drop the entries of objects the host destroyed, whatever their
    /// sub-state, cancelling their release timers. Returns the dropped objects.
    pub fn prune_destroyed(&mut self, scheduler: &mut FrameScheduler<VobKey>, scene: &dyn VobScene) -> Vec<VobKey> {
        let destroyed: Vec<VobKey> = self.entries
            .keys()
            .copied()
            .filter(|&vob| !scene.is_alive(vob))
            .collect();

        for &vob in &destroyed {
            if let Some(entry) = self.entries.remove(&vob) {
                if let ManipulationState::Paused { release_timer: Some(timer) } = entry.state {
                    scheduler.cancel(timer);
                }
                engine_debug!(SOURCE, "{:?} destroyed while manipulated, entry dropped", vob);
            }
        }

        destroyed
    }

    /// Poll every Cooldown object once.
    ///
    /// Objects whose body is at rest (or who have no body) get their sphere
    /// moved to their current world position and return to Tracked.
    /// Returns the objects that settled this tick.
    pub fn poll_cooldowns(&mut self, registry: &mut BucketRegistry, scene: &dyn VobScene) -> Vec<VobKey> {
        let settled: Vec<VobKey> = self.entries
            .iter()
            .filter_map(|(&vob, entry)| match entry.state {
                ManipulationState::Cooldown { body } if is_at_rest(body, scene) => Some(vob),
                _ => None,
            })
            .collect();

        for &vob in &settled {
            let Some(entry) = self.entries.remove(&vob) else {
                continue;
            };
            match scene.world_position(vob) {
                Some(position) => registry.sync_sphere_position(entry.size_class, entry.index, position),
                None => engine_warn!(SOURCE, "{:?} settled but no longer exists, sphere left in place", vob),
            }
            engine_trace!(SOURCE, "{:?} settled, tracking resumed", vob);
        }

        settled
    }

    /// Forget every entry. Timers must be cleared by the scheduler's owner.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn is_at_rest(body: Option<BodyKey>, scene: &dyn VobScene) -> bool {
    match body.and_then(|body| scene.linear_velocity(body)) {
        Some(velocity) => velocity == Vec3::ZERO,
        None => true,
    }
}

#[cfg(test)]
#[path = "manipulation_tests.rs"]
mod tests;
