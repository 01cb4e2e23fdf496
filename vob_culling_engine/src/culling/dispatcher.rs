/// Visibility dispatcher.
///
/// Applies tracker visibility changes to scene objects. Changes for objects
/// under manipulation are dropped, so a held or settling object keeps the
/// visibility it had when it was grabbed.

use super::bucket::Bucket;
use super::manipulation::ManipulationStateMachine;
use super::scene_port::VobHost;
use super::spatial_tracker::VisibilityChange;

/// Running totals, for debug overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Changes written to the host
    pub applied: u64,
    /// Changes dropped because the object was under manipulation
    pub suppressed: u64,
}

#[derive(Debug, Default)]
pub struct VisibilityDispatcher {
    stats: DispatchStats,
}

impl VisibilityDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Apply `changes` reported by `bucket`'s tracker.
    pub fn dispatch<H: VobHost + ?Sized>(
        &mut self,
        bucket: &Bucket,
        changes: &[VisibilityChange],
        manipulation: &ManipulationStateMachine,
        host: &mut H,
    ) {
        for change in changes {
            let Some(vob) = bucket.vob(change.index) else {
                continue;
            };
            if manipulation.is_suppressed(vob) {
                self.stats.suppressed += 1;
                continue;
            }
            host.set_active(vob, change.visible);
            self.stats.applied += 1;
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
