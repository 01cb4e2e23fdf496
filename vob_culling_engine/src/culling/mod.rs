//! Culling module
//!
//! Size-bucketed distance culling of scene objects, with suppression of
//! visibility updates while objects are manipulated.

mod bounds;
mod size_class;
mod scene_port;
mod spatial_tracker;
mod scheduler;
mod bucket;
mod manipulation;
mod dispatcher;
mod debug_draw;
mod manager;

#[cfg(test)]
pub(crate) mod mock_scene;

pub use bounds::{AABB, BoundingSphere, VobGeometry};
pub use size_class::{SizeClass, SizeThresholds};
pub use scene_port::{BodyKey, GeometryProvider, PhysicsProvider, VobHost, VobKey, VobScene};
pub use spatial_tracker::{
    distance_tracker_factory, DistanceTracker, SpatialTracker, TrackerFactory, VisibilityChange,
};
pub use scheduler::{FrameScheduler, Tick, TimerKey};
pub use bucket::{Bucket, BucketRegistry, PrepareSummary, RegistryState};
pub use manipulation::{
    ManipulationEntry, ManipulationState, ManipulationStateMachine, VobTrackingState,
};
pub use dispatcher::{DispatchStats, VisibilityDispatcher};
pub use debug_draw::{bucket_color, draw_buckets, sphere_bytes, DebugDrawer};
pub use manager::VobCullingManager;
