/*!
# Vob Culling Engine

Distance-based visibility culling for scene objects ("vobs"), grouped by size.

Objects are sorted into three buckets (small, medium, large) by the
diameter of their bounding sphere. Each bucket has its own culling
distance and a spatial tracker that reports visibility changes as the
camera moves. Objects being manipulated (grabbed, thrown) are excluded
from visibility toggling until their rigid body comes to rest, then their
sphere is moved to the final position and tracking resumes.

## Architecture

- **VobCullingManager**: explicit engine instance driven by the host's scene lifecycle
- **BucketRegistry**: the three size buckets and their trackers
- **SpatialTracker**: per-bucket visibility primitive (`DistanceTracker` provided)
- **ManipulationStateMachine**: Tracked → Paused → Cooldown → Tracked
- **VisibilityDispatcher**: applies visibility changes, skipping manipulated objects
- **FrameScheduler**: cancelable one-shot timers advanced once per frame

The host scene is reached through the `VobHost`, `GeometryProvider` and
`PhysicsProvider` traits.
*/

// Internal modules
mod error;
mod config;
pub mod log;
pub mod camera;
pub mod culling;

// Main vobcull namespace module
pub mod vobcull {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{CullingConfig, CullingGroupConfig};

    // Engine instance
    pub use crate::culling::VobCullingManager;

    // Logging sub-module (types and sink functions, NOT macros)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity, log, log_detailed,
        };
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Culling sub-module
    pub mod culling {
        pub use crate::culling::*;
    }
}

// Re-export math library at crate root
pub use glam;
