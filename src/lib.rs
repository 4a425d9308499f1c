//! Spatial keyboard focus navigation for component-based UIs.
//!
//! Hosts register *regions* (independent surfaces such as a sidebar and a
//! main panel) and *zones* inside them (horizontal lists, vertical lists or
//! grids of focusable items). Directional input moves focus inside the active
//! zone first and then jumps to the nearest zone on screen, using measured
//! bounds rather than declared adjacency. Focus can be remembered per route
//! path and restored once the remembered zone mounts again.

pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod memory;
pub mod metrics;
pub mod navigation;
pub mod navigator;
pub mod registry;
pub mod runtime;
pub mod state;
pub mod timers;

pub use config::NavigatorConfig;
pub use error::{NavError, Result};
pub use events::{NavigationEvent, SubscriptionId};
pub use feedback::{Feedback, FeedbackSink, MutableFeedback, NullFeedback, RecordingFeedback};
pub use geometry::Bounds;
pub use input::{KeyBindings, NavAction};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use memory::{MemoryPhase, NavigationMemoryState, PendingRestore};
pub use metrics::{MetricSnapshot, NavigationMetrics};
pub use navigation::Direction;
pub use navigator::Navigator;
pub use registry::{
    ActivationSource, Region, RegionConfig, RegionStep, Registry, Zone, ZoneConfig, ZoneKind,
    ZoneMeasurement,
};
pub use runtime::{EventFlow, NavEvent, NavigationRuntime};
pub use state::{History, HistoryEntry, NavigationError, NavigationState};
