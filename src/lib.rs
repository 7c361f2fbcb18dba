//! Temporally stable object tracking for a HUD overlay.
//!
//! Per-frame detections and hand landmarks from external perception models
//! are filtered, bound to persistent track identities, aggregated into
//! per-category confidence statistics and reduced to a single target lock.
//! A performance governor watches the frame rate and recommends a reduced
//! workload when it drops.

pub mod config;
pub mod error;
pub mod governor;
pub mod integration;
pub mod tracker;

pub use config::{PerformanceConfig, TrackerConfig};
pub use error::{ConfigError, PerceptionError, TickError};
pub use governor::{Advisory, HudStyle, PerformanceBand, PerformanceGovernor, PerformanceReport};
pub use integration::{
    DetectionBuilder, DetectionSource, Frame, FrameOutput, HandLandmarkSource,
    HandModelComplexity, NoHands, TrackerPipeline,
};
pub use tracker::{
    Category, CategoryStats, EnabledCategories, HandLandmarks, RawDetection, Rect, TargetLock,
    TrackId, TrackedObject,
};
