//! Integration module for connecting perception backends with the tracker.
//!
//! This module provides the traits a detector or hand-landmark model
//! implements, and the per-frame pipeline that drives tracking from them.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, Frame, HandLandmarkSource, HandModelComplexity, NoHands};
pub use pipeline::{FrameOutput, TrackerPipeline};
