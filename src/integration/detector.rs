//! Traits for the perception models feeding the tracker.

use crate::error::PerceptionError;
use crate::tracker::{HandLandmarks, RawDetection};

/// One video frame handed to the perception models.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Raw image bytes (format depends on the model implementation)
    pub pixels: &'a [u8],
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp used for frame-rate measurement
    pub timestamp_ms: f64,
}

impl<'a> Frame<'a> {
    pub fn new(pixels: &'a [u8], width: u32, height: u32, timestamp_ms: f64) -> Self {
        Self {
            pixels,
            width,
            height,
            timestamp_ms,
        }
    }
}

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the tracker.
///
/// # Example
///
/// ```ignore
/// use hudtrack_rs::{DetectionSource, Frame, PerceptionError, RawDetection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = PerceptionError;
///
///     fn detect(&mut self, frame: &Frame<'_>) -> Result<Vec<RawDetection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: Into<PerceptionError>;

    /// Run inference on one frame and return detections in model order.
    fn detect(&mut self, frame: &Frame<'_>) -> Result<Vec<RawDetection>, Self::Error>;
}

/// Fidelity setting for the hand-landmark model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandModelComplexity {
    Lite,
    Full,
}

impl HandModelComplexity {
    /// The setting matching the tracker's reduced-mode flag.
    pub fn for_reduced_mode(reduced_mode: bool) -> Self {
        if reduced_mode {
            HandModelComplexity::Lite
        } else {
            HandModelComplexity::Full
        }
    }
}

/// Trait for hand-landmark inference backends.
pub trait HandLandmarkSource {
    type Error: Into<PerceptionError>;

    /// Run inference on one frame. An empty result means no hands.
    fn detect_hands(&mut self, frame: &Frame<'_>) -> Result<Vec<HandLandmarks>, Self::Error>;

    /// Switch model fidelity. Backends without a lighter variant ignore this.
    fn set_complexity(&mut self, _complexity: HandModelComplexity) {}
}

/// Hand source for setups without a hand-landmark model.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHands;

impl HandLandmarkSource for NoHands {
    type Error = PerceptionError;

    fn detect_hands(&mut self, _frame: &Frame<'_>) -> Result<Vec<HandLandmarks>, Self::Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_follows_reduced_mode() {
        assert_eq!(HandModelComplexity::for_reduced_mode(true), HandModelComplexity::Lite);
        assert_eq!(HandModelComplexity::for_reduced_mode(false), HandModelComplexity::Full);
    }

    #[test]
    fn test_no_hands_is_empty() {
        let frame = Frame::new(&[], 640, 480, 0.0);
        assert!(NoHands.detect_hands(&frame).unwrap().is_empty());
    }
}
