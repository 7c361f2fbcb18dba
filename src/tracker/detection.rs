//! Per-frame inputs produced by the perception models.

use nalgebra::Point2;

use crate::tracker::category::Category;
use crate::tracker::rect::Rect;

/// Raw object detector output, before any filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    /// Detector-native class label (e.g. `"bottle"`)
    pub label: String,
    /// Bounding box in pixel space (TLWH)
    pub bbox: Rect,
    /// Detector confidence in [0, 1]
    pub score: f32,
}

impl RawDetection {
    pub fn new(label: impl Into<String>, bbox: Rect, score: f32) -> Self {
        Self {
            label: label.into(),
            bbox,
            score,
        }
    }
}

/// A detection that survived the category filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub category: Category,
    pub bbox: Rect,
    pub score: f32,
}

/// Which hand the landmark model believes it is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
    /// Label the model emitted that is neither "Left" nor "Right"
    Other(String),
}

impl Handedness {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Left" => Handedness::Left,
            "Right" => Handedness::Right,
            other => Handedness::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
            Handedness::Other(label) => label,
        }
    }
}

/// One hand from the hand-landmark model.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    /// Landmark points normalized to [0, 1] in both axes
    pub landmarks: Vec<Point2<f32>>,
    pub handedness: Handedness,
    /// Handedness classification score, used as the hand's confidence
    pub score: f32,
}

impl HandLandmarks {
    pub fn new(landmarks: Vec<Point2<f32>>, handedness: &str, score: f32) -> Self {
        Self {
            landmarks,
            handedness: Handedness::from_label(handedness),
            score,
        }
    }

    /// Pixel-space box enclosing every landmark, or `None` without landmarks.
    pub fn bounding_box(&self, frame_width: f32, frame_height: f32) -> Option<Rect> {
        if self.landmarks.is_empty() {
            return None;
        }
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (1.0f32, 1.0f32, 0.0f32, 0.0f32);
        for p in &self.landmarks {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect::from_tlbr(
            min_x * frame_width,
            min_y * frame_height,
            max_x * frame_width,
            max_y * frame_height,
        ))
    }
}
