//! Target lock selection: the tracked object nearest the frame center.

use nalgebra::Point2;

use crate::tracker::category::Category;
use crate::tracker::rect::FrameSize;
use crate::tracker::stats::ConfidenceBand;
use crate::tracker::track::{TrackId, TrackedObject};

/// The single object highlighted as primary target for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetLock {
    pub track_id: TrackId,
    pub category: Category,
    pub label: String,
    pub confidence: f32,
    pub center: Point2<f32>,
}

impl TargetLock {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

/// Pick the object whose center is closest to the frame center.
///
/// Returns `None` for an empty frame. Equal distances keep the earlier object.
pub fn select_target(objects: &[TrackedObject], frame: FrameSize) -> Option<TargetLock> {
    let origin = frame.center();
    let mut best: Option<(&TrackedObject, f32)> = None;
    for obj in objects {
        let d = nalgebra::distance(&obj.center, &origin);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((obj, d));
        }
    }

    best.map(|(obj, _)| TargetLock {
        track_id: obj.track_id,
        category: obj.category,
        label: obj.label.clone(),
        confidence: obj.score,
        center: obj.center,
    })
}
