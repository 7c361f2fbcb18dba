//! Track identities and the per-frame tracked object view.

use std::fmt;

use nalgebra::Point2;

use crate::tracker::category::Category;
use crate::tracker::detection::Handedness;
use crate::tracker::rect::Rect;

/// Unique track identifier. Allocated in strictly increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub(crate) u64);

impl TrackId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lookup key for hand identities: the model's per-frame index plus handedness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandKey {
    pub handedness: Handedness,
    pub index: usize,
}

/// Persistent state for one physical object.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub track_id: TrackId,
    pub category: Category,
    /// Last observed center in pixel space
    pub center: Point2<f32>,
    /// Wall-clock time of the last matching observation
    pub last_seen_ms: u64,
}

impl Track {
    pub fn new(track_id: TrackId, category: Category, center: Point2<f32>, now_ms: u64) -> Self {
        Self {
            track_id,
            category,
            center,
            last_seen_ms: now_ms,
        }
    }

    /// Record a new observation of this track.
    pub fn observe(&mut self, center: Point2<f32>, now_ms: u64) {
        self.center = center;
        self.last_seen_ms = now_ms;
    }

    /// Whether the track has gone unseen for longer than `ttl_ms`.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_seen_ms) > ttl_ms
    }
}

/// A detection bound to a track identity, as emitted for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject {
    pub track_id: TrackId,
    pub category: Category,
    /// Display label, e.g. `"Water Bottle"` or `"Hand (Left)"`
    pub label: String,
    pub bbox: Rect,
    /// Emitted confidence, after any category-specific refinement
    pub score: f32,
    pub center: Point2<f32>,
}
