//! Owned map of live tracks, identifier allocation and time-based eviction.

use std::collections::{BTreeMap, HashMap};

use nalgebra::Point2;

use crate::tracker::category::Category;
use crate::tracker::track::{HandKey, Track, TrackId};

/// Default time a track may go unseen before it is evicted.
pub const DEFAULT_TRACK_TTL_MS: u64 = 1000;

/// Mapping from track identifier to track state.
///
/// Iteration is in identifier order, which is also creation order.
#[derive(Debug, Clone)]
pub struct TrackStore {
    tracks: BTreeMap<TrackId, Track>,
    hand_keys: HashMap<HandKey, TrackId>,
    next_id: u64,
}

impl Default for TrackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackStore {
    pub fn new() -> Self {
        Self {
            tracks: BTreeMap::new(),
            hand_keys: HashMap::new(),
            next_id: 1,
        }
    }

    fn next_track_id(&mut self) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a track with a freshly allocated identifier.
    pub fn create(&mut self, category: Category, center: Point2<f32>, now_ms: u64) -> TrackId {
        let id = self.next_track_id();
        self.tracks.insert(id, Track::new(id, category, center, now_ms));
        tracing::debug!(track_id = id.get(), category = %category, "track created");
        id
    }

    /// Insert or replace a track by its identifier.
    ///
    /// Identifiers past the allocation counter advance it so they are never
    /// handed out again.
    pub fn upsert(&mut self, track: Track) {
        if track.track_id.0 >= self.next_id {
            self.next_id = track.track_id.0 + 1;
        }
        self.tracks.insert(track.track_id, track);
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(&id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains_key(&id)
    }

    /// All live tracks in creation order.
    pub fn all_current_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Live tracks of one category in creation order.
    pub fn tracks_of(&self, category: Category) -> impl Iterator<Item = &Track> {
        self.tracks.values().filter(move |t| t.category == category)
    }

    /// Resolve a hand key to its track, creating the track on first sight.
    pub fn hand_track(&mut self, key: HandKey, center: Point2<f32>, now_ms: u64) -> TrackId {
        if let Some(&id) = self.hand_keys.get(&key) {
            if let Some(track) = self.tracks.get_mut(&id) {
                track.observe(center, now_ms);
                return id;
            }
        }
        let id = self.create(Category::Hand, center, now_ms);
        self.hand_keys.insert(key, id);
        id
    }

    /// Remove every track unseen for more than `ttl_ms`, returning how many went.
    pub fn evict_expired(&mut self, now_ms: u64, ttl_ms: u64) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|_, t| !t.is_expired(now_ms, ttl_ms));
        let tracks = &self.tracks;
        self.hand_keys.retain(|_, id| tracks.contains_key(id));

        let evicted = before - self.tracks.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.tracks.len(), "evicted stale tracks");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
