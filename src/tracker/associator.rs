//! Association engine: binds each filtered detection to a persistent track identity.

use nalgebra::Point2;

use crate::tracker::category::Category;
use crate::tracker::detection::{Detection, HandLandmarks};
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::rect::{FrameSize, Rect};
use crate::tracker::track::{HandKey, TrackId, TrackedObject};
use crate::tracker::track_store::TrackStore;

/// At most this many hands are taken from one landmark result.
pub const MAX_HANDS: usize = 2;

const RABBIT_ASPECT_RANGE: (f32, f32) = (0.7, 1.3);
const RABBIT_ASPECT_PENALTY: f32 = 0.8;
const RABBIT_MIN_AREA_RATIO: f32 = 0.01;
const RABBIT_SIZE_PENALTY: f32 = 0.7;

/// Associate detector output with tracks in `store`, creating tracks as needed.
///
/// Only tracks alive at the start of the call are candidates, so each track
/// is matched by at most one detection and a track created here is never
/// matched again in the same frame. Output follows detection order.
pub fn associate_detections(
    store: &mut TrackStore,
    detections: &[Detection],
    frame: FrameSize,
    now_ms: u64,
) -> Vec<TrackedObject> {
    let mut assigned: Vec<Option<TrackId>> = vec![None; detections.len()];

    for category in Category::DETECTOR {
        let det_idx: Vec<usize> = detections
            .iter()
            .enumerate()
            .filter(|(_, d)| d.category == category)
            .map(|(i, _)| i)
            .collect();
        if det_idx.is_empty() {
            continue;
        }

        let (track_ids, track_centers): (Vec<TrackId>, Vec<Point2<f32>>) = store
            .tracks_of(category)
            .map(|t| (t.track_id, t.center))
            .unzip();
        let det_centers: Vec<Point2<f32>> =
            det_idx.iter().map(|&i| detections[i].bbox.center()).collect();
        let gates: Vec<f32> = det_idx
            .iter()
            .map(|&i| detections[i].bbox.gating_radius())
            .collect();

        let dists = matching::center_distance(&track_centers, &det_centers);
        let AssignmentResult { matches, .. } = matching::gated_nearest_assignment(&dists, &gates);
        for (row, col) in matches {
            assigned[det_idx[col]] = Some(track_ids[row]);
        }
    }

    detections
        .iter()
        .zip(assigned)
        .map(|(det, slot)| {
            let center = det.bbox.center();
            let track_id = match slot {
                Some(id) => {
                    if let Some(track) = store.get_mut(id) {
                        track.observe(center, now_ms);
                    }
                    id
                }
                None => store.create(det.category, center, now_ms),
            };
            TrackedObject {
                track_id,
                category: det.category,
                label: det.category.display_name().to_string(),
                bbox: det.bbox,
                score: refine_score(det.category, &det.bbox, det.score, frame),
                center,
            }
        })
        .collect()
}

/// Associate hand-landmark output with hand tracks.
///
/// Hands are keyed by their position in the model output plus handedness,
/// not by spatial proximity. Hands without a usable box are skipped.
pub fn associate_hands(
    store: &mut TrackStore,
    hands: &[HandLandmarks],
    frame: FrameSize,
    now_ms: u64,
) -> Vec<TrackedObject> {
    hands
        .iter()
        .take(MAX_HANDS)
        .enumerate()
        .filter_map(|(index, hand)| {
            let bbox = hand
                .bounding_box(frame.width, frame.height)
                .filter(Rect::is_well_formed)?;
            let center = bbox.center();
            let key = HandKey {
                handedness: hand.handedness.clone(),
                index,
            };
            let track_id = store.hand_track(key, center, now_ms);
            Some(TrackedObject {
                track_id,
                category: Category::Hand,
                label: format!("Hand ({})", hand.handedness.as_str()),
                bbox,
                score: hand.score,
                center,
            })
        })
        .collect()
}

/// Category-specific confidence refinement applied to the emitted score.
///
/// Rabbit devices are roughly square and not tiny: a box outside the
/// expected aspect range costs ×0.8, one covering under 1% of the frame
/// costs a further ×0.7.
pub fn refine_score(category: Category, bbox: &Rect, score: f32, frame: FrameSize) -> f32 {
    if category != Category::RabbitDevice {
        return score;
    }

    let mut score = score;
    let aspect = bbox.aspect_ratio();
    if aspect < RABBIT_ASPECT_RANGE.0 || aspect > RABBIT_ASPECT_RANGE.1 {
        score *= RABBIT_ASPECT_PENALTY;
    }

    let frame_area = frame.area();
    if frame_area > 0.0 && bbox.area() / frame_area < RABBIT_MIN_AREA_RATIO {
        score *= RABBIT_SIZE_PENALTY;
    }
    score
}
