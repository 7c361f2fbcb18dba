mod associator;
mod category;
mod detection;
mod filter;
mod lock;
mod matching;
mod rect;
mod stats;
mod track;
mod track_store;

pub use associator::{MAX_HANDS, associate_detections, associate_hands, refine_score};
pub use category::{Category, EnabledCategories};
pub use detection::{Detection, HandLandmarks, Handedness, RawDetection};
pub use filter::filter_detections;
pub use lock::{TargetLock, select_target};
pub use matching::{AssignmentResult, center_distance, gated_nearest_assignment};
pub use rect::{FrameSize, Rect};
pub use stats::{CategoryStats, ConfidenceAggregator, ConfidenceBand};
pub use track::{HandKey, Track, TrackId, TrackedObject};
pub use track_store::{DEFAULT_TRACK_TTL_MS, TrackStore};
