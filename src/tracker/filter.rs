//! Category filter: threshold, label mapping and user toggles.

use crate::tracker::category::{Category, EnabledCategories};
use crate::tracker::detection::{Detection, RawDetection};

/// Filter raw detector output down to enabled domain categories.
///
/// A detection is dropped when its score does not exceed `threshold`, when
/// its box is malformed, when its label has no category, or when that
/// category is toggled off. Input order is preserved.
pub fn filter_detections(
    raw: &[RawDetection],
    threshold: f32,
    enabled: &EnabledCategories,
) -> Vec<Detection> {
    raw.iter()
        .filter(|d| d.score > threshold)
        .filter(|d| d.bbox.is_well_formed())
        .filter_map(|d| {
            let category = Category::from_detector_label(&d.label)?;
            enabled.is_enabled(category).then_some(Detection {
                category,
                bbox: d.bbox,
                score: d.score,
            })
        })
        .collect()
}
