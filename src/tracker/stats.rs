//! Running per-category detection counts and confidence averages.

use crate::tracker::category::Category;
use crate::tracker::track::TrackedObject;

/// Count and running average confidence for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryStats {
    pub count: usize,
    pub average_confidence: f32,
}

/// Display band for a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence > 0.7 {
            ConfidenceBand::High
        } else if confidence > 0.5 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Per-category statistics, updated once per model pass.
///
/// A category with no detections in a pass reports a count of zero but keeps
/// its last average.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfidenceAggregator {
    stats: [CategoryStats; 4],
}

impl ConfidenceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one pass of `objects` into the stats for each of `categories`.
    ///
    /// Every listed category has its count reset; objects of other
    /// categories are ignored. The average is updated incrementally in
    /// arrival order, `avg = (avg * (n - 1) + score) / n`.
    pub fn update(&mut self, categories: &[Category], objects: &[TrackedObject]) {
        for &category in categories {
            self.stats[category.index()].count = 0;
        }
        for obj in objects.iter().filter(|o| categories.contains(&o.category)) {
            let s = &mut self.stats[obj.category.index()];
            s.count += 1;
            let n = s.count as f32;
            s.average_confidence = (s.average_confidence * (n - 1.0) + obj.score) / n;
        }
    }

    /// Zero the count of a category without touching its average.
    pub fn clear_count(&mut self, category: Category) {
        self.stats[category.index()].count = 0;
    }

    pub fn get(&self, category: Category) -> CategoryStats {
        self.stats[category.index()]
    }

    /// Stats for every category in display order.
    pub fn snapshot(&self) -> Vec<(Category, CategoryStats)> {
        Category::ALL.iter().map(|&c| (c, self.get(c))).collect()
    }

    /// Count-weighted mean over categories with current detections, or 0.
    pub fn overall_average(&self) -> f32 {
        let (weighted, total) = self
            .stats
            .iter()
            .filter(|s| s.count > 0)
            .fold((0.0f32, 0usize), |(w, n), s| {
                (w + s.average_confidence * s.count as f32, n + s.count)
            });
        if total > 0 { weighted / total as f32 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::rect::Rect;
    use crate::tracker::track::TrackId;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    fn obj(category: Category, score: f32) -> TrackedObject {
        TrackedObject {
            track_id: TrackId(1),
            category,
            label: category.display_name().to_string(),
            bbox: Rect::new(0.0, 0.0, 10.0, 10.0),
            score,
            center: Point2::new(5.0, 5.0),
        }
    }

    #[test]
    fn test_incremental_mean_within_a_pass() {
        let mut agg = ConfidenceAggregator::new();
        agg.update(
            &Category::DETECTOR,
            &[obj(Category::WaterBottle, 0.6), obj(Category::WaterBottle, 0.8)],
        );
        let s = agg.get(Category::WaterBottle);
        assert_eq!(s.count, 2);
        assert_relative_eq!(s.average_confidence, 0.7, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_pass_keeps_average() {
        let mut agg = ConfidenceAggregator::new();
        agg.update(&Category::DETECTOR, &[obj(Category::RabbitDevice, 0.9)]);
        agg.update(&Category::DETECTOR, &[]);
        let s = agg.get(Category::RabbitDevice);
        assert_eq!(s.count, 0);
        assert_relative_eq!(s.average_confidence, 0.9);
    }

    #[test]
    fn test_update_only_touches_listed_categories() {
        let mut agg = ConfidenceAggregator::new();
        agg.update(&[Category::Hand], &[obj(Category::Hand, 0.8)]);
        agg.update(&Category::DETECTOR, &[obj(Category::Hand, 0.1)]);
        assert_eq!(agg.get(Category::Hand).count, 1);
        assert_relative_eq!(agg.get(Category::Hand).average_confidence, 0.8);
    }

    #[test]
    fn test_overall_average_weights_by_count() {
        let mut agg = ConfidenceAggregator::new();
        agg.update(
            &Category::DETECTOR,
            &[
                obj(Category::WaterBottle, 0.6),
                obj(Category::WaterBottle, 0.6),
                obj(Category::MeasuringTape, 0.9),
            ],
        );
        assert_relative_eq!(agg.overall_average(), 0.7, epsilon = 1e-6);

        agg.update(&Category::DETECTOR, &[]);
        assert_eq!(agg.overall_average(), 0.0);
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceBand::from_confidence(0.71), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(0.7), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(0.5), ConfidenceBand::Low);
    }
}
