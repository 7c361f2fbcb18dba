//! Domain object categories and the detector label lookup table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of object classes the tracker recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    RabbitDevice,
    MeasuringTape,
    WaterBottle,
    Hand,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::RabbitDevice,
        Category::MeasuringTape,
        Category::WaterBottle,
        Category::Hand,
    ];

    /// Categories produced by the object detector (everything but hands).
    pub const DETECTOR: [Category; 3] = [
        Category::RabbitDevice,
        Category::MeasuringTape,
        Category::WaterBottle,
    ];

    /// Stable index into per-category arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Category::RabbitDevice => 0,
            Category::MeasuringTape => 1,
            Category::WaterBottle => 2,
            Category::Hand => 3,
        }
    }

    /// Human-readable name shown on the HUD.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::RabbitDevice => "Rabbit R1",
            Category::MeasuringTape => "Measuring Tape",
            Category::WaterBottle => "Water Bottle",
            Category::Hand => "Hand",
        }
    }

    /// Map a detector class label to a domain category.
    ///
    /// Accepts the detector's native labels plus the display names of the
    /// detector categories. Hands never come from the detector.
    pub fn from_detector_label(label: &str) -> Option<Category> {
        LABEL_TABLE
            .iter()
            .find(|(native, _)| *native == label)
            .map(|(_, category)| *category)
            .or_else(|| {
                Category::DETECTOR
                    .into_iter()
                    .find(|c| c.display_name() == label)
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Native detector labels and the category each one stands in for.
const LABEL_TABLE: [(&str, Category); 6] = [
    ("bottle", Category::WaterBottle),
    ("cell phone", Category::RabbitDevice),
    ("remote", Category::RabbitDevice),
    ("mouse", Category::RabbitDevice),
    ("ruler", Category::MeasuringTape),
    ("book", Category::MeasuringTape),
];

/// Per-category user toggles. Every category starts enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledCategories {
    pub rabbit_device: bool,
    pub measuring_tape: bool,
    pub water_bottle: bool,
    pub hand: bool,
}

impl Default for EnabledCategories {
    fn default() -> Self {
        Self {
            rabbit_device: true,
            measuring_tape: true,
            water_bottle: true,
            hand: true,
        }
    }
}

impl EnabledCategories {
    pub fn is_enabled(&self, category: Category) -> bool {
        *self.slot(category)
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        *self.slot_mut(category) = enabled;
    }

    /// Flip a toggle, returning the new state.
    pub fn toggle(&mut self, category: Category) -> bool {
        let slot = self.slot_mut(category);
        *slot = !*slot;
        *slot
    }

    fn slot(&self, category: Category) -> &bool {
        match category {
            Category::RabbitDevice => &self.rabbit_device,
            Category::MeasuringTape => &self.measuring_tape,
            Category::WaterBottle => &self.water_bottle,
            Category::Hand => &self.hand,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut bool {
        match category {
            Category::RabbitDevice => &mut self.rabbit_device,
            Category::MeasuringTape => &mut self.measuring_tape,
            Category::WaterBottle => &mut self.water_bottle,
            Category::Hand => &mut self.hand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_table() {
        assert_eq!(Category::from_detector_label("bottle"), Some(Category::WaterBottle));
        assert_eq!(Category::from_detector_label("cell phone"), Some(Category::RabbitDevice));
        assert_eq!(Category::from_detector_label("mouse"), Some(Category::RabbitDevice));
        assert_eq!(Category::from_detector_label("book"), Some(Category::MeasuringTape));
        assert_eq!(Category::from_detector_label("person"), None);
        assert_eq!(Category::from_detector_label("Bottle"), None);
    }

    #[test]
    fn test_display_names_pass_through() {
        assert_eq!(Category::from_detector_label("Water Bottle"), Some(Category::WaterBottle));
        assert_eq!(Category::from_detector_label("Rabbit R1"), Some(Category::RabbitDevice));
        assert_eq!(Category::from_detector_label("Hand"), None);
    }

    #[test]
    fn test_toggles() {
        let mut enabled = EnabledCategories::default();
        assert!(Category::ALL.iter().all(|&c| enabled.is_enabled(c)));

        assert!(!enabled.toggle(Category::Hand));
        assert!(!enabled.is_enabled(Category::Hand));
        enabled.set(Category::Hand, true);
        assert!(enabled.is_enabled(Category::Hand));
    }

    #[test]
    fn test_indices_are_distinct() {
        let mut seen = [false; 4];
        for c in Category::ALL {
            assert!(!seen[c.index()]);
            seen[c.index()] = true;
        }
    }
}
