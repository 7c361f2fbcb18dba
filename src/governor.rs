//! Frame-rate driven performance governor.
//!
//! Keeps a rolling window of instantaneous frame rates, turns the mean into a
//! 0–100 performance level and recommends reduced mode once when the rate
//! stays low.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::PerformanceConfig;

/// HUD colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HudStyle {
    #[default]
    Green,
    Amber,
    Blue,
}

impl HudStyle {
    pub fn color(self) -> &'static str {
        match self {
            HudStyle::Green => "#00ff00",
            HudStyle::Amber => "#ffbf00",
            HudStyle::Blue => "#00ccff",
        }
    }
}

const DEGRADED_COLOR: &str = "#ff0000";
const MARGINAL_COLOR: &str = "#ffff00";

/// Coarse state derived from the performance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceBand {
    /// Level below 50
    Degraded,
    /// Level in [50, 75)
    Marginal,
    /// Level 75 and above
    Nominal,
}

impl PerformanceBand {
    pub fn from_level(level: f32) -> Self {
        if level < 50.0 {
            PerformanceBand::Degraded
        } else if level < 75.0 {
            PerformanceBand::Marginal
        } else {
            PerformanceBand::Nominal
        }
    }

    /// Indicator colour; the nominal band follows the HUD theme.
    pub fn color(self, style: HudStyle) -> &'static str {
        match self {
            PerformanceBand::Degraded => DEGRADED_COLOR,
            PerformanceBand::Marginal => MARGINAL_COLOR,
            PerformanceBand::Nominal => style.color(),
        }
    }
}

/// One-shot recommendation to switch to reduced mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advisory {
    pub mean_fps: f32,
    pub samples: usize,
}

/// Governor output for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceReport {
    /// Instantaneous frame rate recorded this frame, if any
    pub fps: Option<f32>,
    pub mean_fps: f32,
    /// Performance level in [0, 100]
    pub level: f32,
    /// `None` until the first frame-rate sample exists
    pub band: Option<PerformanceBand>,
    pub advisory: Option<Advisory>,
}

impl PerformanceReport {
    /// Indicator colour, or `None` while there is nothing to show.
    pub fn color(&self, style: HudStyle) -> Option<&'static str> {
        self.band.map(|b| b.color(style))
    }
}

#[derive(Debug, Clone)]
pub struct PerformanceGovernor {
    config: PerformanceConfig,
    history: VecDeque<f32>,
    last_timestamp_ms: Option<f64>,
    advisory_armed: bool,
}

impl Default for PerformanceGovernor {
    fn default() -> Self {
        Self::new(PerformanceConfig::default())
    }
}

impl PerformanceGovernor {
    pub fn new(config: PerformanceConfig) -> Self {
        let capacity = config.history_capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity + 1),
            config,
            last_timestamp_ms: None,
            advisory_armed: true,
        }
    }

    /// Record a frame timestamp and report the resulting performance state.
    ///
    /// The rate is `round(1000 / delta)` against the previous timestamp. The
    /// first frame, and any frame whose timestamp does not advance, adds no
    /// sample.
    pub fn record_frame(&mut self, timestamp_ms: f64, reduced_mode: bool) -> PerformanceReport {
        let fps = self
            .last_timestamp_ms
            .map(|last| timestamp_ms - last)
            .filter(|&delta| delta > 0.0)
            .map(|delta| (1000.0 / delta).round() as f32);
        self.last_timestamp_ms = Some(timestamp_ms);

        let advisory = fps.and_then(|f| self.push_sample(f, reduced_mode));
        PerformanceReport {
            fps,
            mean_fps: self.mean_fps(),
            level: self.level(),
            band: self.band(),
            advisory,
        }
    }

    /// Push one frame-rate sample, evicting the oldest beyond capacity.
    ///
    /// Returns an advisory the first time the window holds enough samples,
    /// the mean is below the advisory rate and reduced mode is off. It fires
    /// again only after the mean recovers or [`rearm`](Self::rearm) is called.
    pub fn push_sample(&mut self, fps: f32, reduced_mode: bool) -> Option<Advisory> {
        self.history.push_back(fps);
        while self.history.len() > self.config.history_capacity.max(1) {
            self.history.pop_front();
        }

        let mean = self.mean_fps();
        if mean >= self.config.advisory_fps {
            self.advisory_armed = true;
            return None;
        }

        let enough_samples = self.history.len() >= self.config.advisory_min_samples;
        if self.advisory_armed && !reduced_mode && enough_samples {
            self.advisory_armed = false;
            tracing::info!(
                mean_fps = mean,
                samples = self.history.len(),
                "low frame rate, recommending reduced mode"
            );
            return Some(Advisory {
                mean_fps: mean,
                samples: self.history.len(),
            });
        }
        None
    }

    /// Allow the advisory to fire again.
    pub fn rearm(&mut self) {
        self.advisory_armed = true;
    }

    /// Arithmetic mean of the window, or 0 when empty.
    pub fn mean_fps(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f32>() / self.history.len() as f32
    }

    pub fn level(&self) -> f32 {
        (self.mean_fps() / self.config.target_fps * 100.0).clamp(0.0, 100.0)
    }

    /// Band for the current level, or `None` before the first sample.
    pub fn band(&self) -> Option<PerformanceBand> {
        if self.history.is_empty() {
            return None;
        }
        Some(PerformanceBand::from_level(self.level()))
    }

    pub fn samples(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &PerformanceConfig {
        &self.config
    }
}
