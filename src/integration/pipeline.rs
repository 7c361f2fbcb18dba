//! TrackerPipeline: the per-frame tick combining perception with tracking.

use nalgebra::Point2;

use crate::config::{self, TrackerConfig};
use crate::error::{ConfigError, PerceptionError, TickError};
use crate::governor::{HudStyle, PerformanceGovernor, PerformanceReport};
use crate::tracker::{
    self, Category, CategoryStats, ConfidenceAggregator, FrameSize, TargetLock, TrackStore,
    TrackedObject,
};

use super::{DetectionSource, Frame, HandLandmarkSource, HandModelComplexity, NoHands};

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// Hand objects first, then detector objects, each in model order
    pub objects: Vec<TrackedObject>,
    pub stats: Vec<(Category, CategoryStats)>,
    /// Count-weighted confidence over categories with detections
    pub overall_confidence: f32,
    pub lock: Option<TargetLock>,
    pub performance: PerformanceReport,
    /// Indicator colour for the performance level under the current HUD style,
    /// `None` until the first frame-rate sample
    pub performance_color: Option<&'static str>,
    pub reduced_mode: bool,
    /// Whether the object detector ran on this tick
    pub detector_ran: bool,
    /// Failure that aborted this tick, if any
    pub error: Option<TickError>,
    frame: FrameSize,
}

impl FrameOutput {
    /// Normalized center of the first tracked object, for the status readout.
    pub fn status_point(&self) -> Option<Point2<f32>> {
        let first = self.objects.first()?;
        if self.frame.width <= 0.0 || self.frame.height <= 0.0 {
            return None;
        }
        Some(Point2::new(
            first.center.x / self.frame.width,
            first.center.y / self.frame.height,
        ))
    }

    pub fn stats_for(&self, category: Category) -> CategoryStats {
        self.stats
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }
}

/// A combined tracker that bundles detection and hand inference with tracking.
///
/// Owns all tracking state; one call to [`tick`](Self::tick) per rendered frame.
pub struct TrackerPipeline<D: DetectionSource, H: HandLandmarkSource = NoHands> {
    detector: D,
    hands: H,
    config: TrackerConfig,
    store: TrackStore,
    stats: ConfidenceAggregator,
    governor: PerformanceGovernor,
    frame_counter: u64,
    hand_objects: Vec<TrackedObject>,
    detector_objects: Vec<TrackedObject>,
}

impl<D: DetectionSource> TrackerPipeline<D, NoHands> {
    /// Create a pipeline without a hand model and with the default configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::build(detector, NoHands, TrackerConfig::default())
    }
}

impl<D: DetectionSource, H: HandLandmarkSource> TrackerPipeline<D, H> {
    /// Create a new pipeline, validating `config`.
    pub fn new(detector: D, hands: H, config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(detector, hands, config))
    }

    fn build(detector: D, mut hands: H, config: TrackerConfig) -> Self {
        hands.set_complexity(HandModelComplexity::for_reduced_mode(config.reduced_mode));
        Self {
            detector,
            hands,
            governor: PerformanceGovernor::new(config.performance.clone()),
            config,
            store: TrackStore::new(),
            stats: ConfidenceAggregator::new(),
            frame_counter: 0,
            hand_objects: Vec::new(),
            detector_objects: Vec::new(),
        }
    }

    /// Process one frame.
    ///
    /// Never fails: a collaborator error aborts the rest of the tick, is
    /// logged and reported in [`FrameOutput::error`], and the next tick runs
    /// normally. Resource exhaustion additionally switches reduced mode on.
    pub fn tick(&mut self, frame: &Frame<'_>, now_ms: u64) -> FrameOutput {
        let performance = self
            .governor
            .record_frame(frame.timestamp_ms, self.config.reduced_mode);
        let size = FrameSize::new(frame.width as f32, frame.height as f32);

        match self.process(frame, size, now_ms) {
            Ok(detector_ran) => {
                let objects: Vec<TrackedObject> = self
                    .hand_objects
                    .iter()
                    .chain(self.detector_objects.iter())
                    .cloned()
                    .collect();
                let lock = tracker::select_target(&objects, size);
                self.output(objects, lock, performance, detector_ran, None, size)
            }
            Err(err) => {
                self.handle_failure(&err);
                self.output(Vec::new(), None, performance, false, Some(err), size)
            }
        }
    }

    /// Drive the pipeline over a sequence of frames, reading the wall clock
    /// from `clock` and handing every output to `sink`.
    pub fn run<'a, I, C, S>(&mut self, frames: I, mut clock: C, mut sink: S)
    where
        I: IntoIterator<Item = Frame<'a>>,
        C: FnMut() -> u64,
        S: FnMut(FrameOutput),
    {
        for frame in frames {
            let output = self.tick(&frame, clock());
            sink(output);
        }
    }

    fn process(
        &mut self,
        frame: &Frame<'_>,
        size: FrameSize,
        now_ms: u64,
    ) -> Result<bool, TickError> {
        let hands_enabled = self.config.enabled.is_enabled(Category::Hand);
        if hands_enabled {
            let hands = self
                .hands
                .detect_hands(frame)
                .map_err(|e| TickError::Hands(e.into()))?;
            self.hand_objects = tracker::associate_hands(&mut self.store, &hands, size, now_ms);
        } else {
            self.hand_objects.clear();
        }

        self.frame_counter += 1;
        let skip = if self.config.reduced_mode {
            u64::from(self.config.performance.reduced_frame_skip)
        } else {
            0
        };
        let detector_ran = self.frame_counter % (skip + 1) == 0;
        if detector_ran {
            let raw = self
                .detector
                .detect(frame)
                .map_err(|e| TickError::Detector(e.into()))?;
            let filtered = tracker::filter_detections(
                &raw,
                self.config.confidence_threshold,
                &self.config.enabled,
            );
            self.detector_objects =
                tracker::associate_detections(&mut self.store, &filtered, size, now_ms);
        }

        self.store.evict_expired(now_ms, self.config.track_ttl_ms);
        // Objects carried over from a skipped detector tick still obey the toggles.
        let store = &self.store;
        let enabled = &self.config.enabled;
        self.detector_objects
            .retain(|o| store.contains(o.track_id) && enabled.is_enabled(o.category));
        self.hand_objects.retain(|o| store.contains(o.track_id));

        if hands_enabled {
            self.stats.update(&[Category::Hand], &self.hand_objects);
        } else {
            self.stats.clear_count(Category::Hand);
        }
        if detector_ran {
            self.stats.update(&Category::DETECTOR, &self.detector_objects);
        }
        for category in Category::DETECTOR {
            if !self.config.enabled.is_enabled(category) {
                self.stats.clear_count(category);
            }
        }
        Ok(detector_ran)
    }

    fn handle_failure(&mut self, err: &TickError) {
        match err.perception() {
            PerceptionError::ResourceExhausted(_) => {
                tracing::error!(error = %err, "perception ran out of resources");
                if !self.config.reduced_mode {
                    tracing::warn!("forcing reduced mode after resource exhaustion");
                    self.set_reduced_mode(true);
                }
            }
            _ => tracing::warn!(error = %err, "recoverable error in tick"),
        }
    }

    fn output(
        &self,
        objects: Vec<TrackedObject>,
        lock: Option<TargetLock>,
        performance: PerformanceReport,
        detector_ran: bool,
        error: Option<TickError>,
        frame: FrameSize,
    ) -> FrameOutput {
        FrameOutput {
            objects,
            stats: self.stats.snapshot(),
            overall_confidence: self.stats.overall_average(),
            lock,
            performance_color: performance.color(self.config.hud_style),
            performance,
            reduced_mode: self.config.reduced_mode,
            detector_ran,
            error,
            frame,
        }
    }

    /// Switch reduced mode, updating the hand model fidelity to match.
    pub fn set_reduced_mode(&mut self, enabled: bool) {
        if self.config.reduced_mode == enabled {
            return;
        }
        self.config.reduced_mode = enabled;
        self.hands
            .set_complexity(HandModelComplexity::for_reduced_mode(enabled));
        if !enabled {
            self.governor.rearm();
        }
        tracing::info!(reduced_mode = enabled, "reduced mode changed");
    }

    pub fn set_confidence_threshold(&mut self, threshold: f32) -> Result<(), ConfigError> {
        config::validate_threshold(threshold)?;
        self.config.confidence_threshold = threshold;
        Ok(())
    }

    pub fn set_category_enabled(&mut self, category: Category, enabled: bool) {
        self.config.enabled.set(category, enabled);
    }

    /// Flip a category toggle, returning the new state.
    pub fn toggle_category(&mut self, category: Category) -> bool {
        self.config.enabled.toggle(category)
    }

    pub fn set_hud_style(&mut self, style: HudStyle) {
        self.config.hud_style = style;
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn reduced_mode(&self) -> bool {
        self.config.reduced_mode
    }

    /// Get a reference to the track store.
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn stats(&self) -> &ConfidenceAggregator {
        &self.stats
    }

    pub fn governor(&self) -> &PerformanceGovernor {
        &self.governor
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn hands(&self) -> &H {
        &self.hands
    }

    pub fn hands_mut(&mut self) -> &mut H {
        &mut self.hands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::DetectionBuilder;
    use crate::tracker::{HandLandmarks, RawDetection};

    struct MockDetector {
        detections: Vec<RawDetection>,
        calls: usize,
        fail_with: Option<PerceptionError>,
    }

    impl MockDetector {
        fn new(detections: Vec<RawDetection>) -> Self {
            Self {
                detections,
                calls: 0,
                fail_with: None,
            }
        }
    }

    impl DetectionSource for MockDetector {
        type Error = PerceptionError;

        fn detect(&mut self, _frame: &Frame<'_>) -> Result<Vec<RawDetection>, Self::Error> {
            self.calls += 1;
            match self.fail_with.take() {
                Some(err) => Err(err),
                None => Ok(self.detections.clone()),
            }
        }
    }

    struct FailingHands {
        error: PerceptionError,
        complexity: Option<HandModelComplexity>,
    }

    impl HandLandmarkSource for FailingHands {
        type Error = PerceptionError;

        fn detect_hands(&mut self, _frame: &Frame<'_>) -> Result<Vec<HandLandmarks>, Self::Error> {
            Err(self.error.clone())
        }

        fn set_complexity(&mut self, complexity: HandModelComplexity) {
            self.complexity = Some(complexity);
        }
    }

    fn bottle_at(cx: f32, cy: f32) -> RawDetection {
        DetectionBuilder::new()
            .label("bottle")
            .xywh(cx, cy, 50.0, 80.0)
            .score(0.9)
            .build()
    }

    fn frame(ts: f64) -> Frame<'static> {
        Frame::new(&[], 640, 480, ts)
    }

    #[test]
    fn test_tracker_pipeline() {
        let detector = MockDetector::new(vec![
            DetectionBuilder::new()
                .label("bottle")
                .xywh(300.0, 240.0, 50.0, 80.0)
                .score(0.9)
                .build(),
        ]);

        let mut pipeline = TrackerPipeline::with_default_config(detector);
        let out = pipeline.tick(&frame(0.0), 0);

        assert!(out.error.is_none());
        assert_eq!(out.objects.len(), 1);
        assert_eq!(out.objects[0].category, Category::WaterBottle);
        assert_eq!(out.lock.as_ref().map(|l| l.track_id), Some(out.objects[0].track_id));
        assert_eq!(out.stats_for(Category::WaterBottle).count, 1);

        let p = out.status_point().unwrap();
        assert!((p.x - 300.0 / 640.0).abs() < 1e-6);
    }

    #[test]
    fn test_reduced_mode_skips_detector_frames() {
        let mut pipeline = TrackerPipeline::with_default_config(MockDetector::new(vec![]));
        pipeline.set_reduced_mode(true);
        let ran: Vec<bool> = (0..6)
            .map(|i| pipeline.tick(&frame(i as f64 * 33.0), i * 33).detector_ran)
            .collect();
        assert_eq!(ran, vec![false, false, true, false, false, true]);
        assert_eq!(pipeline.detector().calls, 2);
    }

    #[test]
    fn test_resource_exhaustion_forces_reduced_mode() {
        let mut detector = MockDetector::new(vec![]);
        detector.fail_with = Some(PerceptionError::ResourceExhausted("out of memory".into()));
        let mut pipeline = TrackerPipeline::with_default_config(detector);

        let failed = pipeline.tick(&frame(0.0), 0);
        assert!(failed.error.is_some());
        assert!(failed.objects.is_empty());
        assert!(failed.reduced_mode);
        assert!(pipeline.reduced_mode());

        let next = pipeline.tick(&frame(33.0), 33);
        assert!(next.error.is_none());
    }

    #[test]
    fn test_other_failures_keep_mode() {
        let mut detector = MockDetector::new(vec![]);
        detector.fail_with = Some(PerceptionError::Inference("corrupt frame".into()));
        let mut pipeline = TrackerPipeline::with_default_config(detector);

        let failed = pipeline.tick(&frame(0.0), 0);
        assert!(matches!(failed.error, Some(TickError::Detector(_))));
        assert!(!pipeline.reduced_mode());
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let mut pipeline = TrackerPipeline::with_default_config(MockDetector::new(vec![]));
        assert!(pipeline.set_confidence_threshold(-0.1).is_err());
        assert!(pipeline.set_confidence_threshold(0.3).is_ok());
        assert_eq!(pipeline.config().confidence_threshold, 0.3);
    }

    #[test]
    fn test_disabled_category_leaves_skipped_ticks() {
        let mut pipeline = TrackerPipeline::with_default_config(MockDetector::new(vec![
            bottle_at(320.0, 240.0),
        ]));
        pipeline.set_reduced_mode(true);
        for i in 0..3u64 {
            pipeline.tick(&frame(i as f64 * 33.0), i * 33);
        }

        pipeline.set_category_enabled(Category::WaterBottle, false);
        let out = pipeline.tick(&frame(99.0), 99);
        assert!(!out.detector_ran);
        assert!(out.objects.is_empty());
        assert!(out.lock.is_none());
        let stats = out.stats_for(Category::WaterBottle);
        assert_eq!(stats.count, 0);
        assert!((stats.average_confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_hand_failure_aborts_tick() {
        let hands = FailingHands {
            error: PerceptionError::Inference("no landmarks".into()),
            complexity: None,
        };
        let detector = MockDetector::new(vec![bottle_at(320.0, 240.0)]);
        let mut pipeline = TrackerPipeline::new(detector, hands, TrackerConfig::default()).unwrap();

        let out = pipeline.tick(&frame(0.0), 0);
        assert!(matches!(out.error, Some(TickError::Hands(_))));
        assert!(out.objects.is_empty());
        assert!(!pipeline.reduced_mode());
        assert_eq!(pipeline.detector().calls, 0);
    }

    #[test]
    fn test_hand_resource_exhaustion_forces_reduced_mode() {
        let hands = FailingHands {
            error: PerceptionError::ResourceExhausted("out of memory".into()),
            complexity: None,
        };
        let mut pipeline =
            TrackerPipeline::new(MockDetector::new(vec![]), hands, TrackerConfig::default())
                .unwrap();
        assert_eq!(pipeline.hands().complexity, Some(HandModelComplexity::Full));

        let out = pipeline.tick(&frame(0.0), 0);
        assert!(matches!(out.error, Some(TickError::Hands(_))));
        assert!(pipeline.reduced_mode());
        assert_eq!(pipeline.hands().complexity, Some(HandModelComplexity::Lite));
    }

    #[test]
    fn test_run_continues_past_failed_tick() {
        let mut detector = MockDetector::new(vec![bottle_at(320.0, 240.0)]);
        detector.fail_with = Some(PerceptionError::Inference("corrupt frame".into()));
        let mut pipeline = TrackerPipeline::with_default_config(detector);

        let frames = (0..4).map(|i| frame(i as f64 * 33.0));
        let mut now = 0;
        let mut outputs = Vec::new();
        pipeline.run(
            frames,
            || {
                now += 33;
                now
            },
            |out| outputs.push(out),
        );

        assert_eq!(outputs.len(), 4);
        assert!(outputs[0].error.is_some());
        assert!(outputs[1..].iter().all(|o| o.error.is_none()));
        assert!(outputs[1..].iter().all(|o| o.objects.len() == 1));
        assert_eq!(outputs[1].objects[0].track_id, outputs[3].objects[0].track_id);
        assert_eq!(pipeline.detector().calls, 4);
    }

    #[test]
    fn test_no_performance_color_before_first_sample() {
        let mut pipeline = TrackerPipeline::with_default_config(MockDetector::new(vec![]));
        assert!(pipeline.tick(&frame(0.0), 0).performance_color.is_none());
        assert_eq!(pipeline.tick(&frame(33.3), 33).performance_color, Some("#00ff00"));
    }
}
