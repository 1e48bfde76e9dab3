use serde::Serialize;
use tracing::{trace, warn};

use crate::clock::timing::frame_rate_independent_factor;
use crate::clock::{ClockTick, FrameDriven};
use crate::config::{ScrollConfig, SpringConfig};
use crate::geometry::Viewport;
use crate::motion::{SpringParams, SpringValue};

/// Distance below which the smoothed offset snaps onto the raw offset
const SETTLE_PX: f64 = 0.01;

/// Page-wide scroll snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScrollState {
    pub raw_offset: f64,
    pub smoothed_offset: f64,
    /// `raw_offset / scrollable_height`, clamped to [0, 1]
    pub global_progress: f64,
}

/// Global progress for an offset; a page that cannot scroll reports 0
pub fn global_progress(raw_offset: f64, scrollable_height: f64) -> f64 {
    if !(scrollable_height > 0.0) || !raw_offset.is_finite() || !scrollable_height.is_finite() {
        return 0.0;
    }
    (raw_offset / scrollable_height).clamp(0.0, 1.0)
}

/// One smoothing pass: move `smoothed_offset` toward `raw_offset`
///
/// `lerp` is the fraction covered per `reference_frame_ms`; it is re-derived
/// for the actual delta so the glide is frame-rate independent.
pub fn smooth(state: ScrollState, lerp: f64, delta_ms: f64, reference_frame_ms: f64) -> ScrollState {
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return state;
    }
    let k = frame_rate_independent_factor(lerp, delta_ms, reference_frame_ms);
    let mut next = state;
    next.smoothed_offset += (state.raw_offset - state.smoothed_offset) * k;
    if (next.raw_offset - next.smoothed_offset).abs() < SETTLE_PX {
        next.smoothed_offset = next.raw_offset;
    }
    next
}

/// Process-wide scroll state, fed by scroll and resize events
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    state: ScrollState,
    scrollable_height: f64,
    viewport: Viewport,
    lerp: f64,
    reference_frame_ms: f64,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(&ScrollConfig::default())
    }
}

impl ScrollTracker {
    pub fn new(config: &ScrollConfig) -> Self {
        let defaults = ScrollConfig::default();
        let lerp = if config.lerp > 0.0 && config.lerp <= 1.0 {
            config.lerp
        } else {
            warn!(lerp = config.lerp, "Scroll lerp out of range, using default");
            defaults.lerp
        };
        let reference_frame_ms = if config.reference_frame_ms > 0.0 {
            config.reference_frame_ms
        } else {
            defaults.reference_frame_ms
        };
        Self {
            state: ScrollState::default(),
            scrollable_height: 0.0,
            viewport: Viewport::default(),
            lerp,
            reference_frame_ms,
        }
    }

    /// Raw scroll sample
    pub fn on_scroll(&mut self, raw_offset: f64) {
        if !raw_offset.is_finite() {
            warn!(raw_offset, "Ignoring non-finite scroll offset");
            return;
        }
        self.state.raw_offset = raw_offset;
        self.recompute_progress();
    }

    /// Layout change: viewport size and the scrollable extent
    /// (document height minus viewport height)
    pub fn on_resize(&mut self, viewport: Viewport, scrollable_height: f64) {
        self.viewport = viewport;
        self.scrollable_height = if scrollable_height.is_finite() {
            scrollable_height.max(0.0)
        } else {
            0.0
        };
        self.recompute_progress();
    }

    /// Place both offsets at `offset` without gliding
    pub fn jump_to(&mut self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        self.state.raw_offset = offset;
        self.state.smoothed_offset = offset;
        self.recompute_progress();
    }

    fn recompute_progress(&mut self) {
        self.state.global_progress = global_progress(self.state.raw_offset, self.scrollable_height);
    }

    /// Per-frame smoothing pass
    pub fn update(&mut self, delta_ms: f64) -> ScrollState {
        self.state = smooth(self.state, self.lerp, delta_ms, self.reference_frame_ms);
        trace!(
            raw = self.state.raw_offset,
            smoothed = self.state.smoothed_offset,
            "Scroll smoothing"
        );
        self.state
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.state.global_progress
    }

    /// Global progress of the smoothed offset
    pub fn smoothed_progress(&self) -> f64 {
        global_progress(self.state.smoothed_offset, self.scrollable_height)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scrollable_height(&self) -> f64 {
        self.scrollable_height
    }

    pub fn is_gliding(&self) -> bool {
        self.state.raw_offset != self.state.smoothed_offset
    }
}

impl FrameDriven for ScrollTracker {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}

/// Thin page-top bar whose horizontal scale springs after global progress
#[derive(Debug, Clone)]
pub struct ProgressBar {
    scale: SpringValue,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            scale: SpringValue::new(0.0, SpringParams::PROGRESS_BAR).with_rest(0.001, 0.001),
        }
    }
}

impl ProgressBar {
    pub fn new(config: &SpringConfig) -> Self {
        Self {
            scale: SpringValue::from_config(0.0, config, SpringParams::PROGRESS_BAR),
        }
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.scale.set_target(progress.clamp(0.0, 1.0));
    }

    pub fn update(&mut self, delta_ms: f64) -> f64 {
        self.scale.update(delta_ms).clamp(0.0, 1.0)
    }

    /// Current horizontal scale in [0, 1]
    pub fn scale(&self) -> f64 {
        self.scale.get().clamp(0.0, 1.0)
    }
}

impl FrameDriven for ProgressBar {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(scrollable: f64) -> ScrollTracker {
        let mut tracker = ScrollTracker::default();
        tracker.on_resize(Viewport::new(1280.0, 800.0), scrollable);
        tracker
    }

    #[test]
    fn test_progress_endpoints() {
        let mut tracker = tracker(4000.0);
        tracker.on_scroll(0.0);
        assert_eq!(tracker.progress(), 0.0);
        tracker.on_scroll(4000.0);
        assert_eq!(tracker.progress(), 1.0);
    }

    #[test]
    fn test_progress_clamped() {
        let mut tracker = tracker(1000.0);
        tracker.on_scroll(-40.0);
        assert_eq!(tracker.progress(), 0.0);
        tracker.on_scroll(1200.0);
        assert_eq!(tracker.progress(), 1.0);
    }

    #[test]
    fn test_progress_monotonic_for_monotonic_input() {
        let mut tracker = tracker(3000.0);
        let mut last = 0.0;
        for step in 0..=400 {
            tracker.on_scroll(step as f64 * 9.0);
            let progress = tracker.progress();
            assert!(progress >= last);
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_unscrollable_page_reports_zero() {
        let mut tracker = tracker(0.0);
        tracker.on_scroll(50.0);
        assert_eq!(tracker.progress(), 0.0);
        tracker.on_resize(Viewport::new(100.0, 100.0), f64::NAN);
        assert_eq!(tracker.progress(), 0.0);
    }

    #[test]
    fn test_resize_recomputes_progress() {
        let mut tracker = tracker(1000.0);
        tracker.on_scroll(500.0);
        assert_eq!(tracker.progress(), 0.5);
        tracker.on_resize(Viewport::new(1280.0, 800.0), 2000.0);
        assert_eq!(tracker.progress(), 0.25);
    }

    #[test]
    fn test_smoothing_reference_frame() {
        let mut tracker = tracker(1000.0);
        tracker.on_scroll(100.0);
        let state = tracker.update(1000.0 / 60.0);
        assert!((state.smoothed_offset - 7.0).abs() < 1e-9);
        assert_eq!(state.raw_offset, 100.0);
    }

    #[test]
    fn test_smoothing_frame_rate_independent() {
        let mut at_60 = tracker(1000.0);
        let mut at_120 = tracker(1000.0);
        at_60.on_scroll(500.0);
        at_120.on_scroll(500.0);
        for _ in 0..30 {
            at_60.update(1000.0 / 60.0);
        }
        for _ in 0..60 {
            at_120.update(1000.0 / 120.0);
        }
        let a = at_60.state().smoothed_offset;
        let b = at_120.state().smoothed_offset;
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }

    #[test]
    fn test_smoothing_settles_and_never_overshoots() {
        let mut tracker = tracker(1000.0);
        tracker.on_scroll(300.0);
        let mut last = 0.0;
        for _ in 0..600 {
            let state = tracker.update(16.0);
            assert!(state.smoothed_offset >= last && state.smoothed_offset <= 300.0);
            last = state.smoothed_offset;
        }
        assert!(!tracker.is_gliding());
        assert_eq!(tracker.smoothed_progress(), 0.3);
    }

    #[test]
    fn test_large_delta_lands_on_target() {
        let mut tracker = tracker(1000.0);
        tracker.on_scroll(300.0);
        let state = tracker.update(60_000.0);
        assert_eq!(state.smoothed_offset, 300.0);
        assert_eq!(tracker.update(f64::NAN), state);
    }

    #[test]
    fn test_jump_to_skips_glide() {
        let mut tracker = tracker(1000.0);
        tracker.jump_to(250.0);
        assert!(!tracker.is_gliding());
        assert_eq!(tracker.progress(), 0.25);
    }

    #[test]
    fn test_progress_bar_follows() {
        let mut bar = ProgressBar::default();
        bar.set_progress(0.6);
        for _ in 0..600 {
            bar.update(16.0);
        }
        assert!((bar.scale() - 0.6).abs() < 1e-3);
        bar.set_progress(7.0);
        for _ in 0..600 {
            bar.update(16.0);
        }
        assert!(bar.scale() <= 1.0);
    }
}
