use serde::Serialize;

use crate::clock::timing::progress;
use crate::clock::{ClockTick, FrameDriven};
use crate::motion::EasingType;

/// Delay for the `index`-th item of a staggered group
pub fn stagger(base_delay_ms: f64, index: usize, step_ms: f64) -> f64 {
    base_delay_ms + index as f64 * step_ms
}

/// Eased 0 to 1 tween that waits for a reveal before playing
#[derive(Debug, Clone, Serialize)]
pub struct EntranceTween {
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub easing: EasingType,
    #[serde(skip)]
    elapsed_ms: Option<f64>,
}

impl EntranceTween {
    pub fn new(delay_ms: f64, duration_ms: f64, easing: EasingType) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            duration_ms: duration_ms.max(0.0),
            easing,
            elapsed_ms: None,
        }
    }

    /// Start playing. Restarting a running tween is a no-op.
    pub fn start(&mut self) {
        if self.elapsed_ms.is_none() {
            self.elapsed_ms = Some(0.0);
        }
    }

    pub fn is_started(&self) -> bool {
        self.elapsed_ms.is_some()
    }

    pub fn update(&mut self, delta_ms: f64) -> f64 {
        if let Some(elapsed) = self.elapsed_ms.as_mut() {
            if delta_ms.is_finite() && delta_ms > 0.0 {
                *elapsed += delta_ms;
            }
        }
        self.value()
    }

    /// Linear progress through the tween, before easing
    pub fn raw_progress(&self) -> f64 {
        match self.elapsed_ms {
            None => 0.0,
            Some(elapsed) => {
                let active = elapsed - self.delay_ms;
                if active < 0.0 {
                    0.0
                } else if self.duration_ms <= 0.0 {
                    1.0
                } else {
                    progress(active, self.duration_ms)
                }
            }
        }
    }

    pub fn value(&self) -> f64 {
        self.easing.apply(self.raw_progress())
    }

    pub fn is_complete(&self) -> bool {
        self.raw_progress() >= 1.0
    }
}

impl FrameDriven for EntranceTween {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger() {
        assert_eq!(stagger(0.0, 0, 70.0), 0.0);
        assert_eq!(stagger(100.0, 3, 70.0), 310.0);
    }

    #[test]
    fn test_idle_until_started() {
        let mut tween = EntranceTween::new(0.0, 800.0, EasingType::Linear);
        assert_eq!(tween.update(500.0), 0.0);
        assert!(!tween.is_started());
    }

    #[test]
    fn test_delay_then_play() {
        let mut tween = EntranceTween::new(200.0, 400.0, EasingType::Linear);
        tween.start();
        assert_eq!(tween.update(100.0), 0.0);
        assert_eq!(tween.update(100.0), 0.0);
        assert!((tween.update(200.0) - 0.5).abs() < 1e-9);
        assert_eq!(tween.update(1000.0), 1.0);
        assert!(tween.is_complete());
    }

    #[test]
    fn test_zero_duration_completes_on_start() {
        let mut tween = EntranceTween::new(0.0, 0.0, EasingType::Smooth);
        tween.start();
        assert!(tween.is_complete());
        assert!((tween.value() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_smooth_easing_leads_linear() {
        let mut tween = EntranceTween::new(0.0, 1000.0, EasingType::Smooth);
        tween.start();
        assert!(tween.update(300.0) > 0.3);
    }
}
