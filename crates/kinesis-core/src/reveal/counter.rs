use serde::Serialize;
use tracing::debug;

use crate::clock::{ClockTick, FrameDriven, Interval};
use crate::config::RevealConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterPhase {
    Idle,
    Running,
    Done,
}

/// Integer counter that climbs from 0 to its target once started
///
/// The displayed value after `n` steps is `n * target / total_steps`, computed
/// in integers, and the final step assigns the target itself so the counter
/// can never overshoot.
#[derive(Debug, Clone)]
pub struct Counter {
    target: u64,
    suffix: String,
    total_steps: u64,
    steps: u64,
    interval: Interval,
    phase: CounterPhase,
}

impl Counter {
    pub fn new(target: u64, suffix: impl Into<String>, duration_secs: f64, steps_per_sec: f64) -> Self {
        let total = duration_secs * steps_per_sec;
        let total_steps = if total.is_finite() && total > 0.0 {
            total.ceil() as u64
        } else {
            0
        };
        Self {
            target,
            suffix: suffix.into(),
            total_steps,
            steps: 0,
            interval: Interval::per_second(steps_per_sec),
            phase: CounterPhase::Idle,
        }
    }

    pub fn from_config(target: u64, suffix: impl Into<String>, config: &RevealConfig) -> Self {
        Self::new(
            target,
            suffix,
            config.counter_duration_secs,
            config.counter_steps_per_sec,
        )
    }

    /// Begin counting. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.phase != CounterPhase::Idle {
            return;
        }
        if self.total_steps == 0 || self.target == 0 {
            self.finish();
            return;
        }
        debug!(target = self.target, steps = self.total_steps, "Counter started");
        self.phase = CounterPhase::Running;
    }

    pub fn update(&mut self, delta_ms: f64) -> u64 {
        if self.phase == CounterPhase::Running {
            let ticks = u64::from(self.interval.advance(delta_ms));
            self.steps = self.steps.saturating_add(ticks);
            if self.steps >= self.total_steps {
                self.finish();
            }
        }
        self.value()
    }

    fn finish(&mut self) {
        self.steps = self.total_steps;
        self.phase = CounterPhase::Done;
    }

    pub fn value(&self) -> u64 {
        match self.phase {
            CounterPhase::Idle => 0,
            CounterPhase::Done => self.target,
            CounterPhase::Running => {
                let scaled = u128::from(self.steps) * u128::from(self.target)
                    / u128::from(self.total_steps.max(1));
                scaled.min(u128::from(self.target)) as u64
            }
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == CounterPhase::Done
    }

    /// Value with its suffix, e.g. `50+`
    pub fn display(&self) -> String {
        format!("{}{}", self.value(), self.suffix)
    }
}

impl FrameDriven for Counter {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_started() {
        let mut counter = Counter::new(50, "+", 2.0, 60.0);
        assert_eq!(counter.update(5000.0), 0);
        assert_eq!(counter.phase(), CounterPhase::Idle);
        assert_eq!(counter.display(), "0+");
    }

    #[test]
    fn test_lands_exactly_on_target() {
        let mut counter = Counter::new(50, "+", 2.0, 60.0);
        counter.start();

        let frame = 1000.0 / 60.0;
        let mut previous = 0;
        for _ in 0..119 {
            let value = counter.update(frame);
            assert!(value >= previous);
            assert!(value < 50);
            previous = value;
        }
        assert_eq!(counter.update(frame), 50);
        assert!(counter.is_complete());
        assert_eq!(counter.update(frame), 50);
        assert_eq!(counter.display(), "50+");
    }

    #[test]
    fn test_large_frame_never_overshoots() {
        let mut counter = Counter::new(10, "+", 2.0, 60.0);
        counter.start();
        assert_eq!(counter.update(1000.0), 5);
        assert_eq!(counter.update(10_000.0), 10);
    }

    #[test]
    fn test_target_not_divisible_by_steps() {
        let mut counter = Counter::new(9, " yrs", 2.0, 60.0);
        counter.start();
        for _ in 0..400 {
            assert!(counter.update(7.0) <= 9);
        }
        assert_eq!(counter.value(), 9);
        assert_eq!(counter.display(), "9 yrs");
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut counter = Counter::new(50, "K+", 0.0, 60.0);
        counter.start();
        assert!(counter.is_complete());
        assert_eq!(counter.value(), 50);

        let mut counter = Counter::new(0, "", 2.0, 60.0);
        counter.start();
        assert!(counter.is_complete());
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut counter = Counter::new(50, "+", 2.0, 60.0);
        counter.start();
        counter.update(1000.0);
        counter.start();
        assert_eq!(counter.value(), 25);
    }
}
