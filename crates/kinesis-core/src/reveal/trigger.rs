use serde::Serialize;
use tracing::{debug, trace};

use crate::config::RevealConfig;

/// Visibility settings for one observed element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealOptions {
    /// Visible fraction at which the reveal fires
    pub threshold: f64,
    /// Pixels added to (or, when negative, removed from) every viewport edge
    pub margin_px: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            margin_px: 0.0,
        }
    }
}

impl RevealOptions {
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            ..Default::default()
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_margin(mut self, margin_px: f64) -> Self {
        self.margin_px = margin_px;
        self
    }

    /// Whether a reported visible fraction satisfies the threshold
    ///
    /// The element must be at least partly visible even for a zero threshold.
    pub fn is_satisfied_by(&self, ratio: f64) -> bool {
        let threshold = if self.threshold.is_finite() {
            self.threshold.clamp(0.0, 1.0)
        } else {
            0.5
        };
        ratio > 0.0 && ratio >= threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RevealPhase {
    Idle,
    Triggered,
}

/// Delivered once, on the `Idle -> Triggered` transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealEvent {
    /// Visible fraction reported by the crossing notification
    pub ratio: f64,
}

type RevealListener = Box<dyn FnMut(&RevealEvent)>;

/// Write-once visibility trigger
///
/// Fires exactly once when the visible fraction first crosses the threshold.
/// After that it drops its listeners and ignores every further notification;
/// leaving and re-entering the viewport has no effect.
pub struct RevealTrigger {
    phase: RevealPhase,
    options: RevealOptions,
    fired_with: Option<RevealEvent>,
    listeners: Vec<RevealListener>,
    connected: bool,
}

impl std::fmt::Debug for RevealTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealTrigger")
            .field("phase", &self.phase)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .field("connected", &self.connected)
            .finish()
    }
}

impl RevealTrigger {
    pub fn observe(options: RevealOptions) -> Self {
        Self {
            phase: RevealPhase::Idle,
            options,
            fired_with: None,
            listeners: Vec::new(),
            connected: true,
        }
    }

    pub fn options(&self) -> RevealOptions {
        self.options
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.phase == RevealPhase::Triggered
    }

    /// Still waiting for its crossing and attached to an element
    pub fn is_pending(&self) -> bool {
        self.connected && self.phase == RevealPhase::Idle
    }

    /// Register a listener for the reveal
    ///
    /// A listener added after the reveal already fired is called immediately
    /// with the original event and not retained.
    pub fn subscribe<F>(&mut self, mut listener: F)
    where
        F: FnMut(&RevealEvent) + 'static,
    {
        match (self.phase, self.fired_with) {
            (RevealPhase::Triggered, Some(event)) => listener(&event),
            _ if self.connected => self.listeners.push(Box::new(listener)),
            _ => {}
        }
    }

    /// Visibility notification; returns `true` only for the call that fired
    pub fn notify(&mut self, ratio: f64) -> bool {
        if !self.is_pending() || !ratio.is_finite() {
            return false;
        }
        if !self.options.is_satisfied_by(ratio) {
            trace!(ratio, threshold = self.options.threshold, "Below reveal threshold");
            return false;
        }

        let event = RevealEvent { ratio };
        self.phase = RevealPhase::Triggered;
        self.fired_with = Some(event);
        debug!(ratio, "Reveal triggered");

        // Listeners are released after delivery: nothing more to observe
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener(&event);
        }
        true
    }

    /// Detach from the element. Idempotent.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting(trigger: &mut RevealTrigger) -> Rc<Cell<u32>> {
        let calls = Rc::new(Cell::new(0));
        let sink = calls.clone();
        trigger.subscribe(move |_| sink.set(sink.get() + 1));
        calls
    }

    #[test]
    fn test_fires_exactly_once() {
        let mut trigger = RevealTrigger::observe(RevealOptions::default());
        let calls = counting(&mut trigger);

        let ratios = [0.0, 0.2, 0.49, 0.5, 0.9, 0.0, 0.7, 0.1, 1.0, 0.6];
        let fired: Vec<bool> = ratios.iter().map(|r| trigger.notify(*r)).collect();

        assert_eq!(fired.iter().filter(|f| **f).count(), 1);
        assert!(fired[3]);
        assert_eq!(calls.get(), 1);
        assert!(trigger.is_triggered());
    }

    #[test]
    fn test_zero_threshold_needs_some_visibility() {
        let mut trigger = RevealTrigger::observe(RevealOptions::default().with_threshold(0.0));
        assert!(!trigger.notify(0.0));
        assert!(trigger.notify(0.01));
    }

    #[test]
    fn test_late_subscriber_sees_reveal_once() {
        let mut trigger = RevealTrigger::observe(RevealOptions::default());
        trigger.notify(0.8);
        let calls = counting(&mut trigger);
        assert_eq!(calls.get(), 1);
        trigger.notify(0.9);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_disconnect_is_idempotent_and_final() {
        let mut trigger = RevealTrigger::observe(RevealOptions::default());
        let calls = counting(&mut trigger);
        trigger.disconnect();
        trigger.disconnect();
        assert!(!trigger.notify(1.0));
        assert_eq!(calls.get(), 0);
        assert_eq!(trigger.phase(), RevealPhase::Idle);
    }

    #[test]
    fn test_non_finite_ratio_ignored() {
        let mut trigger = RevealTrigger::observe(RevealOptions::default());
        assert!(!trigger.notify(f64::NAN));
        assert!(trigger.is_pending());
    }
}
