use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Upper bound on events drained in one batch, so a flood of pointer
/// samples cannot starve the frame
const MAX_BATCH: usize = 512;

/// Event handler for terminal events
pub struct EventHandler {
    max_batch: usize,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            max_batch: MAX_BATCH,
        }
    }

    /// Wait up to `timeout` for input, then drain whatever else is already
    /// queued without waiting
    pub fn poll_batch(&self, timeout: Duration) -> Result<Vec<AppEvent>> {
        let mut events = Vec::new();
        if !event::poll(timeout)? {
            return Ok(events);
        }
        while events.len() < self.max_batch {
            if let Some(event) = translate(event::read()?) {
                events.push(event);
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(events)
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        // (crossterm 0.27+ sends release events on some systems)
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::FocusLost => Some(AppEvent::FocusLost),
        _ => None,
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Pointer moved, dragged or scrolled
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Terminal lost focus; treated as the pointer leaving the page
    FocusLost,
}

/// Decides when the next display frame is due
///
/// Input is handled as it arrives; frames (scheduler pass plus redraw) run
/// at most once per period.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    next_frame: Instant,
}

impl FramePacer {
    /// The first frame is due at `now`
    pub fn new(period_ms: u64, now: Instant) -> Self {
        Self {
            period: Duration::from_millis(period_ms.max(1)),
            next_frame: now,
        }
    }

    /// Time left before the next frame is due
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_frame.saturating_duration_since(now)
    }

    /// Claim the frame if it is due at `now`
    pub fn try_frame(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.next_frame += self.period;
        if self.next_frame <= now {
            // Fell behind; missed frames are not replayed
            self.next_frame = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_pacer_one_frame_per_period() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(16, start);
        assert!(pacer.try_frame(start));
        assert!(!pacer.try_frame(start));
        assert!(!pacer.try_frame(start + Duration::from_millis(15)));
        assert_eq!(pacer.until_next(start + Duration::from_millis(10)), Duration::from_millis(6));
        assert!(pacer.try_frame(start + Duration::from_millis(16)));
        assert!(!pacer.try_frame(start + Duration::from_millis(20)));
    }

    #[test]
    fn test_pacer_does_not_replay_missed_frames() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(16, start);
        assert!(pacer.try_frame(start));
        let late = start + Duration::from_millis(100);
        assert!(pacer.try_frame(late));
        assert!(!pacer.try_frame(late));
        assert_eq!(pacer.until_next(late), Duration::from_millis(16));
    }

    #[test]
    fn test_translate_ignores_key_release() {
        let mut key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(translate(Event::Key(key)), Some(AppEvent::Key(_))));
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        assert!(translate(Event::Key(key)).is_none());
        assert!(matches!(translate(Event::FocusLost), Some(AppEvent::FocusLost)));
        assert!(translate(Event::FocusGained).is_none());
    }
}
