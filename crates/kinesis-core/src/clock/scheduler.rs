use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Serialize;
use tracing::{debug, trace, warn};

/// One frame as seen by a single subscriber
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClockTick {
    /// Host timestamp of this frame
    pub timestamp_ms: f64,
    /// Time since this subscriber's previous invocation (0 on the first)
    pub delta_ms: f64,
}

/// A component advanced once per frame by the scheduler
pub trait FrameDriven {
    fn on_frame(&mut self, tick: &ClockTick);
}

type FrameCallback = Box<dyn FnMut(&ClockTick)>;

struct Entry {
    id: u64,
    last_timestamp: Option<f64>,
    /// `None` while the callback is running
    callback: Option<FrameCallback>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Registry {
    fn insert(&mut self, callback: FrameCallback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            last_timestamp: None,
            callback: Some(callback),
        });
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        before != self.entries.len()
    }

    /// Take the callback out for invocation and compute this subscriber's delta
    fn checkout(&mut self, id: u64, timestamp_ms: f64) -> Option<(FrameCallback, ClockTick)> {
        let entry = self.entries.iter_mut().find(|entry| entry.id == id)?;
        let callback = entry.callback.take()?;
        let delta_ms = match entry.last_timestamp {
            Some(last) => (timestamp_ms - last).max(0.0),
            None => 0.0,
        };
        entry.last_timestamp = Some(timestamp_ms);
        Some((
            callback,
            ClockTick {
                timestamp_ms,
                delta_ms,
            },
        ))
    }

    fn checkin(&mut self, id: u64, callback: FrameCallback) {
        // Dropped if the subscriber cancelled itself while running
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.callback = Some(callback);
        }
    }
}

/// Single-threaded frame scheduler
///
/// Cloning yields another handle to the same subscriber list. Subscribers run
/// in registration order. Callbacks may subscribe, cancel (including
/// themselves) or re-enter `frame` without panicking; subscribers added during
/// a pass first run on the next pass.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    registry: Rc<RefCell<Registry>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a per-frame callback
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&ClockTick) + 'static,
    {
        let id = self.registry.borrow_mut().insert(Box::new(callback));
        debug!(subscription = id, "Frame subscriber added");
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Subscribe a shared component
    ///
    /// A frame is skipped for the component if the host happens to hold a
    /// borrow of it while the frame runs. The skipped time is added to the
    /// component's next delta.
    pub fn attach<T>(&self, component: Rc<RefCell<T>>) -> Subscription
    where
        T: FrameDriven + 'static,
    {
        let mut missed_ms = 0.0;
        self.subscribe(move |tick| match component.try_borrow_mut() {
            Ok(mut component) => {
                let tick = ClockTick {
                    delta_ms: tick.delta_ms + missed_ms,
                    ..*tick
                };
                missed_ms = 0.0;
                component.on_frame(&tick);
            }
            Err(_) => {
                missed_ms += tick.delta_ms;
                trace!(missed_ms, "Component busy, skipping frame");
            }
        })
    }

    /// Run one display frame
    pub fn frame(&self, timestamp_ms: f64) {
        if !timestamp_ms.is_finite() {
            warn!(timestamp_ms, "Ignoring frame with non-finite timestamp");
            return;
        }

        let ids: Vec<u64> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|entry| entry.id)
            .collect();

        for id in ids {
            let checked_out = self.registry.borrow_mut().checkout(id, timestamp_ms);
            let Some((mut callback, tick)) = checked_out else {
                continue;
            };
            callback(&tick);
            self.registry.borrow_mut().checkin(id, callback);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Handle returned by [`FrameScheduler::subscribe`]
///
/// Dropping the handle does not unsubscribe; call [`Subscription::cancel`].
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Stop receiving frames. Safe to call repeatedly and from inside the
    /// subscriber's own callback.
    pub fn cancel(&self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.borrow_mut().remove(self.id) {
                debug!(subscription = self.id, "Frame subscriber removed");
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| registry.borrow().entries.iter().any(|e| e.id == self.id))
            .unwrap_or(false)
    }
}
