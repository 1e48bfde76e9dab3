//! Registry of reveal triggers keyed by element
//!
//! Hosts with native visibility notifications call [`ViewportObserver::notify`]
//! with the reported fraction. Hosts without them register geometry and call
//! [`ViewportObserver::on_viewport`], which derives fractions itself.

use std::collections::BTreeMap;

use tracing::debug;

use super::trigger::{RevealEvent, RevealOptions, RevealTrigger};
use crate::geometry::{intersection_ratio, Rect};
use crate::scroll::ElementId;

#[derive(Debug)]
struct Observed {
    trigger: RevealTrigger,
    /// Document-space bounds, when the host supplies geometry
    rect: Option<Rect>,
}

#[derive(Debug, Default)]
pub struct ViewportObserver {
    elements: BTreeMap<ElementId, Observed>,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `id`
    ///
    /// Observing an element twice keeps the existing trigger, so an element
    /// that already revealed stays revealed.
    pub fn observe(&mut self, id: ElementId, options: RevealOptions) {
        self.elements.entry(id).or_insert_with(|| {
            debug!(element = id.0, threshold = options.threshold, "Observing element");
            Observed {
                trigger: RevealTrigger::observe(options),
                rect: None,
            }
        });
    }

    /// Subscribe to `id`'s reveal; returns `false` for unknown elements
    pub fn subscribe<F>(&mut self, id: ElementId, listener: F) -> bool
    where
        F: FnMut(&RevealEvent) + 'static,
    {
        match self.elements.get_mut(&id) {
            Some(observed) => {
                observed.trigger.subscribe(listener);
                true
            }
            None => false,
        }
    }

    /// Native visibility report for `id`; `true` if this call revealed it
    pub fn notify(&mut self, id: ElementId, ratio: f64) -> bool {
        self.elements
            .get_mut(&id)
            .map(|observed| observed.trigger.notify(ratio))
            .unwrap_or(false)
    }

    /// Document-space bounds used by [`ViewportObserver::on_viewport`]
    pub fn set_geometry(&mut self, id: ElementId, rect: Rect) {
        if let Some(observed) = self.elements.get_mut(&id) {
            observed.rect = rect.is_measured().then_some(rect);
        }
    }

    /// Derive visibility for every pending element from `visible` (the
    /// viewport in document space). Returns the elements revealed by this call.
    pub fn on_viewport(&mut self, visible: &Rect) -> Vec<ElementId> {
        let mut revealed = Vec::new();
        for (id, observed) in self.elements.iter_mut() {
            if !observed.trigger.is_pending() {
                continue;
            }
            let Some(rect) = observed.rect else {
                continue;
            };
            let ratio = intersection_ratio(&rect, visible, observed.trigger.options().margin_px);
            if observed.trigger.notify(ratio) {
                revealed.push(*id);
            }
        }
        revealed
    }

    /// Stop observing `id` (element unmounted). Idempotent.
    pub fn disconnect(&mut self, id: ElementId) {
        if let Some(mut observed) = self.elements.remove(&id) {
            observed.trigger.disconnect();
            debug!(element = id.0, "Element observer disconnected");
        }
    }

    pub fn is_triggered(&self, id: ElementId) -> bool {
        self.elements
            .get(&id)
            .map(|observed| observed.trigger.is_triggered())
            .unwrap_or(false)
    }

    /// Elements still waiting for their reveal
    pub fn active_count(&self) -> usize {
        self.elements
            .values()
            .filter(|observed| observed.trigger.is_pending())
            .count()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
