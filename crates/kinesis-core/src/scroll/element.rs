//! Per-element scroll progress
//!
//! Progress runs from 0 when the element's `entry` point meets the viewport
//! to 1 when its `exit` point does. Only elements currently observed (near or
//! inside the viewport) are recomputed on scroll, so the cost per scroll event
//! is bounded by the number of visible animated elements.

use std::collections::HashMap;

use serde::Serialize;
use tracing::trace;

use crate::geometry::{Rect, Viewport};

/// Stable handle for an element known to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub u64);

/// A point on the element meeting a point on the viewport, both expressed
/// as fractions of their heights (0 = top edge, 1 = bottom edge)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub element: f64,
    pub viewport: f64,
}

impl Intersection {
    /// Element top meets viewport bottom
    pub const START_END: Self = Self::new(0.0, 1.0);
    /// Element bottom meets viewport top
    pub const END_START: Self = Self::new(1.0, 0.0);
    pub const START_START: Self = Self::new(0.0, 0.0);
    pub const END_END: Self = Self::new(1.0, 1.0);

    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Document scroll offset at which the two points coincide
    fn scroll_offset(&self, rect: &Rect, viewport_height: f64) -> f64 {
        rect.y + self.element * rect.height - self.viewport * viewport_height
    }
}

/// Where tracking starts and ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOffsets {
    pub entry: Intersection,
    pub exit: Intersection,
}

impl Default for ScrollOffsets {
    /// From first pixel entering at the bottom to last pixel leaving at the top
    fn default() -> Self {
        Self {
            entry: Intersection::START_END,
            exit: Intersection::END_START,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ElementProgress {
    pub entry_offset: f64,
    pub exit_offset: f64,
    pub progress: f64,
}

/// Progress of one element for a given document scroll offset
///
/// Returns `None` while geometry is unmeasured.
pub fn element_progress(
    rect: &Rect,
    viewport: &Viewport,
    offsets: &ScrollOffsets,
    scroll_offset: f64,
) -> Option<ElementProgress> {
    if !rect.is_measured() || !viewport.is_measured() || !scroll_offset.is_finite() {
        return None;
    }
    let entry_offset = offsets.entry.scroll_offset(rect, viewport.height);
    let exit_offset = offsets.exit.scroll_offset(rect, viewport.height);
    let span = exit_offset - entry_offset;
    let progress = if span.abs() < f64::EPSILON {
        if scroll_offset >= exit_offset {
            1.0
        } else {
            0.0
        }
    } else {
        ((scroll_offset - entry_offset) / span).clamp(0.0, 1.0)
    };
    Some(ElementProgress {
        entry_offset,
        exit_offset,
        progress,
    })
}

#[derive(Debug, Clone)]
struct TrackedElement {
    rect: Option<Rect>,
    offsets: ScrollOffsets,
    observed: bool,
    progress: Option<ElementProgress>,
}

/// Registry of elements whose scroll progress drives a transform
#[derive(Debug, Clone, Default)]
pub struct ElementTracker {
    elements: HashMap<ElementId, TrackedElement>,
    viewport: Viewport,
    scroll_offset: f64,
}

impl ElementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `id`; geometry arrives later through `set_geometry`
    pub fn track(&mut self, id: ElementId, offsets: ScrollOffsets) {
        self.elements.insert(
            id,
            TrackedElement {
                rect: None,
                offsets,
                observed: false,
                progress: None,
            },
        );
    }

    /// Forget `id`. Unknown ids are ignored.
    pub fn untrack(&mut self, id: ElementId) {
        self.elements.remove(&id);
    }

    /// Measured bounding box in document space
    pub fn set_geometry(&mut self, id: ElementId, rect: Rect) {
        let viewport = self.viewport;
        let scroll_offset = self.scroll_offset;
        if let Some(element) = self.elements.get_mut(&id) {
            element.rect = rect.is_measured().then_some(rect);
            if element.observed {
                Self::recompute(element, &viewport, scroll_offset);
            }
        }
    }

    /// Toggle whether `id` is near the viewport and worth recomputing
    pub fn set_observed(&mut self, id: ElementId, observed: bool) {
        let viewport = self.viewport;
        let scroll_offset = self.scroll_offset;
        if let Some(element) = self.elements.get_mut(&id) {
            element.observed = observed;
            if observed {
                Self::recompute(element, &viewport, scroll_offset);
            }
        }
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.refresh();
    }

    /// Scroll sample; returns how many elements were recomputed
    pub fn on_scroll(&mut self, scroll_offset: f64) -> usize {
        if !scroll_offset.is_finite() {
            return 0;
        }
        self.scroll_offset = scroll_offset;
        self.refresh()
    }

    fn refresh(&mut self) -> usize {
        let viewport = self.viewport;
        let scroll_offset = self.scroll_offset;
        let mut recomputed = 0;
        for element in self.elements.values_mut().filter(|e| e.observed) {
            Self::recompute(element, &viewport, scroll_offset);
            recomputed += 1;
        }
        trace!(recomputed, "Element progress refreshed");
        recomputed
    }

    fn recompute(element: &mut TrackedElement, viewport: &Viewport, scroll_offset: f64) {
        element.progress = element
            .rect
            .and_then(|rect| element_progress(&rect, viewport, &element.offsets, scroll_offset));
    }

    /// Last computed progress for `id`, or `None` when not ready
    pub fn progress(&self, id: ElementId) -> Option<ElementProgress> {
        self.elements.get(&id).and_then(|e| e.progress)
    }

    pub fn observed_count(&self) -> usize {
        self.elements.values().filter(|e| e.observed).count()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(1000.0, 800.0);

    #[test]
    fn test_default_offsets_span() {
        let rect = Rect::new(0.0, 2000.0, 500.0, 400.0);
        let at = |scroll| element_progress(&rect, &VIEWPORT, &ScrollOffsets::default(), scroll).unwrap();

        let entering = at(1200.0);
        assert_eq!(entering.entry_offset, 1200.0);
        assert_eq!(entering.exit_offset, 2400.0);
        assert_eq!(entering.progress, 0.0);
        assert_eq!(at(1800.0).progress, 0.5);
        assert_eq!(at(2400.0).progress, 1.0);
        assert_eq!(at(9000.0).progress, 1.0);
        assert_eq!(at(0.0).progress, 0.0);
    }

    #[test]
    fn test_custom_offsets() {
        let rect = Rect::new(0.0, 1000.0, 500.0, 200.0);
        let offsets = ScrollOffsets {
            entry: Intersection::START_END,
            exit: Intersection::START_START,
        };
        let progress = element_progress(&rect, &VIEWPORT, &offsets, 600.0).unwrap();
        assert_eq!(progress.entry_offset, 200.0);
        assert_eq!(progress.exit_offset, 1000.0);
        assert_eq!(progress.progress, 0.5);
    }

    #[test]
    fn test_zero_span_is_step() {
        let rect = Rect::new(0.0, 800.0, 10.0, 0.0);
        let offsets = ScrollOffsets {
            entry: Intersection::START_START,
            exit: Intersection::END_START,
        };
        assert_eq!(element_progress(&rect, &VIEWPORT, &offsets, 799.0).unwrap().progress, 0.0);
        assert_eq!(element_progress(&rect, &VIEWPORT, &offsets, 800.0).unwrap().progress, 1.0);
    }

    #[test]
    fn test_unmeasured_is_not_ready() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(element_progress(&rect, &Viewport::default(), &ScrollOffsets::default(), 0.0).is_none());
        let mut tracker = ElementTracker::new();
        tracker.on_resize(VIEWPORT);
        tracker.track(ElementId(1), ScrollOffsets::default());
        tracker.set_observed(ElementId(1), true);
        assert!(tracker.progress(ElementId(1)).is_none());
        tracker.set_geometry(ElementId(1), Rect::new(0.0, 0.0, f64::NAN, 10.0));
        assert!(tracker.progress(ElementId(1)).is_none());
    }

    #[test]
    fn test_only_observed_elements_recompute() {
        let mut tracker = ElementTracker::new();
        tracker.on_resize(VIEWPORT);
        for i in 0..50 {
            let id = ElementId(i);
            tracker.track(id, ScrollOffsets::default());
            tracker.set_geometry(id, Rect::new(0.0, i as f64 * 500.0, 100.0, 400.0));
        }
        tracker.set_observed(ElementId(3), true);
        tracker.set_observed(ElementId(4), true);

        assert_eq!(tracker.on_scroll(1500.0), 2);
        assert_eq!(tracker.observed_count(), 2);
        assert!(tracker.progress(ElementId(3)).is_some());
        assert!(tracker.progress(ElementId(40)).is_none());

        // Leaving observation freezes the last value
        let frozen = tracker.progress(ElementId(3));
        tracker.set_observed(ElementId(3), false);
        tracker.on_scroll(1900.0);
        assert_eq!(tracker.progress(ElementId(3)), frozen);
    }

    #[test]
    fn test_untrack_unknown_is_noop() {
        let mut tracker = ElementTracker::new();
        tracker.untrack(ElementId(9));
        tracker.set_geometry(ElementId(9), Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(tracker.is_empty());
    }
}
