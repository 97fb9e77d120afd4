//! Prefetch planning for the active window.
//!
//! On every current-index change the scheduler computes the active window
//! `[current - radius, current + radius]` clamped to the album bounds,
//! evicts everything outside it, and decides which indices to request and
//! in what order.
//!
//! # Ordering policy
//!
//! The current page is always requested first, then its neighbors in
//! increasing distance, ties broken by ascending index. For current 5 and
//! radius 2 the dispatch order is `5, 4, 6, 3, 7`. This governs dispatch
//! order only; nothing blocks on an earlier request completing.

use std::ops::RangeInclusive;

use crate::page::PageStore;

// =============================================================================
// Prefetch Plan
// =============================================================================

/// The request and cancel sets produced for one current-index change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefetchPlan {
    /// Indices to request, in dispatch order (current page first).
    pub to_request: Vec<usize>,

    /// Indices that left the active window and whose outstanding loads
    /// should be cancelled, in ascending order.
    pub to_cancel: Vec<usize>,
}

// =============================================================================
// Prefetch Scheduler
// =============================================================================

/// Plans page requests and cancellations around the current index.
#[derive(Debug, Clone, Copy)]
pub struct PrefetchScheduler {
    radius: usize,
}

impl PrefetchScheduler {
    /// Create a scheduler with the given prefetch radius.
    ///
    /// A radius of zero is legal: only the current page is ever requested.
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    /// The configured prefetch radius.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The active window around `current`, clamped to `[0, N-1]`.
    ///
    /// An unknown album length (`photo_count == None`) clamps the window
    /// below only.
    pub fn window(
        &self,
        current: usize,
        photo_count: Option<usize>,
    ) -> RangeInclusive<usize> {
        let start = current.saturating_sub(self.radius);
        let end = match photo_count {
            Some(count) => current.saturating_add(self.radius).min(count.saturating_sub(1)),
            None => current.saturating_add(self.radius),
        };
        start..=end
    }

    /// Evict everything outside the window and plan requests for it.
    ///
    /// The cancel set is exactly the set of indices evicted by the store;
    /// eviction runs here, once, before any new request is issued, so a
    /// late delivery for a cancelled index finds no page state and is
    /// discarded.
    ///
    /// An index in the window is requested unless its page already holds
    /// original quality or has a request outstanding.
    pub fn plan_for<I>(
        &self,
        current: usize,
        photo_count: Option<usize>,
        store: &mut PageStore<I>,
    ) -> PrefetchPlan {
        let window = self.window(current, photo_count);
        let to_cancel = store.evict_outside(window.clone());

        let mut to_request = Vec::with_capacity(2 * self.radius + 1);
        for index in ordered_by_distance(current, &window) {
            debug_assert!(window.contains(&index));
            let needs_load = match store.get(index) {
                Some(page) => !page.quality().is_original() && !page.is_loading(),
                None => true,
            };
            if needs_load {
                to_request.push(index);
            }
        }

        PrefetchPlan {
            to_request,
            to_cancel,
        }
    }
}

/// Window indices ordered by distance from `current`, ties ascending.
fn ordered_by_distance(current: usize, window: &RangeInclusive<usize>) -> Vec<usize> {
    let (start, end) = (*window.start(), *window.end());
    if start > end {
        return Vec::new();
    }

    let mut ordered = Vec::with_capacity(end - start + 1);
    if window.contains(&current) {
        ordered.push(current);
    }

    let max_distance = end.saturating_sub(current).max(current.saturating_sub(start));
    for distance in 1..=max_distance {
        if let Some(below) = current.checked_sub(distance) {
            if below >= start {
                ordered.push(below);
            }
        }
        let above = current + distance;
        if above <= end {
            ordered.push(above);
        }
    }
    ordered
}

// =============================================================================
// Tests
// =============================================================================
