//! Bounded store of per-page state.
//!
//! The store is a sparse mapping from page index to [`PageState`], bounded
//! to the active window (current index plus the prefetch radius on each
//! side). Indices leaving the window are fully reclaimed: nothing outside
//! the window retains image handles or geometry, which is what bounds the
//! coordinator's memory regardless of album length.
//!
//! Eviction is positional, not recency-based; the caller runs it exactly
//! once per current-index change, before issuing new requests, so the
//! evicted set doubles as the cancellation set.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use tracing::debug;

use super::state::PageState;

/// Sparse mapping from page index to page state, bounded to the active
/// window by [`PageStore::evict_outside`].
#[derive(Debug)]
pub struct PageStore<I> {
    pages: HashMap<usize, PageState<I>>,
}

impl<I> PageStore<I> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    /// Get the state for an index, if it is inside the active window.
    pub fn get(&self, index: usize) -> Option<&PageState<I>> {
        self.pages.get(&index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut PageState<I>> {
        self.pages.get_mut(&index)
    }

    /// Get the state for an index, creating a fresh record (quality `None`,
    /// not loading) if absent.
    pub fn get_or_create(&mut self, index: usize) -> &mut PageState<I> {
        self.pages.entry(index).or_insert_with(|| PageState::new(index))
    }

    /// Whether an index is currently materialized.
    pub fn contains(&self, index: usize) -> bool {
        self.pages.contains_key(&index)
    }

    /// Drop every record outside `window` and return the evicted indices
    /// in ascending order.
    ///
    /// Dropping a record releases its image handle; there is no further
    /// cleanup obligation towards the data source.
    pub fn evict_outside(&mut self, window: RangeInclusive<usize>) -> Vec<usize> {
        let mut evicted: Vec<usize> = self
            .pages
            .keys()
            .copied()
            .filter(|index| !window.contains(index))
            .collect();
        evicted.sort_unstable();

        for index in &evicted {
            self.pages.remove(index);
        }

        if !evicted.is_empty() {
            debug!(?window, ?evicted, "evicted pages outside active window");
        }
        evicted
    }

    /// Number of materialized pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no pages are materialized.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over materialized indices in arbitrary order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages.keys().copied()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PageState<I>> {
        self.pages.values_mut()
    }
}

impl<I> Default for PageStore<I> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
