//! Load orchestration and delivery reconciliation.
//!
//! The load coordinator sits between the page store and the data source.
//! It issues fetch and cancel intents, and reconciles completions - which
//! may arrive synchronously, asynchronously, out of order, duplicated, or
//! after the page has left the window - against the store.
//!
//! Both completion paths funnel through [`LoadCoordinator::apply_delivery`],
//! whose two discard rules make reconciliation idempotent and
//! order-tolerant:
//!
//! 1. No page state for the index (evicted since the request): the delivery
//!    is stale and silently dropped.
//! 2. Delivered quality does not improve on the stored tier: the image is
//!    dropped, but unknown dimensions are still merged - geometry may
//!    arrive ahead of pixels at the same tier and must not be lost.
//!
//! There is no timeout or retry. A source that never delivers leaves the
//! page at its best-known quality indefinitely.

use tracing::trace;

use crate::page::{Dimensions, PageStore, PhotoQuality};
use crate::zoom::{ZoomBounds, ZoomPlanner};

use super::source::{PhotoFetch, PhotoSource};

// =============================================================================
// Delivery
// =============================================================================

/// One image completion to reconcile against the store.
#[derive(Debug, Clone)]
pub struct Delivery<I> {
    /// The page index the completion refers to.
    pub index: usize,

    /// The delivered image, if the completion carries pixels.
    pub image: Option<I>,

    /// Quality tier of the delivered image.
    pub quality: PhotoQuality,

    /// Original photo dimensions, when the completion carries geometry.
    pub original_dimensions: Option<Dimensions>,
}

/// What a reconciled delivery changed, for the facade to notify about.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryUpdate {
    /// The page index the delivery referred to.
    pub index: usize,

    /// The new quality tier, when the stored image was replaced.
    pub upgraded: Option<PhotoQuality>,

    /// Freshly computed zoom bounds, when geometry became known.
    pub bounds: Option<ZoomBounds>,
}

// =============================================================================
// Load Coordinator
// =============================================================================

/// Orchestrates fetches against the data source and reconciles completions
/// into the page store.
#[derive(Debug)]
pub struct LoadCoordinator<S: PhotoSource> {
    source: S,
}

impl<S: PhotoSource> LoadCoordinator<S> {
    /// Create a coordinator over the given source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the underlying data source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Album length as reported by the source.
    pub fn photo_count(&self) -> Option<usize> {
        self.source.photo_count()
    }

    /// Issue a load request for `index`.
    ///
    /// A second request for an index that is already loading is a no-op,
    /// so at most one request per index is ever outstanding. The source's
    /// synchronous answer is reconciled through the same path as an
    /// asynchronous completion.
    pub fn request(
        &mut self,
        index: usize,
        store: &mut PageStore<S::Image>,
        planner: &ZoomPlanner,
    ) -> Option<DeliveryUpdate> {
        let page = store.get_or_create(index);
        if page.is_loading() {
            trace!(index, "request ignored: load already outstanding");
            return None;
        }
        page.set_loading(true);

        let PhotoFetch {
            image,
            quality,
            is_loading,
            original_dimensions,
        } = self.source.fetch_photo(index);

        let update = if image.is_some() || original_dimensions.is_some() {
            self.apply_delivery(
                Delivery {
                    index,
                    image,
                    quality,
                    original_dimensions,
                },
                store,
                planner,
            )
        } else {
            None
        };

        // The source reports nothing outstanding; don't wait for a
        // completion that was never started.
        if !is_loading {
            if let Some(page) = store.get_mut(index) {
                page.set_loading(false);
            }
        }
        update
    }

    /// Advisory cancellation for `index`.
    ///
    /// Forwards to the source's optional stop-loading hook and clears the
    /// loading flag optimistically, so a future re-entry into the window
    /// re-requests. Stored quality is untouched.
    pub fn cancel(&mut self, index: usize, store: &mut PageStore<S::Image>) {
        trace!(index, "cancelling outstanding load");
        self.source.stop_loading(index);
        if let Some(page) = store.get_mut(index) {
            page.set_loading(false);
        }
    }

    /// Reconcile one completion against the store.
    ///
    /// Returns what changed, or `None` when the delivery was stale or
    /// carried nothing new. Equal-tier deliveries with different dimensions
    /// merge geometry only when it was unknown; already-known dimensions
    /// are never overwritten.
    pub fn apply_delivery(
        &mut self,
        delivery: Delivery<S::Image>,
        store: &mut PageStore<S::Image>,
        planner: &ZoomPlanner,
    ) -> Option<DeliveryUpdate> {
        let Delivery {
            index,
            image,
            quality,
            original_dimensions,
        } = delivery;

        let Some(page) = store.get_mut(index) else {
            trace!(index, ?quality, "discarding stale delivery for evicted page");
            return None;
        };

        let mut upgraded = None;
        if quality > page.quality() {
            if let Some(image) = image {
                page.store_image(image, quality);
                upgraded = Some(quality);
            }
        } else if image.is_some() {
            trace!(
                index,
                delivered = ?quality,
                stored = ?page.quality(),
                "discarding delivery that does not improve stored quality"
            );
        }

        let dimensions_merged = page.merge_dimensions(original_dimensions);

        let bounds = match page.original_dimensions() {
            Some(dims) if dimensions_merged || page.zoom_bounds().is_none() => {
                let bounds = planner.compute_bounds(dims);
                page.set_zoom_bounds(bounds);
                Some(bounds)
            }
            _ => None,
        };

        if upgraded.is_none() && bounds.is_none() {
            return None;
        }
        Some(DeliveryUpdate {
            index,
            upgraded,
            bounds,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
