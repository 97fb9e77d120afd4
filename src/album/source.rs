//! The data-source seam consumed by the coordinator.
//!
//! The coordinator acquires every piece of album information through
//! [`PhotoSource`]. Implementations should answer [`PhotoSource::fetch_photo`]
//! as fast as possible with the best image already at hand (or nothing),
//! spin off their own asynchronous work for anything better, and report
//! completions through `AlbumCoordinator::notify_did_load` - any time, any
//! order, possibly after the page has left the window.
//!
//! Caching policy is entirely the source's concern; the coordinator holds
//! at most one image handle per page inside the active window and drops it
//! on eviction.

use crate::page::{Dimensions, PhotoQuality};

// =============================================================================
// Photo Fetch
// =============================================================================

/// The synchronous best-effort answer to a fetch.
#[derive(Debug, Clone)]
pub struct PhotoFetch<I> {
    /// The best image immediately available, if any.
    pub image: Option<I>,

    /// The quality tier of `image` (`None` when no image is returned).
    pub quality: PhotoQuality,

    /// Whether the source has started (or already had) asynchronous work
    /// that will deliver a better image later.
    pub is_loading: bool,

    /// The photo's original pixel dimensions, when already known.
    ///
    /// Sources that know geometry ahead of pixels (e.g. from an index file)
    /// should supply it here so zoom bounds can be derived early.
    pub original_dimensions: Option<Dimensions>,
}

impl<I> PhotoFetch<I> {
    /// Nothing available yet; an asynchronous load is underway.
    pub fn loading() -> Self {
        Self {
            image: None,
            quality: PhotoQuality::None,
            is_loading: true,
            original_dimensions: None,
        }
    }

    /// An image available right now at the given quality.
    ///
    /// The fetch is still marked loading unless the quality is terminal.
    pub fn ready(image: I, quality: PhotoQuality) -> Self {
        Self {
            image: Some(image),
            quality,
            is_loading: !quality.is_original(),
            original_dimensions: None,
        }
    }

    /// Attach known original dimensions.
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.original_dimensions = Some(dimensions);
        self
    }
}

// =============================================================================
// Photo Source Trait
// =============================================================================

/// Supplier of album photos.
///
/// The associated `Image` type is an opaque handle the coordinator stores
/// and hands back to the rendering surface; it is never inspected.
///
/// `stop_loading` is an optional capability: the default implementation is
/// a no-op for sources that cannot abandon in-flight work. Cancellation is
/// advisory either way - the coordinator stops depending on the result, it
/// does not guarantee the work stops.
pub trait PhotoSource {
    /// Opaque image handle delivered to pages.
    type Image: Clone;

    /// Number of photos in the album, when known.
    ///
    /// May be `None` for albums whose length is discovered lazily; the
    /// active window is then unclamped above.
    fn photo_count(&self) -> Option<usize>;

    /// Best-effort immediate fetch for the photo at `index`.
    ///
    /// Must not block on disk or network; kick off asynchronous work and
    /// return [`PhotoFetch::loading`] instead.
    fn fetch_photo(&mut self, index: usize) -> PhotoFetch<Self::Image>;

    /// Advisory request to abandon asynchronous work for `index`.
    fn stop_loading(&mut self, _index: usize) {}
}

// =============================================================================
// Queued Photo Source
// =============================================================================

/// A [`PhotoSource`] that records fetch and cancel intents instead of doing
/// any work.
///
/// Useful for hosts that drive loading themselves: call the coordinator,
/// then drain [`QueuedPhotoSource::take_requested`] and
/// [`QueuedPhotoSource::take_cancelled`] and act on them. The crate's
/// [`AlbumDriver`](crate::driver::AlbumDriver) uses this to bridge the
/// synchronous seam onto spawned asynchronous fetch tasks.
#[derive(Debug)]
pub struct QueuedPhotoSource<I> {
    photo_count: Option<usize>,
    requested: Vec<usize>,
    cancelled: Vec<usize>,
    _marker: std::marker::PhantomData<fn() -> I>,
}

impl<I> QueuedPhotoSource<I> {
    /// Create a queued source for an album of known (or unknown) length.
    pub fn new(photo_count: Option<usize>) -> Self {
        Self {
            photo_count,
            requested: Vec::new(),
            cancelled: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Update the album length once discovered.
    pub fn set_photo_count(&mut self, photo_count: Option<usize>) {
        self.photo_count = photo_count;
    }

    /// Drain the indices fetched since the last call, in dispatch order.
    pub fn take_requested(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.requested)
    }

    /// Drain the indices cancelled since the last call.
    pub fn take_cancelled(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.cancelled)
    }
}

impl<I: Clone> PhotoSource for QueuedPhotoSource<I> {
    type Image = I;

    fn photo_count(&self) -> Option<usize> {
        self.photo_count
    }

    fn fetch_photo(&mut self, index: usize) -> PhotoFetch<Self::Image> {
        self.requested.push(index);
        PhotoFetch::loading()
    }

    fn stop_loading(&mut self, index: usize) {
        self.cancelled.push(index);
    }
}

// =============================================================================
// Tests
// =============================================================================
