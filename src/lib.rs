//! # Album Pager
//!
//! Paging, prefetch and image-delivery coordination for virtualized photo
//! album viewers.
//!
//! This library is the logic core of a pinch-to-zoom photo viewer: it
//! decides which page indices are materialized, what quality of image is
//! requested and shown for each, how asynchronous load completions are
//! reconciled against possibly-stale state, and what zoom range a page's
//! geometry permits. It performs no I/O, no decoding and no rendering -
//! those live behind the [`PhotoSource`] and [`AlbumDelegate`] seams.
//!
//! ## Design
//!
//! - **Bounded memory**: per-page state exists only inside the active
//!   window (current index plus a prefetch radius); leaving the window
//!   reclaims it entirely.
//! - **Monotone quality**: per page, image quality only moves forward
//!   through `None < Thumbnail < Original`, which makes out-of-order,
//!   duplicate and stale completions harmless.
//! - **Advisory cancellation**: cancel tells the data source the result is
//!   no longer depended upon; nothing guarantees in-flight work stops.
//! - **No timeouts**: a source that never delivers leaves its page at the
//!   best-known quality indefinitely.
//!
//! ## Modules
//!
//! - [`page`] - quality tiers, per-page state, the bounded page store
//! - [`prefetch`] - active-window planning and request ordering
//! - [`album`] - data source / delegate seams, load reconciliation, facade
//! - [`zoom`] - zoom bound derivation from image geometry
//! - [`driver`] - tokio event loop serializing events onto one owning task
//! - [`config`] - recognized options and validation
//! - [`error`] - the (deliberately small) error taxonomy
//!
//! ## Example
//!
//! ```
//! use album_pager::{
//!     AlbumConfig, AlbumCoordinator, Dimensions, PhotoFetch, PhotoQuality, PhotoSource,
//! };
//!
//! // A data source serving thumbnails instantly and originals later.
//! struct ThumbnailFirst;
//!
//! impl PhotoSource for ThumbnailFirst {
//!     type Image = &'static str;
//!
//!     fn photo_count(&self) -> Option<usize> {
//!         Some(10)
//!     }
//!
//!     fn fetch_photo(&mut self, _index: usize) -> PhotoFetch<&'static str> {
//!         PhotoFetch::ready("thumbnail", PhotoQuality::Thumbnail)
//!     }
//! }
//!
//! let mut album = AlbumCoordinator::new(ThumbnailFirst, AlbumConfig::default()).unwrap();
//! album.set_viewport(Dimensions::new(300, 300));
//! album.on_current_index_changed(5).unwrap();
//!
//! // The thumbnail is showing; the original arrives whenever it arrives.
//! assert_eq!(album.display_image(5), Some(&"thumbnail"));
//! album.notify_did_load_with_dimensions(
//!     "original",
//!     5,
//!     PhotoQuality::Original,
//!     Dimensions::new(1200, 800),
//! );
//! assert!(album.zoom_state(5).unwrap().zoom_enabled);
//! ```

pub mod album;
pub mod config;
pub mod driver;
pub mod error;
pub mod page;
pub mod prefetch;
pub mod zoom;

// Re-export commonly used types
pub use album::{
    AlbumCoordinator, AlbumDelegate, Delivery, DeliveryUpdate, LoadCoordinator, PhotoFetch,
    PhotoSource, QueuedPhotoSource, ZoomState,
};
pub use config::{AlbumConfig, DEFAULT_PREFETCH_RADIUS, MAX_PREFETCH_RADIUS};
pub use driver::{AlbumDriver, AlbumEvent, AlbumHandle, AsyncPhotoFetcher, PhotoDelivery};
pub use error::AlbumError;
pub use page::{Dimensions, PageState, PageStore, PhotoQuality};
pub use prefetch::{PrefetchPlan, PrefetchScheduler};
pub use zoom::{ZoomBounds, ZoomPlanner};
