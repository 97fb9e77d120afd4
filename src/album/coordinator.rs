//! The album coordinator facade.
//!
//! Composes the page store, prefetch scheduler, load coordinator and zoom
//! planner behind a single type driven by two external event streams:
//!
//! - the paging container reports current-index changes, and
//! - the data source reports image completions via
//!   [`AlbumCoordinator::notify_did_load`].
//!
//! All state lives on the caller's single logical thread; nothing here
//! blocks or locks. Collaborators doing work elsewhere must route their
//! completions back onto that thread (see [`crate::driver`] for a
//! channel-based way to do so).

use tracing::debug;

use crate::config::AlbumConfig;
use crate::error::AlbumError;
use crate::page::{Dimensions, PageState, PageStore, PhotoQuality};
use crate::prefetch::PrefetchScheduler;
use crate::zoom::{ZoomBounds, ZoomPlanner};

use super::delegate::AlbumDelegate;
use super::loader::{Delivery, DeliveryUpdate, LoadCoordinator};
use super::source::PhotoSource;

// =============================================================================
// Zoom State
// =============================================================================

/// Snapshot of a page's zoom fields for the rendering surface to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    /// Current quality tier of the page.
    pub quality: PhotoQuality,

    /// Derived zoom bounds, once original geometry is known.
    pub bounds: Option<ZoomBounds>,

    /// Whether zoom gestures should be honored for this page.
    pub zoom_enabled: bool,
}

// =============================================================================
// Album Coordinator
// =============================================================================

/// Top-level facade for the paging/prefetch/image-delivery core.
///
/// # Example
///
/// ```
/// use album_pager::{AlbumConfig, AlbumCoordinator, Dimensions, PhotoFetch, PhotoQuality, PhotoSource};
///
/// struct Memory(Vec<&'static str>);
///
/// impl PhotoSource for Memory {
///     type Image = &'static str;
///
///     fn photo_count(&self) -> Option<usize> {
///         Some(self.0.len())
///     }
///
///     fn fetch_photo(&mut self, index: usize) -> PhotoFetch<&'static str> {
///         PhotoFetch::ready(self.0[index], PhotoQuality::Original)
///     }
/// }
///
/// let source = Memory(vec!["a", "b", "c"]);
/// let mut album =
///     AlbumCoordinator::new(source, AlbumConfig::default()).unwrap();
/// album.set_viewport(Dimensions::new(300, 300));
/// album.on_current_index_changed(1).unwrap();
///
/// assert_eq!(album.display_image(1), Some(&"b"));
/// ```
pub struct AlbumCoordinator<S: PhotoSource, D: AlbumDelegate = ()> {
    config: AlbumConfig,
    loader: LoadCoordinator<S>,
    store: PageStore<S::Image>,
    scheduler: PrefetchScheduler,
    delegate: D,
    viewport: Dimensions,
    current_index: Option<usize>,
    loading_placeholder: Option<S::Image>,
}

impl<S: PhotoSource> AlbumCoordinator<S, ()> {
    /// Create a coordinator with no delegate.
    ///
    /// # Errors
    ///
    /// Returns [`AlbumError::InvalidConfig`] if the configuration fails
    /// validation.
    pub fn new(source: S, config: AlbumConfig) -> Result<Self, AlbumError> {
        Self::with_delegate(source, config, ())
    }
}

impl<S: PhotoSource, D: AlbumDelegate> AlbumCoordinator<S, D> {
    /// Create a coordinator notifying the given delegate.
    ///
    /// # Errors
    ///
    /// Returns [`AlbumError::InvalidConfig`] if the configuration fails
    /// validation.
    pub fn with_delegate(source: S, config: AlbumConfig, delegate: D) -> Result<Self, AlbumError> {
        config.validate()?;
        let scheduler = PrefetchScheduler::new(config.prefetch_radius);
        Ok(Self {
            config,
            loader: LoadCoordinator::new(source),
            store: PageStore::new(),
            scheduler,
            delegate,
            viewport: Dimensions::default(),
            current_index: None,
            loading_placeholder: None,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The underlying data source.
    pub fn source(&self) -> &S {
        self.loader.source()
    }

    /// Mutable access to the underlying data source.
    pub fn source_mut(&mut self) -> &mut S {
        self.loader.source_mut()
    }

    /// The delegate receiving notifications.
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Mutable access to the delegate.
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// The page store (materialized pages inside the active window).
    pub fn store(&self) -> &PageStore<S::Image> {
        &self.store
    }

    /// The current page index, once the container reported one.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Album length as reported by the source.
    pub fn photo_count(&self) -> Option<usize> {
        self.loader.photo_count()
    }

    /// The active configuration.
    pub fn config(&self) -> &AlbumConfig {
        &self.config
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Set the image shown for pages with no delivery yet.
    ///
    /// Zooming is always disabled while a page shows the placeholder,
    /// regardless of the zooming flags.
    pub fn set_loading_placeholder(&mut self, placeholder: Option<S::Image>) {
        self.loading_placeholder = placeholder;
    }

    /// Globally enable or disable zoom.
    pub fn set_zooming_enabled(&mut self, enabled: bool) {
        self.config.zooming_enabled = enabled;
    }

    /// Allow or disallow scaling photos above their original size, and
    /// re-derive bounds for every page with known geometry.
    pub fn set_zooming_above_original_enabled(&mut self, enabled: bool) {
        if self.config.zooming_above_original_enabled != enabled {
            self.config.zooming_above_original_enabled = enabled;
            self.recompute_all_bounds();
        }
    }

    /// Report the rendering surface's size, re-deriving zoom bounds for
    /// every page with known geometry.
    pub fn set_viewport(&mut self, viewport: Dimensions) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.recompute_all_bounds();
        }
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// React to the paging container reporting a new current index.
    ///
    /// Runs eviction, plans the new window, then issues cancellations for
    /// pages that left the window followed by requests in dispatch order
    /// (current page first, neighbors by increasing distance).
    ///
    /// # Errors
    ///
    /// Returns [`AlbumError::PageOutOfRange`] when the index is outside
    /// `[0, N-1]` of a known album length. This is a contract violation by
    /// the container and leaves the coordinator's state untouched.
    pub fn on_current_index_changed(&mut self, new_index: usize) -> Result<(), AlbumError> {
        if let Some(count) = self.photo_count() {
            if new_index >= count {
                return Err(AlbumError::PageOutOfRange {
                    index: new_index,
                    count,
                });
            }
        }
        debug!(new_index, "current page changed");
        self.current_index = Some(new_index);

        let plan = self
            .scheduler
            .plan_for(new_index, self.photo_count(), &mut self.store);

        for index in plan.to_cancel {
            self.loader.cancel(index, &mut self.store);
        }

        let planner = self.zoom_planner();
        let mut updates = Vec::new();
        for index in plan.to_request {
            if let Some(update) = self.loader.request(index, &mut self.store, &planner) {
                updates.push(update);
            }
        }
        for update in updates {
            self.dispatch(update);
        }
        Ok(())
    }

    // =========================================================================
    // Deliveries
    // =========================================================================

    /// Report a loaded photo.
    ///
    /// This is the single entry point the data source uses for
    /// asynchronous completions. It may be called at any time, in any
    /// order, with duplicates, and after the page has left the window;
    /// deliveries that cannot improve the page are silently dropped. Err
    /// on the side of calling it too much rather than too little.
    pub fn notify_did_load(&mut self, image: S::Image, index: usize, quality: PhotoQuality) {
        self.apply(Delivery {
            index,
            image: Some(image),
            quality,
            original_dimensions: None,
        });
    }

    /// Like [`notify_did_load`](Self::notify_did_load), additionally
    /// carrying the photo's original dimensions.
    ///
    /// Dimensions are merged even when the image itself is discarded as a
    /// non-upgrade, as long as no geometry was known before.
    pub fn notify_did_load_with_dimensions(
        &mut self,
        image: S::Image,
        index: usize,
        quality: PhotoQuality,
        original_dimensions: Dimensions,
    ) {
        self.apply(Delivery {
            index,
            image: Some(image),
            quality,
            original_dimensions: Some(original_dimensions),
        });
    }

    fn apply(&mut self, delivery: Delivery<S::Image>) {
        let planner = self.zoom_planner();
        if let Some(update) = self
            .loader
            .apply_delivery(delivery, &mut self.store, &planner)
        {
            self.dispatch(update);
        }
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    /// Current zoom fields for a page, if it is materialized.
    pub fn zoom_state(&self, index: usize) -> Option<ZoomState> {
        let page = self.store.get(index)?;
        Some(ZoomState {
            quality: page.quality(),
            bounds: page.zoom_bounds(),
            zoom_enabled: page.zoom_enabled(self.config.zooming_enabled),
        })
    }

    /// The image the rendering surface should draw for a page: the best
    /// delivered image, or the configured loading placeholder when nothing
    /// has been delivered yet.
    pub fn display_image(&self, index: usize) -> Option<&S::Image> {
        let page = self.store.get(index)?;
        page.image().or(self.loading_placeholder.as_ref())
    }

    /// Report a double-tap zoom on a page.
    ///
    /// Forwarded to the delegate only when zoom is currently enabled for
    /// that page.
    pub fn notify_did_zoom(&mut self, index: usize, did_zoom_in: bool) {
        let enabled = self
            .store
            .get(index)
            .is_some_and(|page| page.zoom_enabled(self.config.zooming_enabled));
        if enabled {
            self.delegate.on_zoom_toggled(index, did_zoom_in);
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn zoom_planner(&self) -> ZoomPlanner {
        ZoomPlanner::new(self.viewport, self.config.zooming_above_original_enabled)
    }

    fn recompute_all_bounds(&mut self) {
        let planner = self.zoom_planner();
        let mut changed = Vec::new();
        for page in self.store.iter_mut() {
            if let Some(dims) = page.original_dimensions() {
                let bounds = planner.compute_bounds(dims);
                if page.zoom_bounds() != Some(bounds) {
                    page.set_zoom_bounds(bounds);
                    changed.push((page.index(), bounds));
                }
            }
        }
        for (index, bounds) in changed {
            self.delegate.on_zoom_bounds_changed(index, bounds);
        }
    }

    fn dispatch(&mut self, update: DeliveryUpdate) {
        if let Some(quality) = update.upgraded {
            self.delegate.on_page_ready(update.index, quality);
            if let Some(current) = self.current_index {
                if update.index == current + 1 {
                    self.delegate.on_next_photo_ready();
                } else if current > 0 && update.index == current - 1 {
                    self.delegate.on_previous_photo_ready();
                }
            }
        }
        if let Some(bounds) = update.bounds {
            self.delegate.on_zoom_bounds_changed(update.index, bounds);
        }
    }
}

/// A [`PageState`] view for external callers that want more than
/// [`ZoomState`].
impl<S: PhotoSource, D: AlbumDelegate> AlbumCoordinator<S, D> {
    /// The full page record for an index, if materialized.
    pub fn page(&self, index: usize) -> Option<&PageState<S::Image>> {
        self.store.get(index)
    }
}
