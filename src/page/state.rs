//! Per-page state: quality tier, loading flag, geometry and zoom bounds.

use crate::zoom::ZoomBounds;

// =============================================================================
// Photo Quality
// =============================================================================

/// Ordered classification of how much fidelity an image delivery represents.
///
/// The total order `None < Thumbnail < Original` drives the upgrade rule:
/// a delivery carrying a lower-or-equal tier than the stored one never
/// replaces the stored image, which makes out-of-order and duplicate
/// asynchronous completions harmless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhotoQuality {
    /// Nothing delivered yet; the page shows the loading placeholder.
    #[default]
    None,

    /// A reduced-size preview; not a trustworthy basis for zoom bounds.
    Thumbnail,

    /// The full-fidelity image. Terminal tier: no further upgrade expected.
    Original,
}

impl PhotoQuality {
    /// Whether this is the terminal tier.
    pub fn is_original(self) -> bool {
        self == PhotoQuality::Original
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// A pixel size, used for both photo geometry and the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create a new size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either axis is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// =============================================================================
// Page State
// =============================================================================

/// The per-index record tracked while a page is inside the active window.
///
/// Quality is monotonically non-decreasing for the lifetime of the record;
/// it resets to [`PhotoQuality::None`] only by the record being evicted and
/// later recreated. Dropping the record releases its image handle, which is
/// the coordinator's entire ownership obligation towards the data source.
#[derive(Debug, Clone)]
pub struct PageState<I> {
    index: usize,
    quality: PhotoQuality,
    is_loading: bool,
    image: Option<I>,
    original_dimensions: Option<Dimensions>,
    zoom_bounds: Option<ZoomBounds>,
}

impl<I> PageState<I> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            quality: PhotoQuality::None,
            is_loading: false,
            image: None,
            original_dimensions: None,
            zoom_bounds: None,
        }
    }

    /// The page index this state belongs to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Best quality delivered so far.
    pub fn quality(&self) -> PhotoQuality {
        self.quality
    }

    /// Whether a request is outstanding and no terminal quality has arrived.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The best image delivered so far, if any.
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    /// The photo's original pixel dimensions, once known.
    ///
    /// Dimensions may arrive ahead of the pixels themselves.
    pub fn original_dimensions(&self) -> Option<Dimensions> {
        self.original_dimensions
    }

    /// Derived zoom bounds, present once the original geometry is known.
    pub fn zoom_bounds(&self) -> Option<ZoomBounds> {
        self.zoom_bounds
    }

    /// Whether zoom is permitted for this page.
    ///
    /// True only when the stored quality is [`PhotoQuality::Original`] and
    /// the global zooming flag is set.
    pub fn zoom_enabled(&self, zooming_enabled: bool) -> bool {
        zooming_enabled && self.quality.is_original()
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Store a higher-quality image. The caller (the load coordinator)
    /// enforces that `quality` strictly improves on the stored tier.
    pub(crate) fn store_image(&mut self, image: I, quality: PhotoQuality) {
        debug_assert!(quality > self.quality);
        self.image = Some(image);
        self.quality = quality;
        if quality.is_original() {
            self.is_loading = false;
        }
    }

    /// Record the original dimensions if not yet known.
    ///
    /// Returns true when the dimensions were newly recorded.
    pub(crate) fn merge_dimensions(&mut self, dimensions: Option<Dimensions>) -> bool {
        match (self.original_dimensions, dimensions) {
            (None, Some(dims)) => {
                self.original_dimensions = Some(dims);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_zoom_bounds(&mut self, bounds: ZoomBounds) {
        self.zoom_bounds = Some(bounds);
    }
}

// =============================================================================
// Tests
// =============================================================================
