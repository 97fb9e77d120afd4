//! Zoom bound derivation from image geometry.
//!
//! Given a photo's original pixel dimensions and the viewport size, this
//! module computes the minimum and maximum permitted display scales:
//!
//! - An oversized photo may shrink until it fits the viewport entirely, and
//!   zoom back up to true pixel scale (1.0).
//! - A photo smaller than the viewport starts at pixel scale, unless
//!   zooming above original size is enabled, in which case it is scaled up
//!   to fill the viewport.
//! - When minimum and maximum coincide the page is effectively pinned to a
//!   single scale.
//!
//! Zoom bounds are only ever derived from original-quality geometry. The
//! coordinator never feeds thumbnail dimensions into this computation.

use crate::page::Dimensions;

// =============================================================================
// Zoom Bounds
// =============================================================================

/// The minimum and maximum permitted scale factors for displaying a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    /// Smallest permitted scale (photo fully visible).
    pub min_scale: f64,

    /// Largest permitted scale.
    pub max_scale: f64,
}

impl ZoomBounds {
    /// Bounds pinned to a single scale.
    pub fn fixed(scale: f64) -> Self {
        Self {
            min_scale: scale,
            max_scale: scale,
        }
    }

    /// Whether the page is pinned to a single scale (no zoom range).
    pub fn is_fixed(&self) -> bool {
        self.min_scale == self.max_scale
    }
}

// =============================================================================
// Zoom Planner
// =============================================================================

/// Computes zoom bounds for pages from their original image geometry.
#[derive(Debug, Clone, Copy)]
pub struct ZoomPlanner {
    viewport: Dimensions,
    above_original_enabled: bool,
}

impl ZoomPlanner {
    /// Create a planner for the given viewport.
    pub fn new(viewport: Dimensions, above_original_enabled: bool) -> Self {
        Self {
            viewport,
            above_original_enabled,
        }
    }

    /// The viewport this planner computes against.
    pub fn viewport(&self) -> Dimensions {
        self.viewport
    }

    /// Compute zoom bounds for a photo with the given original dimensions.
    ///
    /// The fit scale is the largest scale at which the photo is entirely
    /// visible, preserving aspect ratio. Rules:
    ///
    /// - Photo overflows the viewport in some axis (fit scale <= 1.0):
    ///   `min = fit`, `max = 1.0`. A panorama wider than the viewport but
    ///   shorter than it still counts as overflowing and stays zoomable to
    ///   true pixel scale.
    /// - Photo strictly smaller than the viewport (fit scale > 1.0) with
    ///   zooming above original size enabled: `min = max = fit` - the photo
    ///   fills the viewport but has no further zoom range.
    /// - Photo strictly smaller, upscaling disabled: `min = max = 1.0`.
    ///
    /// Degenerate geometry (zero-sized photo or viewport) pins the page to
    /// scale 1.0.
    pub fn compute_bounds(&self, dimensions: Dimensions) -> ZoomBounds {
        if dimensions.is_empty() || self.viewport.is_empty() {
            return ZoomBounds::fixed(1.0);
        }

        let x_scale = f64::from(self.viewport.width) / f64::from(dimensions.width);
        let y_scale = f64::from(self.viewport.height) / f64::from(dimensions.height);
        let fit = x_scale.min(y_scale);

        if fit <= 1.0 {
            ZoomBounds {
                min_scale: fit,
                max_scale: 1.0,
            }
        } else if self.above_original_enabled {
            ZoomBounds::fixed(fit)
        } else {
            ZoomBounds::fixed(1.0)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
