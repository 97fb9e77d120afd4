//! Configuration for the album coordinator.
//!
//! This module provides the recognized configuration options with sensible
//! defaults for all of them:
//!
//! - `prefetch_radius` - How many neighbors on each side of the current page
//!   to keep materialized and request ahead of time (default: 1)
//! - `zooming_enabled` - Global switch for pinch-to-zoom (default: true)
//! - `zooming_above_original_enabled` - Whether small photos may be scaled
//!   up until they fit the viewport (default: true)
//!
//! The loading placeholder image is configured separately on the coordinator
//! (`AlbumCoordinator::set_loading_placeholder`) because it carries the
//! album's image payload type.

use serde::{Deserialize, Serialize};

use crate::error::AlbumError;

// =============================================================================
// Default Values
// =============================================================================

/// Default prefetch radius (one neighbor on each side of the current page).
pub const DEFAULT_PREFETCH_RADIUS: usize = 1;

/// Upper bound on the prefetch radius.
///
/// The active window is the crate's memory bound; an absurdly large radius
/// defeats it, so validation rejects anything above this.
pub const MAX_PREFETCH_RADIUS: usize = 16;

// =============================================================================
// Album Configuration
// =============================================================================

/// Recognized configuration options for the album coordinator.
///
/// # Example
///
/// ```
/// use album_pager::AlbumConfig;
///
/// let config = AlbumConfig {
///     prefetch_radius: 2,
///     ..AlbumConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumConfig {
    /// Number of pages on each side of the current page to keep
    /// materialized and prefetch. Zero is legal: only the current page
    /// is ever loaded.
    pub prefetch_radius: usize,

    /// Whether zooming is enabled at all.
    ///
    /// Regardless of this flag, only pages showing an original-quality
    /// image are ever zoomable: a thumbnail's pixel dimensions are not a
    /// trustworthy basis for zoom bounds.
    pub zooming_enabled: bool,

    /// Whether photos smaller than the viewport may be scaled up until
    /// they fit it.
    pub zooming_above_original_enabled: bool,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        Self {
            prefetch_radius: DEFAULT_PREFETCH_RADIUS,
            zooming_enabled: true,
            zooming_above_original_enabled: true,
        }
    }
}

impl AlbumConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AlbumError::InvalidConfig`] if the prefetch radius exceeds
    /// [`MAX_PREFETCH_RADIUS`].
    pub fn validate(&self) -> Result<(), AlbumError> {
        if self.prefetch_radius > MAX_PREFETCH_RADIUS {
            return Err(AlbumError::InvalidConfig {
                reason: format!(
                    "prefetch_radius must be at most {MAX_PREFETCH_RADIUS}, got {}",
                    self.prefetch_radius
                ),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
