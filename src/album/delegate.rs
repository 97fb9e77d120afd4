//! The delegate seam notified by the coordinator.

use crate::page::PhotoQuality;
use crate::zoom::ZoomBounds;

/// Receiver of coordinator notifications, typically the rendering surface
/// or the chrome around it.
///
/// Every method has a default no-op body: implementors opt into exactly the
/// notifications they care about, and absent capabilities cost nothing.
pub trait AlbumDelegate {
    /// A photo at `index` reached a new (strictly better) quality tier and
    /// the page should redraw if visible.
    fn on_page_ready(&mut self, _index: usize, _quality: PhotoQuality) {}

    /// Zoom bounds for `index` were (re)computed, because its original
    /// geometry became known or the viewport changed.
    fn on_zoom_bounds_changed(&mut self, _index: usize, _bounds: ZoomBounds) {}

    /// The user double-tapped to zoom in or out on `index`.
    fn on_zoom_toggled(&mut self, _index: usize, _did_zoom_in: bool) {}

    /// The page immediately after the current one has something displayable.
    fn on_next_photo_ready(&mut self) {}

    /// The page immediately before the current one has something displayable.
    fn on_previous_photo_ready(&mut self) {}
}

/// The do-nothing delegate for hosts that poll state instead.
impl AlbumDelegate for () {}
