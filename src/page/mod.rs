//! Page state and the bounded page store.
//!
//! A page is one unit of the album, addressed by integer index. This module
//! holds the state tracked per materialized page and the store that bounds
//! how many pages are materialized at once.
//!
//! # Components
//!
//! - [`PhotoQuality`]: ordered fidelity tier (`None < Thumbnail < Original`)
//! - [`Dimensions`]: pixel size for photos and the viewport
//! - [`PageState`]: per-index record (quality, loading flag, geometry, zoom bounds)
//! - [`PageStore`]: sparse index-to-state map, bounded to the active window

mod state;
mod store;

pub use state::{Dimensions, PageState, PhotoQuality};
pub use store::PageStore;
