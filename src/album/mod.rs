//! Album coordination layer.
//!
//! This module composes the paging core behind the [`AlbumCoordinator`]
//! facade and defines the two boundary seams it talks across:
//!
//! ```text
//! ┌──────────────────┐   current index    ┌─────────────────────────────┐
//! │ Paging container │ ─────────────────▶ │      AlbumCoordinator       │
//! └──────────────────┘                    │  ┌───────────┐ ┌─────────┐  │
//! ┌──────────────────┐  fetch / cancel    │  │ PageStore │ │Prefetch │  │
//! │   PhotoSource    │ ◀───────────────── │  └───────────┘ │Scheduler│  │
//! │  (data source)   │ ─────────────────▶ │  ┌───────────┐ └─────────┘  │
//! └──────────────────┘  notify_did_load   │  │  Load     │ ┌─────────┐  │
//! ┌──────────────────┐   notifications    │  │Coordinator│ │  Zoom   │  │
//! │  AlbumDelegate   │ ◀───────────────── │  └───────────┘ │ Planner │  │
//! │ (render surface) │                    │                └─────────┘  │
//! └──────────────────┘                    └─────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`PhotoSource`]: the consumed data-source seam (sync best-effort fetch,
//!   optional advisory cancellation)
//! - [`AlbumDelegate`]: the exposed notification seam, all methods optional
//! - [`LoadCoordinator`]: request dedup and idempotent delivery reconciliation
//! - [`AlbumCoordinator`]: the facade reacting to index changes and deliveries

mod coordinator;
mod delegate;
mod loader;
mod source;

pub use coordinator::{AlbumCoordinator, ZoomState};
pub use delegate::AlbumDelegate;
pub use loader::{Delivery, DeliveryUpdate, LoadCoordinator};
pub use source::{PhotoFetch, PhotoSource, QueuedPhotoSource};
