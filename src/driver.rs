//! Channel-driven event loop around the coordinator.
//!
//! The core requires all state to be owned and mutated on one logical
//! thread, while data sources may work anywhere as long as completions are
//! routed back onto that thread. This module provides that routing: a
//! single task owns the [`AlbumCoordinator`] and drains an mpsc channel of
//! [`AlbumEvent`]s, so paging events from the UI and completions from
//! spawned fetch tasks are serialized by construction.
//!
//! ```text
//! UI / container ──┐
//!                  ├──▶ AlbumHandle ──▶ mpsc ──▶ AlbumDriver::run ──▶ AlbumCoordinator
//! fetch tasks ─────┘                                    │
//!        ▲                                              │ spawn / abort
//!        └──────────────────────────────────────────────┘
//! ```
//!
//! Fetch work is described by [`AsyncPhotoFetcher`]; the driver spawns one
//! task per requested index and aborts it on cancellation. Cancellation is
//! advisory: a completion already queued when the abort lands is still
//! delivered, and the coordinator's staleness check discards it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info, trace};

use crate::album::{AlbumCoordinator, AlbumDelegate, QueuedPhotoSource};
use crate::config::AlbumConfig;
use crate::error::AlbumError;
use crate::page::{Dimensions, PhotoQuality};

// =============================================================================
// Async Photo Fetcher
// =============================================================================

/// One completed asynchronous fetch.
#[derive(Debug, Clone)]
pub struct PhotoDelivery<I> {
    /// The fetched image.
    pub image: I,

    /// Quality tier of the fetched image.
    pub quality: PhotoQuality,

    /// Original photo dimensions, when known.
    pub original_dimensions: Option<Dimensions>,
}

/// Asynchronous photo acquisition, driven by the [`AlbumDriver`].
///
/// One call produces at most one delivery. A fetcher that produces
/// intermediate results (a thumbnail ahead of the original) can hold a
/// clone of the [`AlbumHandle`] and report extras through
/// [`AlbumHandle::photo_loaded`]; out-of-order and duplicate reports are
/// harmless by the coordinator's upgrade rule.
#[async_trait]
pub trait AsyncPhotoFetcher: Send + Sync + 'static {
    /// Opaque image handle delivered to pages.
    type Image: Clone + Send + 'static;

    /// Number of photos in the album, when known.
    fn photo_count(&self) -> Option<usize>;

    /// Fetch the best available image for `index`.
    ///
    /// Returning `None` means the fetch produced nothing; the page keeps
    /// its best-known quality (there is no failure channel).
    async fn fetch_photo(&self, index: usize) -> Option<PhotoDelivery<Self::Image>>;
}

// =============================================================================
// Events and Handle
// =============================================================================

/// Events serialized onto the coordinator's owning task.
#[derive(Debug)]
pub enum AlbumEvent<I> {
    /// The paging container settled on a new current page.
    CurrentIndexChanged(usize),

    /// A photo finished loading somewhere.
    PhotoLoaded {
        index: usize,
        image: I,
        quality: PhotoQuality,
        original_dimensions: Option<Dimensions>,
    },

    /// The rendering surface was resized.
    ViewportChanged(Dimensions),

    /// The user double-tapped to zoom in or out.
    ZoomToggled { index: usize, did_zoom_in: bool },

    /// Stop the driver loop.
    Shutdown,
}

/// Cheap, cloneable sender for feeding events to a running [`AlbumDriver`].
///
/// All methods are fire-and-forget; events sent after the driver has shut
/// down are dropped.
#[derive(Debug)]
pub struct AlbumHandle<I> {
    tx: UnboundedSender<AlbumEvent<I>>,
}

impl<I> Clone for AlbumHandle<I> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<I> AlbumHandle<I> {
    /// Report a current-index change from the paging container.
    pub fn current_index_changed(&self, index: usize) {
        self.send(AlbumEvent::CurrentIndexChanged(index));
    }

    /// Report a loaded photo.
    pub fn photo_loaded(&self, image: I, index: usize, quality: PhotoQuality) {
        self.send(AlbumEvent::PhotoLoaded {
            index,
            image,
            quality,
            original_dimensions: None,
        });
    }

    /// Report a loaded photo together with its original dimensions.
    pub fn photo_loaded_with_dimensions(
        &self,
        image: I,
        index: usize,
        quality: PhotoQuality,
        original_dimensions: Dimensions,
    ) {
        self.send(AlbumEvent::PhotoLoaded {
            index,
            image,
            quality,
            original_dimensions: Some(original_dimensions),
        });
    }

    /// Report a viewport resize.
    pub fn viewport_changed(&self, viewport: Dimensions) {
        self.send(AlbumEvent::ViewportChanged(viewport));
    }

    /// Report a double-tap zoom gesture.
    pub fn zoom_toggled(&self, index: usize, did_zoom_in: bool) {
        self.send(AlbumEvent::ZoomToggled { index, did_zoom_in });
    }

    /// Ask the driver to stop after the events sent so far.
    pub fn shutdown(&self) {
        self.send(AlbumEvent::Shutdown);
    }

    fn send(&self, event: AlbumEvent<I>) {
        // A closed channel means the driver is gone; nothing to do.
        let _ = self.tx.send(event);
    }
}

// =============================================================================
// Album Driver
// =============================================================================

/// Owns an [`AlbumCoordinator`] and drives it from an event channel.
pub struct AlbumDriver<F: AsyncPhotoFetcher, D: AlbumDelegate> {
    coordinator: AlbumCoordinator<QueuedPhotoSource<F::Image>, D>,
    fetcher: Arc<F>,
    rx: UnboundedReceiver<AlbumEvent<F::Image>>,
    tx: UnboundedSender<AlbumEvent<F::Image>>,
    tasks: HashMap<usize, JoinHandle<()>>,
}

impl<F: AsyncPhotoFetcher, D: AlbumDelegate> AlbumDriver<F, D> {
    /// Create a driver and the handle used to feed it.
    ///
    /// # Errors
    ///
    /// Returns [`AlbumError::InvalidConfig`] if the configuration fails
    /// validation.
    pub fn new(
        fetcher: F,
        config: AlbumConfig,
        delegate: D,
    ) -> Result<(Self, AlbumHandle<F::Image>), AlbumError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = QueuedPhotoSource::new(fetcher.photo_count());
        let coordinator = AlbumCoordinator::with_delegate(source, config, delegate)?;
        let driver = Self {
            coordinator,
            fetcher: Arc::new(fetcher),
            rx,
            tx: tx.clone(),
            tasks: HashMap::new(),
        };
        Ok((driver, AlbumHandle { tx }))
    }

    /// The owned coordinator, for inspection before the loop starts.
    pub fn coordinator(&self) -> &AlbumCoordinator<QueuedPhotoSource<F::Image>, D> {
        &self.coordinator
    }

    /// The fetcher, for wiring it up before the loop starts (handing it a
    /// handle clone, for instance).
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run until [`AlbumEvent::Shutdown`] or all handles are dropped.
    ///
    /// Returns the coordinator so final state remains inspectable. Fetch
    /// tasks still in flight are aborted on the way out.
    pub async fn run(mut self) -> AlbumCoordinator<QueuedPhotoSource<F::Image>, D> {
        info!("album driver started");
        while let Some(event) = self.rx.recv().await {
            match event {
                AlbumEvent::CurrentIndexChanged(index) => {
                    if let Err(e) = self.coordinator.on_current_index_changed(index) {
                        // Contract violation by the paging container; reject
                        // the event, keep serving the previous window.
                        error!(index, error = %e, "rejected current-index change");
                    }
                }
                AlbumEvent::PhotoLoaded {
                    index,
                    image,
                    quality,
                    original_dimensions,
                } => {
                    self.tasks.remove(&index);
                    match original_dimensions {
                        Some(dims) => self
                            .coordinator
                            .notify_did_load_with_dimensions(image, index, quality, dims),
                        None => self.coordinator.notify_did_load(image, index, quality),
                    }
                }
                AlbumEvent::ViewportChanged(viewport) => {
                    self.coordinator.set_viewport(viewport);
                }
                AlbumEvent::ZoomToggled { index, did_zoom_in } => {
                    self.coordinator.notify_did_zoom(index, did_zoom_in);
                }
                AlbumEvent::Shutdown => break,
            }
            self.pump_source_intents();
        }

        for (index, task) in self.tasks.drain() {
            trace!(index, "aborting in-flight fetch at shutdown");
            task.abort();
        }
        info!("album driver stopped");
        self.coordinator
    }

    /// Turn the fetch/cancel intents queued on the source into spawned
    /// fetch tasks and aborts.
    fn pump_source_intents(&mut self) {
        let cancelled = self.coordinator.source_mut().take_cancelled();
        for index in cancelled {
            if let Some(task) = self.tasks.remove(&index) {
                trace!(index, "aborting fetch task for evicted page");
                task.abort();
            }
        }

        let requested = self.coordinator.source_mut().take_requested();
        for index in requested {
            let fetcher = Arc::clone(&self.fetcher);
            let tx = self.tx.clone();
            let task = tokio::spawn(async move {
                if let Some(delivery) = fetcher.fetch_photo(index).await {
                    let _ = tx.send(AlbumEvent::PhotoLoaded {
                        index,
                        image: delivery.image,
                        quality: delivery.quality,
                        original_dimensions: delivery.original_dimensions,
                    });
                }
            });
            self.tasks.insert(index, task);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
