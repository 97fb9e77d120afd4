//! End-to-end runs of the tokio driver: staged quality upgrades reported
//! through the handle, and stale completions after the window moves on.

use std::sync::OnceLock;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc::{self, UnboundedSender};

use album_pager::{
    AlbumConfig, AlbumDelegate, AlbumDriver, AlbumHandle, AsyncPhotoFetcher, Dimensions,
    PhotoDelivery, PhotoQuality,
};

use super::test_utils::{image, init_tracing};

/// Delegate relaying page-ready notifications to the test task so it can
/// await them instead of sleeping.
struct RelayDelegate {
    tx: UnboundedSender<(usize, PhotoQuality)>,
}

impl AlbumDelegate for RelayDelegate {
    fn on_page_ready(&mut self, index: usize, quality: PhotoQuality) {
        let _ = self.tx.send((index, quality));
    }
}

/// Fetcher that reports a thumbnail through the handle before returning the
/// original from the fetch itself.
struct StagedFetcher {
    handle: OnceLock<AlbumHandle<Bytes>>,
}

#[async_trait]
impl AsyncPhotoFetcher for StagedFetcher {
    type Image = Bytes;

    fn photo_count(&self) -> Option<usize> {
        Some(10)
    }

    async fn fetch_photo(&self, index: usize) -> Option<PhotoDelivery<Bytes>> {
        if let Some(handle) = self.handle.get() {
            handle.photo_loaded(image("thumb"), index, PhotoQuality::Thumbnail);
        }
        Some(PhotoDelivery {
            image: image("full"),
            quality: PhotoQuality::Original,
            original_dimensions: Some(Dimensions::new(1200, 800)),
        })
    }
}

#[tokio::test]
async fn test_staged_deliveries_upgrade_through_the_event_loop() {
    init_tracing();
    let (ready_tx, mut ready_rx) = mpsc::unbounded_channel();
    let fetcher = StagedFetcher {
        handle: OnceLock::new(),
    };
    let (driver, handle) = AlbumDriver::new(
        fetcher,
        AlbumConfig {
            prefetch_radius: 0,
            ..AlbumConfig::default()
        },
        RelayDelegate { tx: ready_tx },
    )
    .unwrap();
    driver
        .fetcher()
        .handle
        .set(handle.clone())
        .expect("handle installed once");
    let driver_task = tokio::spawn(driver.run());

    handle.viewport_changed(Dimensions::new(300, 300));
    handle.current_index_changed(5);

    // Thumbnail lands first, then the original.
    assert_eq!(ready_rx.recv().await, Some((5, PhotoQuality::Thumbnail)));
    assert_eq!(ready_rx.recv().await, Some((5, PhotoQuality::Original)));

    handle.shutdown();
    let coordinator = driver_task.await.unwrap();

    let page = coordinator.page(5).unwrap();
    assert_eq!(page.quality(), PhotoQuality::Original);
    assert!(!page.is_loading());
    assert_eq!(coordinator.display_image(5), Some(&image("full")));
    let bounds = coordinator.zoom_state(5).unwrap().bounds.unwrap();
    assert_eq!(bounds.min_scale, 0.25);
    assert_eq!(bounds.max_scale, 1.0);
}

#[tokio::test]
async fn test_completion_for_abandoned_page_is_discarded() {
    init_tracing();
    let (ready_tx, mut ready_rx) = mpsc::unbounded_channel();
    let fetcher = StagedFetcher {
        handle: OnceLock::new(),
    };
    let (driver, handle) = AlbumDriver::new(
        fetcher,
        AlbumConfig {
            prefetch_radius: 0,
            ..AlbumConfig::default()
        },
        RelayDelegate { tx: ready_tx },
    )
    .unwrap();
    let driver_task = tokio::spawn(driver.run());

    handle.current_index_changed(2);
    assert_eq!(ready_rx.recv().await, Some((2, PhotoQuality::Original)));

    // Move away, then replay a completion for the evicted page as a task
    // racing its own abort would.
    handle.current_index_changed(7);
    handle.photo_loaded(image("late"), 2, PhotoQuality::Original);
    assert_eq!(ready_rx.recv().await, Some((7, PhotoQuality::Original)));

    handle.shutdown();
    let coordinator = driver_task.await.unwrap();

    assert!(coordinator.page(2).is_none(), "stale completion dropped");
    assert_eq!(coordinator.current_index(), Some(7));
}

#[tokio::test]
async fn test_events_after_shutdown_are_dropped() {
    init_tracing();
    let (ready_tx, mut ready_rx) = mpsc::unbounded_channel();
    let fetcher = StagedFetcher {
        handle: OnceLock::new(),
    };
    let (driver, handle) =
        AlbumDriver::new(fetcher, AlbumConfig::default(), RelayDelegate { tx: ready_tx }).unwrap();
    let driver_task = tokio::spawn(driver.run());

    handle.shutdown();
    let coordinator = driver_task.await.unwrap();
    assert!(coordinator.store().is_empty());

    // The loop is gone; this must not panic, and nothing arrives.
    handle.current_index_changed(3);
    assert!(ready_rx.try_recv().is_err());
}
