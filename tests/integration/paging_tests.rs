//! Window planning, eviction and cancellation across index changes.

use album_pager::{AlbumConfig, AlbumError, PhotoQuality};

use super::test_utils::{default_album, image, ScriptedSource};

#[test]
fn test_first_index_change_requests_window_in_dispatch_order() {
    let mut album = default_album(ScriptedSource::new(10));

    album.on_current_index_changed(5).unwrap();

    // Current page first, then neighbors by distance, ties ascending.
    assert_eq!(album.source().fetches(), &[5, 4, 6]);
    assert!(album.source().cancels().is_empty());
    assert_eq!(album.store().len(), 3);
}

#[test]
fn test_sliding_one_page_evicts_and_cancels_the_trailing_edge() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();
    album.source_mut().clear_tracking();

    album.on_current_index_changed(6).unwrap();

    // 4 left the window: cancelled. 5 and 6 are still loading: only the
    // fresh edge page is requested.
    assert_eq!(album.source().cancels(), &[4]);
    assert_eq!(album.source().fetches(), &[7]);
    assert!(!album.store().contains(4));
    assert_eq!(album.store().len(), 3);
}

#[test]
fn test_jumping_far_cancels_entire_previous_window() {
    let mut album = default_album(ScriptedSource::new(20));
    album.on_current_index_changed(2).unwrap();
    album.source_mut().clear_tracking();

    album.on_current_index_changed(15).unwrap();

    assert_eq!(album.source().cancels(), &[1, 2, 3]);
    assert_eq!(album.source().fetches(), &[15, 14, 16]);
    assert_eq!(album.store().len(), 3);
}

#[test]
fn test_repeated_index_change_is_quiet() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();
    album.source_mut().clear_tracking();

    // Same index again: everything is already loading, nothing to cancel.
    album.on_current_index_changed(5).unwrap();
    assert!(album.source().fetches().is_empty());
    assert!(album.source().cancels().is_empty());
}

#[test]
fn test_out_of_range_index_fails_fast_and_changes_nothing() {
    let mut album = default_album(ScriptedSource::new(3));
    album.on_current_index_changed(1).unwrap();

    let err = album.on_current_index_changed(3).unwrap_err();
    assert_eq!(err, AlbumError::PageOutOfRange { index: 3, count: 3 });
    assert_eq!(album.current_index(), Some(1));
    assert_eq!(album.store().len(), 3);
}

#[test]
fn test_zero_radius_loads_only_current_page() {
    let config = AlbumConfig {
        prefetch_radius: 0,
        ..AlbumConfig::default()
    };
    let mut album = super::test_utils::album_with(ScriptedSource::new(10), config);

    album.on_current_index_changed(5).unwrap();
    assert_eq!(album.source().fetches(), &[5]);
    assert_eq!(album.store().len(), 1);

    album.source_mut().clear_tracking();
    album.on_current_index_changed(6).unwrap();
    assert_eq!(album.source().cancels(), &[5]);
    assert_eq!(album.source().fetches(), &[6]);
}

#[test]
fn test_window_clamped_at_album_edges() {
    let mut album = default_album(ScriptedSource::new(10));

    album.on_current_index_changed(0).unwrap();
    assert_eq!(album.source().fetches(), &[0, 1]);

    album.source_mut().clear_tracking();
    album.on_current_index_changed(9).unwrap();
    assert_eq!(album.source().fetches(), &[9, 8]);
}

#[test]
fn test_unknown_album_length_accepts_any_index() {
    let mut album = default_album(ScriptedSource::unbounded());

    album.on_current_index_changed(1_000_000).unwrap();
    assert_eq!(album.source().fetches(), &[1_000_000, 999_999, 1_000_001]);
}

#[test]
fn test_evicted_page_reloads_from_scratch_on_reentry() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(4).unwrap();
    album.notify_did_load(image("full-4"), 4, PhotoQuality::Original);

    // Leave and come back.
    album.on_current_index_changed(8).unwrap();
    assert!(!album.store().contains(4));

    album.source_mut().clear_tracking();
    album.on_current_index_changed(4).unwrap();
    assert!(album.source().fetches().contains(&4), "re-requested fresh");
    assert_eq!(album.page(4).unwrap().quality(), PhotoQuality::None);
}

#[test]
fn test_loaded_page_not_rerequested_when_window_slides_over_it() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();
    album.notify_did_load(image("full-6"), 6, PhotoQuality::Original);
    album.source_mut().clear_tracking();

    album.on_current_index_changed(6).unwrap();

    // 6 already holds the original; only the fresh neighbor is fetched.
    assert_eq!(album.source().fetches(), &[7]);
}
