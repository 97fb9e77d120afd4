//! Zoom bound derivation and enablement rules through the facade.

use album_pager::{AlbumConfig, Dimensions, PhotoQuality, ZoomBounds};

use super::test_utils::{album_with, default_album, image, Notification, ScriptedSource};

#[test]
fn test_oversized_original_gets_fit_to_pixel_range() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();

    album.notify_did_load_with_dimensions(
        image("full"),
        5,
        PhotoQuality::Original,
        Dimensions::new(1200, 800),
    );

    let state = album.zoom_state(5).unwrap();
    let bounds = state.bounds.unwrap();
    assert_eq!(bounds.min_scale, 0.25);
    assert_eq!(bounds.max_scale, 1.0);
    assert!(state.zoom_enabled);
}

#[test]
fn test_small_image_pinned_to_fill_scale_when_upscaling_enabled() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();

    album.notify_did_load_with_dimensions(
        image("full"),
        5,
        PhotoQuality::Original,
        Dimensions::new(100, 100),
    );

    let bounds = album.zoom_state(5).unwrap().bounds.unwrap();
    assert_eq!(bounds, ZoomBounds::fixed(3.0));
    assert!(bounds.is_fixed(), "single scale: zoom effectively disabled");
}

#[test]
fn test_small_image_pinned_to_pixel_scale_when_upscaling_disabled() {
    let config = AlbumConfig {
        zooming_above_original_enabled: false,
        ..AlbumConfig::default()
    };
    let mut album = album_with(ScriptedSource::new(10), config);
    album.on_current_index_changed(5).unwrap();

    album.notify_did_load_with_dimensions(
        image("full"),
        5,
        PhotoQuality::Original,
        Dimensions::new(100, 100),
    );

    let bounds = album.zoom_state(5).unwrap().bounds.unwrap();
    assert_eq!(bounds, ZoomBounds::fixed(1.0));
}

#[test]
fn test_zoom_disabled_for_thumbnail_even_with_known_geometry() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();

    album.notify_did_load_with_dimensions(
        image("thumb"),
        5,
        PhotoQuality::Thumbnail,
        Dimensions::new(1200, 800),
    );

    let state = album.zoom_state(5).unwrap();
    assert_eq!(state.quality, PhotoQuality::Thumbnail);
    assert!(!state.zoom_enabled);

    // Bounds are ready, so the upgrade to original flips zoom on without
    // recomputation.
    album.notify_did_load(image("full"), 5, PhotoQuality::Original);
    assert!(album.zoom_state(5).unwrap().zoom_enabled);
}

#[test]
fn test_global_zoom_flag_gates_enablement() {
    let config = AlbumConfig {
        zooming_enabled: false,
        ..AlbumConfig::default()
    };
    let mut album = album_with(ScriptedSource::new(10), config);
    album.on_current_index_changed(5).unwrap();
    album.notify_did_load(image("full"), 5, PhotoQuality::Original);

    assert!(!album.zoom_state(5).unwrap().zoom_enabled);

    album.set_zooming_enabled(true);
    assert!(album.zoom_state(5).unwrap().zoom_enabled);
}

#[test]
fn test_viewport_change_recomputes_bounds_and_notifies() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();
    album.notify_did_load_with_dimensions(
        image("full"),
        5,
        PhotoQuality::Original,
        Dimensions::new(1200, 800),
    );

    // Rotate to a 600x300 viewport: fit scale becomes 300/800.
    album.set_viewport(Dimensions::new(600, 300));

    let bounds = album.zoom_state(5).unwrap().bounds.unwrap();
    assert_eq!(bounds.min_scale, 300.0 / 800.0);
    assert_eq!(bounds.max_scale, 1.0);

    let changes: Vec<_> = album
        .delegate()
        .notifications
        .iter()
        .filter(|n| matches!(n, Notification::ZoomBoundsChanged { index: 5, .. }))
        .collect();
    assert_eq!(changes.len(), 2, "initial derivation plus the rotation");
}

#[test]
fn test_toggling_upscaling_recomputes_bounds() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();
    album.notify_did_load_with_dimensions(
        image("full"),
        5,
        PhotoQuality::Original,
        Dimensions::new(100, 100),
    );
    assert_eq!(
        album.zoom_state(5).unwrap().bounds,
        Some(ZoomBounds::fixed(3.0))
    );

    album.set_zooming_above_original_enabled(false);
    assert_eq!(
        album.zoom_state(5).unwrap().bounds,
        Some(ZoomBounds::fixed(1.0))
    );
}

#[test]
fn test_double_tap_forwarded_only_when_zoomable() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();

    // Not zoomable yet: swallowed.
    album.notify_did_zoom(5, true);
    assert!(album
        .delegate()
        .notifications
        .iter()
        .all(|n| !matches!(n, Notification::ZoomToggled { .. })));

    album.notify_did_load(image("full"), 5, PhotoQuality::Original);
    album.notify_did_zoom(5, true);
    album.notify_did_zoom(5, false);

    let toggles: Vec<_> = album
        .delegate()
        .notifications
        .iter()
        .filter_map(|n| match n {
            Notification::ZoomToggled { index, did_zoom_in } => Some((*index, *did_zoom_in)),
            _ => None,
        })
        .collect();
    assert_eq!(toggles, vec![(5, true), (5, false)]);
}

#[test]
fn test_zoom_state_absent_for_unmaterialized_page() {
    let mut album = default_album(ScriptedSource::new(10));
    album.on_current_index_changed(5).unwrap();
    assert!(album.zoom_state(9).is_none());
}
