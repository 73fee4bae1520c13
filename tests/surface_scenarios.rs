use finger_paint::{
    Argb, Compositor, DrawingSurface, EngineConfig, LastPoint, StrokeStyle, StrokeTracker,
    SurfaceError, TouchEvent, TrailingSegment,
};
use egui::pos2;

fn surface() -> DrawingSurface {
    DrawingSurface::with_size(40, 40).unwrap()
}

#[test]
fn test_single_segment_scenario() {
    let mut surface = surface();

    surface.handle_event(TouchEvent::down(3, 10.0, 10.0));
    surface.handle_event(TouchEvent::moved(3, 25.0, 10.0));
    assert_eq!(surface.tracker().last_point(3), Some(LastPoint { x: 25, y: 10 }));
    assert_eq!(surface.tracker().stroke(3).unwrap().segment_count(), 1);

    // Within tolerance on both axes: dropped
    surface.handle_event(TouchEvent::moved(3, 26.0, 11.0));
    assert_eq!(surface.tracker().last_point(3), Some(LastPoint { x: 25, y: 10 }));

    let stroke = surface.tracker().stroke(3).unwrap();
    assert_eq!(stroke.point_count(), 2);
    let segment = stroke.contours()[0].segments()[0];
    assert_eq!(stroke.contours()[0].start(), pos2(10.0, 10.0));
    assert_eq!(segment.end, pos2(17.5, 10.0));

    surface.handle_event(TouchEvent::up(3, 26.0, 11.0));

    let raster = surface.raster_snapshot();
    assert_eq!(raster.pixel(14, 10), Some(Argb::BLACK));
    // The segment stops at x = 17.5; a 7px round cap reaches x = 21
    assert_eq!(raster.pixel(24, 10), Some(Argb::WHITE));
    assert_eq!(raster.pixel(26, 11), Some(Argb::WHITE));
    assert_eq!(raster.pixel(14, 30), Some(Argb::WHITE));
}

#[test]
fn test_extend_policy_reaches_last_sample() {
    let config = EngineConfig {
        trailing_segment: TrailingSegment::Extend,
        ..Default::default()
    };
    let mut surface = DrawingSurface::new(&config, 40, 40).unwrap();
    surface.handle_events([
        TouchEvent::down(3, 10.0, 10.0),
        TouchEvent::moved(3, 25.0, 10.0),
        TouchEvent::moved(3, 26.0, 11.0),
        TouchEvent::up(3, 26.0, 11.0),
    ]);
    assert_eq!(surface.raster_snapshot().pixel(24, 10), Some(Argb::BLACK));
}

#[test]
fn test_jitter_never_grows_stroke() {
    let mut surface = surface();
    surface.handle_event(TouchEvent::down(0, 20.0, 20.0));
    for (dx, dy) in [(9.0, 0.0), (0.0, -9.5), (-9.9, 9.9), (3.0, 3.0), (0.0, 0.0)] {
        surface.handle_event(TouchEvent::moved(0, 20.0 + dx, 20.0 + dy));
    }
    assert_eq!(surface.tracker().stroke(0).unwrap().point_count(), 1);
    assert_eq!(surface.tracker().last_point(0), Some(LastPoint { x: 20, y: 20 }));
}

#[test]
fn test_unknown_pointers_leave_state_unchanged() {
    let mut surface = surface();
    surface.handle_events([TouchEvent::down(0, 5.0, 5.0), TouchEvent::moved(0, 35.0, 5.0)]);
    let frame = surface.render();
    let raster = surface.raster_snapshot();

    surface.handle_events([
        TouchEvent::moved(9, 20.0, 20.0),
        TouchEvent::up(9, 20.0, 20.0),
        TouchEvent::moved(12, 1.0, 1.0),
    ]);

    assert_eq!(surface.render(), frame);
    assert_eq!(surface.raster_snapshot(), raster);
    assert!(!surface.tracker().contains(9));
    assert!(!surface.tracker().contains(12));
}

#[test]
fn test_clear_restores_background_after_any_commits() {
    let blank = surface().raster_snapshot();
    let patterns: [&[(f32, f32)]; 3] = [
        &[(5.0, 5.0), (35.0, 35.0)],
        &[(20.0, 2.0), (20.0, 38.0), (2.0, 20.0), (38.0, 20.0)],
        &[(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0), (0.0, 0.0)],
    ];

    let mut surface = surface();
    surface.set_color(Argb(0xC0FF_8800));
    for (id, points) in patterns.iter().enumerate() {
        let id = id as u32;
        let (x, y) = points[0];
        surface.handle_event(TouchEvent::down(id, x, y));
        for &(x, y) in &points[1..] {
            surface.handle_event(TouchEvent::moved(id, x, y));
        }
        surface.handle_event(TouchEvent::up(id, x, y));
    }
    assert_ne!(surface.raster_snapshot(), blank);

    surface.on_clear();
    assert_eq!(surface.raster_snapshot(), blank);
    assert_eq!(surface.render(), blank);
}

#[test]
fn test_double_commit_draws_twice() {
    let config = EngineConfig::default();
    let mut tracker = StrokeTracker::from_config(&config);
    tracker.begin(0, pos2(5.0, 20.0));
    tracker.extend(0, pos2(35.0, 20.0));
    tracker.extend(0, pos2(65.0, 20.0));
    let stroke = tracker.end(0).unwrap();

    let style = StrokeStyle {
        color: Argb(0x80FF_0000),
        ..Default::default()
    };
    let mut once = Compositor::new(&config, 40, 40).unwrap();
    once.commit(&stroke, &style);
    let mut twice = Compositor::new(&config, 40, 40).unwrap();
    twice.commit(&stroke, &style);
    twice.commit(&stroke, &style);

    let single = once.snapshot().pixel(20, 20).unwrap();
    let double = twice.snapshot().pixel(20, 20).unwrap();
    assert_ne!(single, double);
    assert!(double.green() < single.green());
    assert!(double.red() >= 250);
}

#[test]
fn test_second_release_does_not_commit_again() {
    let mut surface = surface();
    surface.set_color(Argb(0x80FF_0000));
    surface.handle_events([
        TouchEvent::down(0, 5.0, 20.0),
        TouchEvent::moved(0, 35.0, 20.0),
        TouchEvent::moved(0, 65.0, 20.0),
        TouchEvent::up(0, 65.0, 20.0),
    ]);
    let committed = surface.raster_snapshot();

    surface.handle_event(TouchEvent::up(0, 65.0, 20.0));
    assert_eq!(surface.raster_snapshot(), committed);
}

#[test]
fn test_invalid_resize_is_rejected() {
    let mut surface = surface();
    surface.handle_events([
        TouchEvent::down(0, 5.0, 5.0),
        TouchEvent::moved(0, 35.0, 35.0),
        TouchEvent::up(0, 35.0, 35.0),
    ]);
    let before = surface.raster_snapshot();

    let err = surface.on_surface_size_changed(-1, 100).unwrap_err();
    assert_eq!(err, SurfaceError::InvalidDimensions { width: -1, height: 100 });
    assert_eq!((surface.width(), surface.height()), (40, 40));
    assert_eq!(surface.raster_snapshot(), before);
}

#[test]
fn test_resize_discards_committed_content() {
    let mut surface = surface();
    surface.handle_events([
        TouchEvent::down(0, 5.0, 20.0),
        TouchEvent::moved(0, 35.0, 20.0),
        TouchEvent::up(0, 35.0, 20.0),
    ]);
    surface.on_surface_size_changed(50, 30).unwrap();

    let raster = surface.raster_snapshot();
    assert_eq!((raster.width(), raster.height()), (50, 30));
    assert_eq!(raster, DrawingSurface::with_size(50, 30).unwrap().raster_snapshot());
}

#[test]
fn test_style_change_applies_to_later_commits_only() {
    let mut surface = surface();
    surface.handle_events([
        TouchEvent::down(0, 5.0, 10.0),
        TouchEvent::moved(0, 35.0, 10.0),
        TouchEvent::up(0, 35.0, 10.0),
    ]);
    surface.set_color(Argb(0xFF00_00FF));
    surface.handle_events([
        TouchEvent::down(0, 5.0, 30.0),
        TouchEvent::moved(0, 35.0, 30.0),
        TouchEvent::up(0, 35.0, 30.0),
    ]);

    let raster = surface.raster_snapshot();
    assert_eq!(raster.pixel(12, 10), Some(Argb::BLACK));
    assert_eq!(raster.pixel(12, 30), Some(Argb(0xFF00_00FF)));
}

#[test]
fn test_eraser_paints_background_by_default() {
    let mut surface = surface();
    surface.handle_events([
        TouchEvent::down(0, 5.0, 20.0),
        TouchEvent::moved(0, 35.0, 20.0),
        TouchEvent::up(0, 35.0, 20.0),
    ]);
    surface.set_erasing(true);
    surface.set_line_width(14.0);
    surface.handle_events([
        TouchEvent::down(1, 5.0, 20.0),
        TouchEvent::moved(1, 35.0, 20.0),
        TouchEvent::up(1, 35.0, 20.0),
    ]);

    assert_eq!(surface.raster_snapshot().pixel(12, 20), Some(Argb::WHITE));
}

#[test]
fn test_oversized_resize_is_rejected() {
    let config = EngineConfig {
        max_raster_bytes: 40 * 40 * 4,
        ..Default::default()
    };
    let mut surface = DrawingSurface::new(&config, 40, 40).unwrap();
    surface.handle_events([
        TouchEvent::down(0, 5.0, 5.0),
        TouchEvent::moved(0, 35.0, 35.0),
        TouchEvent::up(0, 35.0, 35.0),
    ]);
    let before = surface.raster_snapshot();

    let err = surface.on_surface_size_changed(41, 40).unwrap_err();
    assert_eq!(
        err,
        SurfaceError::RasterTooLarge {
            width: 41,
            height: 40,
            bytes: 41 * 40 * 4,
            limit: 40 * 40 * 4,
        }
    );
    assert_eq!((surface.width(), surface.height()), (40, 40));
    assert_eq!(surface.raster_snapshot(), before);
}

#[test]
fn test_snapshot_pixel_outside_row_is_none() {
    let mut surface = surface();
    // Pixel (0, 1) is painted, so a wrapped read of (40, 0) would see it
    surface.handle_events([
        TouchEvent::down(0, 0.0, 1.0),
        TouchEvent::moved(0, 30.0, 1.0),
        TouchEvent::up(0, 30.0, 1.0),
    ]);
    let raster = surface.raster_snapshot();
    assert_ne!(raster.pixel(0, 1), Some(Argb::WHITE));

    assert_eq!(raster.pixel(40, 0), None);
    assert_eq!(raster.pixel(45, 10), None);
    assert_eq!(raster.pixel(0, 40), None);
    assert_eq!(raster.pixel(39, 39), Some(Argb::WHITE));
}
