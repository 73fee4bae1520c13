use std::thread;

use finger_paint::{Argb, DrawingSurface, SharedSurface, TouchEvent};

#[test]
fn test_input_and_render_on_separate_threads() {
    let shared = SharedSurface::new(DrawingSurface::with_size(100, 100).unwrap());

    let input = shared.clone();
    let writer = thread::spawn(move || {
        for row in 0..5u32 {
            let y = 10.0 + row as f32 * 20.0;
            input.handle_events([
                TouchEvent::down(row, 5.0, y),
                TouchEvent::moved(row, 45.0, y),
                TouchEvent::moved(row, 85.0, y),
                TouchEvent::up(row, 85.0, y),
            ]);
        }
    });

    for _ in 0..20 {
        let frame = shared.render();
        assert_eq!((frame.width(), frame.height()), (100, 100));
    }
    writer.join().unwrap();

    let snapshot = shared.snapshot();
    for row in 0..5u32 {
        assert_eq!(snapshot.pixel(30, 10 + row * 20), Some(Argb::BLACK));
    }
    assert_eq!(shared.with(|surface| surface.tracker().active_count()), 0);
}
