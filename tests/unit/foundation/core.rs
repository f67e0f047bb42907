use super::*;

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0).is_err());
    assert_eq!(Fps::new(30).unwrap().get(), 30);
}

#[test]
fn fps_frame_time_is_index_over_rate() {
    let fps = Fps::new(10).unwrap();
    assert_eq!(fps.frame_time_secs(FrameIndex(0)), 0.0);
    assert!((fps.frame_time_secs(FrameIndex(49)) - 4.9).abs() < 1e-12);
    assert!((fps.frame_duration_secs() - 0.1).abs() < 1e-12);
}

#[test]
fn canvas_center_uses_integer_halves() {
    let c = Canvas::new(801, 600).unwrap();
    assert_eq!(c.center(), Point::new(400.0, 300.0));
    assert_eq!(c.pixel_count(), 801 * 600);
}

#[test]
fn canvas_rejects_degenerate_and_oversized_edges() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(Canvas::MAX_EDGE + 1, 10).is_err());
}
