use super::*;
use std::path::PathBuf;

const RED: [u8; 3] = [255, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

fn cfg() -> RenderConfig {
    RenderConfig {
        width: 200,
        height: 200,
        duration_secs: 10,
        fps: 10,
        font_size: 40,
        font_path: PathBuf::from("/nonexistent/countdown-test-font.ttf"),
        text_color: Rgb8::WHITE,
        arc_color: Rgb8::new(255, 0, 0),
        background_color: Rgb8::BLACK,
        style: Style::Arc,
        arc_radius: 90,
        arc_width: 20,
    }
}

#[test]
fn frame_state_end_to_end_reference() {
    let cfg = RenderConfig {
        width: 800,
        height: 600,
        duration_secs: 5,
        fps: 10,
        ..cfg()
    };
    let s = FrameState::at(&cfg, 49.0 / 10.0);
    assert_eq!(s.text, "00:00");
    assert_eq!(s.remaining_secs, 0);
    assert!((s.progress - 0.98).abs() < 1e-12);
    assert!((s.arc_end_deg - 262.8).abs() < 1e-9);
}

#[test]
fn frame_state_clamps_time() {
    let c = cfg();
    assert_eq!(FrameState::at(&c, -3.0).t, 0.0);
    assert_eq!(FrameState::at(&c, 99.0).t, 10.0);
    assert_eq!(FrameState::at(&c, f64::NAN).text, "00:10");
}

#[test]
fn arc_centerline_is_absent_at_start_and_inset_by_half_width() {
    let c = cfg();
    assert!(arc_centerline(c.canvas(), &c, 0.0).is_none());

    let full = arc_centerline(c.canvas(), &c, 1.0).unwrap();
    let bb = full.bounding_box();
    // Outer radius 90, stroke 20 => centerline radius 80 around (100, 100).
    assert!((bb.x0 - 20.0).abs() < 0.5);
    assert!((bb.x1 - 180.0).abs() < 0.5);
    assert!((bb.y0 - 20.0).abs() < 0.5);
    assert!((bb.y1 - 180.0).abs() < 0.5);
}

#[test]
fn half_way_arc_covers_the_right_side_only() {
    let frame = render_frame(&cfg(), 5.0).unwrap();
    assert_eq!(frame.pixel(180, 100), Some(RED));
    assert_eq!(frame.pixel(110, 20), Some(RED));
    assert_eq!(frame.pixel(19, 100), Some(BLACK));
    assert_eq!(frame.pixel(90, 20), Some(BLACK));
}

#[test]
fn plain_digits_draws_no_arc() {
    let c = RenderConfig {
        style: Style::PlainDigits,
        ..cfg()
    };
    let frame = render_frame(&c, 5.0).unwrap();
    assert_eq!(frame.pixel(180, 100), Some(BLACK));
    assert_eq!(frame.pixel(110, 20), Some(BLACK));
}

#[test]
fn fallback_readout_is_centered() {
    // t = 5 => "00:04". Built-in glyphs at 40px: 111.2px wide, 30px tall, top-left (45, 85).
    let frame = render_frame(&cfg(), 5.0).unwrap();
    // Top bar of the first zero.
    assert_eq!(frame.pixel(56, 86), Some(WHITE));
    // The zero has no middle bar.
    assert_eq!(frame.pixel(56, 100), Some(BLACK));
    // Upper colon dot, and the gap between the dots at the canvas center.
    assert_eq!(frame.pixel(100, 93), Some(WHITE));
    assert_eq!(frame.pixel(100, 100), Some(BLACK));
    // Middle bar of the trailing four.
    assert_eq!(frame.pixel(145, 100), Some(WHITE));
}

#[test]
fn readout_changes_with_time() {
    // t = 0 => "00:10": the trailing glyph is a zero, so no middle bar.
    let frame = render_frame(&cfg(), 0.0).unwrap();
    assert_eq!(frame.pixel(145, 100), Some(BLACK));
    // Nothing elapsed, nothing swept.
    assert_eq!(frame.pixel(180, 100), Some(BLACK));
}

#[test]
fn render_is_idempotent_across_renderers_and_reuse() {
    let c = cfg();
    let mut r = FrameRenderer::new();
    let a = r.render(&c, 3.7).unwrap();
    let b = r.render(&c, 3.7).unwrap();
    let fresh = render_frame(&c, 3.7).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, fresh);
}

#[test]
fn output_matches_configured_resolution() {
    let mut r = FrameRenderer::new();
    for (w, h, style) in [
        (200, 200, Style::Arc),
        (320, 180, Style::PlainDigits),
        (101, 333, Style::Arc),
    ] {
        let c = RenderConfig {
            width: w,
            height: h,
            style,
            ..cfg()
        };
        for t in [0.0, 2.5, 9.95, 10.0] {
            let f = r.render(&c, t).unwrap();
            assert_eq!((f.width, f.height), (w, h));
            assert_eq!(f.data.len(), (w * h * 3) as usize);
        }
    }
}

#[test]
fn preview_maps_fraction_to_time() {
    let c = cfg();
    let a = render_preview(&c, 0.5).unwrap();
    let b = render_frame(&c, 5.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_config_is_rejected() {
    let c = RenderConfig {
        duration_secs: 0,
        ..cfg()
    };
    assert!(render_frame(&c, 0.0).is_err());
}

#[test]
fn missing_font_reports_builtin_face() {
    let mut r = FrameRenderer::new();
    assert_eq!(r.font_face(&cfg()), FontFace::Builtin);
}

const TEST_FONT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/fonts/DejaVuSansMono-Bold.ttf"
);

fn font_cfg() -> RenderConfig {
    RenderConfig {
        width: 320,
        height: 240,
        font_size: 60,
        font_path: PathBuf::from(TEST_FONT),
        style: Style::PlainDigits,
        ..cfg()
    }
}

/// Bounding box `(x0, y0, x1, y1)` (exclusive max) of pixels that differ from `bg`.
fn ink_bounds(frame: &FrameRgb, bg: [u8; 3]) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..frame.height {
        for x in 0..frame.width {
            if frame.pixel(x, y) == Some(bg) {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x + 1, y + 1),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
            });
        }
    }
    bounds
}

#[test]
fn font_backed_readout_is_centered() {
    let c = font_cfg();
    let mut r = FrameRenderer::new();
    assert!(matches!(r.font_face(&c), FontFace::File { .. }));

    let frame = r.render(&c, 0.0).unwrap();
    let (x0, y0, x1, y1) = ink_bounds(&frame, BLACK).expect("readout drew nothing");
    let cx = f64::from(x0 + x1) / 2.0;
    let cy = f64::from(y0 + y1) / 2.0;
    let tol = 0.1 * f64::from(c.font_size);
    assert!((cx - 160.0).abs() <= tol, "ink x {x0}..{x1}");
    assert!((cy - 120.0).abs() <= tol, "ink y {y0}..{y1}");

    // "00:10" spans several glyph cells, not one.
    assert!(x1 - x0 > 2 * c.font_size, "ink x {x0}..{x1}");
    assert!(y1 - y0 > c.font_size / 2, "ink y {y0}..{y1}");
}

#[test]
fn font_backed_render_is_idempotent() {
    let c = font_cfg();
    let mut r = FrameRenderer::new();
    let a = r.render(&c, 4.2).unwrap();
    let b = r.render(&c, 4.2).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, render_frame(&c, 4.2).unwrap());
}

#[test]
fn font_backed_readout_changes_with_time() {
    let c = font_cfg();
    let mut r = FrameRenderer::new();
    assert_ne!(r.render(&c, 0.0).unwrap(), r.render(&c, 5.0).unwrap());
}
