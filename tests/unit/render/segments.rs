use super::*;

#[test]
fn measure_counts_glyphs_and_gaps() {
    let f = SegmentFont::new(100.0);
    let (w, h) = f.measure("00:00");
    // 4 digits + colon + 4 gaps.
    assert!((w - (4.0 * 55.0 + 10.0 + 4.0 * 12.0)).abs() < 1e-9);
    assert!((h - 75.0).abs() < 1e-9);
    assert_eq!(f.measure(""), (0.0, 0.0));
}

#[test]
fn outline_fills_the_measured_box() {
    let f = SegmentFont::new(100.0);
    let text = "88:08";
    let (w, h) = f.measure(text);
    let bb = f.outline(text).bounding_box();
    assert!(bb.x0.abs() < 1e-9 && bb.y0.abs() < 1e-9);
    assert!((bb.x1 - w).abs() < 1e-9);
    assert!((bb.y1 - h).abs() < 1e-9);
}

#[test]
fn one_lights_only_the_right_segments() {
    let f = SegmentFont::new(100.0);
    let bb = f.outline("1").bounding_box();
    assert!((bb.x0 - 45.0).abs() < 1e-9);
    assert!((bb.x1 - 55.0).abs() < 1e-9);
}

#[test]
fn digit_masks_are_distinct() {
    for i in 0..DIGITS.len() {
        for j in (i + 1)..DIGITS.len() {
            assert_ne!(DIGITS[i], DIGITS[j], "digits {i} and {j} share a mask");
        }
    }
}

#[test]
fn unknown_characters_draw_nothing() {
    let f = SegmentFont::new(40.0);
    assert!(f.outline("x").elements().is_empty());
}
