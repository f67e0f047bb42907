use super::*;

#[test]
fn missing_font_resolves_to_builtin() {
    let mut fonts = FontResolver::new();
    let face = fonts.resolve(Path::new("/definitely/not/here/font.ttf"));
    assert_eq!(face, FontFace::Builtin);
}

#[test]
fn non_font_file_resolves_to_builtin() {
    let dir = std::env::temp_dir().join(format!("countdown_text_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("not_a_font.ttf");
    std::fs::write(&path, b"this is not a font").unwrap();

    let mut fonts = FontResolver::new();
    assert_eq!(fonts.resolve(&path), FontFace::Builtin);
    // Cached result is stable.
    assert_eq!(fonts.resolve(&path), FontFace::Builtin);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn builtin_layout_scales_with_size() {
    let mut fonts = FontResolver::new();
    let missing = Path::new("/missing.ttf");
    let small = fonts.layout(missing, "00:00", 50.0, Rgb8::WHITE).size();
    let large = fonts.layout(missing, "00:00", 100.0, Rgb8::WHITE).size();
    assert!(small.0 > 0.0 && small.1 > 0.0);
    assert!((large.0 - 2.0 * small.0).abs() < 1e-9);
    assert!((large.1 - 2.0 * small.1).abs() < 1e-9);
}

const TEST_FONT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/data/fonts/DejaVuSansMono-Bold.ttf"
);

#[test]
fn bundled_font_resolves_to_file_face() {
    let mut fonts = FontResolver::new();
    match fonts.resolve(Path::new(TEST_FONT)) {
        FontFace::File { family } => assert!(family.starts_with("DejaVu Sans Mono"), "{family}"),
        FontFace::Builtin => panic!("bundled test font failed to load"),
    }
}

#[test]
fn shaped_layout_spans_every_glyph() {
    let mut fonts = FontResolver::new();
    let block = fonts.layout(Path::new(TEST_FONT), "00:15", 60.0, Rgb8::WHITE);
    assert!(matches!(block, TextBlock::Shaped { .. }));
    let (w, h) = block.size();
    // Five monospace cells of roughly 0.6em each.
    assert!(w > 150.0 && w < 200.0, "width {w}");
    assert!(h > 55.0 && h < 90.0, "height {h}");

    let one = fonts
        .layout(Path::new(TEST_FONT), "0", 60.0, Rgb8::WHITE)
        .size();
    assert!(w > 4.0 * one.0);
}
