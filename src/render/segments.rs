//! Built-in seven-segment glyphs.
//!
//! Used whenever the configured font cannot be loaded, so a readout is always drawn. Only the
//! characters a countdown needs are covered (`0`-`9` and `:`); anything else advances like a
//! space.

use kurbo::{BezPath, Rect, Shape};

// Segment bits: a (top), b (top right), c (bottom right), d (bottom), e (bottom left),
// f (top left), g (middle).
const A: u8 = 1 << 0;
const B: u8 = 1 << 1;
const C: u8 = 1 << 2;
const D: u8 = 1 << 3;
const E: u8 = 1 << 4;
const F: u8 = 1 << 5;
const G: u8 = 1 << 6;

const DIGITS: [u8; 10] = [
    A | B | C | D | E | F,
    B | C,
    A | B | D | E | G,
    A | B | C | D | G,
    B | C | F | G,
    A | C | D | F | G,
    A | C | D | E | F | G,
    A | B | C,
    A | B | C | D | E | F | G,
    A | B | C | D | F | G,
];

/// Seven-segment glyph metrics scaled to a font size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SegmentFont {
    digit_w: f64,
    glyph_h: f64,
    thickness: f64,
    spacing: f64,
}

impl SegmentFont {
    pub(crate) fn new(size_px: f64) -> Self {
        let size = size_px.max(1.0);
        Self {
            digit_w: 0.55 * size,
            glyph_h: 0.75 * size,
            thickness: (0.1 * size).max(1.0),
            spacing: 0.12 * size,
        }
    }

    fn advance(&self, ch: char) -> f64 {
        match ch {
            ':' => self.thickness,
            _ => self.digit_w,
        }
    }

    /// Width and height of `text` laid out on one line.
    pub(crate) fn measure(&self, text: &str) -> (f64, f64) {
        let n = text.chars().count();
        if n == 0 {
            return (0.0, 0.0);
        }
        let glyphs: f64 = text.chars().map(|c| self.advance(c)).sum();
        let gaps = self.spacing * (n - 1) as f64;
        (glyphs + gaps, self.glyph_h)
    }

    /// Filled outline of `text` with its top-left corner at the origin.
    pub(crate) fn outline(&self, text: &str) -> BezPath {
        let mut path = BezPath::new();
        let mut x = 0.0;
        for ch in text.chars() {
            match ch {
                ':' => self.push_colon(&mut path, x),
                '0'..='9' => {
                    let mask = DIGITS[(ch as u8 - b'0') as usize];
                    self.push_digit(&mut path, x, mask);
                }
                _ => {}
            }
            x += self.advance(ch) + self.spacing;
        }
        path
    }

    fn push_digit(&self, path: &mut BezPath, x: f64, mask: u8) {
        let (w, h, s) = (self.digit_w, self.glyph_h, self.thickness);
        let mid = h / 2.0;
        let segments = [
            (A, Rect::new(0.0, 0.0, w, s)),
            (B, Rect::new(w - s, 0.0, w, mid + s / 2.0)),
            (C, Rect::new(w - s, mid - s / 2.0, w, h)),
            (D, Rect::new(0.0, h - s, w, h)),
            (E, Rect::new(0.0, mid - s / 2.0, s, h)),
            (F, Rect::new(0.0, 0.0, s, mid + s / 2.0)),
            (G, Rect::new(0.0, mid - s / 2.0, w, mid + s / 2.0)),
        ];
        for (bit, rect) in segments {
            if mask & bit != 0 {
                push_rect(path, rect + kurbo::Vec2::new(x, 0.0));
            }
        }
    }

    fn push_colon(&self, path: &mut BezPath, x: f64) {
        let s = self.thickness;
        for cy in [self.glyph_h * 0.3, self.glyph_h * 0.7] {
            push_rect(path, Rect::new(x, cy - s / 2.0, x + s, cy + s / 2.0));
        }
    }
}

fn push_rect(path: &mut BezPath, rect: Rect) {
    path.extend(rect.path_elements(0.1));
}

#[cfg(test)]
#[path = "../../tests/unit/render/segments.rs"]
mod tests;
