//! Font resolution and text layout for the readout.
//!
//! Resolution never fails: a font path that cannot be read or parsed resolves to the built-in
//! seven-segment glyphs (see [`crate::render::segments`]).

use crate::config::color::Rgb8;
use crate::render::segments::SegmentFont;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Which glyph source a font path resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontFace {
    /// A font file registered with the layout engine, identified by its family name.
    File {
        /// Family name reported by the font.
        family: String,
    },
    /// Built-in seven-segment glyphs.
    Builtin,
}

#[derive(Clone)]
struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Laid-out readout text, ready to be drawn at an offset.
pub(crate) enum TextBlock {
    Shaped {
        layout: parley::Layout<TextBrushRgba8>,
        font: vello_cpu::peniko::FontData,
    },
    Segments {
        outline: kurbo::BezPath,
        width: f64,
        height: f64,
    },
}

impl TextBlock {
    /// Width and height of the laid-out block in pixels.
    pub(crate) fn size(&self) -> (f64, f64) {
        match self {
            Self::Shaped { layout, .. } => (f64::from(layout.width()), f64::from(layout.height())),
            Self::Segments { width, height, .. } => (*width, *height),
        }
    }
}

/// Resolves font paths (with caching) and lays out text with Parley.
pub struct FontResolver {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    loaded: HashMap<PathBuf, Option<LoadedFont>>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResolver {
    /// Construct a resolver with fresh Parley contexts and an empty font cache.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            loaded: HashMap::new(),
        }
    }

    /// Resolve `path` to a glyph source, substituting [`FontFace::Builtin`] on any failure.
    pub fn resolve(&mut self, path: &Path) -> FontFace {
        match self.load(path) {
            Some(f) => FontFace::File {
                family: f.family.clone(),
            },
            None => FontFace::Builtin,
        }
    }

    fn load(&mut self, path: &Path) -> Option<&LoadedFont> {
        if !self.loaded.contains_key(path) {
            let loaded = match self.register(path) {
                Ok(f) => {
                    tracing::debug!(path = %path.display(), family = %f.family, "font loaded");
                    Some(f)
                }
                Err(reason) => {
                    tracing::warn!(
                        path = %path.display(),
                        %reason,
                        "font unavailable, using built-in glyphs"
                    );
                    None
                }
            };
            self.loaded.insert(path.to_path_buf(), loaded);
        }
        self.loaded.get(path).and_then(Option::as_ref)
    }

    fn register(&mut self, path: &Path) -> Result<LoadedFont, String> {
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| "no font families registered from font bytes".to_owned())?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| "registered font family has no name".to_owned())?
            .to_string();
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(LoadedFont { family, data })
    }

    /// Lay out `text` on a single line using the font at `path` (or the built-in glyphs).
    pub(crate) fn layout(
        &mut self,
        path: &Path,
        text: &str,
        size_px: f32,
        color: Rgb8,
    ) -> TextBlock {
        let Some(font) = self.load(path).cloned() else {
            return segments_block(text, size_px);
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font.family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        TextBlock::Shaped {
            layout,
            font: font.data,
        }
    }
}

fn segments_block(text: &str, size_px: f32) -> TextBlock {
    let seg = SegmentFont::new(f64::from(size_px));
    let (width, height) = seg.measure(text);
    TextBlock::Segments {
        outline: seg.outline(text),
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
