use crate::config::color::Rgb8;
use crate::config::{RenderConfig, Style};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Vec2};
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::frame::FrameRgb;
use crate::render::text::{FontFace, FontResolver, TextBlock};
use crate::timer::{ARC_START_DEG, arc_progress, format_mmss, remaining_seconds};
use kurbo::Shape;

/// Everything a frame shows at time `t`, before any pixels are drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameState {
    /// Timestamp in seconds, clamped to `[0, duration]`.
    pub t: f64,
    /// Whole seconds on the readout.
    pub remaining_secs: u32,
    /// `MM:SS` readout.
    pub text: String,
    /// Elapsed fraction `t / duration`.
    pub progress: f64,
    /// Arc end angle in degrees (start is always -90).
    pub arc_end_deg: f64,
}

impl FrameState {
    /// Evaluate the countdown at `t` seconds.
    pub fn at(cfg: &RenderConfig, t: f64) -> Self {
        let t = if t.is_finite() {
            t.clamp(0.0, cfg.duration_f64())
        } else {
            0.0
        };
        let remaining_secs = remaining_seconds(t, cfg.duration_secs, cfg.fps);
        let progress = arc_progress(t, cfg.duration_secs);
        Self {
            t,
            remaining_secs,
            text: format_mmss(remaining_secs),
            progress,
            arc_end_deg: ARC_START_DEG + 360.0 * progress,
        }
    }
}

/// CPU frame renderer backed by `vello_cpu`.
///
/// Rendering is a pure function of `(config, t)`: the renderer only caches loaded fonts and a
/// reusable raster context, neither of which changes the produced pixels.
pub struct FrameRenderer {
    fonts: FontResolver,
    ctx: Option<vello_cpu::RenderContext>,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRenderer {
    /// Create a renderer with an empty font cache.
    pub fn new() -> Self {
        Self {
            fonts: FontResolver::new(),
            ctx: None,
        }
    }

    /// Report which glyph source `cfg.font_path` resolves to.
    pub fn font_face(&mut self, cfg: &RenderConfig) -> FontFace {
        self.fonts.resolve(&cfg.font_path)
    }

    /// Render the countdown at `t` seconds into a `width x height` RGB frame.
    pub fn render(&mut self, cfg: &RenderConfig, t: f64) -> CountdownResult<FrameRgb> {
        cfg.validate()?;
        let canvas = cfg.canvas();
        let state = FrameState::at(cfg, t);
        let (w16, h16) = canvas_u16(canvas)?;

        let block = self.fonts.layout(
            &cfg.font_path,
            &state.text,
            cfg.font_size as f32,
            cfg.text_color,
        );

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w16 && ctx.height() == h16 => ctx,
            _ => vello_cpu::RenderContext::new(w16, h16),
        };
        ctx.reset();

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint(cfg.background_color));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));

        if cfg.style == Style::Arc
            && let Some(arc) = arc_centerline(canvas, cfg, state.progress)
        {
            let stroke_w = f64::from(cfg.arc_width).min(2.0 * f64::from(cfg.arc_radius));
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(stroke_w).with_caps(vello_cpu::kurbo::Cap::Butt),
            );
            ctx.set_paint(paint(cfg.arc_color));
            ctx.stroke_path(&bezpath_to_cpu(&arc));
        }

        let (tw, th) = block.size();
        let center = canvas.center();
        let origin = Vec2::new(center.x - (tw / 2.0).floor(), center.y - (th / 2.0).floor());
        draw_text(&mut ctx, &block, origin, cfg.text_color);

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        FrameRgb::from_premul_rgba8(
            canvas,
            pixmap.data_as_u8_slice(),
            cfg.background_color.to_array(),
        )
    }

    /// Render the preview frame at `fraction` (0..=1) of the countdown.
    pub fn render_preview(&mut self, cfg: &RenderConfig, fraction: f64) -> CountdownResult<FrameRgb> {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.render(cfg, fraction * cfg.duration_f64())
    }
}

/// One-shot render of a single frame with a fresh [`FrameRenderer`].
pub fn render_frame(cfg: &RenderConfig, t: f64) -> CountdownResult<FrameRgb> {
    FrameRenderer::new().render(cfg, t)
}

/// One-shot render at `fraction` (0..=1) of the countdown, as a preview slider would.
pub fn render_preview(cfg: &RenderConfig, fraction: f64) -> CountdownResult<FrameRgb> {
    FrameRenderer::new().render_preview(cfg, fraction)
}

/// Centerline of the progress arc, or `None` when nothing has elapsed yet.
///
/// The stroke lies inside the bounding circle: its outer edge touches `arc_radius`.
pub(crate) fn arc_centerline(canvas: Canvas, cfg: &RenderConfig, progress: f64) -> Option<BezPath> {
    let sweep_deg = 360.0 * progress.clamp(0.0, 1.0);
    if sweep_deg <= 0.0 {
        return None;
    }
    let radius = f64::from(cfg.arc_radius);
    let half_w = f64::from(cfg.arc_width).min(2.0 * radius) / 2.0;
    let r = (radius - half_w).max(0.5);
    let arc = kurbo::Arc {
        center: canvas.center(),
        radii: Vec2::new(r, r),
        start_angle: ARC_START_DEG.to_radians(),
        sweep_angle: sweep_deg.to_radians(),
        x_rotation: 0.0,
    };
    Some(arc.to_path(0.1))
}

fn draw_text(ctx: &mut vello_cpu::RenderContext, block: &TextBlock, origin: Vec2, color: Rgb8) {
    ctx.set_transform(affine_to_cpu(Affine::translate(origin)));
    match block {
        TextBlock::Shaped { layout, font } => {
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    // Positioned glyphs carry the run offset, advances and baseline.
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
        TextBlock::Segments { outline, .. } => {
            ctx.set_paint(paint(color));
            ctx.fill_path(&bezpath_to_cpu(outline));
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

fn canvas_u16(canvas: Canvas) -> CountdownResult<(u16, u16)> {
    let w = u16::try_from(canvas.width)
        .map_err(|_| CountdownError::render("canvas width exceeds rasterizer limit"))?;
    let h = u16::try_from(canvas.height)
        .map_err(|_| CountdownError::render("canvas height exceeds rasterizer limit"))?;
    Ok((w, h))
}

fn paint(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let cpu_pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(cpu_pt(p)),
            PathEl::LineTo(p) => out.line_to(cpu_pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(cpu_pt(p1), cpu_pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(cpu_pt(p1), cpu_pt(p2), cpu_pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
