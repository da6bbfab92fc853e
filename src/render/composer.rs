use std::sync::Arc;

use vello_cpu::kurbo::Affine;

use crate::fonts::registry::{FontRegistry, FontWeight};
use crate::fonts::text::TextLayoutEngine;
use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::foundation::math::{lerp_u8, unpremultiply_rgba8_in_place};
use crate::render::frame::FrameRGBA;
use crate::render::layout::cell_slots;
use crate::render::shapes::{bezpath_to_cpu, rect_to_cpu, rounded_rect_path};
use crate::style::resolve::{Background, StyleConfig};
use crate::time::units::{TimeUnits, format_unit_value};

/// Anything that can turn a unit snapshot into a finished frame.
pub trait ComposeFrame {
    /// Draw one frame for `units` styled by `style`.
    fn compose(&mut self, units: &TimeUnits, style: &StyleConfig) -> CountdownResult<FrameRGBA>;
}

/// CPU frame composer backed by `vello_cpu`.
///
/// Owns the raster surface and per-request text layout state. Construct one per request.
pub struct FrameComposer {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    values: TextLayoutEngine,
    labels: TextLayoutEngine,
    gradient: Option<(GradientKey, vello_cpu::Image)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct GradientKey {
    start: Rgb8,
    end: Rgb8,
}

impl FrameComposer {
    /// Allocate a surface of `canvas` size and bind the registry's faces.
    pub fn new(fonts: &FontRegistry, canvas: Canvas) -> CountdownResult<Self> {
        let (w, h) = canvas_to_u16(canvas)?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            values: TextLayoutEngine::new(fonts.face(FontWeight::Bold))?,
            labels: TextLayoutEngine::new(fonts.face(FontWeight::Regular))?,
            gradient: None,
        })
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Draw `units` onto the owned surface, replacing its previous contents.
    pub fn compose_into(&mut self, units: &TimeUnits, style: &StyleConfig) -> CountdownResult<()> {
        if style.canvas != self.canvas {
            return Err(CountdownError::rendering(format!(
                "style canvas {}x{} does not match surface {}x{}",
                style.canvas.width, style.canvas.height, self.canvas.width, self.canvas.height
            )));
        }

        self.ctx.reset();
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_paint_transform(Affine::IDENTITY);
        self.ctx.set_transform(Affine::IDENTITY);

        let full = rect_to_cpu(self.canvas.rect());
        match style.background {
            Background::Gradient { start, end } => {
                let img = self.gradient_paint(start, end)?;
                self.ctx.set_paint(img);
                self.ctx.fill_rect(&full);
            }
            Background::Flat(c) => {
                self.ctx.set_paint(paint_color(c));
                self.ctx.fill_rect(&full);
            }
            Background::Transparent => {}
        }

        let slots = cell_slots(self.canvas, &style.cells);
        for (slot, (unit, value)) in slots.iter().zip(units.iter()) {
            if let Some(box_color) = style.box_color {
                let outline = rounded_rect_path(slot.rect, style.cells.corner_radius);
                self.ctx.set_transform(Affine::IDENTITY);
                self.ctx.set_paint(paint_color(box_color));
                self.ctx.fill_path(&bezpath_to_cpu(&outline));
            }
            draw_centered_text(
                &mut self.ctx,
                &mut self.values,
                &format_unit_value(value),
                style.cells.value_size,
                style.text_color,
                slot.value_anchor,
            )?;
            draw_centered_text(
                &mut self.ctx,
                &mut self.labels,
                &unit.label().to_uppercase(),
                style.cells.label_size,
                style.label_color,
                slot.label_anchor,
            )?;
        }

        self.ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }

    /// Copy the surface out as a straight-alpha frame.
    pub fn read_frame(&self) -> CountdownResult<FrameRGBA> {
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        FrameRGBA::from_rgba8(self.canvas, data)
    }

    fn gradient_paint(&mut self, start: Rgb8, end: Rgb8) -> CountdownResult<vello_cpu::Image> {
        let key = GradientKey { start, end };
        if let Some((cached, img)) = &self.gradient
            && *cached == key
        {
            return Ok(img.clone());
        }

        let Canvas { width, height } = self.canvas;
        let mut bytes = Vec::with_capacity(self.canvas.rgba8_len());
        let h1 = (height.max(1) - 1) as f32;
        for y in 0..height {
            let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
            let row = [
                lerp_u8(start.r, end.r, t),
                lerp_u8(start.g, end.g, t),
                lerp_u8(start.b, end.b, t),
                255,
            ];
            for _ in 0..width {
                bytes.extend_from_slice(&row);
            }
        }
        let img = opaque_rgba_to_image(&bytes, self.canvas)?;
        self.gradient = Some((key, img.clone()));
        Ok(img)
    }
}

impl ComposeFrame for FrameComposer {
    fn compose(&mut self, units: &TimeUnits, style: &StyleConfig) -> CountdownResult<FrameRGBA> {
        self.compose_into(units, style)?;
        self.read_frame()
    }
}

fn draw_centered_text(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    text: &str,
    size_px: f32,
    color: Rgb8,
    center: Point,
) -> CountdownResult<()> {
    let layout = engine.layout_line(text, size_px, color)?;
    let x = center.x - f64::from(layout.width()) / 2.0;
    let y = center.y - f64::from(layout.height()) / 2.0;
    ctx.set_transform(Affine::translate((x, y)));

    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            ctx.set_paint(paint_color(run.style().brush));
            // Positioned glyphs carry the run offset and baseline; `glyphs()` is run-relative.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(engine.font())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    Ok(())
}

fn paint_color(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn canvas_to_u16(canvas: Canvas) -> CountdownResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| CountdownError::rendering("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| CountdownError::rendering("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(CountdownError::rendering("canvas must be non-empty"));
    }
    Ok((w, h))
}

fn opaque_rgba_to_image(bytes: &[u8], canvas: Canvas) -> CountdownResult<vello_cpu::Image> {
    let (w, h) = canvas_to_u16(canvas)?;
    if bytes.len() != canvas.rgba8_len() {
        return Err(CountdownError::rendering("pixmap byte len mismatch"));
    }
    // Fully opaque, so straight and premultiplied bytes coincide.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/composer.rs"]
mod tests;
