use crate::fonts::registry::FontFace;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{CountdownError, CountdownResult};

/// Parley layout contexts bound to a single registered face.
///
/// One engine per face keeps family matching trivial: the only family in the collection is the
/// one we paint with.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb8>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    /// Register `face` into fresh Parley contexts.
    pub(crate) fn new(face: &FontFace) -> CountdownResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(face.blob.clone(), None);
        if families.is_empty() {
            return Err(CountdownError::font(format!(
                "font family \"{}\" failed to register",
                face.family
            )));
        }
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family: face.family.clone(),
            font: face.paint.clone(),
        })
    }

    /// Font data glyph ids from [`TextLayoutEngine::layout_line`] refer to.
    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` as a single unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgb8,
    ) -> CountdownResult<parley::Layout<Rgb8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CountdownError::rendering(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgb8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/text.rs"]
mod tests;
