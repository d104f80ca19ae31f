use std::collections::{HashMap, HashSet};

use image::RgbaImage;

use crate::{
    assets::fonts::LoadedFont,
    foundation::{
        core::{Rgba8, unpremultiply_rgba8_in_place},
        error::{ConfartError, ConfartResult},
    },
};

/// Font, size and colour of one run of text.
#[derive(Clone, Debug)]
pub struct TextStyle {
    pub font: LoadedFont,
    pub size_px: f32,
    pub color: Rgba8,
}

impl TextStyle {
    pub fn new(font: LoadedFont, size_px: f32, color: Rgba8) -> Self {
        Self {
            font,
            size_px,
            color,
        }
    }
}

/// Single-line shaping, measuring and rasterisation.
///
/// Every [`LoadedFont`] is registered with parley under its own family name (its cache key), so
/// a bold and a regular face of the same family never shadow each other.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    registered: HashSet<String>,
    glyph_fonts: HashMap<String, vello_cpu::peniko::FontData>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashSet::new(),
            glyph_fonts: HashMap::new(),
        }
    }

    /// Shape `text` as one unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        style: &TextStyle,
    ) -> ConfartResult<parley::Layout<Rgba8>> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(ConfartError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family = self.register(&style.font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(style.color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` in pixels.
    pub fn measure(&mut self, text: &str, style: &TextStyle) -> ConfartResult<f32> {
        Ok(self.layout_line(text, style)?.width())
    }

    /// Height of one line in `style`.
    pub fn line_height(&mut self, style: &TextStyle) -> ConfartResult<f32> {
        Ok(self.layout_line("Ag", style)?.height())
    }

    /// Rasterise `text` onto a tight transparent image (1px margin on each side).
    ///
    /// Returns `None` for text that shapes to nothing (empty or whitespace only).
    pub fn render_line(
        &mut self,
        text: &str,
        style: &TextStyle,
    ) -> ConfartResult<Option<RgbaImage>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let layout = self.layout_line(text, style)?;
        let w = layout.width().ceil() as u32 + 2;
        let h = layout.height().ceil() as u32 + 2;
        let (w16, h16) = match (u16::try_from(w), u16::try_from(h)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(ConfartError::validation(format!(
                    "text line too large to rasterise ({w}x{h})"
                )));
            }
        };
        let font = self.glyph_font(&style.font);

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((1.0, 1.0)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let mut bytes = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        RgbaImage::from_raw(w, h, bytes)
            .map(Some)
            .ok_or_else(|| ConfartError::validation("text pixmap size mismatch"))
    }

    fn register(&mut self, font: &LoadedFont) -> ConfartResult<String> {
        if self.registered.contains(&font.key) {
            return Ok(font.key.clone());
        }
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            Some(parley::fontique::FontInfoOverride {
                family_name: Some(&font.key),
                ..Default::default()
            }),
        );
        if families.is_empty() {
            return Err(ConfartError::load(
                &font.key,
                "no font families registered from font bytes",
            ));
        }
        tracing::trace!(key = %font.key, "registered font with text engine");
        self.registered.insert(font.key.clone());
        Ok(font.key.clone())
    }

    fn glyph_font(&mut self, font: &LoadedFont) -> vello_cpu::peniko::FontData {
        self.glyph_fonts
            .entry(font.key.clone())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
                    font.index,
                )
            })
            .clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
