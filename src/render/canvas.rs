use std::path::Path;

use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};
use vello_cpu::kurbo::{Affine, Ellipse, Rect, Shape as _, Stroke};

use crate::{
    foundation::{
        core::{Rgba8, Size, unpremultiply_rgba8_in_place},
        error::{ConfartError, ConfartResult},
    },
    render::{
        output::{PngOptions, write_png},
        text::{TextEngine, TextStyle},
    },
};

const PLACEHOLDER_FILL: Rgba8 = Rgba8::rgb(0xf0, 0xf0, 0xf0);
const PLACEHOLDER_BORDER: Rgba8 = Rgba8::rgb(0xdd, 0xdd, 0xdd);
pub(crate) const PLACEHOLDER_TEXT: Rgba8 = Rgba8::rgb(0x66, 0x66, 0x66);

/// Outline of a slot, inscribed in its bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Rect,
    /// Ellipse touching all four sides of the box (a circle for square boxes).
    #[serde(alias = "circle")]
    Ellipse,
}

/// Fill and stroke for [`Canvas::draw_shape`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Rgba8>,
    pub stroke: Option<Rgba8>,
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn filled(fill: Rgba8) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    pub fn outlined(stroke: Rgba8, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
            stroke_width: width,
        }
    }

    pub fn with_stroke(mut self, stroke: Rgba8, width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }
}

/// Output raster that cells, shapes and text are composited onto.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(size: Size, background: Rgba8) -> Self {
        Self {
            image: RgbaImage::from_pixel(size.width, size.height, background.to_pixel()),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    /// Alpha-composite `cell` with its top-left corner at `(x, y)`.
    ///
    /// The source alpha channel acts as the paste mask, so transparent regions leave the canvas
    /// untouched. Parts outside the canvas are clipped.
    pub fn paste(&mut self, cell: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.image, cell, x, y);
    }

    /// Draw `shape` inscribed in the box at `(x, y)` of `size`.
    pub fn draw_shape(
        &mut self,
        shape: Shape,
        x: i64,
        y: i64,
        size: Size,
        style: &ShapeStyle,
    ) -> ConfartResult<()> {
        let layer = render_shape(shape, size, style)?;
        self.paste(&layer, x, y);
        Ok(())
    }

    /// Draw one line horizontally centred in the cell spanning `[cell_x, cell_x + cell_width)`.
    ///
    /// The line's left edge is `cell_x + (cell_width - measured_width) / 2`; `y` is the top of
    /// the line box. Returns the measured width.
    pub fn draw_text_centered(
        &mut self,
        engine: &mut TextEngine,
        text: &str,
        style: &TextStyle,
        cell_x: i64,
        cell_width: u32,
        y: i64,
    ) -> ConfartResult<f32> {
        let width = engine.measure(text, style)?;
        let x = cell_x + ((cell_width as f32 - width) / 2.0).floor() as i64;
        self.draw_line(engine, text, style, x, y)?;
        Ok(width)
    }

    /// Draw one line whose centre sits on `center_x`.
    pub fn draw_text_around(
        &mut self,
        engine: &mut TextEngine,
        text: &str,
        style: &TextStyle,
        center_x: i64,
        y: i64,
    ) -> ConfartResult<f32> {
        self.draw_text_centered(engine, text, style, center_x, 0, y)
    }

    /// Draw one line with its left edge at `x`.
    pub fn draw_text(
        &mut self,
        engine: &mut TextEngine,
        text: &str,
        style: &TextStyle,
        x: i64,
        y: i64,
    ) -> ConfartResult<()> {
        self.draw_line(engine, text, style, x, y)
    }

    fn draw_line(
        &mut self,
        engine: &mut TextEngine,
        text: &str,
        style: &TextStyle,
        x: i64,
        y: i64,
    ) -> ConfartResult<()> {
        if let Some(line) = engine.render_line(text, style)? {
            // render_line pads by one pixel on every side.
            self.paste(&line, x - 1, y - 1);
        }
        Ok(())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn save(&self, path: &Path, opts: &PngOptions) -> ConfartResult<()> {
        write_png(path, &self.image, opts)
    }
}

/// Rasterise `shape` filling a transparent layer of `size`.
///
/// The stroke is kept inside the box.
pub fn render_shape(shape: Shape, size: Size, style: &ShapeStyle) -> ConfartResult<RgbaImage> {
    let (w16, h16) = match (u16::try_from(size.width), u16::try_from(size.height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(ConfartError::validation(format!(
                "shape size {}x{} out of range",
                size.width, size.height
            )));
        }
    };

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(Affine::IDENTITY);

    let inset = match style.stroke {
        Some(_) if style.stroke_width > 0.0 => style.stroke_width / 2.0,
        _ => 0.0,
    };
    let bounds = Rect::new(
        inset,
        inset,
        f64::from(size.width) - inset,
        f64::from(size.height) - inset,
    );
    let path = match shape {
        Shape::Rect => bounds.to_path(0.1),
        Shape::Ellipse => Ellipse::from_rect(bounds).to_path(0.1),
    };

    if let Some(fill) = style.fill {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            fill.r, fill.g, fill.b, fill.a,
        ));
        ctx.fill_path(&path);
    }
    if let Some(stroke) = style.stroke.filter(|_| style.stroke_width > 0.0) {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            stroke.r, stroke.g, stroke.b, stroke.a,
        ));
        ctx.set_stroke(Stroke::new(style.stroke_width));
        ctx.stroke_path(&path);
    }

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let mut bytes = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut bytes);
    RgbaImage::from_raw(size.width, size.height, bytes)
        .ok_or_else(|| ConfartError::validation("shape pixmap size mismatch"))
}

/// Multiply `img`'s alpha by the anti-aliased coverage of `shape` over the whole image.
pub fn clip_to_shape(img: &mut RgbaImage, shape: Shape) -> ConfartResult<()> {
    if shape == Shape::Rect {
        return Ok(());
    }
    let mask = render_shape(
        shape,
        Size::new(img.width(), img.height()),
        &ShapeStyle::filled(Rgba8::WHITE),
    )?;
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px[3] = ((u16::from(px[3]) * u16::from(m[3]) + 127) / 255) as u8;
    }
    Ok(())
}

/// Stand-in for an item whose image could not be loaded: a flat `#f0f0f0` shape with a `#ddd`
/// border and `label` centred in `#666` when a text style is available.
pub fn placeholder(
    size: Size,
    shape: Shape,
    label: &str,
    text: Option<(&mut TextEngine, &TextStyle)>,
) -> ConfartResult<RgbaImage> {
    let mut canvas = Canvas::new(size, Rgba8::TRANSPARENT);
    canvas.draw_shape(
        shape,
        0,
        0,
        size,
        &ShapeStyle::filled(PLACEHOLDER_FILL).with_stroke(PLACEHOLDER_BORDER, 2.0),
    )?;
    if let Some((engine, style)) = text {
        let line_h = engine.line_height(style)?;
        let y = ((size.height as f32 - line_h) / 2.0).floor() as i64;
        canvas.draw_text_centered(engine, label, style, 0, size.width, y)?;
    }
    Ok(canvas.into_image())
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
