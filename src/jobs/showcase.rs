use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    assets::{
        fonts::{FontConfig, FontWeight},
        svg_raster::DEFAULT_DPI,
    },
    foundation::{
        core::{Rgba8, Size},
        error::ConfartResult,
    },
    jobs::{
        context::{CellSpec, JobContext},
        report::BatchReport,
    },
    render::{
        canvas::{Canvas, Shape, ShapeStyle, clip_to_shape},
        fit::FitMode,
        output::PngOptions,
    },
};

const SLOT_BORDER: Rgba8 = Rgba8::rgb(0xdd, 0xdd, 0xdd);

/// An absolutely positioned logo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub file: PathBuf,
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub shape: Shape,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_outline_color")]
    pub color: Rgba8,
    #[serde(default = "default_outline_width")]
    pub stroke_width: f64,
}

fn default_outline_color() -> Rgba8 {
    Rgba8::rgb(0x33, 0x33, 0x33)
}

fn default_outline_width() -> f64 {
    3.0
}

/// Text centred on `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    pub x: i64,
    pub y: i64,
    #[serde(default = "default_title_size")]
    pub size: f32,
    #[serde(default = "default_title_color")]
    pub color: Rgba8,
}

fn default_title_size() -> f32 {
    24.0
}

fn default_title_color() -> Rgba8 {
    Rgba8::rgb(0x51, 0x24, 0x7a)
}

/// `confart showcase` input: a fixed-size print layout such as a T-shirt back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseConfig {
    pub slots: Vec<Slot>,
    pub output: PathBuf,
    #[serde(default = "default_canvas")]
    pub canvas: Size,
    #[serde(default = "default_background")]
    pub background: Rgba8,
    #[serde(default)]
    pub outline: Option<Outline>,
    #[serde(default)]
    pub title: Option<Title>,
    #[serde(default = "default_logo_margin")]
    pub logo_margin: u32,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default)]
    pub fonts: FontConfig,
}

fn default_canvas() -> Size {
    Size::new(800, 700)
}

fn default_background() -> Rgba8 {
    Rgba8::WHITE
}

fn default_logo_margin() -> u32 {
    10
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

/// Render the layout and write it as an opaque PNG tagged with `dpi`.
#[tracing::instrument(skip_all, fields(slots = config.slots.len()))]
pub fn run(config: &ShowcaseConfig, ctx: &mut JobContext) -> ConfartResult<BatchReport> {
    let mut canvas = Canvas::new(config.canvas, config.background);

    if let Some(outline) = &config.outline {
        canvas.draw_shape(
            Shape::Rect,
            outline.x,
            outline.y,
            Size::new(outline.width, outline.height),
            &ShapeStyle::outlined(outline.color, outline.stroke_width),
        )?;
    }
    if let Some(title) = &config.title {
        let style = ctx.style(FontWeight::Regular, title.size, title.color)?;
        ctx.draw_around(&mut canvas, &title.text, &style, title.x, title.y)?;
    }

    let mut report = BatchReport::new();
    for slot in &config.slots {
        draw_slot(&mut canvas, slot, config.logo_margin, ctx, &mut report)?;
    }

    let output = ctx.resolve(&config.output);
    canvas.save(&output, &PngOptions::with_dpi(config.dpi).opaque())?;
    report.record_output(output);
    Ok(report)
}

fn draw_slot(
    canvas: &mut Canvas,
    slot: &Slot,
    margin: u32,
    ctx: &mut JobContext,
    report: &mut BatchReport,
) -> ConfartResult<()> {
    let size = Size::new(slot.width, slot.height);
    let border = match slot.shape {
        Shape::Rect => 1.0,
        Shape::Ellipse => 2.0,
    };
    canvas.draw_shape(
        slot.shape,
        slot.x,
        slot.y,
        size,
        &ShapeStyle::filled(Rgba8::WHITE).with_stroke(SLOT_BORDER, border),
    )?;

    let spec = CellSpec::new(size, FitMode::Thumbnail)
        .margin(margin)
        .shape(slot.shape)
        .vector_at_cell_size();
    let mut logo = ctx.prepare_cell(&slot.file, &spec, report)?;
    clip_to_shape(&mut logo, slot.shape)?;
    tracing::debug!(file = %slot.file.display(), x = slot.x, y = slot.y, "placing slot");
    canvas.paste(&logo, slot.x, slot.y);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/showcase.rs"]
mod tests;
