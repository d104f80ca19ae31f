use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::{
    assets::fonts::{FontConfig, FontWeight},
    foundation::{
        core::{Rgba8, Size},
        error::ConfartResult,
    },
    jobs::{
        context::{CellSpec, JobContext},
        report::BatchReport,
    },
    layout::{
        grid::{GridLayout, GridSpec},
        tiers::layout_tiers,
    },
    render::{canvas::Canvas, fit::FitMode, output::PngOptions, text::TextStyle},
};

/// A sponsorship level with its own collage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    pub columns: u32,
    pub logos: Vec<PathBuf>,
    pub output: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SponsorLayout {
    pub cell: Size,
    pub padding: u32,
    /// Logos are contained in the cell shrunk by this much on every side.
    pub logo_margin: u32,
    pub title_size: f32,
    pub label_size: f32,
    /// Gap below a title or tier label.
    pub label_gap: u32,
    pub title_color: Rgba8,
    pub background: Rgba8,
}

impl Default for SponsorLayout {
    fn default() -> Self {
        Self {
            cell: Size::new(420, 260),
            padding: 28,
            logo_margin: 10,
            title_size: 40.0,
            label_size: 32.0,
            label_gap: 10,
            title_color: Rgba8::rgb(81, 36, 122),
            background: Rgba8::TRANSPARENT,
        }
    }
}

/// `confart sponsors` input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SponsorConfig {
    pub tiers: Vec<Tier>,
    /// All tiers stacked on one canvas; `null` skips it.
    #[serde(default = "default_combined_output")]
    pub combined_output: Option<PathBuf>,
    #[serde(default)]
    pub layout: SponsorLayout,
    #[serde(default)]
    pub fonts: FontConfig,
}

fn default_combined_output() -> Option<PathBuf> {
    Some(PathBuf::from("sponsors_all_collage.png"))
}

/// One collage per tier, then the combined collage.
///
/// Each logo is loaded and fitted once; the report counts every logo once.
#[tracing::instrument(skip_all, fields(tiers = config.tiers.len()))]
pub fn run(config: &SponsorConfig, ctx: &mut JobContext) -> ConfartResult<BatchReport> {
    let layout = &config.layout;
    let title = ctx.style(FontWeight::Bold, layout.title_size, layout.title_color)?;
    let label = ctx.style(FontWeight::Bold, layout.label_size, layout.title_color)?;

    let spec = CellSpec::new(layout.cell, FitMode::Contain)
        .margin(layout.logo_margin)
        .background(layout.background);
    let mut report = BatchReport::new();
    let mut cells: Vec<Vec<RgbaImage>> = Vec::with_capacity(config.tiers.len());
    for tier in &config.tiers {
        let mut tier_cells = Vec::with_capacity(tier.logos.len());
        for logo in &tier.logos {
            tier_cells.push(ctx.prepare_cell(logo, &spec, &mut report)?);
        }
        cells.push(tier_cells);
    }

    for (tier, tier_cells) in config.tiers.iter().zip(&cells) {
        let output = ctx.resolve(&tier.output);
        build_tier(tier, tier_cells, layout, &title, &output, ctx)?;
        report.record_output(output);
    }

    if let Some(combined) = &config.combined_output {
        let output = ctx.resolve(combined);
        build_combined(&config.tiers, &cells, layout, &label, &output, ctx)?;
        report.record_output(output);
    }
    Ok(report)
}

fn header_height(layout: &SponsorLayout, text_size: f32) -> u32 {
    text_size.round() as u32 + layout.label_gap
}

fn build_tier(
    tier: &Tier,
    cells: &[RgbaImage],
    layout: &SponsorLayout,
    title: &TextStyle,
    output: &Path,
    ctx: &mut JobContext,
) -> ConfartResult<()> {
    let grid = GridLayout::new(
        GridSpec::uniform(tier.columns, layout.cell, layout.padding),
        cells.len(),
    )?
    .with_header(header_height(layout, layout.title_size));
    let mut canvas = Canvas::new(grid.canvas_size(), layout.background);
    let width = canvas.size().width;
    ctx.draw_centered(
        &mut canvas,
        &tier.name,
        title,
        0,
        width,
        i64::from(layout.padding),
    )?;
    for (cell, (x, y)) in cells.iter().zip(grid.origins()) {
        canvas.paste(cell, i64::from(x), i64::from(y));
    }
    canvas.save(output, &PngOptions::default())
}

fn build_combined(
    tiers: &[Tier],
    cells: &[Vec<RgbaImage>],
    layout: &SponsorLayout,
    label: &TextStyle,
    output: &Path,
    ctx: &mut JobContext,
) -> ConfartResult<()> {
    let shape: Vec<(usize, u32)> = tiers.iter().map(|t| (t.logos.len(), t.columns)).collect();
    let placed = layout_tiers(
        &shape,
        layout.cell,
        layout.padding,
        header_height(layout, layout.label_size),
    )?;
    let mut canvas = Canvas::new(placed.canvas, layout.background);
    let width = placed.canvas.width;

    for ((tier, tier_cells), placement) in tiers.iter().zip(cells).zip(&placed.tiers) {
        ctx.draw_centered(
            &mut canvas,
            &tier.name,
            label,
            0,
            width,
            i64::from(placement.label_y),
        )?;
        for (cell, &(x, y)) in tier_cells.iter().zip(&placement.origins) {
            canvas.paste(cell, i64::from(x), i64::from(y));
        }
    }
    canvas.save(output, &PngOptions::default())
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/sponsors.rs"]
mod tests;
