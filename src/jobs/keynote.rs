use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{Rgba8, Size},
        error::ConfartResult,
    },
    jobs::{
        context::{CellSpec, JobContext},
        report::BatchReport,
    },
    layout::grid::{GridLayout, GridSpec},
    render::{canvas::Canvas, fit::FitMode, output::PngOptions},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeynoteLayout {
    pub columns: u32,
    pub cell: Size,
    pub padding_x: u32,
    pub padding_y: u32,
    pub background: Rgba8,
}

impl Default for KeynoteLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            cell: Size::new(500, 500),
            padding_x: 80,
            padding_y: 120,
            background: Rgba8::TRANSPARENT,
        }
    }
}

/// `confart keynotes` input: headshots in display order (left to right, top to bottom).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeynoteConfig {
    pub images: Vec<PathBuf>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub layout: KeynoteLayout,
}

fn default_output() -> PathBuf {
    PathBuf::from("keynotes_collage.png")
}

/// Single fill-mode headshot grid.
#[tracing::instrument(skip_all, fields(images = config.images.len()))]
pub fn run(config: &KeynoteConfig, ctx: &mut JobContext) -> ConfartResult<BatchReport> {
    let layout = &config.layout;
    let grid = GridLayout::new(
        GridSpec {
            columns: layout.columns,
            cell: layout.cell,
            padding_x: layout.padding_x,
            padding_y: layout.padding_y,
        },
        config.images.len(),
    )?;
    let spec = CellSpec::new(layout.cell, FitMode::Fill).background(layout.background);

    let mut report = BatchReport::new();
    let mut canvas = Canvas::new(grid.canvas_size(), layout.background);
    for (image, (x, y)) in config.images.iter().zip(grid.origins()) {
        let cell = ctx.prepare_cell(image, &spec, &mut report)?;
        canvas.paste(&cell, i64::from(x), i64::from(y));
    }

    let output = ctx.resolve(&config.output);
    canvas.save(&output, &PngOptions::default())?;
    report.record_output(output);
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/keynote.rs"]
mod tests;
