use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    assets::fonts::{FontConfig, FontWeight},
    foundation::{
        core::{Rgba8, Size},
        error::{ConfartError, ConfartResult},
    },
    jobs::{
        context::{CellSpec, JobContext},
        report::BatchReport,
    },
    layout::grid::{GridLayout, GridSpec, paginate},
    render::{
        canvas::Canvas,
        fit::FitMode,
        output::PngOptions,
        text::TextStyle,
    },
};

/// One committee member in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub affiliation: String,
    pub image: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitteeLayout {
    pub columns: u32,
    pub rows_per_page: u32,
    pub cell: Size,
    pub headshot: Size,
    pub padding_x: u32,
    pub padding_y: u32,
    pub background: Rgba8,
    pub text_color: Rgba8,
    pub role_color: Rgba8,
    pub name_size: f32,
    pub role_size: f32,
    pub info_size: f32,
    /// Space between the headshot and the first name line.
    pub text_offset: u32,
    /// Horizontal slack: lines wrap at `cell.width - text_inset`.
    pub text_inset: u32,
}

impl Default for CommitteeLayout {
    fn default() -> Self {
        Self {
            columns: 6,
            rows_per_page: 2,
            cell: Size::new(420, 480),
            headshot: Size::new(320, 320),
            padding_x: 10,
            padding_y: 10,
            background: Rgba8::TRANSPARENT,
            text_color: Rgba8::rgb(30, 30, 30),
            role_color: Rgba8::rgb(81, 36, 122),
            name_size: 32.0,
            role_size: 24.0,
            info_size: 24.0,
            text_offset: 14,
            text_inset: 20,
        }
    }
}

impl CommitteeLayout {
    pub fn per_page(&self) -> usize {
        (self.columns.max(1) * self.rows_per_page.max(1)) as usize
    }
}

/// `confart committee` input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommitteeConfig {
    pub people: Vec<Person>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub layout: CommitteeLayout,
    #[serde(default)]
    pub fonts: FontConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

struct CommitteeStyles {
    name: TextStyle,
    role: TextStyle,
    info: TextStyle,
}

/// Output file name of page `index` (0-based).
pub fn page_file_name(index: usize) -> String {
    format!("committee_collage_{}.png", index + 1)
}

/// Write one collage per `columns * rows_per_page` people.
#[tracing::instrument(skip_all, fields(people = config.people.len()))]
pub fn run(config: &CommitteeConfig, ctx: &mut JobContext) -> ConfartResult<BatchReport> {
    let layout = &config.layout;
    if layout.headshot.width > layout.cell.width || layout.headshot.height > layout.cell.height {
        return Err(ConfartError::validation("headshot must fit inside the cell"));
    }
    let styles = CommitteeStyles {
        name: ctx.style(FontWeight::Bold, layout.name_size, layout.text_color)?,
        role: ctx.style(FontWeight::Bold, layout.role_size, layout.role_color)?,
        info: ctx.style(FontWeight::Regular, layout.info_size, layout.text_color)?,
    };
    let out_dir = ctx.resolve(&config.output_dir);

    let mut report = BatchReport::new();
    for (page_index, people) in paginate(&config.people, layout.per_page()).enumerate() {
        let path = out_dir.join(page_file_name(page_index));
        build_page(people, layout, &styles, &path, ctx, &mut report)?;
        report.record_output(path);
    }
    Ok(report)
}

fn build_page(
    people: &[Person],
    layout: &CommitteeLayout,
    styles: &CommitteeStyles,
    path: &Path,
    ctx: &mut JobContext,
    report: &mut BatchReport,
) -> ConfartResult<()> {
    let grid = GridLayout::new(
        GridSpec {
            columns: layout.columns,
            cell: layout.cell,
            padding_x: layout.padding_x,
            padding_y: layout.padding_y,
        },
        people.len(),
    )?;
    let mut canvas = Canvas::new(grid.canvas_size(), layout.background);

    for (person, (x, y)) in people.iter().zip(grid.origins()) {
        tracing::debug!(name = %person.name, x, y, "placing person");
        draw_person(&mut canvas, person, (x, y), layout, styles, ctx, report)?;
    }
    canvas.save(path, &PngOptions::default())
}

fn draw_person(
    canvas: &mut Canvas,
    person: &Person,
    (x0, y0): (u32, u32),
    layout: &CommitteeLayout,
    styles: &CommitteeStyles,
    ctx: &mut JobContext,
    report: &mut BatchReport,
) -> ConfartResult<()> {
    let spec = CellSpec::new(layout.headshot, FitMode::Fill);
    let headshot = ctx.prepare_cell(&person.image, &spec, report)?;
    let headshot_x = x0 + (layout.cell.width - layout.headshot.width) / 2;
    canvas.paste(&headshot, i64::from(headshot_x), i64::from(y0));

    let cell_x = i64::from(x0);
    let max_width = layout.cell.width.saturating_sub(layout.text_inset) as f32;
    let mut cursor = i64::from(y0 + layout.headshot.height + layout.text_offset);

    let blocks = [
        (&person.name, &styles.name, 4),
        (&person.role, &styles.role, 2),
        (&person.affiliation, &styles.info, 2),
    ];
    for (i, (text, style, leading)) in blocks.into_iter().enumerate() {
        if i > 0 {
            cursor += 2;
        }
        for line in ctx.wrap(text, style, max_width)? {
            ctx.draw_centered(canvas, &line, style, cell_x, layout.cell.width, cursor)?;
            cursor += style.size_px.round() as i64 + leading;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/committee.rs"]
mod tests;
