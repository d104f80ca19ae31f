use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::{
    assets::{
        decode::{load_image, load_image_bounded},
        fonts::{FontConfig, FontResolver, FontWeight},
        svg_raster::SvgRasterizer,
    },
    foundation::{
        core::{Rgba8, Size},
        error::ConfartResult,
    },
    jobs::{config::resolve_path, report::BatchReport},
    layout::wrap::try_wrap_text,
    render::{
        canvas::{Canvas, PLACEHOLDER_TEXT, Shape, placeholder},
        fit::{FitMode, fit_cell},
        text::{TextEngine, TextStyle},
    },
};

const PLACEHOLDER_LABEL_PX: f32 = 12.0;

/// How one input becomes a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSpec {
    pub size: Size,
    pub mode: FitMode,
    /// Inset for contain/thumbnail fitting.
    pub margin: u32,
    pub background: Rgba8,
    /// Outline used for the placeholder when the input cannot be loaded.
    pub shape: Shape,
    /// Render SVG inputs straight at the cell bound instead of their intrinsic size.
    pub vector_at_cell_size: bool,
}

impl CellSpec {
    pub fn new(size: Size, mode: FitMode) -> Self {
        Self {
            size,
            mode,
            margin: 0,
            background: Rgba8::TRANSPARENT,
            shape: Shape::Rect,
            vector_at_cell_size: false,
        }
    }

    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn vector_at_cell_size(mut self) -> Self {
        self.vector_at_cell_size = true;
        self
    }
}

/// Shared state for one job run.
pub struct JobContext {
    base_dir: PathBuf,
    rasterizer: SvgRasterizer,
    fonts: FontResolver,
    text: TextEngine,
}

impl JobContext {
    /// Relative inputs and outputs resolve against `base_dir`; fonts in `base_dir/fonts` are
    /// available to SVG text.
    pub fn new(fonts: FontConfig, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let font_dir = base_dir.join("fonts");
        let rasterizer = if font_dir.is_dir() {
            SvgRasterizer::with_font_dirs(vec![font_dir])
        } else {
            SvgRasterizer::new()
        };
        Self {
            fonts: FontResolver::new(fonts, &base_dir),
            base_dir,
            rasterizer,
            text: TextEngine::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_path(&self.base_dir, path)
    }

    pub fn rasterizer(&self) -> &SvgRasterizer {
        &self.rasterizer
    }

    pub fn style(
        &mut self,
        weight: FontWeight,
        size_px: f32,
        color: Rgba8,
    ) -> ConfartResult<TextStyle> {
        let font = self.fonts.resolve(weight)?;
        Ok(TextStyle::new(font, size_px, color))
    }

    /// Lines of `text` no wider than `max_width` in `style`.
    pub fn wrap(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: f32,
    ) -> ConfartResult<Vec<String>> {
        try_wrap_text(text, max_width, |s| self.text.measure(s, style))
    }

    pub fn draw_centered(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        style: &TextStyle,
        cell_x: i64,
        cell_width: u32,
        y: i64,
    ) -> ConfartResult<f32> {
        canvas.draw_text_centered(&mut self.text, text, style, cell_x, cell_width, y)
    }

    /// Centre `text` on the point `(center_x, center_y)`.
    pub fn draw_around(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        style: &TextStyle,
        center_x: i64,
        center_y: i64,
    ) -> ConfartResult<()> {
        let line_h = self.text.line_height(style)?;
        let top = center_y - (line_h / 2.0).round() as i64;
        canvas.draw_text_around(&mut self.text, text, style, center_x, top)?;
        Ok(())
    }

    pub fn line_height(&mut self, style: &TextStyle) -> ConfartResult<f32> {
        self.text.line_height(style)
    }

    /// Load `path` and fit it to `spec`.
    ///
    /// Missing or undecodable inputs are recorded in `report` and replaced by a placeholder
    /// labelled with the file stem; any other failure aborts.
    pub fn prepare_cell(
        &mut self,
        path: &Path,
        spec: &CellSpec,
        report: &mut BatchReport,
    ) -> ConfartResult<RgbaImage> {
        let full = self.resolve(path);
        let loaded = if spec.vector_at_cell_size {
            load_image_bounded(&full, spec.size.inset(spec.margin), &self.rasterizer)
        } else {
            load_image(&full, &self.rasterizer)
        };
        match loaded {
            Ok(img) => {
                report.record_success();
                Ok(fit_cell(&img, spec.size, spec.mode, spec.margin, spec.background))
            }
            Err(err) if err.is_recoverable() => {
                tracing::warn!(input = %full.display(), error = %err, "using placeholder");
                report.record_failure(&full, &err);
                self.placeholder(&full, spec)
            }
            Err(err) => Err(err),
        }
    }

    fn placeholder(&mut self, path: &Path, spec: &CellSpec) -> ConfartResult<RgbaImage> {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let style = match self.style(FontWeight::Regular, PLACEHOLDER_LABEL_PX, PLACEHOLDER_TEXT) {
            Ok(style) => Some(style),
            Err(e) => {
                tracing::debug!(error = %e, "placeholder drawn without label");
                None
            }
        };
        placeholder(
            spec.size,
            spec.shape,
            &label,
            style.as_ref().map(|s| (&mut self.text, s)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/context.rs"]
mod tests;
