use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use image::RgbaImage;

use crate::foundation::{
    core::{Size, unpremultiply_rgba8_in_place},
    error::{ConfartError, ConfartResult},
};

/// Render-scale multiplier used when neither an output width nor height is requested.
pub const DEFAULT_RENDER_SCALE: f32 = 5.0;

/// Default DPI for unit conversion and PNG metadata.
pub const DEFAULT_DPI: u32 = 300;

// Avoid pathological allocations from huge scale factors.
const MAX_DIM: u32 = 16_384;

/// Requested output geometry for an SVG raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterRequest {
    /// Explicit pixel width.
    pub width: Option<u32>,
    /// Explicit pixel height.
    pub height: Option<u32>,
    /// Uniform multiplier on the intrinsic size, used when no explicit size is given.
    pub scale: Option<f32>,
    /// Dots per inch used to resolve physical units (`mm`, `in`, `pt`).
    pub dpi: u32,
}

impl Default for RasterRequest {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            scale: None,
            dpi: DEFAULT_DPI,
        }
    }
}

/// Intrinsic geometry read straight from the root `<svg>` attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SvgIntrinsic {
    /// Absolute width when given unitless or in `px`.
    pub width: Option<f64>,
    /// Absolute height when given unitless or in `px`.
    pub height: Option<f64>,
    /// `viewBox` as `[min_x, min_y, width, height]`.
    pub view_box: Option<[f64; 4]>,
}

impl SvgIntrinsic {
    /// Parse root attributes; malformed values are treated as absent.
    pub fn parse(svg_text: &str) -> ConfartResult<Self> {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(svg_text, opts)
            .map_err(|e| ConfartError::validation(format!("invalid svg markup: {e}")))?;
        let root = doc.root_element();
        if !root.has_tag_name("svg") {
            return Err(ConfartError::validation("root element is not <svg>"));
        }

        let view_box = root.attribute("viewBox").and_then(|vb| {
            let parts: Vec<f64> = vb
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|p| !p.is_empty())
                .map(str::parse::<f64>)
                .collect::<Result<_, _>>()
                .ok()?;
            <[f64; 4]>::try_from(parts).ok()
        });

        Ok(Self {
            width: root.attribute("width").and_then(parse_px),
            height: root.attribute("height").and_then(parse_px),
            view_box,
        })
    }

    /// Height / width ratio: absolute size first, then `viewBox`, else square.
    pub fn aspect_ratio(&self) -> f64 {
        match (self.width, self.height, self.view_box) {
            (Some(w), Some(h), _) if w > 0.0 && h > 0.0 => h / w,
            (_, _, Some([_, _, vbw, vbh])) if vbw > 0.0 && vbh > 0.0 => vbh / vbw,
            _ => 1.0,
        }
    }
}

fn parse_px(v: &str) -> Option<f64> {
    let v = v.trim();
    let v = v.strip_suffix("px").unwrap_or(v).trim();
    v.parse::<f64>().ok().filter(|n| n.is_finite() && *n > 0.0)
}

/// Resolved sizing decision for one raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RasterSizing {
    /// Render into exactly this many pixels.
    Exact(Size),
    /// Render at the intrinsic size times this factor.
    Scale(f32),
}

/// Decide how to size an SVG raster.
///
/// Priority: explicit width and height; one explicit side with the other derived from
/// [`SvgIntrinsic::aspect_ratio`]; otherwise the requested scale, defaulting to
/// [`DEFAULT_RENDER_SCALE`].
pub fn infer_raster_size(intrinsic: &SvgIntrinsic, req: &RasterRequest) -> RasterSizing {
    let ratio = intrinsic.aspect_ratio();
    match (req.width, req.height) {
        (Some(w), Some(h)) => RasterSizing::Exact(Size::new(w.max(1), h.max(1))),
        (Some(w), None) => {
            let h = ((f64::from(w) * ratio).round() as u32).max(1);
            RasterSizing::Exact(Size::new(w.max(1), h))
        }
        (None, Some(h)) => {
            let w = ((f64::from(h) / ratio).round() as u32).max(1);
            RasterSizing::Exact(Size::new(w, h.max(1)))
        }
        (None, None) => {
            let s = req
                .scale
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(DEFAULT_RENDER_SCALE);
            RasterSizing::Scale(s)
        }
    }
}

/// Parses and rasterizes SVG documents with a shared font database.
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    font_dirs: Vec<PathBuf>,
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRasterizer {
    /// Rasterizer backed by the system fonts.
    pub fn new() -> Self {
        Self::with_font_dirs(Vec::new())
    }

    /// Rasterizer that additionally loads every font file in `dirs`.
    pub fn with_font_dirs(dirs: Vec<PathBuf>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in &dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        Self {
            fontdb: Arc::new(db),
            font_dirs: dirs,
        }
    }

    /// Parse SVG bytes; `resources_dir` resolves relative `href`s.
    pub fn parse(
        &self,
        bytes: &[u8],
        resources_dir: Option<&Path>,
        dpi: u32,
    ) -> ConfartResult<usvg::Tree> {
        let opts = usvg::Options {
            resources_dir: resources_dir.map(Path::to_path_buf),
            dpi: dpi as f32,
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        usvg::Tree::from_data(bytes, &opts).map_err(|e| ConfartError::validation(e.to_string()))
    }

    /// Read and parse an SVG file, classifying failures for the batch policy.
    pub fn load_tree(&self, path: &Path, dpi: u32) -> ConfartResult<usvg::Tree> {
        let bytes = read_svg_bytes(path)?;
        self.parse(&bytes, path.parent(), dpi)
            .map_err(|e| ConfartError::load(path, e))
    }

    /// Rasterize an SVG file following [`infer_raster_size`].
    #[tracing::instrument(skip(self))]
    pub fn render_file(&self, path: &Path, req: &RasterRequest) -> ConfartResult<RgbaImage> {
        let bytes = read_svg_bytes(path)?;
        let tree = self
            .parse(&bytes, path.parent(), req.dpi)
            .map_err(|e| ConfartError::load(path, e))?;
        let text = std::str::from_utf8(&bytes).map_err(|e| ConfartError::load(path, e))?;
        let intrinsic = SvgIntrinsic::parse(text).map_err(|e| ConfartError::load(path, e))?;
        let size = self
            .target_size(&tree, &intrinsic, req)
            .map_err(|e| ConfartError::load(path, e))?;
        tracing::debug!(width = size.width, height = size.height, "svg raster size");
        rasterize(&tree, size)
    }

    /// Rasterize an SVG file so that it fits inside `bound` without cropping.
    pub fn render_file_within(&self, path: &Path, bound: Size) -> ConfartResult<RgbaImage> {
        let tree = self.load_tree(path, DEFAULT_DPI)?;
        let tw = tree.size().width();
        let th = tree.size().height();
        let scale = (bound.width as f32 / tw).min(bound.height as f32 / th);
        let size = scaled_size(tw, th, scale)?;
        rasterize(&tree, size)
    }

    /// Pixel size for `tree` under `req`.
    pub fn target_size(
        &self,
        tree: &usvg::Tree,
        intrinsic: &SvgIntrinsic,
        req: &RasterRequest,
    ) -> ConfartResult<Size> {
        let size = match infer_raster_size(intrinsic, req) {
            RasterSizing::Exact(size) => size,
            RasterSizing::Scale(s) => scaled_size(tree.size().width(), tree.size().height(), s)?,
        };
        if size.width > MAX_DIM || size.height > MAX_DIM {
            return Err(ConfartError::validation(format!(
                "svg raster size too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
                size.width, size.height
            )));
        }
        Ok(size)
    }

    /// Extra font directories this rasterizer was built with.
    pub fn font_dirs(&self) -> &[PathBuf] {
        &self.font_dirs
    }
}

fn read_svg_bytes(path: &Path) -> ConfartResult<Vec<u8>> {
    if !path.is_file() {
        return Err(ConfartError::missing_input(path));
    }
    std::fs::read(path).map_err(|e| ConfartError::load(path, e))
}

fn scaled_size(w: f32, h: f32, scale: f32) -> ConfartResult<Size> {
    fn to_px(v: f32) -> ConfartResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ConfartError::validation("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }
    Ok(Size::new(to_px(w * scale)?, to_px(h * scale)?))
}

/// Render `tree` stretched to exactly `size` and return straight RGBA.
pub fn rasterize(tree: &usvg::Tree, size: Size) -> ConfartResult<RgbaImage> {
    if size.width > MAX_DIM || size.height > MAX_DIM {
        return Err(ConfartError::validation(format!(
            "svg raster size too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
            size.width, size.height
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
        .ok_or_else(|| ConfartError::validation("failed to allocate svg pixmap"))?;

    let sx = (size.width as f32) / tree.size().width();
    let sy = (size.height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());

    let mut data = pixmap.take();
    unpremultiply_rgba8_in_place(&mut data);
    RgbaImage::from_raw(size.width, size.height, data)
        .ok_or_else(|| ConfartError::validation("svg pixmap byte length mismatch"))
}

pub(crate) fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
