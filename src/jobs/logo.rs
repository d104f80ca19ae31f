use std::path::{Path, PathBuf};

use crate::{
    assets::{
        decode::load_image,
        svg_raster::{RasterRequest, SvgRasterizer},
    },
    foundation::{
        core::Size,
        error::{ConfartError, ConfartResult},
    },
    jobs::convert::convert_file,
    recolor::{GradientPalette, recolor_gradient},
    render::output::{PngOptions, write_png},
    svg_edit::{
        caption::{ImagePlacement, LogoLayoutFix},
        embed::embed_png_in_element,
    },
};

/// `confart fix-logo` inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct FixLogoRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub fix: LogoLayoutFix,
    /// Also export the fixed SVG as PNG here.
    pub png: Option<PathBuf>,
    pub raster: RasterRequest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixLogoOutcome {
    pub svg: PathBuf,
    pub png: Option<(PathBuf, Size)>,
}

/// Repair the logo's caption layout, then optionally export it.
#[tracing::instrument(skip_all, fields(input = %req.input.display()))]
pub fn fix_logo(req: &FixLogoRequest, rasterizer: &SvgRasterizer) -> ConfartResult<FixLogoOutcome> {
    let svg = read_text(&req.input)?;
    let fixed = req
        .fix
        .apply(&svg)
        .map_err(|e| ConfartError::load(&req.input, e))?;
    write_text(&req.output, &fixed)?;

    let png = match &req.png {
        Some(png) => {
            let size = convert_file(rasterizer, &req.output, png, &req.raster)?;
            Some((png.clone(), size))
        }
        None => None,
    };
    Ok(FixLogoOutcome {
        svg: req.output.clone(),
        png,
    })
}

/// Where to embed the recoloured logo.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbedTarget {
    pub svg: PathBuf,
    /// `id` of the element whose children are replaced.
    pub target_id: String,
    pub placement: ImagePlacement,
    /// Defaults to rewriting `svg` in place.
    pub output: Option<PathBuf>,
}

impl EmbedTarget {
    pub const DEFAULT_PLACEMENT: ImagePlacement = ImagePlacement::new(0.0, 0.0, 200.0, 80.0);
}

/// `confart recolor-logo` inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct RecolorRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub palette: GradientPalette,
    pub embed: Option<EmbedTarget>,
}

/// Recolour a raster logo, save it, and optionally embed it into an SVG. Returns the files
/// written.
#[tracing::instrument(skip_all, fields(input = %req.input.display()))]
pub fn recolor_logo(
    req: &RecolorRequest,
    rasterizer: &SvgRasterizer,
) -> ConfartResult<Vec<PathBuf>> {
    let logo = load_image(&req.input, rasterizer)?;
    let recolored = recolor_gradient(&logo, &req.palette);
    write_png(&req.output, &recolored, &PngOptions::default())?;
    let mut written = vec![req.output.clone()];

    if let Some(embed) = &req.embed {
        let png = std::fs::read(&req.output).map_err(|e| ConfartError::load(&req.output, e))?;
        let svg = read_text(&embed.svg)?;
        let updated = embed_png_in_element(&svg, &embed.target_id, &png, &embed.placement)
            .map_err(|e| ConfartError::load(&embed.svg, e))?;
        let out = embed.output.clone().unwrap_or_else(|| embed.svg.clone());
        write_text(&out, &updated)?;
        written.push(out);
    }
    Ok(written)
}

fn read_text(path: &Path) -> ConfartResult<String> {
    if !path.is_file() {
        return Err(ConfartError::missing_input(path));
    }
    std::fs::read_to_string(path).map_err(|e| ConfartError::load(path, e))
}

fn write_text(path: &Path, text: &str) -> ConfartResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfartError::write(path, e))?;
    }
    std::fs::write(path, text).map_err(|e| ConfartError::write(path, e))
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/logo.rs"]
mod tests;
