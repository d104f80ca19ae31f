use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::{
    assets::svg_raster::{RasterRequest, SvgRasterizer},
    foundation::{
        core::Size,
        error::{ConfartError, ConfartResult},
    },
};

/// Decode encoded raster bytes (PNG, JPEG, WEBP, ...) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> ConfartResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Load any supported input file as RGBA8.
///
/// SVG files are rasterized at their intrinsic size (scale 1). Missing files surface as
/// [`ConfartError::MissingInput`], undecodable ones as [`ConfartError::Load`].
pub fn load_image(path: &Path, rasterizer: &SvgRasterizer) -> ConfartResult<RgbaImage> {
    if is_svg(path) {
        let req = RasterRequest {
            scale: Some(1.0),
            ..Default::default()
        };
        return rasterizer.render_file(path, &req);
    }
    load_raster(path)
}

/// Like [`load_image`], but SVG inputs are rendered directly at the largest size that fits in
/// `bound`, so vector logos never get upscaled from a small raster.
pub fn load_image_bounded(
    path: &Path,
    bound: Size,
    rasterizer: &SvgRasterizer,
) -> ConfartResult<RgbaImage> {
    if is_svg(path) {
        return rasterizer.render_file_within(path, bound);
    }
    load_raster(path)
}

fn load_raster(path: &Path) -> ConfartResult<RgbaImage> {
    if !path.is_file() {
        return Err(ConfartError::missing_input(path));
    }
    let bytes = std::fs::read(path).map_err(|e| ConfartError::load(path, e))?;
    decode_image(&bytes).map_err(|e| ConfartError::load(path, format!("{e:#}")))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
