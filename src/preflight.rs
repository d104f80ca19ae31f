use std::path::Path;

use crate::{
    assets::{
        fonts::{FontConfig, FontResolver, FontWeight},
        svg_raster::{SvgRasterizer, rasterize},
    },
    foundation::{
        core::{Rgba8, Size},
        error::{ConfartError, ConfartResult},
    },
    render::text::{TextEngine, TextStyle},
};

const PROBE_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4" fill="#ff0000"/></svg>"##;

/// Something a job needs before it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// SVG parsing and rasterization.
    Raster,
    /// Regular and bold fonts that shape and measure.
    Text,
}

/// Verify every capability in `needs`, failing with [`ConfartError::MissingDependency`].
///
/// Runs before any input is read so a broken environment fails fast with no partial output.
pub fn check(needs: &[Capability], fonts: &FontConfig, base_dir: &Path) -> ConfartResult<()> {
    for need in needs {
        match need {
            Capability::Raster => check_raster()?,
            Capability::Text => check_text(fonts, base_dir)?,
        }
        tracing::debug!(capability = ?need, "preflight ok");
    }
    Ok(())
}

fn check_raster() -> ConfartResult<()> {
    let unavailable =
        |e: ConfartError| ConfartError::missing_dependency(format!("SVG rasterizer unusable: {e}"));
    let rasterizer = SvgRasterizer::new();
    let tree = rasterizer.parse(PROBE_SVG, None, 96).map_err(unavailable)?;
    let img = rasterize(&tree, Size::new(4, 4)).map_err(unavailable)?;
    if img.get_pixel(2, 2).0 != Rgba8::rgb(255, 0, 0).to_pixel().0 {
        return Err(ConfartError::missing_dependency(
            "SVG rasterizer produced unexpected output",
        ));
    }
    Ok(())
}

fn check_text(fonts: &FontConfig, base_dir: &Path) -> ConfartResult<()> {
    let mut resolver = FontResolver::new(fonts.clone(), base_dir);
    let mut engine = TextEngine::new();
    for weight in [FontWeight::Regular, FontWeight::Bold] {
        let font = resolver.resolve(weight)?;
        let key = font.key.clone();
        let width = engine
            .measure("Ag", &TextStyle::new(font, 16.0, Rgba8::WHITE))
            .map_err(|e| {
                ConfartError::missing_dependency(format!("font {key} cannot shape text: {e}"))
            })?;
        if width <= 0.0 {
            return Err(ConfartError::missing_dependency(format!(
                "font {key} has no usable glyphs"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/preflight.rs"]
mod tests;
