//! Brand recolouring of a raster logo.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// Colours used by [`recolor_gradient`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientPalette {
    /// Gradient colour at the left edge.
    pub start: Rgba8,
    /// Gradient colour at the right edge.
    pub end: Rgba8,
    /// Replacement for dark outline pixels.
    pub outline: Rgba8,
    /// Intensity of the gradient applied to light-grey texture pixels.
    pub light_factor: f32,
}

impl Default for GradientPalette {
    fn default() -> Self {
        Self {
            start: Rgba8::rgb(0x51, 0x24, 0x7a),
            end: Rgba8::rgb(0xbf, 0x87, 0x2b),
            outline: Rgba8::rgb(0x28, 0x14, 0x3c),
            light_factor: 0.7,
        }
    }
}

impl GradientPalette {
    fn at(&self, t: f32, factor: f32) -> [u8; 3] {
        let mix = |a: u8, b: u8| -> u8 {
            let v = f32::from(a) * factor * (1.0 - t) + f32::from(b) * factor * t;
            v.clamp(0.0, 255.0) as u8
        };
        [
            mix(self.start.r, self.end.r),
            mix(self.start.g, self.end.g),
            mix(self.start.b, self.end.b),
        ]
    }
}

/// Map a light-on-dark logo onto the palette.
///
/// Only pixels with alpha above 200 are touched, and alpha is always kept:
/// - white (every channel above 200) takes the left-to-right gradient at `x / width`
/// - light grey (every channel above 150) takes the gradient scaled by `light_factor`
/// - dark (every channel below 100) becomes `outline`
///
/// Everything else is copied unchanged.
pub fn recolor_gradient(src: &RgbaImage, palette: &GradientPalette) -> RgbaImage {
    let width = src.width().max(1) as f32;
    let mut out = src.clone();
    let (mut white, mut light, mut dark) = (0usize, 0usize, 0usize);

    for (x, _, px) in out.enumerate_pixels_mut() {
        let [r, g, b, a] = px.0;
        if a <= 200 {
            continue;
        }
        let t = x as f32 / width;
        let rgb = if r > 200 && g > 200 && b > 200 {
            white += 1;
            palette.at(t, 1.0)
        } else if r > 150 && g > 150 && b > 150 {
            light += 1;
            palette.at(t, palette.light_factor)
        } else if r < 100 && g < 100 && b < 100 {
            dark += 1;
            [palette.outline.r, palette.outline.g, palette.outline.b]
        } else {
            continue;
        };
        px.0 = [rgb[0], rgb[1], rgb[2], a];
    }

    tracing::debug!(white, light, dark, "recoloured logo pixels");
    out
}

#[cfg(test)]
#[path = "../tests/unit/recolor/gradient.rs"]
mod tests;
