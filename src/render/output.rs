use std::{fs::File, io::BufWriter, path::Path};

use image::RgbaImage;
use png::{BitDepth, ColorType, Compression, Encoder, PixelDimensions, Unit};

use crate::foundation::error::{ConfartError, ConfartResult};

const METERS_PER_INCH: f64 = 0.0254;

/// PNG encoding knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PngOptions {
    /// Physical resolution recorded in the `pHYs` chunk.
    pub dpi: Option<u32>,
    /// Keep the alpha channel; `false` writes opaque RGB.
    pub alpha: bool,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            dpi: None,
            alpha: true,
        }
    }
}

impl PngOptions {
    pub fn with_dpi(dpi: u32) -> Self {
        Self {
            dpi: Some(dpi),
            ..Self::default()
        }
    }

    pub fn opaque(mut self) -> Self {
        self.alpha = false;
        self
    }
}

/// Encode `img` as PNG at `path`, creating parent directories.
pub fn write_png(path: &Path, img: &RgbaImage, opts: &PngOptions) -> ConfartResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfartError::write(path, e))?;
    }
    let file = File::create(path).map_err(|e| ConfartError::write(path, e))?;

    let mut enc = Encoder::new(BufWriter::new(file), img.width(), img.height());
    enc.set_depth(BitDepth::Eight);
    enc.set_compression(Compression::Default);
    if let Some(dpi) = opts.dpi {
        let ppm = (f64::from(dpi) / METERS_PER_INCH).round() as u32;
        enc.set_pixel_dims(Some(PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: Unit::Meter,
        }));
    }

    let data: Vec<u8> = if opts.alpha {
        enc.set_color(ColorType::Rgba);
        img.as_raw().clone()
    } else {
        enc.set_color(ColorType::Rgb);
        img.pixels().flat_map(|p| [p[0], p[1], p[2]]).collect()
    };

    let mut writer = enc
        .write_header()
        .map_err(|e| ConfartError::write(path, e))?;
    writer
        .write_image_data(&data)
        .map_err(|e| ConfartError::write(path, e))?;
    writer.finish().map_err(|e| ConfartError::write(path, e))?;
    tracing::debug!(path = %path.display(), w = img.width(), h = img.height(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;
