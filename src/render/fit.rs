use image::{RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Rgba8, Size};

/// How a source image is brought to a cell size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Centre-crop to the cell aspect ratio, then scale to fill it exactly.
    #[default]
    Fill,
    /// Scale (up or down) to fit inside the cell without cropping, centred.
    Contain,
    /// Like `Contain`, but never upscales.
    Thumbnail,
}

/// Centred crop `(x, y, width, height)` of `src` that matches the aspect ratio of `target`.
pub fn fill_crop_rect(src: Size, target: Size) -> (u32, u32, u32, u32) {
    let (sw, sh) = (u64::from(src.width), u64::from(src.height));
    let (tw, th) = (u64::from(target.width), u64::from(target.height));
    if sw * th > sh * tw {
        // Source is wider: keep full height.
        let cw = ((sh * tw + th / 2) / th).clamp(1, sw) as u32;
        ((src.width - cw) / 2, 0, cw, src.height)
    } else {
        let ch = ((sw * th + tw / 2) / tw).clamp(1, sh) as u32;
        (0, (src.height - ch) / 2, src.width, ch)
    }
}

/// Largest aspect-preserving size of `src` that fits in `bound`.
pub fn contain_size(src: Size, bound: Size) -> Size {
    let scale = (f64::from(bound.width) / f64::from(src.width))
        .min(f64::from(bound.height) / f64::from(src.height));
    let w = ((f64::from(src.width) * scale).round() as u32).clamp(1, bound.width.max(1));
    let h = ((f64::from(src.height) * scale).round() as u32).clamp(1, bound.height.max(1));
    Size::new(w, h)
}

/// Produce an image of exactly `cell` pixels from `src`.
///
/// `margin` shrinks the area the source may occupy in contain/thumbnail mode; the remainder of
/// the cell is filled with `background`. Resampling uses Lanczos3.
pub fn fit_cell(
    src: &RgbaImage,
    cell: Size,
    mode: FitMode,
    margin: u32,
    background: Rgba8,
) -> RgbaImage {
    let src_size = Size::new(src.width(), src.height());
    if src_size.is_empty() || cell.is_empty() {
        return RgbaImage::from_pixel(cell.width, cell.height, background.to_pixel());
    }

    match mode {
        FitMode::Fill => {
            let (x, y, w, h) = fill_crop_rect(src_size, cell);
            let cropped = imageops::crop_imm(src, x, y, w, h).to_image();
            let fitted = resample(&cropped, cell);
            if background.a == 0 {
                return fitted;
            }
            let mut out = RgbaImage::from_pixel(cell.width, cell.height, background.to_pixel());
            imageops::overlay(&mut out, &fitted, 0, 0);
            out
        }
        FitMode::Contain | FitMode::Thumbnail => {
            let bound = cell.inset(margin);
            let mut target = contain_size(src_size, bound);
            if mode == FitMode::Thumbnail
                && (target.width > src_size.width || target.height > src_size.height)
            {
                target = src_size;
            }
            let fitted = resample(src, target);
            let mut out = RgbaImage::from_pixel(cell.width, cell.height, background.to_pixel());
            let x = (i64::from(cell.width) - i64::from(target.width)) / 2;
            let y = (i64::from(cell.height) - i64::from(target.height)) / 2;
            imageops::overlay(&mut out, &fitted, x, y);
            out
        }
    }
}

fn resample(src: &RgbaImage, target: Size) -> RgbaImage {
    if src.dimensions() == (target.width, target.height) {
        return src.clone();
    }
    imageops::resize(
        src,
        target.width,
        target.height,
        imageops::FilterType::Lanczos3,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
