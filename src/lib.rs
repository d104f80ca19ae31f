//! confart generates static conference artwork: headshot and logo grid collages, tiered sponsor
//! walls, T-shirt back layouts, and raster exports of SVG logos.
//!
//! Every job is a single linear pass:
//!
//! 1. **Load**: decode PNG/JPEG/WEBP inputs, rasterize SVG inputs ([`SvgRasterizer`])
//! 2. **Fit**: bring each input to its cell size ([`fit_cell`], fill or contain)
//! 3. **Lay out**: compute cell origins ([`GridLayout`], [`layout_tiers`]) and wrap captions
//!    ([`wrap_text`])
//! 4. **Composite**: paste cells and draw text onto a [`Canvas`], then write one PNG
//!
//! Inputs that are missing or undecodable are replaced by labelled placeholder cells in batch
//! jobs; everything else aborts the job with a [`ConfartError`].
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod layout;
mod recolor;
mod render;
mod svg_edit;

/// Job configuration and the collage/conversion entry points used by the CLI.
pub mod jobs;
/// Startup capability checks.
pub mod preflight;

pub use assets::decode::{decode_image, load_image, load_image_bounded};
pub use assets::fonts::{FontConfig, FontResolver, FontWeight, LoadedFont};
pub use assets::svg_raster::{
    DEFAULT_DPI, DEFAULT_RENDER_SCALE, RasterRequest, RasterSizing, SvgIntrinsic, SvgRasterizer,
    infer_raster_size,
};
pub use foundation::core::{Rgba8, Size};
pub use foundation::error::{ConfartError, ConfartResult};
pub use layout::grid::{GridLayout, GridSpec, paginate, rows_for};
pub use layout::tiers::{TierPlacement, TieredLayout, layout_tiers};
pub use layout::wrap::{try_wrap_text, wrap_text};
pub use recolor::{GradientPalette, recolor_gradient};
pub use render::canvas::{Canvas, Shape, ShapeStyle, clip_to_shape, placeholder, render_shape};
pub use render::fit::{FitMode, contain_size, fill_crop_rect, fit_cell};
pub use render::output::{PngOptions, write_png};
pub use render::text::{TextEngine, TextStyle};
pub use svg_edit::caption::{Caption, ImagePlacement, LogoLayoutFix};
pub use svg_edit::embed::embed_png_in_element;
