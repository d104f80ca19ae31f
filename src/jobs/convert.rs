use std::path::{Path, PathBuf};

use crate::{
    assets::svg_raster::{RasterRequest, SvgRasterizer},
    foundation::{
        core::Size,
        error::{ConfartError, ConfartResult},
    },
    jobs::report::BatchReport,
    render::output::{PngOptions, write_png},
};

/// What `svg2png` will do for a set of command-line inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConvertPlan {
    /// One file; failures abort.
    Single { input: PathBuf, output: PathBuf },
    /// Many files; failures are counted and skipped.
    Batch { items: Vec<(PathBuf, PathBuf)> },
}

/// Resolve inputs into `(svg, png)` pairs.
///
/// A lone file input without `batch` is single-file mode, writing to `output` or next to the
/// input. Otherwise every directory input expands to its `*.svg` files (sorted by name) and
/// every file input is kept as given, missing or not; `output` is then a directory that
/// defaults to each input's own directory.
pub fn plan(inputs: &[PathBuf], output: Option<&Path>, batch: bool) -> ConfartResult<ConvertPlan> {
    let [first, rest @ ..] = inputs else {
        return Err(ConfartError::validation("no input given"));
    };
    if rest.is_empty() && !batch && !first.is_dir() {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| first.with_extension("png"));
        return Ok(ConvertPlan::Single {
            input: first.clone(),
            output,
        });
    }

    let mut items = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let out_dir = output.unwrap_or(input.as_path());
            for svg in collect_svgs(input)? {
                let png = out_dir.join(png_name(&svg));
                items.push((svg, png));
            }
        } else {
            let parent = input.parent().unwrap_or(Path::new(""));
            let out_dir = output.unwrap_or(parent);
            items.push((input.clone(), out_dir.join(png_name(input))));
        }
    }
    Ok(ConvertPlan::Batch { items })
}

/// `*.svg` files directly inside `dir`, sorted by path.
pub fn collect_svgs(dir: &Path) -> ConfartResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ConfartError::load(dir, e))?;
    let mut svgs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConfartError::load(dir, e))?.path();
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg && path.is_file() {
            svgs.push(path);
        }
    }
    svgs.sort();
    Ok(svgs)
}

fn png_name(svg: &Path) -> PathBuf {
    let stem = svg.file_stem().unwrap_or(svg.as_os_str());
    PathBuf::from(stem).with_extension("png")
}

/// Rasterize one SVG to PNG; returns the pixel size written.
#[tracing::instrument(skip(rasterizer))]
pub fn convert_file(
    rasterizer: &SvgRasterizer,
    input: &Path,
    output: &Path,
    req: &RasterRequest,
) -> ConfartResult<Size> {
    let img = rasterizer.render_file(input, req)?;
    write_png(output, &img, &PngOptions::with_dpi(req.dpi))?;
    Ok(Size::new(img.width(), img.height()))
}

/// Convert every pair, continuing past missing or unreadable inputs.
///
/// Any other failure, such as an unwritable output, aborts the batch.
pub fn convert_batch(
    rasterizer: &SvgRasterizer,
    items: &[(PathBuf, PathBuf)],
    req: &RasterRequest,
) -> ConfartResult<BatchReport> {
    let mut report = BatchReport::new();
    for (input, output) in items {
        match convert_file(rasterizer, input, output, req) {
            Ok(_) => {
                report.record_success();
                report.record_output(output.clone());
            }
            Err(err) if err.is_recoverable() => {
                tracing::warn!(input = %input.display(), error = %err, "conversion failed");
                report.record_failure(input, &err);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/convert.rs"]
mod tests;
