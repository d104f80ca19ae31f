use base64::Engine as _;

use crate::{
    foundation::error::{ConfartError, ConfartResult},
    svg_edit::{
        caption::ImagePlacement,
        edits::{EditList, content_range, fmt_num, parse_document, start_tag_end},
    },
};

/// Replace the children of the element whose `id` is `target_id` with a single `<image>` that
/// carries `png` as a base64 data URI.
///
/// An empty-element tag (`<g id="x"/>`) is expanded into an open/close pair.
pub fn embed_png_in_element(
    svg: &str,
    target_id: &str,
    png: &[u8],
    placement: &ImagePlacement,
) -> ConfartResult<String> {
    let doc = parse_document(svg)?;
    let target = doc
        .descendants()
        .find(|n| n.is_element() && n.attribute("id") == Some(target_id))
        .ok_or_else(|| {
            ConfartError::validation(format!("no element with id \"{target_id}\" in SVG"))
        })?;

    let image = format!(
        r#"<image href="data:image/png;base64,{data}" x="{x}" y="{y}" width="{w}" height="{h}" preserveAspectRatio="xMidYMid meet"/>"#,
        data = base64::engine::general_purpose::STANDARD.encode(png),
        x = fmt_num(placement.x),
        y = fmt_num(placement.y),
        w = fmt_num(placement.width),
        h = fmt_num(placement.height),
    );

    let mut edits = EditList::new();
    match content_range(svg, target) {
        Some(inner) => edits.replace(inner, image),
        None => {
            let range = target.range();
            let tag_end = start_tag_end(svg, range.start)
                .filter(|&end| svg[..end].ends_with("/>"))
                .ok_or_else(|| ConfartError::validation("malformed start tag"))?;
            let open = svg[range.start..tag_end - 2].trim_end();
            let name = svg[range.start + 1..tag_end]
                .split(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
                .next()
                .unwrap_or_default();
            edits.replace(range, format!("{open}>{image}</{name}>"));
        }
    }
    tracing::debug!(target_id, bytes = png.len(), "embedding png");
    edits.apply(svg)
}

#[cfg(test)]
#[path = "../../tests/unit/svg_edit/embed.rs"]
mod tests;
