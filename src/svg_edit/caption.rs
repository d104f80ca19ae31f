use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{ConfartError, ConfartResult},
    svg_edit::edits::{
        AttrSpan, EditList, attribute_spans, content_range, escape_attr, escape_text, fmt_num,
        parse_document, start_tag_end, whitespace_start,
    },
};

const CAPTION_INDENT: &str = "\n    ";

/// One caption line, introduced by a `<!-- marker -->` comment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// Comment text that identifies this caption's block.
    pub marker: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    #[serde(default)]
    pub bold: bool,
    pub fill: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

fn default_font_family() -> String {
    "Arial, sans-serif".to_string()
}

impl Caption {
    fn to_markup(&self) -> String {
        let weight = if self.bold {
            r#" font-weight="bold""#
        } else {
            ""
        };
        format!(
            r#"{CAPTION_INDENT}<!-- {marker} -->{CAPTION_INDENT}<text x="{x}" y="{y}" font-family="{family}" font-size="{size}"{weight} fill="{fill}" text-anchor="middle">{text}</text>"#,
            marker = self.marker.replace("--", "- -"),
            x = fmt_num(self.x),
            y = fmt_num(self.y),
            family = escape_attr(&self.font_family),
            size = fmt_num(self.font_size),
            fill = escape_attr(&self.fill),
            text = escape_text(&self.text),
        )
    }
}

/// Position and size forced onto the logo's embedded `<image>`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImagePlacement {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn value(&self, attr: &str) -> Option<f64> {
        match attr {
            "x" => Some(self.x),
            "y" => Some(self.y),
            "width" => Some(self.width),
            "height" => Some(self.height),
            _ => None,
        }
    }
}

/// Caption and image layout repair for the conference logo SVG.
///
/// [`LogoLayoutFix::apply`] is idempotent: every existing caption block is removed before the
/// configured captions are inserted once, so reruns never accumulate duplicates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogoLayoutFix {
    pub captions: Vec<Caption>,
    pub image: Option<ImagePlacement>,
}

impl Default for LogoLayoutFix {
    fn default() -> Self {
        Self::conference(
            ImagePlacement::new(0.0, 10.0, 140.0, 48.0),
            43.0,
            (128.0, 118.0),
            "#4A4A4A",
        )
    }
}

impl LogoLayoutFix {
    /// The two-line conference caption: name (bold 10px) at `text_y`, location and date (9px)
    /// one line below, both centred on their x coordinate.
    pub fn conference(image: ImagePlacement, text_y: f64, xs: (f64, f64), fill: &str) -> Self {
        Self {
            captions: vec![
                Caption {
                    marker: "Conference name".to_string(),
                    text: "Australian Joint Conference on AI".to_string(),
                    x: xs.0,
                    y: text_y,
                    font_size: 10.0,
                    bold: true,
                    fill: fill.to_string(),
                    font_family: default_font_family(),
                },
                Caption {
                    marker: "Location and date".to_string(),
                    text: "Canberra, Australia \u{2022} Dec 1-5, 2025".to_string(),
                    x: xs.1,
                    y: text_y + 10.0,
                    font_size: 9.0,
                    bold: false,
                    fill: fill.to_string(),
                    font_family: default_font_family(),
                },
            ],
            image: Some(image),
        }
    }

    /// Rewrite `svg`, leaving every byte outside the touched nodes as it was.
    pub fn apply(&self, svg: &str) -> ConfartResult<String> {
        let doc = parse_document(svg)?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(ConfartError::validation("root element is not <svg>"));
        }

        let mut edits = EditList::new();
        let removed = self.remove_captions(svg, &doc, &mut edits);

        let resized = match self.image {
            Some(placement) => resize_first_image(svg, &doc, &placement, &mut edits)?,
            None => false,
        };

        if !self.captions.is_empty() {
            let at = caption_anchor(svg, root).ok_or_else(|| {
                ConfartError::validation("no insertion point for captions (need <g> or </svg>)")
            })?;
            let markup: String = self.captions.iter().map(Caption::to_markup).collect();
            edits.insert(at, markup);
        }

        tracing::debug!(removed, resized, edits = edits.len(), "logo layout edits");
        edits.apply(svg)
    }

    // Marker comment plus its following <text> sibling, with the whitespace in front.
    fn remove_captions(
        &self,
        svg: &str,
        doc: &roxmltree::Document<'_>,
        edits: &mut EditList,
    ) -> usize {
        let mut removed = 0;
        for node in doc.descendants().filter(|n| n.is_comment()) {
            let Some(comment) = node.text() else {
                continue;
            };
            if !self.captions.iter().any(|c| c.marker == comment.trim()) {
                continue;
            }
            let mut end = node.range().end;
            let mut next = node.next_sibling();
            while let Some(n) = next {
                if n.is_text() && n.text().is_some_and(|t| t.trim().is_empty()) {
                    next = n.next_sibling();
                    continue;
                }
                if n.is_element() && n.tag_name().name() == "text" {
                    end = n.range().end;
                }
                break;
            }
            edits.delete(whitespace_start(svg, node.range().start)..end);
            removed += 1;
        }
        removed
    }
}

fn resize_first_image(
    svg: &str,
    doc: &roxmltree::Document<'_>,
    placement: &ImagePlacement,
    edits: &mut EditList,
) -> ConfartResult<bool> {
    let Some(image) = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "image")
    else {
        return Ok(false);
    };
    let start = image.range().start;
    let tag_end = start_tag_end(svg, start)
        .ok_or_else(|| ConfartError::validation("unterminated <image> tag"))?;
    let spans = attribute_spans(svg, start..tag_end);

    let mut missing: Vec<&str> = vec!["x", "y", "width", "height"];
    for AttrSpan { name, value } in &spans {
        let attr = &svg[name.clone()];
        if let Some(v) = placement.value(attr) {
            edits.replace(value.clone(), fmt_num(v));
            missing.retain(|m| *m != attr);
        }
    }
    if !missing.is_empty() {
        let close = if svg[..tag_end].ends_with("/>") {
            tag_end - 2
        } else {
            tag_end - 1
        };
        let at = whitespace_start(svg, close);
        let added: String = missing
            .iter()
            .filter_map(|m| placement.value(m).map(|v| format!(r#" {m}="{}""#, fmt_num(v))))
            .collect();
        edits.insert(at, added);
    }
    Ok(true)
}

/// Just after the last non-blank content of the first top-level `<g>`, else before `</svg>`.
fn caption_anchor(svg: &str, root: roxmltree::Node<'_, '_>) -> Option<usize> {
    let group = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "g");
    let container = group
        .and_then(|g| content_range(svg, g))
        .or_else(|| content_range(svg, root))?;
    Some(whitespace_start(svg, container.end).max(container.start))
}

#[cfg(test)]
#[path = "../../tests/unit/svg_edit/caption.rs"]
mod tests;
