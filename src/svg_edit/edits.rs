use std::ops::Range;

use crate::foundation::error::{ConfartError, ConfartResult};

/// Parse SVG text for editing. DTDs are tolerated since editor exports often carry one.
pub(crate) fn parse_document(svg: &str) -> ConfartResult<roxmltree::Document<'_>> {
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(svg, opts)
        .map_err(|e| ConfartError::validation(format!("invalid SVG markup: {e}")))
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// Byte-range replacements against one source text.
///
/// Ranges refer to the original text; [`EditList::apply`] splices them in one pass, so the
/// order edits are recorded in does not matter except for insertions at the same offset,
/// which keep their recording order.
#[derive(Clone, Debug, Default)]
pub(crate) struct EditList {
    edits: Vec<Edit>,
}

impl EditList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn replace(&mut self, range: Range<usize>, replacement: impl Into<String>) {
        self.edits.push(Edit {
            range,
            replacement: replacement.into(),
        });
    }

    pub(crate) fn delete(&mut self, range: Range<usize>) {
        self.replace(range, String::new());
    }

    pub(crate) fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.replace(at..at, text);
    }

    pub(crate) fn len(&self) -> usize {
        self.edits.len()
    }

    pub(crate) fn apply(mut self, src: &str) -> ConfartResult<String> {
        self.edits.sort_by_key(|e| (e.range.start, e.range.end));

        let mut out = String::with_capacity(src.len());
        let mut cursor = 0usize;
        for edit in &self.edits {
            let Range { start, end } = edit.range.clone();
            if start < cursor || end < start || end > src.len() {
                return Err(ConfartError::validation(format!(
                    "overlapping or out-of-bounds SVG edit at {start}..{end}"
                )));
            }
            let (Some(keep), true) = (src.get(cursor..start), src.is_char_boundary(end)) else {
                return Err(ConfartError::validation(format!(
                    "SVG edit {start}..{end} splits a character"
                )));
            };
            out.push_str(keep);
            out.push_str(&edit.replacement);
            cursor = end;
        }
        out.push_str(&src[cursor..]);
        Ok(out)
    }
}

/// Offset just past the `>` closing the tag that starts at `start`, honouring quoted values.
pub(crate) fn start_tag_end(src: &str, start: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Byte range of the inner content of `node`, or `None` for an empty-element tag (`<g/>`).
pub(crate) fn content_range(src: &str, node: roxmltree::Node<'_, '_>) -> Option<Range<usize>> {
    let range = node.range();
    let open_end = start_tag_end(src, range.start)?;
    if open_end >= range.end {
        return None;
    }
    let close_start = src[..range.end].rfind("</")?;
    (close_start >= open_end).then_some(open_end..close_start)
}

/// Start of the whitespace run that ends at `pos`.
pub(crate) fn whitespace_start(src: &str, pos: usize) -> usize {
    src[..pos].trim_end_matches(|c: char| c.is_ascii_whitespace()).len()
}

/// One `name="value"` pair inside a start tag, as source offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttrSpan {
    pub(crate) name: Range<usize>,
    pub(crate) value: Range<usize>,
}

/// Attribute spans of the start tag at `tag` (from `<` to just past `>`), in source order.
pub(crate) fn attribute_spans(src: &str, tag: Range<usize>) -> Vec<AttrSpan> {
    let bytes = src.as_bytes();
    let mut spans = Vec::new();
    let mut i = tag.start + 1;
    // Skip the element name.
    while i < tag.end && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' && bytes[i] != b'/'
    {
        i += 1;
    }
    loop {
        while i < tag.end && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= tag.end || bytes[i] == b'>' || bytes[i] == b'/' {
            break;
        }
        let name_start = i;
        while i < tag.end && bytes[i] != b'=' && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let name = name_start..i;
        while i < tag.end && (bytes[i].is_ascii_whitespace() || bytes[i] == b'=') {
            i += 1;
        }
        let Some(&quote) = bytes.get(i).filter(|&&q| q == b'"' || q == b'\'') else {
            break;
        };
        let value_start = i + 1;
        let Some(len) = src[value_start..tag.end].find(quote as char) else {
            break;
        };
        spans.push(AttrSpan {
            name,
            value: value_start..value_start + len,
        });
        i = value_start + len + 1;
    }
    spans
}

/// Escape character data.
pub(crate) fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a double-quoted attribute value.
pub(crate) fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Format a coordinate the way SVG authors write them (`10`, `43.5`).
pub(crate) fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg_edit/edits.rs"]
mod tests;
