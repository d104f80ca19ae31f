//! Structured edits on SVG text.
//!
//! Documents are parsed with `roxmltree` to locate elements; edits are expressed as byte ranges
//! of the original text and spliced back, so everything that is not touched keeps its exact
//! formatting.

pub(crate) mod caption;
pub(crate) mod edits;
pub(crate) mod embed;
