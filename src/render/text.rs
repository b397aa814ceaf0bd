//! Plain text rendering.

use crate::error::Result;
use crate::model::Document;

use super::markup::{page_markup, strip_tags};
use super::RenderOptions;

/// Convert a document to plain text: the markup with every tag removed.
///
/// Lines left empty by stripping (image placeholders, passthrough markers)
/// are dropped.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let lines: Vec<String> = doc
        .pages
        .iter()
        .flat_map(|page| page_markup(page, options))
        .map(|line| strip_tags(&line))
        .filter(|line| !line.trim().is_empty())
        .collect();

    Ok(lines.join("\n"))
}
