//! HTML-like markup emission.
//!
//! Every text block becomes `<tag>text</tag>`, every stored image an
//! `<img src="..." />` placeholder, in the order the pipeline produced
//! them. Footnotes follow their page's body without tags.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;
use crate::model::{ClassifiedBlock, Document, OtherObject, PageOutput};

use super::RenderOptions;

/// Collapse line breaks into single spaces and trim the ends.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Wrap text in a start/end tag pair.
///
/// `text` is HTML-escaped (`<`, `>` and `&` become entities), so the result
/// differs from a plain `<tag>text</tag>` concatenation whenever the text
/// contains those characters. [`strip_tags`] decodes the entities again.
///
/// ```
/// use bookparse::render::markup::emit;
///
/// assert_eq!(emit("p", "Chapter One"), "<p>Chapter One</p>");
/// assert_eq!(emit("p", "a < b & c"), "<p>a &lt; b &amp; c</p>");
/// ```
pub fn emit(tag: &str, text: &str) -> String {
    format!("<{}>{}</{}>", tag, html_escape::encode_text(text), tag)
}

/// Image placeholder pointing at a stored image.
pub fn emit_image(reference: &str) -> String {
    format!(
        "<img src=\"{}\" />",
        html_escape::encode_double_quoted_attribute(reference)
    )
}

/// Marker for an uninterpreted object, so it is not silently lost.
pub fn emit_other(obj: &OtherObject) -> String {
    let b = &obj.bbox;
    format!(
        "<!-- {} ({}, {}, {}, {}) -->",
        obj.label.replace("--", "- -"),
        b.x0,
        b.y0,
        b.x1,
        b.y1
    )
}

/// Render one block.
pub fn emit_block(block: &ClassifiedBlock) -> String {
    match block {
        ClassifiedBlock::Text { tag, text } => emit(tag, text),
        ClassifiedBlock::Image { reference } => emit_image(reference),
        ClassifiedBlock::Other(obj) => emit_other(obj),
    }
}

/// Markup strings of a page: body blocks, then untagged footnotes.
pub fn page_markup(page: &PageOutput, options: &RenderOptions) -> Vec<String> {
    let mut out = Vec::with_capacity(page.blocks.len() + page.footnotes.len());
    for block in &page.blocks {
        if matches!(block, ClassifiedBlock::Other(_)) && !options.include_passthrough {
            continue;
        }
        out.push(emit_block(block));
    }
    if options.include_footnotes {
        out.extend(
            page.footnotes
                .iter()
                .map(|f| html_escape::encode_text(f).into_owned()),
        );
    }
    out
}

/// Render a whole document, pages in order, one markup string per line.
pub fn to_markup(doc: &Document, options: &RenderOptions) -> Result<String> {
    let lines: Vec<String> = doc
        .pages
        .iter()
        .flat_map(|page| page_markup(page, options))
        .collect();
    Ok(lines.join("\n"))
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("Invalid tag regex"))
}

/// Remove tags and comments, then decode entities.
pub fn strip_tags(markup: &str) -> String {
    let without_tags = tag_regex().replace_all(markup, "");
    html_escape::decode_html_entities(&without_tags).into_owned()
}
