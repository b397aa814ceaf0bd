//! # bookparse
//!
//! Layout classification for decoded PDF pages.
//!
//! Given the layout objects an external decoder produced for each page,
//! this library drops page furniture outside a content frame, splits text
//! boxes into paragraphs, tags each paragraph by its average line height,
//! flattens nested figure containers and emits HTML-like markup.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bookparse::{parse_file_with_options, render, ClassificationTable, Frame, ParseOptions};
//!
//! fn main() -> bookparse::Result<()> {
//!     let options = ParseOptions::new()
//!         .with_frame(Frame::new(65.0, 90.0, 410.0, 620.0))
//!         .with_text_heights(
//!             ClassificationTable::new(0.02)
//!                 .with_height("p", 12.9)
//!                 .with_height("fn_size", 9.5)
//!                 .with_height("h1", 15.6),
//!         );
//!     let doc = parse_file_with_options("book.layout.json", options)?;
//!
//!     let markup = render::to_markup(&doc, &render::RenderOptions::default())?;
//!     println!("{}", markup);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Frame filtering**: headers, footers and margin notes are dropped by position
//! - **Height-based tagging**: ordered reference table with a tolerance factor
//! - **Footnotes**: routed to a per-page side channel
//! - **Images**: handed to a pluggable writer, failures recorded per page
//! - **Parallel processing**: uses Rayon across pages

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    BBox, ClassifiedBlock, Document, Frame, LayoutObject, Metadata, ObjectKind, Outline, PageIssue,
    PageOutput,
};
pub use parser::{
    BookParser, ClassificationTable, FsImageWriter, ImageWriter, JsonLayoutSource, LayoutSource,
    MemoryLayoutSource, PageSelection, ParseOptions,
};
pub use render::{JsonFormat, RenderOptions};

use std::path::Path;

/// Classify a layout dump file with default options.
///
/// With an empty height table every paragraph is tagged `p`.
///
/// # Example
///
/// ```no_run
/// use bookparse::parse_file;
///
/// let doc = parse_file("book.layout.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Classify a layout dump file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    BookParser::new(options)?.parse_file(path)
}

/// Classify any layout source with custom options.
///
/// # Example
///
/// ```
/// use bookparse::{parse_source, MemoryLayoutSource, ParseOptions};
///
/// let source = MemoryLayoutSource::new().with_page(Vec::new());
/// let doc = parse_source(&source, ParseOptions::new()).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn parse_source<S: LayoutSource + ?Sized>(source: &S, options: ParseOptions) -> Result<Document> {
    BookParser::new(options)?.parse(source)
}

/// Extract plain text from a layout dump file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, &RenderOptions::default())
}

/// Convert a layout dump file to markup.
///
/// # Example
///
/// ```no_run
/// use bookparse::{to_markup, ParseOptions};
///
/// let markup = to_markup("book.layout.json", ParseOptions::new()).unwrap();
/// std::fs::write("book.html", markup).unwrap();
/// ```
pub fn to_markup<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<String> {
    let doc = parse_file_with_options(path, options)?;
    render::to_markup(&doc, &RenderOptions::default())
}

/// Convert a layout dump file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, options: ParseOptions, format: JsonFormat) -> Result<String> {
    let doc = parse_file_with_options(path, options)?;
    render::to_json(&doc, format)
}

/// Builder for classifying and rendering documents.
///
/// # Example
///
/// ```no_run
/// use bookparse::{Bookparse, Frame};
///
/// let markup = Bookparse::new()
///     .with_frame(Frame::new(65.0, 90.0, 410.0, 620.0))
///     .with_text_height("p", 12.9)
///     .with_text_height("h1", 15.6)
///     .with_images_dir("./images")
///     .parse("book.layout.json")?
///     .to_markup()?;
/// # Ok::<(), bookparse::Error>(())
/// ```
pub struct Bookparse {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Bookparse {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Start from existing parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set the content frame.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.parse_options = self.parse_options.with_frame(frame);
        self
    }

    /// Append a reference height to the classification table.
    pub fn with_text_height(mut self, tag: impl Into<String>, height: f32) -> Self {
        let table = self.parse_options.text_heights.clone().with_height(tag, height);
        self.parse_options = self.parse_options.with_text_heights(table);
        self
    }

    /// Set the image output directory.
    pub fn with_images_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.parse_options = self.parse_options.with_images_folder(dir);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Set document password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_password(password);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Leave footnotes out of the rendered output.
    pub fn without_footnotes(mut self) -> Self {
        self.render_options = self.render_options.with_footnotes(false);
        self
    }

    /// Classify a layout dump file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<BookparseResult> {
        let document = BookParser::new(self.parse_options)?.parse_file(path)?;
        Ok(BookparseResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Classify any layout source.
    pub fn parse_source<S: LayoutSource + ?Sized>(self, source: &S) -> Result<BookparseResult> {
        let document = BookParser::new(self.parse_options)?.parse(source)?;
        Ok(BookparseResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Bookparse {
    fn default() -> Self {
        Self::new()
    }
}

/// A classified document together with its render options.
pub struct BookparseResult {
    /// The classified document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl BookparseResult {
    /// Convert to markup.
    pub fn to_markup(&self) -> Result<String> {
        render::to_markup(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextLine;

    fn source() -> MemoryLayoutSource {
        MemoryLayoutSource::new().with_page(vec![
            LayoutObject::TextLine(TextLine::new(BBox::new(70.0, 500.0, 300.0, 516.0), "Title")),
            LayoutObject::TextLine(TextLine::new(BBox::new(70.0, 480.0, 300.0, 492.0), "Body")),
            LayoutObject::TextLine(TextLine::new(BBox::new(70.0, 100.0, 300.0, 109.0), "1 Note")),
        ])
    }

    #[test]
    fn test_builder_renders_markup() {
        let result = Bookparse::new()
            .with_text_height("p", 12.0)
            .with_text_height("h1", 16.0)
            .with_text_height("fn_size", 9.0)
            .sequential()
            .parse_source(&source())
            .unwrap();

        assert_eq!(
            result.to_markup().unwrap(),
            "<h1>Title</h1>\n<p>Body</p>\n1 Note"
        );
        assert_eq!(result.to_text().unwrap(), "Title\nBody\n1 Note");
    }

    #[test]
    fn test_builder_without_footnotes() {
        let result = Bookparse::new()
            .with_text_height("fn_size", 9.0)
            .without_footnotes()
            .parse_source(&source())
            .unwrap();

        assert_eq!(result.to_markup().unwrap(), "<p>Title</p>\n<p>Body</p>");
    }

    #[test]
    fn test_parse_source_defaults_to_paragraphs() {
        let doc = parse_source(&source(), ParseOptions::new()).unwrap();
        let tags: Vec<_> = doc.pages[0].text_blocks().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec!["p", "p", "p"]);
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("/nonexistent/book.layout.json");
        assert!(matches!(result, Err(Error::DocumentUnavailable { .. })));
    }

    #[test]
    fn test_parse_source_rejects_bad_options() {
        let table = ClassificationTable::new(1.5);
        let result = parse_source(&source(), ParseOptions::new().with_text_heights(table));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
