//! Document-level types.

use super::PageOutput;
use serde::{Deserialize, Serialize};

/// The classified content of a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Processed pages, in page order
    pub pages: Vec<PageOutput>,

    /// Table of contents, if the decoder exposed one
    pub outline: Option<Outline>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the empty result returned when the document forbids extraction.
    pub fn forbidden(page_count: u32) -> Self {
        Self {
            metadata: Metadata {
                page_count,
                extraction: Extraction::Forbidden,
                ..Default::default()
            },
            pages: Vec::new(),
            outline: None,
        }
    }

    /// Get the number of processed pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a processed page by its page number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&PageOutput> {
        self.pages.iter().find(|p| p.number == page_num)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: PageOutput) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check whether the document refused content extraction.
    pub fn is_forbidden(&self) -> bool {
        self.metadata.extraction == Extraction::Forbidden
    }

    /// Total number of per-object issues across all pages.
    pub fn issue_count(&self) -> usize {
        self.pages.iter().map(|p| p.issues.len()).sum()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Where the layout came from (file path), if known
    pub source: Option<String>,

    /// Total number of pages in the source document
    pub page_count: u32,

    /// Whether the document permitted extraction
    pub extraction: Extraction,
}

/// Extraction permission reported by the decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extraction {
    /// Content was extracted
    #[default]
    Allowed,
    /// The document denies content extraction; nothing was processed
    Forbidden,
}

/// Document outline (table of contents).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Entries in document order
    pub items: Vec<OutlineItem>,
}

impl Outline {
    /// Create a new empty outline.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an item to the outline.
    pub fn add_item(&mut self, item: OutlineItem) {
        self.items.push(item);
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A single table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Nesting level (1 = top level)
    pub level: u8,

    /// Entry title
    pub title: String,
}

impl OutlineItem {
    /// Create a new outline item.
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
        }
    }
}
