//! Classified output of a page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::OtherObject;

/// An output unit of the classification engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifiedBlock {
    /// Tagged text (heading level, paragraph, ...)
    Text {
        /// Semantic tag
        tag: String,
        /// Normalized text
        text: String,
    },

    /// A stored image
    Image {
        /// Path returned by the image writer
        reference: String,
    },

    /// An uninterpreted object carried through unchanged
    Other(OtherObject),
}

impl ClassifiedBlock {
    /// Create a text block.
    pub fn text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        ClassifiedBlock::Text {
            tag: tag.into(),
            text: text.into(),
        }
    }

    /// Create an image block.
    pub fn image(reference: impl Into<String>) -> Self {
        ClassifiedBlock::Image {
            reference: reference.into(),
        }
    }

    /// Tag of a text block.
    pub fn tag(&self) -> Option<&str> {
        match self {
            ClassifiedBlock::Text { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, ClassifiedBlock::Image { .. })
    }
}

/// A non-fatal problem confined to one object on a page.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageIssue {
    /// The image writer could not store an image.
    #[error("Error saving image on page {page} ({object}): {reason}")]
    ImageNotSaved {
        /// Page number (1-indexed)
        page: u32,
        /// Identity of the image object
        object: String,
        /// Reason reported by the writer
        reason: String,
    },

    /// A container subtree exceeded the nesting limit and was dropped.
    #[error("Container nesting on page {page} reached depth {depth} (limit {limit}): {object}")]
    NestingTooDeep {
        /// Page number (1-indexed)
        page: u32,
        /// Identity of the dropped container
        object: String,
        /// Depth at which processing stopped
        depth: usize,
        /// Configured limit
        limit: usize,
    },

    /// The decoder could not deliver the page's layout.
    #[error("Layout of page {page} unavailable: {reason}")]
    LayoutUnavailable {
        /// Page number (1-indexed)
        page: u32,
        /// Decoder error
        reason: String,
    },
}

impl PageIssue {
    /// Page the issue belongs to.
    pub fn page(&self) -> u32 {
        match self {
            PageIssue::ImageNotSaved { page, .. }
            | PageIssue::NestingTooDeep { page, .. }
            | PageIssue::LayoutUnavailable { page, .. } => *page,
        }
    }
}

/// Classified content of a single page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageOutput {
    /// Page number (1-indexed)
    pub number: u32,

    /// Body blocks in page order
    pub blocks: Vec<ClassifiedBlock>,

    /// Footnote texts, untagged, in page order
    pub footnotes: Vec<String>,

    /// Per-object problems met while processing the page
    pub issues: Vec<PageIssue>,
}

impl PageOutput {
    /// Create an empty page output.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Check if the page produced neither blocks nor footnotes.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.footnotes.is_empty()
    }

    /// Iterate over text blocks as `(tag, text)` pairs.
    pub fn text_blocks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            ClassifiedBlock::Text { tag, text } => Some((tag.as_str(), text.as_str())),
            _ => None,
        })
    }

    /// Plain text of the page body, one block per line.
    pub fn plain_text(&self) -> String {
        self.text_blocks()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_helpers() {
        let b = ClassifiedBlock::text("h1", "Title");
        assert_eq!(b.tag(), Some("h1"));
        assert!(!b.is_image());
        assert!(ClassifiedBlock::image("/tmp/1_Im0.jpg").is_image());
    }

    #[test]
    fn test_page_output_plain_text() {
        let mut page = PageOutput::new(3);
        page.blocks.push(ClassifiedBlock::text("h1", "Title"));
        page.blocks.push(ClassifiedBlock::image("/tmp/3_Im1.png"));
        page.blocks.push(ClassifiedBlock::text("p", "Body."));
        assert_eq!(page.plain_text(), "Title\nBody.");
        assert!(!page.is_empty());
    }

    #[test]
    fn test_page_issue_display() {
        let issue = PageIssue::ImageNotSaved {
            page: 4,
            object: "image 'Im0'".to_string(),
            reason: "unknown image format".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "Error saving image on page 4 (image 'Im0'): unknown image format"
        );
    }

    #[test]
    fn test_block_serialization_tag() {
        let json = serde_json::to_string(&ClassifiedBlock::text("p", "x")).unwrap();
        assert_eq!(json, r#"{"type":"text","tag":"p","text":"x"}"#);
    }
}
