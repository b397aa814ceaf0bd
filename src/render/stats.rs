//! Statistics over a classified document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ClassifiedBlock, Document, PageOutput};

/// Counts collected from a classified document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Total number of pages processed
    pub page_count: u32,

    /// Text blocks per tag
    pub tag_counts: BTreeMap<String, u32>,

    /// Number of stored images
    pub image_count: u32,

    /// Number of footnotes
    pub footnote_count: u32,

    /// Number of passthrough objects
    pub passthrough_count: u32,

    /// Number of per-object issues
    pub issue_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a whole document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self::new();
        for page in &doc.pages {
            stats.add_page(page);
        }
        stats
    }

    /// Add the counts of one page.
    pub fn add_page(&mut self, page: &PageOutput) {
        self.page_count += 1;
        for block in &page.blocks {
            match block {
                ClassifiedBlock::Text { tag, text } => {
                    *self.tag_counts.entry(tag.clone()).or_insert(0) += 1;
                    self.count_text(text);
                }
                ClassifiedBlock::Image { .. } => self.image_count += 1,
                ClassifiedBlock::Other(_) => self.passthrough_count += 1,
            }
        }
        for footnote in &page.footnotes {
            self.footnote_count += 1;
            self.count_text(footnote);
        }
        self.issue_count += page.issues.len() as u32;
    }

    /// Number of text blocks across all tags.
    pub fn text_block_count(&self) -> u32 {
        self.tag_counts.values().sum()
    }

    fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.page_count += other.page_count;
        for (tag, count) in &other.tag_counts {
            *self.tag_counts.entry(tag.clone()).or_insert(0) += count;
        }
        self.image_count += other.image_count;
        self.footnote_count += other.footnote_count;
        self.passthrough_count += other.passthrough_count;
        self.issue_count += other.issue_count;
        self.word_count += other.word_count;
    }
}
