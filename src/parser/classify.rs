//! Height-based semantic tagging.
//!
//! A paragraph's average line height is compared against a table of
//! reference heights, each widened by a relative tolerance (the
//! approximation factor). Entries are tried in the order they were
//! defined and the last one that matches wins, so overlapping buckets can
//! be ranked by placing the preferred one later. Nothing matching means
//! plain body text.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ParagraphRun;

/// Tag given to text that matches no configured height.
pub const DEFAULT_TAG: &str = "p";

/// Ordered tag → reference line height mapping plus tolerance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationTable {
    /// Reference heights, in definition order
    #[serde(rename = "text_heights", default)]
    heights: IndexMap<String, f32>,

    /// Approximation factor in `[0, 1)`
    #[serde(rename = "text_height_af", default)]
    af: f32,
}

impl ClassificationTable {
    /// Create an empty table with the given approximation factor.
    pub fn new(af: f32) -> Self {
        Self {
            heights: IndexMap::new(),
            af,
        }
    }

    /// Append a bucket.
    ///
    /// Redefining an existing tag updates its height but keeps its
    /// original position in the iteration order.
    pub fn with_height(mut self, tag: impl Into<String>, height: f32) -> Self {
        self.heights.insert(tag.into(), height);
        self
    }

    /// Build a table from `(tag, height)` pairs in order.
    pub fn from_pairs<I, S>(pairs: I, af: f32) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            heights: pairs.into_iter().map(|(t, h)| (t.into(), h)).collect(),
            af,
        }
    }

    /// The approximation factor.
    pub fn af(&self) -> f32 {
        self.af
    }

    /// Tags in definition order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.heights.keys().map(String::as_str)
    }

    /// Reference height of a tag.
    pub fn height(&self, tag: &str) -> Option<f32> {
        self.heights.get(tag).copied()
    }

    /// Check if the table has no buckets.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Check that the tolerance and every reference height are usable.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.af) {
            return Err(Error::InvalidConfig(format!(
                "text_height_af must be in [0, 1), got {}",
                self.af
            )));
        }
        for (tag, height) in &self.heights {
            if !height.is_finite() || *height <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "text height for '{}' must be positive, got {}",
                    tag, height
                )));
            }
        }
        Ok(())
    }

    /// Classify an average line height.
    ///
    /// Last matching bucket wins, not the closest one.
    pub fn classify(&self, avg_line_height: f32) -> &str {
        let mut result = DEFAULT_TAG;
        for (tag, height) in &self.heights {
            if (1.0 - self.af) * height <= avg_line_height
                && avg_line_height <= (1.0 + self.af) * height
            {
                result = tag.as_str();
            }
        }
        result
    }

    /// Classify a paragraph run; runs without lines get the default tag.
    pub fn classify_run(&self, run: &ParagraphRun) -> &str {
        match run.avg_line_height() {
            Some(h) if h.is_finite() => self.classify(h),
            _ => DEFAULT_TAG,
        }
    }
}
