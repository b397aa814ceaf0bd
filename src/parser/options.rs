//! Parsing options and configuration.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Frame, ObjectKind};

use super::classify::ClassificationTable;

/// Default paragraph-break sensitivity, in page units.
pub const DEFAULT_INDENT_THRESHOLD: f32 = 4.0;

/// Default tag whose text is routed to the footnote channel.
pub const DEFAULT_FOOTNOTE_TAG: &str = "fn_size";

/// Default destination for extracted images.
pub const DEFAULT_IMAGES_FOLDER: &str = "/tmp";

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for classifying a document.
///
/// Built once, validated by [`BookParser::new`](super::BookParser::new), and
/// only read afterwards. To change the configuration, build a new parser.
///
/// Deserializes from JSON, e.g.:
///
/// ```json
/// {
///   "content_frame": { "x0": 65, "y0": 90, "x1": 410, "y1": 620 },
///   "text_heights": { "p": 12.9, "fn_size": 9.5, "h1": 15.6, "h2": 13.4 },
///   "text_height_af": 0.02,
///   "pages": "12-26"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Content region; objects not fully inside it are dropped
    pub content_frame: Option<Frame>,

    /// Kinds retained by the frame filter (`None` = all)
    pub content_kinds: Option<Vec<ObjectKind>>,

    /// Left-edge indent beyond the paragraph margin that starts a new paragraph
    pub indent_threshold: f32,

    /// Reference line heights and tolerance for semantic tagging
    #[serde(flatten)]
    pub text_heights: ClassificationTable,

    /// Tag whose text goes to the footnote channel
    pub footnote_tag: String,

    /// Destination directory handed to the image writer
    pub images_folder: PathBuf,

    /// Page selection (which pages to process)
    pub pages: PageSelection,

    /// Password for protected documents
    pub password: Option<String>,

    /// Maximum container nesting depth
    pub max_depth: usize,

    /// Whether to classify pages in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content frame.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.content_frame = Some(frame);
        self
    }

    /// Restrict processing to the given object kinds.
    pub fn with_content_kinds(mut self, kinds: impl IntoIterator<Item = ObjectKind>) -> Self {
        self.content_kinds = Some(kinds.into_iter().collect());
        self
    }

    /// Set the paragraph indent threshold.
    pub fn with_indent_threshold(mut self, threshold: f32) -> Self {
        self.indent_threshold = threshold;
        self
    }

    /// Set the classification table.
    pub fn with_text_heights(mut self, table: ClassificationTable) -> Self {
        self.text_heights = table;
        self
    }

    /// Set the footnote tag.
    pub fn with_footnote_tag(mut self, tag: impl Into<String>) -> Self {
        self.footnote_tag = tag.into();
        self
    }

    /// Set the image destination directory.
    pub fn with_images_folder(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_folder = dir.into();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set password for protected documents.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the container nesting limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Load options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: ParseOptions = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(format!("cannot read options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.indent_threshold.is_finite() || self.indent_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "indent_threshold must be a non-negative number, got {}",
                self.indent_threshold
            )));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if let Some(frame) = &self.content_frame {
            if frame.x0 > frame.x1 || frame.y0 > frame.y1 {
                return Err(Error::InvalidConfig(format!(
                    "content_frame is inverted: ({}, {}, {}, {})",
                    frame.x0, frame.y0, frame.x1, frame.y1
                )));
            }
        }
        self.text_heights.validate()
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            content_frame: None,
            content_kinds: None,
            indent_threshold: DEFAULT_INDENT_THRESHOLD,
            text_heights: ClassificationTable::default(),
            footnote_tag: DEFAULT_FOOTNOTE_TAG.to_string(),
            images_folder: PathBuf::from(DEFAULT_IMAGES_FOLDER),
            pages: PageSelection::All,
            password: None,
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: true,
        }
    }
}

/// Page selection for parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number is included in the selection.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-5", "1,3,5", "1-3,7,9-10").
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        // Single range
        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| "Invalid page number")?;
                let end: u32 = end.trim().parse().map_err(|_| "Invalid page number")?;
                if start == 0 || start > end {
                    return Err(format!("Invalid range {}-{}", start, end));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| "Invalid page number")?;
                let end: u32 = end.trim().parse().map_err(|_| "Invalid page number")?;
                if start > end {
                    return Err(format!("Invalid range {}-{}", start, end));
                }
                for p in start..=end {
                    if !pages.contains(&p) {
                        pages.push(p);
                    }
                }
            } else {
                let p: u32 = part.parse().map_err(|_| "Invalid page number")?;
                if !pages.contains(&p) {
                    pages.push(p);
                }
            }
        }

        if pages.contains(&0) {
            return Err("Page numbers start at 1".to_string());
        }

        pages.sort();
        Ok(PageSelection::Pages(pages))
    }
}

impl fmt::Display for PageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSelection::All => write!(f, "all"),
            PageSelection::Range(range) => write!(f, "{}-{}", range.start(), range.end()),
            PageSelection::Pages(pages) => {
                let parts: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

impl TryFrom<String> for PageSelection {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        PageSelection::parse(&value).map_err(Error::InvalidPageRange)
    }
}

impl From<PageSelection> for String {
    fn from(selection: PageSelection) -> Self {
        selection.to_string()
    }
}
