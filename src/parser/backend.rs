//! Layout decoder abstraction layer.
//!
//! Provides a trait-based interface to whatever turns page content streams
//! into layout objects, isolating the classification engine from the
//! concrete decoder.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{Error, Result};
use crate::model::{LayoutObject, Outline, OutlineItem};

/// Abstract interface to a decoded document.
///
/// Implementations are opened (and, if need be, unlocked with a password)
/// before they reach the engine.
pub trait LayoutSource {
    /// Whether the document permits content extraction.
    fn is_extractable(&self) -> bool;

    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Layout objects of a page (1-indexed), in page order.
    fn page_layout(&self, page_number: u32) -> Result<Vec<LayoutObject>>;

    /// Table of contents, if the document has one.
    fn outline(&self) -> Option<Outline> {
        None
    }
}

/// Serialized form of a decoded document.
///
/// ```json
/// {
///   "extractable": true,
///   "outline": [{ "level": 1, "title": "Chapter One" }],
///   "pages": [
///     { "objects": [
///       { "kind": "text_box",
///         "bbox": { "x0": 70, "y0": 100, "x1": 400, "y1": 120 },
///         "lines": [{ "bbox": { "x0": 70, "y0": 102, "x1": 400, "y1": 117.6 },
///                     "text": "Chapter One" }] }
///     ] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutDump {
    /// Whether the document permits content extraction
    #[serde(default = "default_extractable")]
    pub extractable: bool,

    /// Password required to open the document, if any
    #[serde(default)]
    pub password: Option<String>,

    /// Table of contents entries
    #[serde(default)]
    pub outline: Vec<OutlineItem>,

    /// Pages in order, kept undecoded until requested
    ///
    /// Each page is a [`PageLayout`]. Decoding per page confines a
    /// malformed or pathologically nested page to that page.
    #[serde(default)]
    pub pages: Vec<Box<RawValue>>,
}

fn default_extractable() -> bool {
    true
}

/// Layout of one page in a [`LayoutDump`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLayout {
    /// Objects in page order
    #[serde(default)]
    pub objects: Vec<LayoutObject>,
}

/// [`LayoutSource`] backed by a JSON layout dump written by an external decoder.
#[derive(Debug, Clone)]
pub struct JsonLayoutSource {
    dump: LayoutDump,
}

impl JsonLayoutSource {
    /// Open a layout dump file.
    pub fn open<P: AsRef<Path>>(path: P, password: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| Error::DocumentUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data, password)
    }

    /// Load a layout dump from bytes.
    pub fn from_bytes(data: &[u8], password: Option<&str>) -> Result<Self> {
        let dump: LayoutDump = serde_json::from_slice(data)?;
        Self::from_dump(dump, password)
    }

    /// Load a layout dump from a reader.
    pub fn from_reader<R: Read>(mut reader: R, password: Option<&str>) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data, password)
    }

    /// Wrap an already-deserialized dump.
    pub fn from_dump(dump: LayoutDump, password: Option<&str>) -> Result<Self> {
        if let Some(required) = &dump.password {
            if password != Some(required.as_str()) {
                return Err(Error::InvalidPassword);
            }
        }
        Ok(Self { dump })
    }
}

impl LayoutSource for JsonLayoutSource {
    fn is_extractable(&self) -> bool {
        self.dump.extractable
    }

    fn page_count(&self) -> u32 {
        self.dump.pages.len() as u32
    }

    fn page_layout(&self, page_number: u32) -> Result<Vec<LayoutObject>> {
        let idx = page_index(page_number, self.page_count())?;
        let page: PageLayout = serde_json::from_str(self.dump.pages[idx].get())?;
        Ok(page.objects)
    }

    fn outline(&self) -> Option<Outline> {
        if self.dump.outline.is_empty() {
            return None;
        }
        Some(Outline {
            items: self.dump.outline.clone(),
        })
    }
}

/// In-memory [`LayoutSource`], for embedding and tests.
#[derive(Debug, Clone)]
pub struct MemoryLayoutSource {
    pages: Vec<Vec<LayoutObject>>,
    extractable: bool,
    outline: Option<Outline>,
}

impl MemoryLayoutSource {
    /// Create an empty, extractable document.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            extractable: true,
            outline: None,
        }
    }

    /// Append a page.
    pub fn with_page(mut self, objects: Vec<LayoutObject>) -> Self {
        self.pages.push(objects);
        self
    }

    /// Mark the document as denying extraction.
    pub fn forbid_extraction(mut self) -> Self {
        self.extractable = false;
        self
    }

    /// Attach a table of contents.
    pub fn with_outline(mut self, outline: Outline) -> Self {
        self.outline = Some(outline);
        self
    }
}

impl Default for MemoryLayoutSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutSource for MemoryLayoutSource {
    fn is_extractable(&self) -> bool {
        self.extractable
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_layout(&self, page_number: u32) -> Result<Vec<LayoutObject>> {
        page_index(page_number, self.page_count()).map(|idx| self.pages[idx].clone())
    }

    fn outline(&self) -> Option<Outline> {
        self.outline.clone()
    }
}

/// Map a 1-indexed page number to a vector index.
fn page_index(page_number: u32, page_count: u32) -> Result<usize> {
    if page_number == 0 || page_number > page_count {
        return Err(Error::PageOutOfRange(page_number, page_count));
    }
    Ok((page_number - 1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, TextLine};

    const DUMP: &str = r#"{
        "outline": [{ "level": 1, "title": "Chapter One" }],
        "pages": [
            { "objects": [
                { "kind": "text_line",
                  "bbox": { "x0": 70, "y0": 100, "x1": 400, "y1": 115.6 },
                  "text": "Chapter One" }
            ] },
            { "objects": [] }
        ]
    }"#;

    #[test]
    fn test_json_source_pages() {
        let source = JsonLayoutSource::from_bytes(DUMP.as_bytes(), None).unwrap();
        assert!(source.is_extractable());
        assert_eq!(source.page_count(), 2);

        let objects = source.page_layout(1).unwrap();
        assert_eq!(objects.len(), 1);
        assert!(matches!(&objects[0], LayoutObject::TextLine(l) if l.text == "Chapter One"));
        assert!(source.page_layout(2).unwrap().is_empty());
    }

    #[test]
    fn test_json_source_outline() {
        let source = JsonLayoutSource::from_bytes(DUMP.as_bytes(), None).unwrap();
        let outline = source.outline().unwrap();
        assert_eq!(outline.items, vec![OutlineItem::new(1, "Chapter One")]);
    }

    #[test]
    fn test_json_source_page_out_of_range() {
        let source = JsonLayoutSource::from_bytes(DUMP.as_bytes(), None).unwrap();
        assert!(matches!(
            source.page_layout(0),
            Err(Error::PageOutOfRange(0, 2))
        ));
        assert!(matches!(
            source.page_layout(3),
            Err(Error::PageOutOfRange(3, 2))
        ));
    }

    #[test]
    fn test_json_source_password() {
        let locked = r#"{ "password": "secret", "pages": [] }"#;
        assert!(matches!(
            JsonLayoutSource::from_bytes(locked.as_bytes(), None),
            Err(Error::InvalidPassword)
        ));
        assert!(matches!(
            JsonLayoutSource::from_bytes(locked.as_bytes(), Some("guess")),
            Err(Error::InvalidPassword)
        ));
        assert!(JsonLayoutSource::from_bytes(locked.as_bytes(), Some("secret")).is_ok());
    }

    #[test]
    fn test_json_source_malformed() {
        let result = JsonLayoutSource::from_bytes(b"{ not json", None);
        assert!(matches!(result, Err(Error::InvalidLayout(_))));
    }

    /// A dump whose first page nests `depth` containers around one line.
    fn nested_dump(depth: usize) -> String {
        let line = r#"{ "kind": "text_line",
            "bbox": { "x0": 70, "y0": 100, "x1": 400, "y1": 112 }, "text": "deep" }"#;
        let mut object = line.to_string();
        for _ in 0..depth {
            object = format!(
                r#"{{ "kind": "container",
                    "bbox": {{ "x0": 0, "y0": 0, "x1": 600, "y1": 800 }},
                    "children": [{}] }}"#,
                object
            );
        }
        format!(
            r#"{{ "pages": [ {{ "objects": [{}] }}, {{ "objects": [] }} ] }}"#,
            object
        )
    }

    #[test]
    fn test_json_source_bad_page_is_isolated() {
        let dump = nested_dump(70);
        let source = JsonLayoutSource::from_bytes(dump.as_bytes(), None).unwrap();

        assert_eq!(source.page_count(), 2);
        assert!(matches!(source.page_layout(1), Err(Error::InvalidLayout(_))));
        assert!(source.page_layout(2).unwrap().is_empty());
    }

    #[test]
    fn test_json_source_moderate_nesting() {
        let dump = nested_dump(20);
        let source = JsonLayoutSource::from_bytes(dump.as_bytes(), None).unwrap();

        let objects = source.page_layout(1).unwrap();
        assert!(matches!(&objects[0], LayoutObject::Container(c) if c.children.len() == 1));
    }

    #[test]
    fn test_json_source_missing_file() {
        let result = JsonLayoutSource::open("/nonexistent/layout.json", None);
        assert!(matches!(result, Err(Error::DocumentUnavailable { .. })));
    }

    #[test]
    fn test_memory_source() {
        let line = LayoutObject::TextLine(TextLine::new(BBox::new(0.0, 0.0, 1.0, 1.0), "x"));
        let source = MemoryLayoutSource::new()
            .with_page(vec![line.clone()])
            .forbid_extraction();
        assert!(!source.is_extractable());
        assert_eq!(source.page_layout(1).unwrap(), vec![line]);
        assert!(source.outline().is_none());
    }
}
