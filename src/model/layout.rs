//! Decoded layout objects.
//!
//! These mirror what a PDF layout decoder hands over for one page: text
//! boxes made of lines, loose text lines, images, figure-like containers
//! that nest further objects, and anything else the decoder could not
//! name. The engine reads them and never mutates them.

use serde::{Deserialize, Serialize};

use super::BBox;

/// A piece of decoded page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutObject {
    /// A block of text made of lines
    TextBox(TextBox),
    /// A single line of text
    TextLine(TextLine),
    /// A raster image
    Image(ImageObject),
    /// A figure or form region embedding further objects
    Container(Container),
    /// Anything the decoder produced that has no dedicated kind
    Other(OtherObject),
}

impl LayoutObject {
    /// Bounding box of the object.
    pub fn bbox(&self) -> &BBox {
        match self {
            LayoutObject::TextBox(b) => &b.bbox,
            LayoutObject::TextLine(l) => &l.bbox,
            LayoutObject::Image(i) => &i.bbox,
            LayoutObject::Container(c) => &c.bbox,
            LayoutObject::Other(o) => &o.bbox,
        }
    }

    /// Kind tag of the object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            LayoutObject::TextBox(_) => ObjectKind::TextBox,
            LayoutObject::TextLine(_) => ObjectKind::TextLine,
            LayoutObject::Image(_) => ObjectKind::Image,
            LayoutObject::Container(_) => ObjectKind::Container,
            LayoutObject::Other(_) => ObjectKind::Other,
        }
    }

    /// Short human-readable identity, used in diagnostics.
    pub fn describe(&self) -> String {
        let b = self.bbox();
        let name = match self {
            LayoutObject::Image(i) => format!("image '{}'", i.name),
            LayoutObject::Container(c) => match &c.name {
                Some(name) => format!("container '{}'", name),
                None => "container".to_string(),
            },
            LayoutObject::Other(o) => format!("other '{}'", o.label),
            LayoutObject::TextBox(_) => "text box".to_string(),
            LayoutObject::TextLine(_) => "text line".to_string(),
        };
        format!("{} at ({}, {}, {}, {})", name, b.x0, b.y0, b.x1, b.y1)
    }
}

/// The kinds of layout object, used for kind filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// [`LayoutObject::TextBox`]
    TextBox,
    /// [`LayoutObject::TextLine`]
    TextLine,
    /// [`LayoutObject::Image`]
    Image,
    /// [`LayoutObject::Container`]
    Container,
    /// [`LayoutObject::Other`]
    Other,
}

impl ObjectKind {
    /// All kinds, in declaration order.
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::TextBox,
        ObjectKind::TextLine,
        ObjectKind::Image,
        ObjectKind::Container,
        ObjectKind::Other,
    ];
}

/// A single line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Bounding box of the line
    pub bbox: BBox,
    /// Line text, without a trailing newline
    pub text: String,
}

impl TextLine {
    /// Create a new text line.
    pub fn new(bbox: BBox, text: impl Into<String>) -> Self {
        Self {
            bbox,
            text: text.into(),
        }
    }
}

/// A block of text lines in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box of the block
    pub bbox: BBox,
    /// Lines, top to bottom
    #[serde(default)]
    pub lines: Vec<TextLine>,
}

impl TextBox {
    /// Create a text box with an explicit bounding box.
    pub fn new(bbox: BBox, lines: Vec<TextLine>) -> Self {
        Self { bbox, lines }
    }

    /// Create a text box whose bounding box is the union of its lines.
    ///
    /// Returns `None` when `lines` is empty.
    pub fn from_lines(lines: Vec<TextLine>) -> Option<Self> {
        let bbox = BBox::union_all(lines.iter().map(|l| &l.bbox))?;
        Some(Self { bbox, lines })
    }

    /// Text of all lines joined by newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A raster image as delivered by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    /// Bounding box of the placed image
    pub bbox: BBox,
    /// Resource name of the image within the page
    pub name: String,
    /// Raw stream bytes
    #[serde(default)]
    pub data: Vec<u8>,
}

/// A figure or form region holding further layout objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Bounding box enclosing all children
    pub bbox: BBox,
    /// Resource name, if the decoder knows one
    #[serde(default)]
    pub name: Option<String>,
    /// Child objects in page order
    #[serde(default)]
    pub children: Vec<LayoutObject>,
}

/// An object of a kind the engine does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherObject {
    /// Bounding box
    pub bbox: BBox,
    /// Decoder label (e.g. "curve", "rect")
    pub label: String,
}

/// A paragraph carved out of a text box.
///
/// Holds the consecutive lines judged to belong together. A text object
/// that exposes no lines keeps its own bounding box and yields no text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphRun {
    /// Union of the line boxes
    pub bbox: BBox,
    /// Lines of the paragraph
    pub lines: Vec<TextLine>,
}

impl ParagraphRun {
    /// Build a run from its lines.
    pub fn from_lines(lines: Vec<TextLine>) -> Option<Self> {
        let bbox = BBox::union_all(lines.iter().map(|l| &l.bbox))?;
        Some(Self { bbox, lines })
    }

    /// Concatenated text, one line per row.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of lines in the run.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Height of the run's box divided by the line count.
    ///
    /// The box spans the leading between lines, so loosely set text
    /// averages higher than its glyph height. `None` when the run has no
    /// lines.
    pub fn avg_line_height(&self) -> Option<f32> {
        if self.lines.is_empty() {
            return None;
        }
        Some(self.bbox.height() / self.lines.len() as f32)
    }

    /// Turn the run back into a standalone text box.
    pub fn to_text_box(&self) -> TextBox {
        TextBox::new(self.bbox, self.lines.clone())
    }
}

/// A page object after frame filtering and paragraph segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageItem {
    /// A paragraph of text
    Paragraph(ParagraphRun),
    /// An image awaiting extraction
    Image(ImageObject),
    /// A container awaiting flattening
    Container(Container),
    /// Passthrough object
    Other(OtherObject),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x0: f32, y0: f32, height: f32, text: &str) -> TextLine {
        TextLine::new(BBox::new(x0, y0, x0 + 100.0, y0 + height), text)
    }

    #[test]
    fn test_layout_object_kind_and_bbox() {
        let obj = LayoutObject::TextLine(line(10.0, 20.0, 12.0, "Hello"));
        assert_eq!(obj.kind(), ObjectKind::TextLine);
        assert_eq!(obj.bbox().y1, 32.0);
    }

    #[test]
    fn test_text_box_from_lines() {
        let tb = TextBox::from_lines(vec![
            line(10.0, 100.0, 12.0, "first"),
            line(12.0, 86.0, 12.0, "second"),
        ])
        .unwrap();
        assert_eq!(tb.bbox, BBox::new(10.0, 86.0, 112.0, 112.0));
        assert_eq!(tb.text(), "first\nsecond");
        assert!(TextBox::from_lines(Vec::new()).is_none());
    }

    #[test]
    fn test_paragraph_run_avg_line_height() {
        let run = ParagraphRun::from_lines(vec![
            line(10.0, 100.0, 12.0, "a"),
            line(10.0, 86.0, 14.0, "b"),
        ])
        .unwrap();
        assert_eq!(run.line_count(), 2);
        assert_eq!(run.avg_line_height(), Some(13.0));
    }

    #[test]
    fn test_avg_line_height_includes_leading() {
        // Two 12pt lines set 14pt apart: the run box is 26pt tall.
        let run = ParagraphRun::from_lines(vec![
            line(10.0, 114.0, 12.0, "a"),
            line(10.0, 100.0, 12.0, "b"),
        ])
        .unwrap();
        assert_eq!(run.bbox.height(), 26.0);
        assert_eq!(run.avg_line_height(), Some(13.0));
    }

    #[test]
    fn test_paragraph_run_without_lines() {
        let run = ParagraphRun {
            bbox: BBox::new(0.0, 0.0, 10.0, 10.0),
            lines: Vec::new(),
        };
        assert_eq!(run.avg_line_height(), None);
        assert_eq!(run.text(), "");
    }

    #[test]
    fn test_layout_object_json_shape() {
        let obj = LayoutObject::Other(OtherObject {
            bbox: BBox::new(0.0, 0.0, 1.0, 1.0),
            label: "curve".to_string(),
        });
        let json = serde_json::to_string(&obj).unwrap();
        assert!(json.contains("\"kind\":\"other\""));
        let back: LayoutObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obj);
    }

    #[test]
    fn test_describe_names_image() {
        let obj = LayoutObject::Image(ImageObject {
            bbox: BBox::new(1.0, 2.0, 3.0, 4.0),
            name: "Im0".to_string(),
            data: Vec::new(),
        });
        assert_eq!(obj.describe(), "image 'Im0' at (1, 2, 3, 4)");
    }
}
