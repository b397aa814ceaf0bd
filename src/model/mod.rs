//! Document model types.
//!
//! Two halves: the decoded page geometry the engine consumes (layout
//! objects and their bounding boxes) and the classified output it
//! produces (tagged blocks per page, assembled into a document).

mod block;
mod document;
mod geometry;
mod layout;

pub use block::{ClassifiedBlock, PageIssue, PageOutput};
pub use document::{Document, Extraction, Metadata, Outline, OutlineItem};
pub use geometry::{BBox, Frame};
pub use layout::{
    Container, ImageObject, LayoutObject, ObjectKind, OtherObject, PageItem, ParagraphRun,
    TextBox, TextLine,
};
