//! Rendering of classified documents to markup, JSON and plain text.

mod json;
pub mod markup;
mod options;
mod stats;
mod text;

pub use json::{to_json, JsonFormat};
pub use markup::{emit, emit_image, normalize_text, page_markup, strip_tags, to_markup};
pub use options::RenderOptions;
pub use stats::ExtractionStats;
pub use text::to_text;
