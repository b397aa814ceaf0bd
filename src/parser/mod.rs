//! Layout classification engine.

mod backend;
mod book_parser;
mod classify;
mod frame;
mod images;
mod options;
mod pipeline;
mod segment;

pub use backend::{JsonLayoutSource, LayoutDump, LayoutSource, MemoryLayoutSource, PageLayout};
pub use book_parser::BookParser;
pub use classify::{ClassificationTable, DEFAULT_TAG};
pub use frame::is_relevant;
pub use images::{detect_extension, FsImageWriter, ImageWriter};
pub use options::{
    PageSelection, ParseOptions, DEFAULT_FOOTNOTE_TAG, DEFAULT_IMAGES_FOLDER,
    DEFAULT_INDENT_THRESHOLD, DEFAULT_MAX_DEPTH,
};
pub use pipeline::PagePipeline;
pub use segment::{line_run, split_paragraphs};
