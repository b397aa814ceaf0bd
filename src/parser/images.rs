//! Image extraction.
//!
//! The engine does not decode or re-encode images. It hands each retained
//! image to an [`ImageWriter`] and records the path it gets back.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::ImageObject;

/// Persists image objects and reports where they were stored.
///
/// A failed save is non-fatal for the page: the engine logs it, records a
/// [`PageIssue`](crate::model::PageIssue) and moves on.
pub trait ImageWriter: Send + Sync {
    /// Store `image` from page `page_number` under `destination`.
    fn save(&self, image: &ImageObject, page_number: u32, destination: &Path) -> Result<PathBuf>;
}

/// Writes raw image streams to files named `<page>_<name><ext>`.
///
/// The extension comes from the stream's magic bytes; streams in a format
/// it cannot recognise are not written.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageWriter;

impl FsImageWriter {
    /// Create a new filesystem writer.
    pub fn new() -> Self {
        Self
    }
}

impl ImageWriter for FsImageWriter {
    fn save(&self, image: &ImageObject, page_number: u32, destination: &Path) -> Result<PathBuf> {
        let extension = detect_extension(&image.data).ok_or_else(|| {
            Error::ImageExtract(format!("unrecognised image stream '{}'", image.name))
        })?;

        fs::create_dir_all(destination)?;
        let file_name = format!("{}_{}{}", page_number, file_stem(&image.name), extension);
        let path = destination.join(file_name);
        fs::write(&path, &image.data)?;

        log::debug!("Saved image {} ({} bytes)", path.display(), image.data.len());
        Ok(path)
    }
}

/// Detect a file extension from image magic bytes.
pub fn detect_extension(data: &[u8]) -> Option<&'static str> {
    // JPEG: FF D8
    if data.starts_with(&[0xFF, 0xD8]) {
        return Some(".jpg");
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(".png");
    }

    // GIF: GIF87a or GIF89a
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some(".gif");
    }

    // TIFF: 49 49 2A 00 (little-endian) or 4D 4D 00 2A (big-endian)
    if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
    {
        return Some(".tif");
    }

    // BMP: BM
    if data.starts_with(b"BM") {
        return Some(".bmp");
    }

    None
}

/// Keep resource names from escaping the destination directory.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "image".to_string()
    } else {
        stem
    }
}
