//! Document-level driver.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{Container, Document, LayoutObject, PageIssue, PageItem, PageOutput};

use super::backend::{JsonLayoutSource, LayoutSource};
use super::images::{FsImageWriter, ImageWriter};
use super::options::{PageSelection, ParseOptions};
use super::pipeline::PagePipeline;

/// Classifies the pages of a decoded document.
///
/// The options are fixed at construction. A parser can be shared across
/// threads and reused for any number of documents.
#[derive(Clone)]
pub struct BookParser {
    options: ParseOptions,
    image_writer: Arc<dyn ImageWriter>,
}

impl BookParser {
    /// Create a parser, validating the options.
    pub fn new(options: ParseOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            image_writer: Arc::new(FsImageWriter::new()),
        })
    }

    /// Replace the filesystem image writer.
    pub fn with_image_writer<W: ImageWriter + 'static>(mut self, writer: W) -> Self {
        self.image_writer = Arc::new(writer);
        self
    }

    /// The options this parser runs with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Open a layout dump file and classify it.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let source = JsonLayoutSource::open(path, self.options.password.as_deref())?;
        let mut document = self.parse(&source)?;
        document.metadata.source = Some(path.display().to_string());
        Ok(document)
    }

    /// Classify every selected page of a document.
    ///
    /// A document that denies extraction yields an empty, forbidden
    /// [`Document`] rather than an error.
    pub fn parse<S: LayoutSource + ?Sized>(&self, source: &S) -> Result<Document> {
        let page_count = source.page_count();
        if !source.is_extractable() {
            log::warn!("Document denies content extraction; no pages processed");
            return Ok(Document::forbidden(page_count));
        }

        let numbers = self.selected_pages(page_count);
        log::debug!("Classifying {} of {} pages", numbers.len(), page_count);

        // The decoder is only asked for one page at a time, in order.
        let layouts: Vec<(u32, Result<Vec<LayoutObject>>)> = numbers
            .into_iter()
            .map(|n| (n, source.page_layout(n)))
            .collect();

        let pages: Vec<PageOutput> = if self.options.parallel {
            layouts
                .into_par_iter()
                .map(|(n, layout)| self.classify_loaded(n, layout))
                .collect()
        } else {
            layouts
                .into_iter()
                .map(|(n, layout)| self.classify_loaded(n, layout))
                .collect()
        };

        let mut document = Document::new();
        document.metadata.page_count = page_count;
        document.pages = pages;
        document.outline = source.outline().filter(|o| !o.is_empty());
        Ok(document)
    }

    /// Lazily classify the selected pages one after another.
    ///
    /// Dropping the iterator stops the run before the next page is loaded.
    /// A document that denies extraction yields no pages.
    pub fn pages<'a, S: LayoutSource + ?Sized>(
        &'a self,
        source: &'a S,
    ) -> impl Iterator<Item = PageOutput> + 'a {
        let numbers = if source.is_extractable() {
            self.selected_pages(source.page_count())
        } else {
            Vec::new()
        };
        numbers
            .into_iter()
            .map(move |n| self.classify_loaded(n, source.page_layout(n)))
    }

    /// Classify one page's layout objects.
    pub fn classify_page(&self, page_number: u32, objects: &[LayoutObject]) -> PageOutput {
        self.pipeline(page_number).run(objects)
    }

    /// Filter and segment one page's layout objects without classifying them.
    pub fn preprocess_page(&self, page_number: u32, objects: &[LayoutObject]) -> Vec<PageItem> {
        self.pipeline(page_number).preprocess(objects)
    }

    /// Flatten a container found on page `page_number`.
    pub fn flatten(&self, container: &Container, page_number: u32) -> PageOutput {
        self.pipeline(page_number).flatten(container)
    }

    fn pipeline(&self, page_number: u32) -> PagePipeline<'_> {
        PagePipeline::new(&self.options, self.image_writer.as_ref(), page_number)
    }

    fn classify_loaded(&self, page_number: u32, layout: Result<Vec<LayoutObject>>) -> PageOutput {
        match layout {
            Ok(objects) => self.classify_page(page_number, &objects),
            Err(e) => {
                let issue = PageIssue::LayoutUnavailable {
                    page: page_number,
                    reason: e.to_string(),
                };
                log::warn!("{}", issue);
                let mut page = PageOutput::new(page_number);
                page.issues.push(issue);
                page
            }
        }
    }

    fn selected_pages(&self, page_count: u32) -> Vec<u32> {
        if let PageSelection::Pages(requested) = &self.options.pages {
            for n in requested.iter().filter(|&&n| n > page_count) {
                log::debug!("Requested page {} is beyond the last page ({})", n, page_count);
            }
        }
        (1..=page_count)
            .filter(|&n| self.options.pages.includes(n))
            .collect()
    }
}

impl std::fmt::Debug for BookParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookParser")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
