//! Page pipeline and container flattening.
//!
//! One pass over a page's object list: frame filtering, paragraph
//! segmentation, then per-item handling. Containers re-enter the same pass
//! for their children and their output is spliced in place, so the page
//! comes out as one flat, ordered block sequence.

use crate::model::{
    ClassifiedBlock, Container, ImageObject, LayoutObject, OtherObject, PageIssue, PageItem,
    PageOutput, ParagraphRun,
};
use crate::render::normalize_text;

use super::frame::is_relevant;
use super::images::ImageWriter;
use super::segment::{line_run, split_paragraphs};
use super::ParseOptions;

/// A page object after filtering and segmentation, borrowing from the layout.
#[derive(Debug)]
enum Prepared<'a> {
    Paragraph(ParagraphRun),
    Image(&'a ImageObject),
    Container(&'a Container),
    Other(&'a OtherObject),
}

impl From<Prepared<'_>> for PageItem {
    fn from(item: Prepared<'_>) -> Self {
        match item {
            Prepared::Paragraph(run) => PageItem::Paragraph(run),
            Prepared::Image(image) => PageItem::Image(image.clone()),
            Prepared::Container(container) => PageItem::Container(container.clone()),
            Prepared::Other(other) => PageItem::Other(other.clone()),
        }
    }
}

/// Classifies the objects of a single page.
///
/// Holds only shared references, so any number of pipelines can run at once
/// over the same options and writer.
pub struct PagePipeline<'a> {
    options: &'a ParseOptions,
    image_writer: &'a dyn ImageWriter,
    page_number: u32,
}

impl<'a> PagePipeline<'a> {
    /// Create a pipeline for page `page_number`.
    pub fn new(options: &'a ParseOptions, image_writer: &'a dyn ImageWriter, page_number: u32) -> Self {
        Self {
            options,
            image_writer,
            page_number,
        }
    }

    /// Page number this pipeline works on.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Filter and segment a page without classifying it.
    pub fn preprocess(&self, objects: &[LayoutObject]) -> Vec<PageItem> {
        self.prepare(objects).into_iter().map(PageItem::from).collect()
    }

    /// Classify a whole page.
    pub fn run(&self, objects: &[LayoutObject]) -> PageOutput {
        let mut out = PageOutput::new(self.page_number);
        self.process(objects, 0, &mut out);
        log::debug!(
            "Page {}: {} objects -> {} blocks, {} footnotes, {} issues",
            self.page_number,
            objects.len(),
            out.blocks.len(),
            out.footnotes.len(),
            out.issues.len()
        );
        out
    }

    /// Flatten a container into the blocks its children classify to.
    ///
    /// The container itself is not frame-filtered; its children are.
    pub fn flatten(&self, container: &Container) -> PageOutput {
        let mut out = PageOutput::new(self.page_number);
        self.enter(container, 0, &mut out);
        out
    }

    fn prepare<'o>(&self, objects: &'o [LayoutObject]) -> Vec<Prepared<'o>> {
        let frame = self.options.content_frame.as_ref();
        let kinds = self.options.content_kinds.as_deref();
        let mut items = Vec::with_capacity(objects.len());

        for obj in objects {
            if !is_relevant(obj, frame, kinds) {
                log::trace!("Page {}: dropped {}", self.page_number, obj.describe());
                continue;
            }
            match obj {
                LayoutObject::TextBox(text_box) => items.extend(
                    split_paragraphs(text_box, self.options.indent_threshold)
                        .into_iter()
                        .map(Prepared::Paragraph),
                ),
                LayoutObject::TextLine(line) => items.push(Prepared::Paragraph(line_run(line))),
                LayoutObject::Image(image) => items.push(Prepared::Image(image)),
                LayoutObject::Container(container) => items.push(Prepared::Container(container)),
                LayoutObject::Other(other) => items.push(Prepared::Other(other)),
            }
        }
        items
    }

    fn process(&self, objects: &[LayoutObject], depth: usize, out: &mut PageOutput) {
        for item in self.prepare(objects) {
            match item {
                Prepared::Paragraph(run) => self.classify_run(&run, out),
                Prepared::Image(image) => self.save_image(image, out),
                Prepared::Container(container) => self.enter(container, depth, out),
                Prepared::Other(other) => out.blocks.push(ClassifiedBlock::Other(other.clone())),
            }
        }
    }

    fn enter(&self, container: &Container, depth: usize, out: &mut PageOutput) {
        let child_depth = depth + 1;
        if child_depth > self.options.max_depth {
            let issue = PageIssue::NestingTooDeep {
                page: self.page_number,
                object: LayoutObject::Container(container.clone()).describe(),
                depth: child_depth,
                limit: self.options.max_depth,
            };
            log::warn!("{}", issue);
            out.issues.push(issue);
            return;
        }
        self.process(&container.children, child_depth, out);
    }

    fn classify_run(&self, run: &ParagraphRun, out: &mut PageOutput) {
        let text = normalize_text(&run.text());
        if text.is_empty() {
            return;
        }
        let tag = self.options.text_heights.classify_run(run);
        if tag == self.options.footnote_tag {
            out.footnotes.push(text);
        } else {
            out.blocks.push(ClassifiedBlock::text(tag, text));
        }
    }

    fn save_image(&self, image: &ImageObject, out: &mut PageOutput) {
        match self
            .image_writer
            .save(image, self.page_number, &self.options.images_folder)
        {
            Ok(path) => out
                .blocks
                .push(ClassifiedBlock::image(path.display().to_string())),
            Err(e) => {
                let issue = PageIssue::ImageNotSaved {
                    page: self.page_number,
                    object: format!("image '{}'", image.name),
                    reason: e.to_string(),
                };
                log::warn!("{}", issue);
                out.issues.push(issue);
            }
        }
    }
}
