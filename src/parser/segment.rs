//! Paragraph segmentation of text boxes.

use crate::model::{ParagraphRun, TextBox, TextLine};

/// Split a text box into paragraphs.
///
/// Lines are grouped while each new line's left edge stays within
/// `indent_threshold` of the paragraph's left margin (the leftmost edge seen
/// so far in the paragraph). A line indented further starts a new
/// paragraph. A box without lines comes back as a single empty run.
pub fn split_paragraphs(text_box: &TextBox, indent_threshold: f32) -> Vec<ParagraphRun> {
    let mut runs = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();
    let mut margin = f32::INFINITY;

    for line in &text_box.lines {
        if !current.is_empty() && line.bbox.x0 - margin > indent_threshold {
            runs.extend(ParagraphRun::from_lines(std::mem::take(&mut current)));
            margin = f32::INFINITY;
        }
        margin = margin.min(line.bbox.x0);
        current.push(line.clone());
    }
    runs.extend(ParagraphRun::from_lines(current));

    if runs.is_empty() {
        runs.push(ParagraphRun {
            bbox: text_box.bbox,
            lines: Vec::new(),
        });
    }
    runs
}

/// Wrap a single line as a one-line run.
pub fn line_run(line: &TextLine) -> ParagraphRun {
    ParagraphRun {
        bbox: line.bbox,
        lines: vec![line.clone()],
    }
}
