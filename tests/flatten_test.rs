//! Integration tests for container flattening.

use std::path::{Path, PathBuf};

use bookparse::model::{Container, ImageObject, TextLine};
use bookparse::{
    BBox, BookParser, ClassifiedBlock, ImageWriter, LayoutObject, PageIssue, PageOutput,
    ParseOptions, Result,
};

/// Hands back a reference without writing anything.
struct NamingWriter;

impl ImageWriter for NamingWriter {
    fn save(&self, image: &ImageObject, page: u32, destination: &Path) -> Result<PathBuf> {
        Ok(destination.join(format!("{}_{}", page, image.name)))
    }
}

fn parser(options: ParseOptions) -> BookParser {
    BookParser::new(options.with_images_folder("/img"))
        .unwrap()
        .with_image_writer(NamingWriter)
}

fn line(text: &str) -> LayoutObject {
    LayoutObject::TextLine(TextLine::new(BBox::new(70.0, 300.0, 400.0, 312.0), text))
}

fn image(name: &str) -> LayoutObject {
    LayoutObject::Image(ImageObject {
        bbox: BBox::new(70.0, 300.0, 200.0, 400.0),
        name: name.to_string(),
        data: Vec::new(),
    })
}

fn container(children: Vec<LayoutObject>) -> Container {
    Container {
        bbox: BBox::new(60.0, 200.0, 420.0, 500.0),
        name: None,
        children,
    }
}

fn texts(page: &PageOutput) -> Vec<&str> {
    page.blocks
        .iter()
        .map(|b| match b {
            ClassifiedBlock::Text { text, .. } => text.as_str(),
            ClassifiedBlock::Image { reference } => reference.as_str(),
            ClassifiedBlock::Other(o) => o.label.as_str(),
        })
        .collect()
}

#[test]
fn test_flatten_preserves_child_order() {
    let parser = parser(ParseOptions::new());
    let figure = container(vec![line("a"), image("Im0"), line("b")]);

    let out = parser.flatten(&figure, 4);
    assert_eq!(texts(&out), vec!["a", "/img/4_Im0", "b"]);
}

#[test]
fn test_flatten_is_associative() {
    let parser = parser(ParseOptions::new());
    let inner = container(vec![line("inner one"), image("Im1"), line("inner two")]);
    let outer = container(vec![
        line("before"),
        LayoutObject::Container(inner.clone()),
        line("after"),
    ]);

    let top_down = parser.flatten(&outer, 1);

    let mut stepwise = Vec::new();
    stepwise.extend(parser.classify_page(1, &[line("before")]).blocks);
    stepwise.extend(parser.flatten(&inner, 1).blocks);
    stepwise.extend(parser.classify_page(1, &[line("after")]).blocks);

    assert_eq!(top_down.blocks, stepwise);
    assert_eq!(
        texts(&top_down),
        vec!["before", "inner one", "/img/1_Im1", "inner two", "after"]
    );
}

#[test]
fn test_container_in_page_matches_flatten() {
    let parser = parser(ParseOptions::new());
    let figure = container(vec![line("caption"), image("Im2")]);

    let page = parser.classify_page(2, &[LayoutObject::Container(figure.clone())]);
    assert_eq!(page.blocks, parser.flatten(&figure, 2).blocks);
}

#[test]
fn test_depth_limit_drops_subtree_and_records_issue() {
    let mut nested = container(vec![line("bottom")]);
    for level in (1..=70).rev() {
        nested = container(vec![
            line(&format!("level {}", level)),
            LayoutObject::Container(nested),
        ]);
    }

    let parser = parser(ParseOptions::new());
    let page = parser.classify_page(9, &[LayoutObject::Container(nested)]);

    assert_eq!(page.blocks.len(), 64);
    assert_eq!(texts(&page).first(), Some(&"level 1"));
    assert_eq!(texts(&page).last(), Some(&"level 64"));
    assert!(matches!(
        page.issues.as_slice(),
        [PageIssue::NestingTooDeep { page: 9, depth: 65, limit: 64, .. }]
    ));
}

#[test]
fn test_depth_limit_is_configurable() {
    let inner = container(vec![line("deep")]);
    let outer = container(vec![LayoutObject::Container(inner)]);

    let parser = parser(ParseOptions::new().with_max_depth(1));
    let out = parser.classify_page(1, &[LayoutObject::Container(outer)]);

    assert!(out.blocks.is_empty());
    assert_eq!(out.issues.len(), 1);
}
