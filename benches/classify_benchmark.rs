//! Benchmarks for page classification performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks classify synthetic page layouts held in memory.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bookparse::model::{BBox, Container, TextBox, TextLine};
use bookparse::{
    BookParser, ClassificationTable, Frame, LayoutObject, MemoryLayoutSource, ParseOptions,
};

/// A page with a heading, body paragraphs, a figure and a footnote.
fn create_test_page(page: usize) -> Vec<LayoutObject> {
    let mut objects = Vec::new();

    // Running header, outside the content frame
    objects.push(LayoutObject::TextLine(TextLine::new(
        BBox::new(70.0, 640.0, 400.0, 652.9),
        format!("Page {}", page),
    )));

    objects.push(LayoutObject::TextLine(TextLine::new(
        BBox::new(70.0, 590.0, 400.0, 605.6),
        format!("Chapter {}", page),
    )));

    let mut lines = Vec::new();
    let mut y = 570.0;
    for paragraph in 0..6 {
        for row in 0..8 {
            let x0 = if row == 0 { 85.0 } else { 70.0 };
            lines.push(TextLine::new(
                BBox::new(x0, y, 400.0, y + 12.9),
                format!("Paragraph {} line {} of benchmark body text.", paragraph, row),
            ));
            y -= 14.0;
        }
    }
    if let Some(body) = TextBox::from_lines(lines) {
        objects.push(LayoutObject::TextBox(body));
    }

    objects.push(LayoutObject::Container(Container {
        bbox: BBox::new(70.0, 100.0, 400.0, 200.0),
        name: Some("Fm0".to_string()),
        children: vec![LayoutObject::TextLine(TextLine::new(
            BBox::new(80.0, 110.0, 390.0, 122.9),
            "Figure caption inside a form.",
        ))],
    }));

    objects.push(LayoutObject::TextLine(TextLine::new(
        BBox::new(70.0, 92.0, 400.0, 101.5),
        "1 A footnote at the bottom of the page.",
    )));

    objects
}

fn options() -> ParseOptions {
    ParseOptions::new()
        .with_frame(Frame::new(65.0, 90.0, 410.0, 620.0))
        .with_text_heights(ClassificationTable::from_pairs(
            [("p", 12.9), ("fn_size", 9.5), ("h1", 15.6), ("h2", 13.4)],
            0.02,
        ))
}

/// Benchmark single-page classification.
fn bench_classify_page(c: &mut Criterion) {
    let parser = BookParser::new(options()).unwrap();
    let page = create_test_page(1);

    c.bench_function("classify_page", |b| {
        b.iter(|| parser.classify_page(1, black_box(&page)));
    });
}

/// Benchmark whole documents, sequential against parallel.
fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");

    for page_count in [10, 100].iter() {
        let source = (1..=*page_count).fold(MemoryLayoutSource::new(), |src, n| {
            src.with_page(create_test_page(n))
        });

        for parallel in [false, true] {
            let parser = BookParser::new(options().with_parallel(parallel)).unwrap();
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_function(format!("{}_pages_{}", page_count, label), |b| {
                b.iter(|| parser.parse(black_box(&source)).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark markup rendering.
fn bench_markup(c: &mut Criterion) {
    let source = (1..=50).fold(MemoryLayoutSource::new(), |src, n| {
        src.with_page(create_test_page(n))
    });
    let doc = BookParser::new(options()).unwrap().parse(&source).unwrap();
    let render_options = bookparse::RenderOptions::default();

    c.bench_function("to_markup_50_pages", |b| {
        b.iter(|| bookparse::render::to_markup(black_box(&doc), &render_options).unwrap());
    });
}

criterion_group!(benches, bench_classify_page, bench_document, bench_markup);
criterion_main!(benches);
