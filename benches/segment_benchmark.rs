//! Benchmarks for pdflayout segmentation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic two-column pages of monospaced glyphs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdflayout::area::{Area, AreaConfig, IndexKind, SpatialPredicate};
use pdflayout::{AnalyzeOptions, Analyzer, Character, RawDocument, RawPage, Rect};

const WORDS: &[&str] = &["layout", "segment", "the", "of", "block", "paragraph", "line", "a"];

/// Creates a two-column page with `rows` lines of text per column.
fn create_page(number: u32, rows: usize) -> RawPage {
    let mut page = RawPage::new(number, 612.0, 792.0);
    for column_x in [72.0f32, 330.0] {
        for row in 0..rows {
            let y = 720.0 - 12.0 * row as f32;
            let mut x = column_x;
            let mut i = row;
            while x < column_x + 200.0 {
                let word = WORDS[i % WORDS.len()];
                for c in word.chars() {
                    let rect = Rect::from_size(x, y, 5.0, 7.0);
                    page.characters.push(Character::new(c.to_string(), rect, 1, 10.0));
                    x += 5.0;
                }
                x += 5.0;
                i += 3;
            }
        }
    }
    page
}

fn create_document(pages: u32, rows: usize) -> RawDocument {
    RawDocument {
        pages: (1..=pages).map(|n| create_page(n, rows)).collect(),
        ..Default::default()
    }
}

/// Benchmark the full analysis at various document sizes.
fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.sample_size(20);

    for page_count in [1, 5, 10].iter() {
        let raw = create_document(*page_count, 50);
        for (label, options) in [
            ("parallel", AnalyzeOptions::new()),
            ("sequential", AnalyzeOptions::new().sequential()),
        ] {
            let analyzer = Analyzer::new(options).unwrap();
            group.bench_function(format!("{}_pages_{}", page_count, label), |b| {
                b.iter(|| analyzer.analyze(black_box(&raw)).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark spatial queries of the two index implementations.
fn bench_index_query(c: &mut Criterion) {
    let page = create_page(1, 50);
    let mut group = c.benchmark_group("index_query");

    for kind in [IndexKind::RTree, IndexKind::Scan] {
        let mut area = Area::new(AreaConfig::default().with_index(kind));
        area.extend(page.text_characters());
        let lane = Rect::new(280.0, 0.0, 320.0, 792.0);

        group.bench_function(format!("{:?}", kind), |b| {
            b.iter(|| area.any::<Character>(SpatialPredicate::OverlappedBy, black_box(&lane)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_index_query);
criterion_main!(benches);
