//! Criterion benchmark for the stylesheet face extractor (made by FontLab https://www.fontlab.com/)

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typw_core::stylesheet::{collect_source_urls, parse_font_faces};

fn synthetic_sheet(subsets: usize) -> String {
    let mut body = String::new();
    for i in 0..subsets {
        body.push_str(&format!(
            concat!(
                "/* subset-{i} */\n",
                "@font-face {{\n",
                "  font-family: 'Sample';\n",
                "  font-style: {style};\n",
                "  font-weight: {weight};\n",
                "  font-display: swap;\n",
                "  src: url(https://cdn.test/sample-{i}.woff2) format('woff2');\n",
                "  unicode-range: U+0000-00FF;\n",
                "}}\n",
            ),
            i = i,
            style = if i % 2 == 0 { "normal" } else { "italic" },
            weight = if i % 3 == 0 { 700 } else { 400 },
        ));
    }
    body
}

fn bench_stylesheet_parsing(c: &mut Criterion) {
    let sheet = synthetic_sheet(24);

    c.bench_function("parse_font_faces 24 subsets", |b| {
        b.iter(|| parse_font_faces(black_box(&sheet)))
    });

    c.bench_function("collect_source_urls 24 subsets", |b| {
        b.iter(|| collect_source_urls(black_box(&sheet)))
    });
}

criterion_group!(benches, bench_stylesheet_parsing);
criterion_main!(benches);
