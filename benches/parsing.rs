use criterion::{Criterion, black_box, criterion_group, criterion_main};
use onepager::page::Page;

fn bench_parse(c: &mut Criterion) {
    let mut md = String::from("# Benchmark Site\n\n");
    for i in 0..50 {
        md.push_str(&format!(
            "## Section {i}\n\nA paragraph with a [link](#section-0) and enough text \
             to need wrapping at eighty columns in a typical terminal window.\n\n\
             - first item\n- second item\n\n"
        ));
    }

    c.bench_function("parse_page_80_cols", |b| {
        b.iter(|| Page::parse(black_box(&md), 80).unwrap());
    });

    c.bench_function("parse_page_narrow", |b| {
        b.iter(|| Page::parse(black_box(&md), 40).unwrap());
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
