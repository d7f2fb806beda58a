// crates/nationality-core/benches/benchmarks.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nationality_core::prelude::*;

fn bench_search(c: &mut Criterion) {
    let db = NationalityDb::builtin();

    c.bench_function("search_cold", |b| {
        b.iter_batched(
            NationalityDb::builtin,
            |fresh| fresh.search(black_box(Some("land"))).len(),
            criterion::BatchSize::SmallInput,
        )
    });

    db.search(Some("land"));
    c.bench_function("search_cached", |b| {
        b.iter(|| db.search(black_box(Some("land"))).len())
    });

    c.bench_function("search_blank", |b| {
        b.iter(|| db.search(black_box(None)).len())
    });
}

fn bench_lookup(c: &mut Criterion) {
    let db = NationalityDb::builtin();

    c.bench_function("resolve", |b| b.iter(|| db.resolve(black_box(Some("KR"))).name().len()));
    c.bench_function("flag_for_lowercase", |b| {
        b.iter(|| db.flag_for(black_box(Some("kr"))).len())
    });
}

criterion_group!(benches, bench_search, bench_lookup);
criterion_main!(benches);
