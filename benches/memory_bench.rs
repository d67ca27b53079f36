/*!
 * Benchmarks for the translation memory.
 *
 * Measures performance of:
 * - Exact lookups
 * - Fuzzy search over a growing candidate pool
 * - The similarity ratio on its own
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use patentko::database::similarity;
use patentko::database::TranslationMemory;
use patentko::sections::DocumentType;

/// In-memory store filled with `count` related claims.
fn populated_memory(count: usize) -> TranslationMemory {
    let tm = TranslationMemory::new_in_memory().expect("Failed to create memory");
    for i in 0..count {
        tm.put(
            &format!("A method comprising heating the compound to {} degrees", i),
            &format!("상기 화합물을 {} 도로 가열하는 단계를 포함하는 방법.", i),
            "chemistry_pharma",
            DocumentType::Claim,
            (i % 11) as i64,
        );
    }
    tm
}

fn bench_exact_lookup(c: &mut Criterion) {
    let tm = populated_memory(100);

    c.bench_function("tm_exact_lookup", |b| {
        b.iter(|| {
            black_box(
                tm.search(
                    "A method comprising heating the compound to 42 degrees",
                    Some("chemistry_pharma"),
                    0.95,
                    5,
                )
                .unwrap(),
            )
        });
    });
}

fn bench_fuzzy_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("tm_fuzzy_search");

    for size in [10, 100, 500].iter() {
        let tm = populated_memory(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &tm, |b, tm| {
            b.iter(|| {
                black_box(
                    tm.search(
                        "A method comprising heating a compound to many degrees",
                        Some("chemistry_pharma"),
                        0.7,
                        5,
                    )
                    .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn bench_similarity_ratio(c: &mut Criterion) {
    let a = "A method comprising heating the compound to 42 degrees and cooling it";
    let b_text = "A method comprising heating a compound to 40 degrees then cooling it";

    c.bench_function("similarity_ratio", |b| {
        b.iter(|| black_box(similarity::ratio(black_box(a), black_box(b_text))));
    });
}

criterion_group!(
    memory_benches,
    bench_exact_lookup,
    bench_fuzzy_search,
    bench_similarity_ratio,
);

criterion_main!(memory_benches);
