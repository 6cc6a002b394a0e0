use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use boolex::{is_boolean_query, QueryCompiler, Vocabulary};

fn build_vocabulary(facets: usize, values_per_facet: usize) -> Vocabulary {
    let mut vocabulary = Vocabulary::new();
    for f in 0..facets {
        let values: Vec<String> = (0..values_per_facet)
            .map(|v| format!("value-{f}-{v}"))
            .collect();
        vocabulary = vocabulary.with_facet(format!("facet{f}"), values);
    }
    // The terms the benchmark queries actually hit.
    vocabulary
        .with_facet("brand", ["nike", "adidas"])
        .with_facet("color", ["red", "blue", "black"])
}

fn bench_pre_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("pre_check");
    for query in ["plain red shoes", "red and blue or brand:nike"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, query| {
            b.iter(|| is_boolean_query(black_box(query)));
        });
    }
    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let compiler = QueryCompiler::new();
    let mut group = c.benchmark_group("compile");

    for total_values in [50, 500] {
        let vocabulary = build_vocabulary(10, total_values / 10);

        group.bench_with_input(
            BenchmarkId::new("exact_terms", total_values),
            &vocabulary,
            |b, vocabulary| {
                b.iter(|| compiler.compile(black_box("red and brand:nike"), vocabulary));
            },
        );

        // Wildcard resolution scans the whole vocabulary.
        group.bench_with_input(
            BenchmarkId::new("wildcard_or_set", total_values),
            &vocabulary,
            |b, vocabulary| {
                b.iter(|| compiler.compile(black_box("nike and -colo*"), vocabulary));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pre_check, bench_compile);
criterion_main!(benches);
