// Benchmarks for name cleaning, the full pipeline and similarity scoring
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orderflow::{Dataset, EtlPipeline, ProductRecord, ProductTable, RawTable, SimilarityScorer};
use orderflow_core::clean_name;
use rand::prelude::*;
use std::sync::Arc;

const NAMES: [&str; 8] = [
    "Olena",
    "мар&#039;яна",
    "Іванова-Шипак",
    "я",
    "-",
    "Петро 2",
    "ккк",
    "O&#039;Brien",
];
const GROUPS: [&str; 4] = ["Творчість та канцтовари", "Ігрові фігурки", "Іграшки", "Pens"];
const MAKERS: [&str; 3] = ["BIC", "Bingo", "Hama"];

fn generate_products(size: usize) -> Vec<ProductRecord> {
    let mut rng = rand::rng();
    (0..size)
        .map(|i| {
            ProductRecord::new(
                i as i64,
                rng.random_range(0.0..500.0),
                GROUPS[rng.random_range(0..GROUPS.len())],
                MAKERS[rng.random_range(0..MAKERS.len())],
            )
        })
        .collect()
}

fn generate_raw_inputs(size: usize) -> (RawTable, RawTable) {
    let mut rng = rand::rng();
    let orders: Vec<Vec<String>> = (0..size)
        .map(|i| {
            vec![
                (i / 2).to_string(),
                "2019-04-28 18:20:05".to_string(),
                rng.random_range(1..10_000).to_string(),
                "Paid".to_string(),
                format!("{},{}", rng.random_range(1..2_000), rng.random_range(0..100)),
                rng.random_range(1..5).to_string(),
                NAMES[rng.random_range(0..NAMES.len())].to_string(),
                NAMES[rng.random_range(0..NAMES.len())].to_string(),
                String::new(),
                format!("{}x", rng.random_range(0..size)),
            ]
        })
        .collect();
    let products: Vec<Vec<String>> = generate_products(size / 4)
        .iter()
        .map(ProductRecord::to_raw_row)
        .collect();

    let orders = RawTable::new(
        Dataset::Orders,
        Dataset::Orders.schema().column_names().map(str::to_string).collect(),
        orders,
    )
    .unwrap();
    let products = RawTable::new(
        Dataset::Products,
        Dataset::Products.schema().column_names().map(str::to_string).collect(),
        products,
    )
    .unwrap();
    (orders, products)
}

fn benchmark_clean_name(c: &mut Criterion) {
    c.bench_function("clean_name", |b| {
        b.iter(|| {
            for name in NAMES {
                black_box(clean_name(black_box(name)));
            }
        });
    });
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for size in [1_000, 10_000].iter() {
        let (orders, products) = generate_raw_inputs(*size);
        let pipeline = EtlPipeline::new();
        group.bench_with_input(BenchmarkId::new("process", size), size, |b, _| {
            b.iter(|| black_box(pipeline.process(&orders, &products).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    let products = Arc::new(ProductTable::new(generate_products(100_000)));
    let scorer = SimilarityScorer::new(products);
    let mut rng = rand::rng();

    for candidates in [10, 1_000, 10_000].iter() {
        let ids: Vec<i64> = (0..*candidates)
            .map(|_| rng.random_range(0..120_000))
            .collect();
        group.bench_with_input(BenchmarkId::new("candidates", candidates), &ids, |b, ids| {
            b.iter(|| black_box(scorer.score(42, ids).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("explain", candidates), &ids, |b, ids| {
            b.iter(|| black_box(scorer.explain(42, ids).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_clean_name, benchmark_pipeline, benchmark_score);
criterion_main!(benches);
