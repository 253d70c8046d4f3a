use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use hnsw_core::{HnswIndex, Params};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIM: usize = 32;
const DATASET_SIZE: usize = 2_000;

fn euclidean(a: &Vec<f32>, b: &Vec<f32>) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f32>().sqrt()
}

fn synthetic_dataset(rng: &mut impl Rng) -> Vec<Vec<f32>> {
    (0..DATASET_SIZE)
        .map(|_| (0..DIM).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect()
}

fn config() -> Params {
    Params {
        ef_construction: 100,
        m: 20,
        ..Params::default()
    }
}

fn bench_build(c: &mut Criterion) {
    let mut data_rng = StdRng::seed_from_u64(1);
    let dataset = synthetic_dataset(&mut data_rng);

    c.bench_function("hnsw_build_synthetic_2k", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            HnswIndex::build(dataset.clone(), &mut rng, config(), euclidean).unwrap()
        })
    });
}

fn bench_incremental_insert(c: &mut Criterion) {
    let mut data_rng = StdRng::seed_from_u64(1);
    let dataset = synthetic_dataset(&mut data_rng);
    let extra: Vec<f32> = (0..DIM).map(|_| data_rng.gen_range(-1.0..1.0)).collect();

    c.bench_function("hnsw_incremental_insert_one", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(42);
                let mut items = dataset.clone();
                items.push(extra.clone());
                items
            },
            |items| {
                let mut rng = StdRng::seed_from_u64(42);
                black_box(HnswIndex::build(items, &mut rng, config(), euclidean).unwrap())
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_knn(c: &mut Criterion) {
    let mut data_rng = StdRng::seed_from_u64(1);
    let dataset = synthetic_dataset(&mut data_rng);
    let mut build_rng = StdRng::seed_from_u64(42);
    let index = HnswIndex::build(dataset, &mut build_rng, config(), euclidean).unwrap();
    let query: Vec<f32> = (0..DIM).map(|_| data_rng.gen_range(-1.0..1.0)).collect();

    c.bench_function("hnsw_knn_k10", |b| {
        b.iter(|| index.knn(black_box(&query), 10).unwrap())
    });
}

criterion_group!(benches, bench_build, bench_incremental_insert, bench_knn);
criterion_main!(benches);
