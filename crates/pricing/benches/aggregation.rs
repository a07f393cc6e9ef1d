use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use mobicorp_pricing::{MarketObservation, MeanAggregator, PriceAggregator};

fn observations(n: usize) -> Vec<MarketObservation> {
    (0..n)
        .map(|i| {
            let price = 50.0 + (i % 97) as f64 * 3.25;
            MarketObservation::new(format!("source-{}", i % 7), price, None).unwrap()
        })
        .collect()
}

fn bench_mean_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mean_aggregation");

    for size in [5usize, 50, 500, 5_000] {
        let batch = observations(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| MeanAggregator.aggregate(std::hint::black_box(batch)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mean_aggregation);
criterion_main!(benches);
