//! Criterion benchmarks for the TSP deme.
//!
//! Uses synthetic city layouts (points on a circle) so the measured cost is
//! the GA machinery itself.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tsp_deme::ga::{Chromosome, Deme, DemeConfig, DemeRunner};
use tsp_deme::random::create_rng;
use tsp_deme::{Cities, Point};

fn circle(n: usize) -> Cities {
    Cities::new(
        (0..n)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / n as f64;
                Point::new(angle.cos(), angle.sin())
            })
            .collect(),
    )
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordered_crossover");

    for &n in &[20usize, 100, 500] {
        let cities = circle(n);
        let mut rng = create_rng(42);
        let p1 = Chromosome::random(&cities, &mut rng).unwrap();
        let p2 = Chromosome::random(&cities, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &(p1, p2), |b, (p1, p2)| {
            b.iter(|| black_box(p1.recombine(black_box(p2), &mut rng).unwrap()))
        });
    }
    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");
    group.sample_size(10);

    for (cities_n, pop) in [(20usize, 50usize), (50, 100), (100, 200)] {
        let cities = circle(cities_n);
        let config = DemeConfig::default()
            .with_population_size(pop)
            .with_mutation_rate(0.05)
            .with_seed(42);
        let mut deme = Deme::from_config(&cities, &config).unwrap();
        group.bench_function(BenchmarkId::new(format!("c{}_p{}", cities_n, pop), pop), |b| {
            b.iter(|| deme.compute_next_generation().unwrap())
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("deme_run");
    group.sample_size(10);

    let cities = circle(30);
    let config = DemeConfig::default()
        .with_population_size(100)
        .with_seed(42);
    group.bench_function("c30_p100_g50", |b| {
        b.iter(|| black_box(DemeRunner::run(black_box(&cities), black_box(&config), 50).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_crossover, bench_generation, bench_run);
criterion_main!(benches);
