use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fastrand::Rng;
use murmuration::prelude::*;
use murmuration::test_functions::Rastrigin;

fn pso_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pso: rastrigin");
    for n in [2, 3, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &ndim| {
            let x0 = vec![0.0; ndim];
            let options = PSOOptions::default()
                .with_max_iterations(100)
                .with_tolerance(1e-6);
            b.iter(|| {
                let mut rng = Rng::new();
                rng.seed(0);
                let mut pso = PSO::new(rng);
                pso.optimize(&Rastrigin { n: ndim }, &x0, &options, &mut ())
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, pso_benchmark);
criterion_main!(benches);
