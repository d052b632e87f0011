use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use himeno_rust::implementations::Strategy;
use himeno_rust::init::PoissonFields;
use himeno_rust::preset::GridSize;

fn jacobi_sweep_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("jacobi_sweep");
    group.sample_size(10);

    for size in [GridSize::XS, GridSize::S] {
        for strategy in Strategy::ALL {
            let mut fields = PoissonFields::standard(size.dims()).unwrap();
            group.bench_with_input(BenchmarkId::new(strategy.name(), size), &size, |b, _| {
                b.iter(|| fields.jacobi(strategy, 1).unwrap());
            });
        }
    }
    group.finish();
}

criterion_group!(benches, jacobi_sweep_benchmark);
criterion_main!(benches);
