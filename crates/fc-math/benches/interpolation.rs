use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fc_math::{InterpKind, Interpolator};

fn sample_nodes() -> (Vec<f64>, Vec<f64>) {
    let nodes = [
        (0.0, 0.020),
        (0.25, 0.021),
        (0.5, 0.022),
        (1.0, 0.023),
        (2.0, 0.025),
        (3.0, 0.026),
        (5.0, 0.028),
        (7.0, 0.029),
        (10.0, 0.030),
        (20.0, 0.031),
        (30.0, 0.031),
    ];
    nodes.iter().map(|&(t, r)| (t, (-r * t).exp())).unzip()
}

fn bench_interpolate_into(c: &mut Criterion) {
    let (times, dfs) = sample_nodes();
    let queries: Vec<f64> = (1..=10_000).map(|i| 30.0 * i as f64 / 10_000.0).collect();
    let mut out = vec![0.0; queries.len()];

    let mut group = c.benchmark_group("interpolate_into");
    group.throughput(Throughput::Elements(queries.len() as u64));
    for kind in InterpKind::ALL {
        let interp = Interpolator::fit(kind, &times, &dfs).expect("valid nodes");
        group.bench_function(kind.name(), |b| {
            b.iter(|| {
                interp
                    .interpolate_into(black_box(&queries), &mut out)
                    .expect("matching buffer");
                black_box(out[out.len() - 1])
            })
        });
    }
    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    let (times, dfs) = sample_nodes();
    c.bench_function("fit_nat_cubic_log_df", |b| {
        b.iter(|| Interpolator::fit(InterpKind::NatCubicLogDf, black_box(&times), black_box(&dfs)))
    });
}

criterion_group!(benches, bench_interpolate_into, bench_fit);
criterion_main!(benches);
