use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fc_math::InterpKind;
use fc_termstructures::{DiscountCurve, FlatCurve, InterpolatedDiscountCurve, NelsonSiegelCurve};
use fc_time::{Date, DayCountType};

fn valuation() -> Date {
    Date::from_ymd(2020, 1, 2).expect("valid date")
}

fn query_dates() -> Vec<Date> {
    (1..=10_000)
        .map(|i| valuation().add_days(i).expect("date in range"))
        .collect()
}

fn pillar_curve(kind: InterpKind) -> InterpolatedDiscountCurve {
    let v = valuation();
    let tenors = ["1M", "3M", "6M", "1Y", "2Y", "3Y", "5Y", "7Y", "10Y", "20Y", "30Y"];
    let dates: Vec<Date> = tenors
        .iter()
        .map(|t| v.add_tenor(t).expect("valid tenor"))
        .collect();
    let dfs: Vec<f64> = dates
        .iter()
        .map(|&d| {
            let t = DayCountType::Act365F.year_fraction(v, d);
            (-(0.02 + 0.0004 * t) * t).exp()
        })
        .collect();
    InterpolatedDiscountCurve::new(v, &dates, &dfs, kind, DayCountType::Act365F)
        .expect("valid pillars")
}

fn bench_df_into(c: &mut Criterion) {
    let dates = query_dates();
    let mut out = vec![0.0; dates.len()];

    let mut group = c.benchmark_group("df_into");
    group.throughput(Throughput::Elements(dates.len() as u64));

    let flat = FlatCurve::continuous(valuation(), 0.03).expect("finite rate");
    group.bench_function("flat", |b| {
        b.iter(|| {
            flat.df_into(black_box(&dates), &mut out).expect("matching buffer");
            black_box(out[0])
        })
    });

    let ns = NelsonSiegelCurve::new(valuation(), 0.04, -0.02, 0.01, 2.0, DayCountType::Act365F)
        .expect("positive decay");
    group.bench_function("nelson_siegel", |b| {
        b.iter(|| {
            ns.df_into(black_box(&dates), &mut out).expect("matching buffer");
            black_box(out[0])
        })
    });

    for kind in [InterpKind::FlatFwdRates, InterpKind::NatCubicLogDf, InterpKind::PchipZeroRates] {
        let curve = pillar_curve(kind);
        group.bench_function(kind.name(), |b| {
            b.iter(|| {
                curve.df_into(black_box(&dates), &mut out).expect("matching buffer");
                black_box(out[0])
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_df_into);
criterion_main!(benches);
