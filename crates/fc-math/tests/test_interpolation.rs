use fc_math::{InterpKind, Interpolator};
use proptest::prelude::*;

/// Strictly increasing node times starting at zero with matching positive
/// discount factors.
fn nodes() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((0.05_f64..3.0, -0.02_f64..0.08), 2..12).prop_map(|steps| {
        let mut times = vec![0.0];
        let mut dfs = vec![1.0];
        for (dt, fwd) in steps {
            let t = times[times.len() - 1] + dt;
            let d = dfs[dfs.len() - 1] * (-fwd * dt).exp();
            times.push(t);
            dfs.push(d);
        }
        (times, dfs)
    })
}

proptest! {
    #[test]
    fn nodes_are_reproduced((times, dfs) in nodes()) {
        for kind in InterpKind::ALL {
            let interp = Interpolator::fit(kind, &times, &dfs).unwrap();
            for (&t, &d) in times.iter().zip(&dfs) {
                prop_assert!((interp.interpolate(t) - d).abs() <= 1e-12 * d.max(1.0), "{kind} at {t}");
            }
        }
    }

    #[test]
    fn flat_forward_stays_between_neighbours((times, dfs) in nodes(), w in 0.0_f64..1.0) {
        let interp = Interpolator::fit(InterpKind::FlatFwdRates, &times, &dfs).unwrap();
        for i in 0..times.len() - 1 {
            let t = times[i] + w * (times[i + 1] - times[i]);
            let d = interp.interpolate(t);
            let (lo, hi) = if dfs[i] < dfs[i + 1] { (dfs[i], dfs[i + 1]) } else { (dfs[i + 1], dfs[i]) };
            prop_assert!(d >= lo * (1.0 - 1e-14) && d <= hi * (1.0 + 1e-14));
        }
    }

    #[test]
    fn discount_factors_stay_positive((times, dfs) in nodes(), t in 0.0_f64..60.0) {
        for kind in InterpKind::ALL {
            let interp = Interpolator::fit(kind, &times, &dfs).unwrap();
            let d = interp.interpolate(t);
            prop_assert!(d.is_finite() && d > 0.0);
        }
    }
}

#[test]
fn valuation_node_is_one_for_every_kind() {
    let times = [0.0, 1.0, 2.0, 5.0];
    let dfs = [1.0, 0.97, 0.94, 0.86];
    for kind in InterpKind::ALL {
        let interp = Interpolator::fit(kind, &times, &dfs).unwrap();
        assert_eq!(interp.interpolate(0.0), 1.0);
    }
}
