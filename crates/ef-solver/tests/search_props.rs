//! Invariants of the exhaustive search.

use ef_series::{DecadeRange, ESeries, StandardValues};
use ef_solver::{SearchRequest, Tolerance, Topology, search};
use proptest::prelude::*;

fn pool(series: ESeries) -> StandardValues {
    StandardValues::new(series, DecadeRange::new(0, 4).unwrap())
}

fn small_series() -> impl Strategy<Value = ESeries> {
    prop::sample::select(vec![ESeries::E3, ESeries::E6, ESeries::E12])
}

fn any_topology() -> impl Strategy<Value = Topology> {
    prop::sample::select(Topology::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn results_within_tolerance_and_sorted(
        position in 0.0_f64..1.0,
        series in small_series(),
        topology in any_topology(),
        arity in 1usize..=2,
        tol in 0.001_f64..0.1,
        absolute in any::<bool>(),
    ) {
        // dividers produce ratios, the other topologies part values
        let target = match topology {
            Topology::Divider => 0.05 + 0.9 * position,
            _ => 10.0 + 50_000.0 * position,
        };
        let tolerance = if absolute {
            Tolerance::Absolute(tol * target)
        } else {
            Tolerance::Relative(tol)
        };
        let request = SearchRequest::new(target, tolerance, arity, &pool(series))
            .symmetric(topology.is_symmetric());
        let results = search(&request, |v| topology.evaluate(v)).unwrap();

        for c in &results {
            prop_assert_eq!(c.values.len(), arity);
            prop_assert_eq!(c.achieved, topology.evaluate(&c.values));
            match tolerance {
                Tolerance::Relative(r) => {
                    prop_assert!((c.achieved / target - 1.0).abs() <= r);
                }
                Tolerance::Absolute(a) => {
                    prop_assert!((c.achieved - target).abs() <= a);
                }
            }
        }
        prop_assert!(results.windows(2).all(|w| w[0].error <= w[1].error));
    }

    #[test]
    fn output_is_deterministic(
        target in 0.05_f64..1.0,
        series in small_series(),
        topology in any_topology(),
    ) {
        let request = SearchRequest::new(target, Tolerance::Absolute(0.02), 2, &pool(series))
            .symmetric(topology.is_symmetric())
            .allow_fewer(true)
            .limit(Some(25));
        let first = search(&request, |v| topology.evaluate(v)).unwrap();
        let second = search(&request, |v| topology.evaluate(v)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn symmetric_enumeration_loses_nothing(target in 100.0_f64..10_000.0) {
        let values = pool(ESeries::E6);
        let full = SearchRequest::new(target, Tolerance::Relative(0.02), 2, &values);
        let half = full.clone().symmetric(true);

        let best_full = search(&full, |v| Topology::Parallel.evaluate(v)).unwrap();
        let best_half = search(&half, |v| Topology::Parallel.evaluate(v)).unwrap();

        prop_assert_eq!(best_full.is_empty(), best_half.is_empty());
        if let (Some(a), Some(b)) = (best_full.first(), best_half.first()) {
            prop_assert!((a.error - b.error).abs() < 1e-12);
        }
    }
}

#[test]
fn divider_order_matters() {
    let values = StandardValues::new(ESeries::E12, DecadeRange::new(3, 4).unwrap());
    let request = SearchRequest::new(0.25, Tolerance::Relative(0.02), 2, &values);
    let results = search(&request, |v| Topology::Divider.evaluate(v)).unwrap();

    assert!(!results.is_empty());
    for c in &results {
        // a quarter of the input means the top leg is about three times the bottom
        assert!(c.values[0] > c.values[1]);
    }
}
