//! Property tests for series approximation.

use ef_series::{Approximation, DecadeRange, ESeries, StandardValues, approximate};
use proptest::prelude::*;

fn any_series() -> impl Strategy<Value = ESeries> {
    prop::sample::select(ESeries::ALL.to_vec())
}

proptest! {
    #[test]
    fn floor_brackets_value(x in 1e-12_f64..1e9_f64, series in any_series()) {
        let floor = approximate(x, series).unwrap();
        prop_assert!(floor.value() <= x * (1.0 + 1e-9));
        prop_assert!(floor.next_up().value() > x);
    }

    #[test]
    fn best_is_never_worse_than_floor(x in 1e-6_f64..1e7_f64, series in any_series()) {
        let floor = Approximation::new(x, series).unwrap();
        let best = floor.best();
        prop_assert!(best.error().abs() <= floor.error().abs() + 1e-15);
        // Adjacent E-series values are at most ~47% apart (E3: 4.7 -> 10).
        prop_assert!(best.error().abs() < 0.5);
    }
}

#[test]
fn enumeration_matches_approximation() {
    let values = StandardValues::new(ESeries::E24, DecadeRange::new(-1, 2).unwrap());
    for v in &values {
        assert_eq!(approximate(v.value(), ESeries::E24).unwrap(), *v);
    }
}

#[test]
fn series_round_trips_through_yaml() {
    let yaml = serde_yaml::to_string(&ESeries::E48).unwrap();
    let back: ESeries = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, ESeries::E48);

    let range: DecadeRange = serde_yaml::from_str("min_exp: -9\nmax_exp: -6\n").unwrap();
    assert_eq!(range.len(), 4);
}
