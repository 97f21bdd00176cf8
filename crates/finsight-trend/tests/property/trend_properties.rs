//! Property tests for the YoY computation.

use std::collections::BTreeMap;

use finsight_core::models::TrendResult;
use proptest::prelude::*;

fn arb_values() -> impl Strategy<Value = BTreeMap<u16, f64>> {
    proptest::collection::btree_map(1990u16..2100, 1.0f64..1e9, 1..8)
}

proptest! {
    #[test]
    fn earliest_year_growth_is_always_none(values in arb_values()) {
        let result = TrendResult::from_values("Revenue", values.clone(), vec![]);
        let earliest = *values.keys().next().unwrap();
        prop_assert_eq!(result.yoy_growth_pct[&earliest], None);
    }

    #[test]
    fn growth_keys_match_value_keys(values in arb_values()) {
        let result = TrendResult::from_values("Revenue", values.clone(), vec![]);
        let value_years: Vec<u16> = values.keys().copied().collect();
        let growth_years: Vec<u16> = result.yoy_growth_pct.keys().copied().collect();
        prop_assert_eq!(value_years, growth_years);
    }

    #[test]
    fn growth_sign_tracks_value_direction(
        prev in 1.0f64..1e6,
        curr in 1.0f64..1e6,
    ) {
        let values = BTreeMap::from([(2023u16, prev), (2024u16, curr)]);
        let result = TrendResult::from_values("Revenue", values, vec![]);
        let growth = result.yoy_growth_pct[&2024].unwrap();
        if curr > prev {
            prop_assert!(growth >= 0.0);
        } else if curr < prev {
            prop_assert!(growth <= 0.0);
        }
    }

    #[test]
    fn growth_is_bounded_by_relative_change(
        prev in 1.0f64..1e6,
        curr in 1.0f64..1e6,
    ) {
        let values = BTreeMap::from([(2023u16, prev), (2024u16, curr)]);
        let result = TrendResult::from_values("Revenue", values, vec![]);
        let growth = result.yoy_growth_pct[&2024].unwrap();
        let exact = (curr - prev) / prev * 100.0;
        // Rounded to 2 decimals, so within half a cent of the exact value.
        prop_assert!((growth - exact).abs() <= 0.005 + 1e-9);
    }
}
