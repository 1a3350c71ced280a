// Copyright 2025 the Tenet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based checks for number notations and numeric constraints.

use proptest::prelude::*;

use tenet_type::{MultipleOf, Mutator, Number, PowerOf, Range, Value, parse_number};

proptest! {
    #[test]
    fn any_i64_parses_back(n in any::<i64>()) {
        prop_assert_eq!(parse_number(&n.to_string()), Some(Number::Int(n)));
    }

    #[test]
    fn kilo_suffix_scales_by_thousand(n in -1_000_000_i64..1_000_000) {
        prop_assert_eq!(parse_number(&format!("{n}k")), Some(Number::Int(n * 1_000)));
    }

    #[test]
    fn binary_suffix_scales_by_1024(n in 0_i64..1_000_000) {
        prop_assert_eq!(parse_number(&format!(" {n}Ki ")), Some(Number::Int(n * 1_024)));
    }

    #[test]
    fn every_product_is_a_multiple(k in -1_000_000_i64..1_000_000, base in 1_i64..1000) {
        let m = MultipleOf::new(base).unwrap();
        prop_assert!(m.contains(Number::Int(k * base)));
    }

    #[test]
    fn powers_of_three(k in 0_u32..39) {
        prop_assert!(PowerOf::new(3).unwrap().contains(3_i64.pow(k)));
    }

    #[test]
    fn accepts_exactly_the_closed_interval(
        lo in -1000_i64..1000,
        span in 0_i64..1000,
        x in -3000_i64..3000,
    ) {
        let hi = lo + span;
        let range = Range::between(lo, hi).unwrap();
        prop_assert_eq!(range.process(&mut Value::from(x)).is_ok(), lo <= x && x <= hi);
    }

    #[test]
    fn rejection_leaves_the_value_untouched(x in any::<i64>(), limit in any::<i64>()) {
        let mut value = Value::from(x);
        let _ = Range::at_most(limit).process(&mut value);
        prop_assert_eq!(value, Value::from(x));
    }
}
