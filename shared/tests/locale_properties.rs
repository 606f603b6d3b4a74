use proptest::prelude::*;
use proptest::test_runner::Config;
use shared::utils::brazilian_format::{format_decimal, parse_count, parse_date, parse_number};

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn formatted_cents_parse_back(cents in 0_u64..100_000_000_000_u64) {
        let value = cents as f64 / 100.0;
        let parsed = parse_number(&format_decimal(value, 2));
        prop_assert!((parsed - value).abs() < 1e-6, "{} != {}", parsed, value);
    }

    #[test]
    fn formatted_counts_parse_back_without_grouping(count in 0_u64..1_000_u64) {
        prop_assert_eq!(parse_count(&format_decimal(count as f64, 0)), count);
    }

    #[test]
    fn number_parsing_never_panics(raw in "\\PC*") {
        let value = parse_number(&raw);
        prop_assert!(value.is_finite());
    }
}

proptest! {
    #![proptest_config(Config::with_cases(512))]

    #[test]
    fn count_parsing_never_panics(raw in "\\PC*") {
        let _ = parse_count(&raw);
    }

    #[test]
    fn date_parsing_never_panics(raw in "\\PC*") {
        let _ = parse_date(&raw);
    }

    #[test]
    fn date_parsing_never_panics_on_numeric_components(
        day in any::<i64>(),
        month in any::<i64>(),
        year in any::<i64>(),
    ) {
        let _ = parse_date(&format!("{}/{}/{}", day, month, year));
    }
}
