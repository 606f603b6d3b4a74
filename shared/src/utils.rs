// Helpers shared by the engine and any presentation layer.

/// pt-BR number and date handling. Parsing never fails on bad data: numbers
/// and counters degrade to zero, dates to `None`.
pub mod brazilian_format {
    use chrono::{Days, NaiveDate};

    /// Parses decimals like "1.234,56" or "123,45" into f64.
    ///
    /// Every "." is a thousands separator and the first "," is the decimal
    /// separator. The longest numeric prefix is used, so "12,5 R$" is 12.5.
    /// Empty or unparseable input is 0.
    pub fn parse_number(s: &str) -> f64 {
        if s.is_empty() {
            return 0.0;
        }
        let normalized = s
            .replace('.', "") // Remove thousand separators
            .replacen(',', ".", 1); // Replace decimal separator

        leading_float(&normalized).unwrap_or(0.0)
    }

    /// Parses an integer counter from its leading digit run ("1.000" is 1).
    /// No digits, or a negative value, gives 0.
    pub fn parse_count(s: &str) -> u64 {
        let trimmed = s.trim_start();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 || negative {
            return 0;
        }
        unsigned[..digits_len].parse::<u64>().unwrap_or(u64::MAX)
    }

    /// Parses "dd/mm/yyyy" into a calendar date.
    ///
    /// Out-of-range days and months roll over the way calendar arithmetic
    /// does: "31/02/2024" is 2 March 2024 and "05/13/2024" is 5 January 2025.
    /// Returns `None` when a component is missing or not a number.
    pub fn parse_date(s: &str) -> Option<NaiveDate> {
        let mut parts = s.split('/');
        let day = date_component(parts.next()?)?;
        let month = date_component(parts.next()?)?;
        let year = date_component(parts.next()?)?;
        rolled_date(year, month, day)
    }

    /// Builds a date from (year, month, day) allowing any integer month/day.
    pub fn rolled_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
        let total_months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
        let year = i32::try_from(total_months.div_euclid(12)).ok()?;
        let month0 = total_months.rem_euclid(12) as u32;
        let first_of_month = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;

        let offset = day.checked_sub(1)?;
        if offset >= 0 {
            first_of_month.checked_add_days(Days::new(offset as u64))
        } else {
            first_of_month.checked_sub_days(Days::new(offset.unsigned_abs()))
        }
    }

    /// Formats with pt-BR separators: `format_decimal(1234.5, 2)` is "1.234,50".
    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (formatted.as_str(), None),
        };

        let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
        let is_zero = formatted.bytes().all(|b| b == b'0' || b == b'.');
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        if let Some(frac) = frac_part {
            out.push(',');
            out.push_str(frac);
        }
        out
    }

    /// "R$ 1.234,56"
    pub fn format_currency(value: f64) -> String {
        format!("R$ {}", format_decimal(value, 2))
    }

    /// "1.234"
    pub fn format_integer(value: f64) -> String {
        format_decimal(value, 0)
    }

    /// Abbreviated counts for cards: "1,5mil", "2,3mi". Below a thousand the
    /// plain integer form is used.
    pub fn format_compact(value: f64) -> String {
        const SCALES: [(f64, &str); 4] = [
            (1e12, "tri"),
            (1e9, "bi"),
            (1e6, "mi"),
            (1e3, "mil"),
        ];
        for (scale, suffix) in SCALES {
            if value.abs() >= scale {
                return format!("{}{}", format_decimal(value / scale, 1), suffix);
            }
        }
        format_integer(value)
    }

    /// Takes a value already in percent (12.34) and renders "12,34%".
    pub fn format_percentage(value: f64) -> String {
        format!("{}%", format_decimal(value, 2))
    }

    fn date_component(raw: &str) -> Option<i64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Some(0);
        }
        trimmed.parse::<i64>().ok()
    }

    // Longest prefix of `s` (after leading whitespace) that reads as a float.
    fn leading_float(s: &str) -> Option<f64> {
        let s = s.trim_start();
        let bytes = s.as_bytes();
        let mut end = 0;

        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            end += 1;
        }
        let int_digits = count_digits(&bytes[end..]);
        end += int_digits;

        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = count_digits(&bytes[end + 1..]);
            if int_digits > 0 || frac_digits > 0 {
                end += 1 + frac_digits;
            }
        }
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }

        if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
                exp_end += 1;
            }
            let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
            if exp_digits > 0 {
                end = exp_end + exp_digits;
            }
        }

        s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn count_digits(bytes: &[u8]) -> usize {
        bytes.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::Datelike;

        #[test]
        fn test_parse_number_simple() {
            assert_eq!(parse_number("123,45"), 123.45);
        }

        #[test]
        fn test_parse_number_with_thousands() {
            assert_eq!(parse_number("1.234,56"), 1234.56);
            assert_eq!(parse_number("600.822.115,84"), 600822115.84);
        }

        #[test]
        fn test_parse_number_never_fails() {
            assert_eq!(parse_number(""), 0.0);
            assert_eq!(parse_number("abc"), 0.0);
            assert_eq!(parse_number(","), 0.0);
            assert_eq!(parse_number("-"), 0.0);
        }

        #[test]
        fn test_parse_number_uses_numeric_prefix() {
            assert_eq!(parse_number("12,5 R$"), 12.5);
            assert_eq!(parse_number("  7"), 7.0);
            // Only the first comma is a decimal separator.
            assert_eq!(parse_number("1,2,3"), 1.2);
        }

        #[test]
        fn test_parse_count() {
            assert_eq!(parse_count("1000"), 1000);
            assert_eq!(parse_count(" 42 "), 42);
            assert_eq!(parse_count("1.000"), 1);
            assert_eq!(parse_count("12abc"), 12);
            assert_eq!(parse_count(""), 0);
            assert_eq!(parse_count("abc"), 0);
            assert_eq!(parse_count("-5"), 0);
        }

        #[test]
        fn test_parse_date_valid() {
            let date = parse_date("05/03/2024").unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        }

        #[test]
        fn test_parse_date_rolls_over() {
            assert_eq!(parse_date("31/02/2024").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
            assert_eq!(parse_date("00/03/2024").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
            assert_eq!(parse_date("05/13/2024").unwrap(), NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
            assert_eq!(parse_date("01/00/2024").unwrap(), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        }

        #[test]
        fn test_parse_date_invalid() {
            assert!(parse_date("").is_none());
            assert!(parse_date("05/03").is_none());
            assert!(parse_date("aa/03/2024").is_none());
        }

        #[test]
        fn test_parse_date_extreme_components() {
            assert!(parse_date("-9223372036854775808/01/2024").is_none());
            assert!(parse_date("01/-9223372036854775808/2024").is_none());
            assert!(parse_date("9223372036854775807/01/2024").is_none());
            assert!(parse_date("01/01/9223372036854775807").is_none());
        }

        #[test]
        fn test_parse_date_ignores_extra_components() {
            let date = parse_date("30/12/2024/extra").unwrap();
            assert_eq!((date.day(), date.month(), date.year()), (30, 12, 2024));
        }

        #[test]
        fn test_format_decimal() {
            assert_eq!(format_decimal(1234.56, 2), "1.234,56");
            assert_eq!(format_decimal(1234567.891, 2), "1.234.567,89");
            assert_eq!(format_decimal(999.99, 2), "999,99");
            assert_eq!(format_decimal(0.0, 2), "0,00");
            assert_eq!(format_decimal(-1500.0, 1), "-1.500,0");
        }

        #[test]
        fn test_format_helpers() {
            assert_eq!(format_currency(1234.5), "R$ 1.234,50");
            assert_eq!(format_integer(1234567.0), "1.234.567");
            assert_eq!(format_compact(1500.0), "1,5mil");
            assert_eq!(format_compact(2_300_000.0), "2,3mi");
            assert_eq!(format_compact(999.0), "999");
            assert_eq!(format_percentage(12.3456), "12,35%");
        }

        #[test]
        fn test_round_trip_representative_values() {
            for value in [0.0, 999.99, 1234567.89] {
                let parsed = parse_number(&format_decimal(value, 2));
                assert!((parsed - value).abs() < 1e-9, "{} != {}", parsed, value);
            }
        }
    }
}
