//! Number and duration formatting for rendered results.

use crate::domain::model::Locale;

/// Shown in place of any value that is not a finite number.
pub const PLACEHOLDER: &str = "—";

/// Formats `value` with thousands grouping and at most `max_fraction_digits`
/// decimals, dropping trailing zeros.
///
/// Rounding works on the shortest decimal form of the value, half away from
/// zero, so `1.005` shows as `1.01` rather than following its binary
/// expansion down to `1`.
pub fn format_number(value: f64, max_fraction_digits: u8, locale: Locale) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let (int_part, frac_part) = round_decimal(value.abs(), usize::from(max_fraction_digits));

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + frac_part.len() + 2);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(&int_part, locale));
    if !frac_part.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(&frac_part);
    }
    out
}

/// Rounds a non-negative finite value to `max_fraction_digits` decimals and
/// returns its integer and fraction digits, the latter without trailing zeros.
fn round_decimal(value: f64, max_fraction_digits: usize) -> (String, String) {
    // `{:e}` yields the shortest round-trip mantissa, e.g. "1.005e0".
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);

    let mut digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    // Count of digits left of the decimal point.
    let mut point = exponent + 1;

    let keep = point + max_fraction_digits as i64;
    if keep < 0 {
        digits.clear();
    } else if (keep as usize) < digits.len() {
        let keep = keep as usize;
        let round_up = digits[keep] >= 5;
        digits.truncate(keep);
        if round_up {
            let mut carry = true;
            for d in digits.iter_mut().rev() {
                if *d == 9 {
                    *d = 0;
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                digits.insert(0, 1);
                point += 1;
            }
        }
    }

    if digits.iter().all(|&d| d == 0) {
        return ("0".to_string(), String::new());
    }

    let to_char = |d: &u8| char::from(b'0' + d);
    let int_part = if point <= 0 {
        "0".to_string()
    } else {
        let point = point as usize;
        let mut int_part: String = digits.iter().take(point).map(to_char).collect();
        while int_part.len() < point {
            int_part.push('0');
        }
        int_part
    };

    let mut frac_part = String::new();
    if point < 0 {
        frac_part.extend(std::iter::repeat('0').take(point.unsigned_abs() as usize));
    }
    frac_part.extend(digits.iter().skip(point.max(0) as usize).map(to_char));
    let frac_part = frac_part.trim_end_matches('0').to_string();

    (int_part, frac_part)
}

fn group_digits(int_part: &str, locale: Locale) -> String {
    if int_part.len() < 4 {
        return int_part.to_string();
    }

    let separator = locale.group_separator();
    let lead = int_part.len() % 3;
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Shortest representation that round-trips, without grouping.
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{}", value)
}

/// Formats whole minutes as `"{hh} h {mm} min"`.
pub fn format_duration(total_minutes: f64) -> String {
    if !total_minutes.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let total = total_minutes as i64;
    format!("{} h {} min", total.div_euclid(60), total.rem_euclid(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_trims_and_rounds() {
        assert_eq!(format_number(125.0, 2, Locale::En), "125");
        assert_eq!(format_number(41.666_666, 2, Locale::En), "41.67");
        assert_eq!(format_number(2.5, 0, Locale::En), "3");
        assert_eq!(format_number(0.125, 2, Locale::En), "0.13");
        assert_eq!(format_number(1.10, 2, Locale::En), "1.1");
        assert_eq!(format_number(-0.001, 2, Locale::En), "0");
        assert_eq!(format_number(-1234.5, 1, Locale::En), "-1,234.5");
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(1000.0, 0, Locale::En), "1,000");
        assert_eq!(format_number(999.0, 0, Locale::En), "999");
        assert_eq!(format_number(1_234_567.891, 2, Locale::En), "1,234,567.89");
        assert_eq!(format_number(1000.0, 0, Locale::Es), "1.000");
        assert_eq!(format_number(12_345.5, 2, Locale::Es), "12.345,5");
        assert_eq!(format_number(41.666_666, 2, Locale::Es), "41,67");
    }

    #[test]
    fn test_format_number_rounds_decimal_halves_up() {
        assert_eq!(format_number(1.005, 2, Locale::En), "1.01");
        assert_eq!(format_number(1.255, 2, Locale::En), "1.26");
        assert_eq!(format_number(0.285, 2, Locale::En), "0.29");
        assert_eq!(format_number(60.3 / 60.0, 2, Locale::En), "1.01");
        assert_eq!(format_number(0.005, 2, Locale::En), "0.01");
        assert_eq!(format_number(0.004, 2, Locale::En), "0");
        assert_eq!(format_number(999.996, 2, Locale::En), "1,000");
        assert_eq!(format_number(1e21, 2, Locale::En), "1,000,000,000,000,000,000,000");
    }

    #[test]
    fn test_non_finite_values_use_placeholder() {
        assert_eq!(format_number(f64::NAN, 2, Locale::En), PLACEHOLDER);
        assert_eq!(format_number(f64::INFINITY, 2, Locale::Es), PLACEHOLDER);
        assert_eq!(format_plain(f64::NEG_INFINITY), PLACEHOLDER);
        assert_eq!(format_duration(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(20.0), "20");
        assert_eq!(format_plain(15.5), "15.5");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(480.0), "8 h 0 min");
        assert_eq!(format_duration(95.0), "1 h 35 min");
        assert_eq!(format_duration(59.0), "0 h 59 min");
        assert_eq!(format_duration(0.0), "0 h 0 min");
    }
}
