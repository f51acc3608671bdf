use crate::domain::model::Locale;
use crate::utils::error::{CalcError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Parses a raw form field written with `locale`'s decimal separator.
///
/// Blank or unparseable text yields `None`, so a bad field surfaces as the
/// matching validation message instead of a parser error. Text containing
/// the locale's grouping separator is rejected: in English `1,000` would
/// otherwise be ambiguous with a decimal comma.
pub fn parse_field(raw: &str, locale: Locale) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains(locale.group_separator()) {
        return None;
    }

    match locale.decimal_separator() {
        '.' => trimmed.parse().ok(),
        decimal => trimmed.replace(decimal, ".").parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_finite() {
        assert!(validate_positive_finite("defaults.drop_factor", 20.0).is_ok());
        assert!(validate_positive_finite("defaults.drop_factor", 0.0).is_err());
        assert!(validate_positive_finite("defaults.drop_factor", -1.0).is_err());
        assert!(validate_positive_finite("defaults.drop_factor", f64::NAN).is_err());
        assert!(validate_positive_finite("defaults.drop_factor", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("display.max_fraction_digits", 2u8, 0, 6).is_ok());
        assert!(validate_range("display.max_fraction_digits", 7u8, 0, 6).is_err());
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("1000", Locale::En), Some(1000.0));
        assert_eq!(parse_field("  8 ", Locale::En), Some(8.0));
        assert_eq!(parse_field("1.5", Locale::En), Some(1.5));
        assert_eq!(parse_field("-3", Locale::En), Some(-3.0));
        assert_eq!(parse_field("", Locale::En), None);
        assert_eq!(parse_field("   ", Locale::En), None);
        assert_eq!(parse_field("abc", Locale::En), None);
    }

    #[test]
    fn test_parse_field_rejects_group_separators() {
        assert_eq!(parse_field("1,000", Locale::En), None);
        assert_eq!(parse_field("1,5", Locale::En), None);
        assert_eq!(parse_field("1,000,000", Locale::En), None);

        assert_eq!(parse_field("1,5", Locale::Es), Some(1.5));
        assert_eq!(parse_field("1000", Locale::Es), Some(1000.0));
        assert_eq!(parse_field("1.000", Locale::Es), None);
        assert_eq!(parse_field("1,0,0", Locale::Es), None);
    }
}
