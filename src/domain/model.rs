use crate::utils::validation::parse_field;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    #[default]
    Nearest,
    Ceil,
    Floor,
}

/// Number separators and wording used when rendering results. `Es` follows
/// Colombian Spanish (`es-CO`): `1.234,5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn group_separator(&self) -> char {
        match self {
            Self::En => ',',
            Self::Es => '.',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Self::En => '.',
            Self::Es => ',',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub locale: Locale,
    pub max_fraction_digits: u8,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            max_fraction_digits: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub volume_ml: f64,
    pub hours: Option<f64>,
    pub minutes: Option<f64>,
    pub drop_factor_gtt_per_ml: f64,
    #[serde(default)]
    pub rounding: RoundingMode,
}

impl CalculationInput {
    /// Builds an input from raw text fields written with `locale`'s
    /// separators. Blank or unparseable numbers become NaN (volume, factor)
    /// or `None` (hours, minutes) and are left for validation to reject.
    pub fn from_fields(
        volume: &str,
        hours: &str,
        minutes: &str,
        drop_factor: &str,
        rounding: RoundingMode,
        locale: Locale,
    ) -> Self {
        Self {
            volume_ml: parse_field(volume, locale).unwrap_or(f64::NAN),
            hours: parse_field(hours, locale),
            minutes: parse_field(minutes, locale),
            drop_factor_gtt_per_ml: parse_field(drop_factor, locale).unwrap_or(f64::NAN),
            rounding,
        }
    }
}

/// One rendered result: a heading, the headline value and the equation
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationLine {
    pub label: String,
    pub value: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivations {
    pub speed: DerivationLine,
    pub drip_rate: DerivationLine,
    pub total_time: DerivationLine,
    pub cross_check: DerivationLine,
}

impl Derivations {
    /// Lines in display order.
    pub fn iter(&self) -> impl Iterator<Item = &DerivationLine> {
        [
            &self.speed,
            &self.drip_rate,
            &self.total_time,
            &self.cross_check,
        ]
        .into_iter()
    }

    pub fn get(&self, label: &str) -> Option<&DerivationLine> {
        self.iter().find(|line| line.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub ml_per_hour: f64,
    pub raw_gtt_per_minute: f64,
    /// `None` when the rounded rate is not finite (zero duration) or does not
    /// fit an `i64`.
    pub gtt_per_minute: Option<i64>,
    pub hours: f64,
    pub minutes: f64,
    pub total_minutes: f64,
    pub time_formatted: String,
    pub cross_check_gtt_per_minute: f64,
    pub derivations: Derivations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_parses_blank_as_absent() {
        let input = CalculationInput::from_fields(
            "1000",
            "",
            "480",
            "20",
            RoundingMode::Floor,
            Locale::En,
        );
        assert_eq!(input.volume_ml, 1000.0);
        assert_eq!(input.hours, None);
        assert_eq!(input.minutes, Some(480.0));
        assert_eq!(input.drop_factor_gtt_per_ml, 20.0);
        assert_eq!(input.rounding, RoundingMode::Floor);

        let input =
            CalculationInput::from_fields("", "8", "", "x", RoundingMode::Nearest, Locale::En);
        assert!(input.volume_ml.is_nan());
        assert!(input.drop_factor_gtt_per_ml.is_nan());
    }

    #[test]
    fn test_from_fields_rejects_grouped_volume() {
        // "1,000" is how the English output prints a litre; reading it back
        // must not turn into 1 mL.
        let input =
            CalculationInput::from_fields("1,000", "8", "", "20", RoundingMode::Nearest, Locale::En);
        assert!(input.volume_ml.is_nan());

        let input =
            CalculationInput::from_fields("1.000", "1,5", "", "20", RoundingMode::Nearest, Locale::Es);
        assert!(input.volume_ml.is_nan());
        assert_eq!(input.hours, Some(1.5));
    }

    #[test]
    fn test_rounding_mode_serde_names() {
        let mode: RoundingMode = serde_json::from_str("\"ceil\"").unwrap();
        assert_eq!(mode, RoundingMode::Ceil);
        assert_eq!(serde_json::to_string(&RoundingMode::Floor).unwrap(), "\"floor\"");
        assert_eq!(RoundingMode::default(), RoundingMode::Nearest);
    }
}
