use crate::domain::model::{CalculationResult, FormatOptions, RoundingMode};
use crate::utils::error::Result;

/// Source of the defaults a calculation falls back to when the caller
/// leaves a field out.
pub trait SettingsProvider {
    fn default_drop_factor(&self) -> f64;
    fn default_rounding(&self) -> RoundingMode;
    fn format_options(&self) -> FormatOptions;
}

pub trait ResultRenderer {
    fn render(&self, result: &CalculationResult) -> Result<String>;
}
