use crate::config::toml_config::MAX_FRACTION_DIGITS;
use crate::core::{CalculationInput, RoundingMode, SettingsProvider};
use crate::domain::model::{FormatOptions, Locale};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};
use clap::Parser;
use std::path::PathBuf;

/// Values loaded by `--example`: 1000 mL over 8 h with a 20 gtt/mL set.
pub const EXAMPLE_VOLUME: &str = "1000";
pub const EXAMPLE_HOURS: &str = "8";
pub const EXAMPLE_MINUTES: &str = "480";
pub const EXAMPLE_FACTOR: &str = "20";

/// Numeric fields are taken as raw text so that blank or malformed values
/// produce the calculator's own validation messages.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "drip-rate")]
#[command(about = "IV infusion speed and drip-rate calculator")]
pub struct CliConfig {
    /// Volume to infuse, in mL
    #[arg(long, allow_hyphen_values = true)]
    pub volume: Option<String>,

    /// Infusion time in hours
    #[arg(long, allow_hyphen_values = true)]
    pub hours: Option<String>,

    /// Infusion time in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub minutes: Option<String>,

    /// Drop factor of the IV set, in gtt/mL
    #[arg(long, allow_hyphen_values = true)]
    pub factor: Option<String>,

    #[arg(long, value_enum)]
    pub rounding: Option<RoundingMode>,

    #[arg(long, value_enum)]
    pub locale: Option<Locale>,

    /// Maximum fraction digits shown in derivations
    #[arg(long)]
    pub digits: Option<u8>,

    /// TOML file with [defaults] and [display] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start from the 1000 mL / 8 h / 20 gtt/mL example
    #[arg(long)]
    pub example: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// Builds the calculation input from the flags, the example preset and
    /// the configured defaults, in that order of precedence. Numbers are
    /// read with the separators of the active locale.
    pub fn resolve_input<S: SettingsProvider + ?Sized>(&self, settings: &S) -> CalculationInput {
        let preset = |value: &'static str| self.example.then_some(value);

        let volume = self.volume.as_deref().or(preset(EXAMPLE_VOLUME));

        // The preset duration only applies when no time flag was given, so
        // `--example --hours 4` does not keep the stale 480 minutes.
        let (hours, minutes) = if self.hours.is_none() && self.minutes.is_none() {
            (preset(EXAMPLE_HOURS), preset(EXAMPLE_MINUTES))
        } else {
            (self.hours.as_deref(), self.minutes.as_deref())
        };

        let factor = self.factor.as_deref().or(preset(EXAMPLE_FACTOR));

        let rounding = self.rounding.unwrap_or_else(|| {
            if self.example {
                RoundingMode::Nearest
            } else {
                settings.default_rounding()
            }
        });

        let mut input = CalculationInput::from_fields(
            volume.unwrap_or_default(),
            hours.unwrap_or_default(),
            minutes.unwrap_or_default(),
            factor.unwrap_or_default(),
            rounding,
            self.format_options(settings).locale,
        );
        if factor.is_none() {
            input.drop_factor_gtt_per_ml = settings.default_drop_factor();
        }
        input
    }

    /// Flag overrides applied on top of the configured display settings.
    pub fn format_options<S: SettingsProvider + ?Sized>(&self, settings: &S) -> FormatOptions {
        let base = settings.format_options();
        FormatOptions {
            locale: self.locale.unwrap_or(base.locale),
            max_fraction_digits: self.digits.unwrap_or(base.max_fraction_digits),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(digits) = self.digits {
            validate_range("--digits", digits, 0, MAX_FRACTION_DIGITS)?;
        }
        Ok(())
    }
}
