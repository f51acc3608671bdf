pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{JsonRenderer, TextRenderer};
pub use crate::core::calculator::{apply_rounding, normalize_time, Calculator};
pub use crate::domain::model::{
    CalculationInput, CalculationResult, DerivationLine, Derivations, FormatOptions, Locale,
    RoundingMode,
};
pub use crate::utils::error::{CalcError, Result, ValidationError};
