pub mod calculator;
pub mod format;

pub use crate::domain::model::{CalculationInput, CalculationResult, RoundingMode};
pub use crate::domain::ports::{ResultRenderer, SettingsProvider};
pub use crate::utils::error::Result;
