use crate::domain::model::Locale;
use thiserror::Error;

/// Input problems reported back to whoever collected the fields.
///
/// Only the first violated rule is ever reported for a given input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a valid volume (>0).")]
    InvalidVolume,

    #[error("Enter the time in hours or minutes.")]
    MissingTime,

    #[error("Hours cannot be negative.")]
    NegativeHours,

    #[error("Minutes cannot be negative.")]
    NegativeMinutes,

    #[error("Drop factor must be greater than 0.")]
    InvalidDropFactor,
}

impl ValidationError {
    /// The message in the given locale. `Display` always uses English.
    pub fn message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::InvalidVolume, Locale::En) => "Enter a valid volume (>0).",
            (Self::MissingTime, Locale::En) => "Enter the time in hours or minutes.",
            (Self::NegativeHours, Locale::En) => "Hours cannot be negative.",
            (Self::NegativeMinutes, Locale::En) => "Minutes cannot be negative.",
            (Self::InvalidDropFactor, Locale::En) => "Drop factor must be greater than 0.",
            (Self::InvalidVolume, Locale::Es) => "Ingresa un volumen válido (>0).",
            (Self::MissingTime, Locale::Es) => "Ingresa el tiempo en horas o minutos.",
            (Self::NegativeHours, Locale::Es) => "Las horas no pueden ser negativas.",
            (Self::NegativeMinutes, Locale::Es) => "Los minutos no pueden ser negativos.",
            (Self::InvalidDropFactor, Locale::Es) => "El factor de goteo debe ser mayor a 0.",
        }
    }

    /// Name of the input field the message refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidVolume => "volume",
            Self::MissingTime => "hours/minutes",
            Self::NegativeHours => "hours",
            Self::NegativeMinutes => "minutes",
            Self::InvalidDropFactor => "factor",
        }
    }
}

#[derive(Error, Debug)]
pub enum CalcError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

impl CalcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Input,
            Self::TomlError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::TomlError(_) => "The configuration file is not valid TOML.".to_string(),
            Self::IoError(e) => format!("Could not read a required file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::InvalidVolume) => {
                "Pass --volume with a number of millilitres greater than zero"
            }
            Self::Validation(ValidationError::MissingTime) => {
                "Pass --hours or --minutes (or both)"
            }
            Self::Validation(ValidationError::NegativeHours)
            | Self::Validation(ValidationError::NegativeMinutes) => {
                "Durations must be zero or positive"
            }
            Self::Validation(ValidationError::InvalidDropFactor) => {
                "Use the drop factor printed on the IV set, e.g. 10, 15, 20 or 60"
            }
            Self::TomlError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the configuration file against the documented [defaults] and [display] keys"
            }
            Self::IoError(_) => "Make sure the file exists and is readable",
            Self::SerializationError(_) => "Retry without --json to get plain text output",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Configuration | ErrorCategory::System => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
