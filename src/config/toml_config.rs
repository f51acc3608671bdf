use crate::core::{RoundingMode, SettingsProvider};
use crate::domain::model::{FormatOptions, Locale};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_positive_finite, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Drop factor of a standard macrodrip set, used when nothing else is given.
pub const DEFAULT_DROP_FACTOR: f64 = 20.0;
pub const MAX_FRACTION_DIGITS: u8 = 6;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub defaults: Option<DefaultsConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub drop_factor: Option<f64>,
    pub rounding: Option<RoundingMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub locale: Option<Locale>,
    pub max_fraction_digits: Option<u8>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，先替換 `${VAR}` 環境變數
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    /// Unset variables are left in place verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CalcError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(factor) = self.defaults.as_ref().and_then(|d| d.drop_factor) {
            validate_positive_finite("defaults.drop_factor", factor)?;
        }

        if let Some(digits) = self.display.as_ref().and_then(|d| d.max_fraction_digits) {
            validate_range("display.max_fraction_digits", digits, 0, MAX_FRACTION_DIGITS)?;
        }

        Ok(())
    }
}

impl SettingsProvider for TomlConfig {
    fn default_drop_factor(&self) -> f64 {
        self.defaults
            .as_ref()
            .and_then(|d| d.drop_factor)
            .unwrap_or(DEFAULT_DROP_FACTOR)
    }

    fn default_rounding(&self) -> RoundingMode {
        self.defaults
            .as_ref()
            .and_then(|d| d.rounding)
            .unwrap_or_default()
    }

    fn format_options(&self) -> FormatOptions {
        let fallback = FormatOptions::default();
        let display = self.display.as_ref();
        FormatOptions {
            locale: display.and_then(|d| d.locale).unwrap_or(fallback.locale),
            max_fraction_digits: display
                .and_then(|d| d.max_fraction_digits)
                .unwrap_or(fallback.max_fraction_digits),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[defaults]
drop_factor = 60
rounding = "ceil"

[display]
locale = "es"
max_fraction_digits = 3
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.default_drop_factor(), 60.0);
        assert_eq!(config.default_rounding(), RoundingMode::Ceil);
        assert_eq!(
            config.format_options(),
            FormatOptions {
                locale: Locale::Es,
                max_fraction_digits: 3
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.default_drop_factor(), DEFAULT_DROP_FACTOR);
        assert_eq!(config.default_rounding(), RoundingMode::Nearest);
        assert_eq!(config.format_options(), FormatOptions::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DRIP_RATE_TEST_FACTOR", "15");

        let toml_content = r#"
[defaults]
drop_factor = ${DRIP_RATE_TEST_FACTOR}
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.default_drop_factor(), 15.0);

        std::env::remove_var("DRIP_RATE_TEST_FACTOR");
    }

    #[test]
    fn test_config_validation() {
        let zero_factor = TomlConfig::from_toml_str("[defaults]\ndrop_factor = 0\n").unwrap();
        assert!(zero_factor.validate().is_err());

        let too_many_digits =
            TomlConfig::from_toml_str("[display]\nmax_fraction_digits = 9\n").unwrap();
        assert!(too_many_digits.validate().is_err());
    }

    #[test]
    fn test_unknown_rounding_is_rejected() {
        let err = TomlConfig::from_toml_str("[defaults]\nrounding = \"up\"\n").unwrap_err();
        assert!(matches!(err, CalcError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\nlocale = \"es\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.format_options().locale, Locale::Es);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/drip-rate.toml").unwrap_err();
        assert!(matches!(err, CalcError::IoError(_)));
    }
}
