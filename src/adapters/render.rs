use crate::core::format::format_number;
use crate::core::{CalculationResult, ResultRenderer, Result};
use crate::domain::model::FormatOptions;

/// Headline figures followed by one block per derivation line.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    options: FormatOptions,
}

impl TextRenderer {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }
}

impl ResultRenderer for TextRenderer {
    fn render(&self, result: &CalculationResult) -> Result<String> {
        let gtt = result
            .gtt_per_minute
            .map(|g| g.to_string())
            .unwrap_or_else(|| format_number(f64::NAN, 0, self.options.locale));

        let mut out = String::new();
        out.push_str(&format!(
            "mL/h: {}  |  gtt/min: {}  |  {}\n",
            format_number(
                result.ml_per_hour,
                self.options.max_fraction_digits,
                self.options.locale
            ),
            gtt,
            result.time_formatted
        ));

        for line in result.derivations.iter() {
            out.push('\n');
            out.push_str(&format!("{}: {}\n", line.label, line.value));
            out.push_str(&format!("  {}\n", line.detail));
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ResultRenderer for JsonRenderer {
    fn render(&self, result: &CalculationResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}
