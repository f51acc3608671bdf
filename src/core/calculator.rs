use crate::core::format::{format_duration, format_number, format_plain};
use crate::domain::model::{
    CalculationInput, CalculationResult, DerivationLine, Derivations, FormatOptions, Locale,
    RoundingMode,
};
use crate::utils::error::ValidationError;

pub struct Calculator {
    options: FormatOptions,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl Calculator {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Returns the first rule the input breaks, if any.
    pub fn validate(&self, input: &CalculationInput) -> Result<(), ValidationError> {
        let hours = finite(input.hours);
        let minutes = finite(input.minutes);

        let outcome = if !input.volume_ml.is_finite() || input.volume_ml <= 0.0 {
            Err(ValidationError::InvalidVolume)
        } else if hours.is_none() && minutes.is_none() {
            Err(ValidationError::MissingTime)
        } else if hours.is_some_and(|h| h < 0.0) {
            Err(ValidationError::NegativeHours)
        } else if minutes.is_some_and(|m| m < 0.0) {
            Err(ValidationError::NegativeMinutes)
        } else if !input.drop_factor_gtt_per_ml.is_finite() || input.drop_factor_gtt_per_ml <= 0.0
        {
            Err(ValidationError::InvalidDropFactor)
        } else {
            Ok(())
        };

        if let Err(e) = &outcome {
            tracing::debug!(field = e.field(), "Input rejected: {}", e);
        }
        outcome
    }

    /// Computes every output quantity. Expects input that passed
    /// [`Calculator::validate`]; anything that cannot be derived renders as
    /// a placeholder instead of failing.
    pub fn compute(&self, input: &CalculationInput) -> CalculationResult {
        let (hours, minutes) = normalize_time(input.hours, input.minutes);
        let volume = input.volume_ml;
        let factor = input.drop_factor_gtt_per_ml;

        let ml_per_hour = volume / hours;
        let raw_gtt_per_minute = (volume * factor) / minutes;
        let rounded = apply_rounding(raw_gtt_per_minute, input.rounding);
        // Beyond the i64 range a cast would saturate into a plausible-looking number.
        let gtt_per_minute = (rounded.is_finite()
            && rounded >= i64::MIN as f64
            && rounded < i64::MAX as f64)
            .then_some(rounded as i64);

        let total_minutes = minutes.round();
        let time_formatted = format_duration(total_minutes);
        let cross_check_gtt_per_minute = (ml_per_hour * factor) / 60.0;

        let derivations = self.derive(&Quantities {
            volume,
            hours,
            minutes,
            factor,
            ml_per_hour,
            raw_gtt_per_minute,
            gtt_per_minute,
            total_minutes,
            time_formatted: &time_formatted,
            cross_check: cross_check_gtt_per_minute,
            rounding: input.rounding,
        });

        tracing::debug!(
            ml_per_hour,
            raw_gtt_per_minute,
            ?gtt_per_minute,
            total_minutes,
            "Calculation complete"
        );

        CalculationResult {
            ml_per_hour,
            raw_gtt_per_minute,
            gtt_per_minute,
            hours,
            minutes,
            total_minutes,
            time_formatted,
            cross_check_gtt_per_minute,
            derivations,
        }
    }

    /// Validates, then computes.
    pub fn calculate(&self, input: &CalculationInput) -> Result<CalculationResult, ValidationError> {
        self.validate(input)?;
        Ok(self.compute(input))
    }

    fn fmt(&self, value: f64) -> String {
        format_number(value, self.options.max_fraction_digits, self.options.locale)
    }

    fn fmt_digits(&self, value: f64, digits: u8) -> String {
        format_number(value, digits, self.options.locale)
    }

    fn derive(&self, q: &Quantities<'_>) -> Derivations {
        let text = Wording::for_locale(self.options.locale);
        let gtt = q
            .gtt_per_minute
            .map(|g| g.to_string())
            .unwrap_or_else(|| self.fmt(f64::NAN));
        let factor = format_plain(q.factor);
        let mlh = self.fmt(q.ml_per_hour);

        Derivations {
            speed: DerivationLine {
                label: text.speed_label.to_string(),
                value: format!("{} mL/h", mlh),
                detail: format!(
                    "mL/h = {} ÷ {} = {} ÷ {} = {} mL/h",
                    text.volume,
                    text.hours,
                    self.fmt_digits(q.volume, 0),
                    self.fmt_digits(q.hours, 2),
                    mlh
                ),
            },
            drip_rate: DerivationLine {
                label: text.drip_label.to_string(),
                value: format!("{} gtt/min", gtt),
                detail: format!(
                    "gtt/min = ({} × {}) ÷ {} = ({} × {}) ÷ {} = {} → {} gtt/min ({})",
                    text.volume,
                    text.factor,
                    text.minutes,
                    self.fmt_digits(q.volume, 0),
                    factor,
                    self.fmt_digits(q.minutes, 0),
                    self.fmt(q.raw_gtt_per_minute),
                    gtt,
                    text.rounding_name(q.rounding)
                ),
            },
            total_time: DerivationLine {
                label: text.time_label.to_string(),
                value: q.time_formatted.to_string(),
                detail: format!(
                    "{} = {} h = {} min",
                    text.time,
                    self.fmt_digits(q.hours, 2),
                    format_plain(q.total_minutes)
                ),
            },
            cross_check: DerivationLine {
                label: text.check_label.to_string(),
                value: format!("{} gtt/min", format_plain(q.cross_check.round())),
                detail: format!(
                    "{}: gtt/min = (mL/h × {}) ÷ 60 = ({} × {}) ÷ 60 = {}",
                    text.equivalence,
                    text.factor,
                    mlh,
                    factor,
                    self.fmt(q.cross_check)
                ),
            },
        }
    }
}

/// Intermediate values threaded into the derivation text.
struct Quantities<'a> {
    volume: f64,
    hours: f64,
    minutes: f64,
    factor: f64,
    ml_per_hour: f64,
    raw_gtt_per_minute: f64,
    gtt_per_minute: Option<i64>,
    total_minutes: f64,
    time_formatted: &'a str,
    cross_check: f64,
    rounding: RoundingMode,
}

struct Wording {
    speed_label: &'static str,
    drip_label: &'static str,
    time_label: &'static str,
    check_label: &'static str,
    volume: &'static str,
    hours: &'static str,
    minutes: &'static str,
    factor: &'static str,
    time: &'static str,
    equivalence: &'static str,
    nearest: &'static str,
    ceil: &'static str,
    floor: &'static str,
}

impl Wording {
    const EN: Wording = Wording {
        speed_label: "Speed (mL/h)",
        drip_label: "Drip rate (gtt/min)",
        time_label: "Total time",
        check_label: "Cross-check",
        volume: "Volume",
        hours: "Hours",
        minutes: "Minutes",
        factor: "Factor",
        time: "Time",
        equivalence: "Using the equivalence",
        nearest: "round to nearest",
        ceil: "round up",
        floor: "round down",
    };

    const ES: Wording = Wording {
        speed_label: "Velocidad (mL/h)",
        drip_label: "Goteo (gtt/min)",
        time_label: "Tiempo total",
        check_label: "Comprobación",
        volume: "Volumen",
        hours: "Horas",
        minutes: "Minutos",
        factor: "Factor",
        time: "Tiempo",
        equivalence: "Usando la equivalencia",
        nearest: "redondeo a la más cercana",
        ceil: "redondeo hacia arriba",
        floor: "redondeo hacia abajo",
    };

    fn for_locale(locale: Locale) -> &'static Wording {
        match locale {
            Locale::En => &Self::EN,
            Locale::Es => &Self::ES,
        }
    }

    fn rounding_name(&self, mode: RoundingMode) -> &'static str {
        match mode {
            RoundingMode::Nearest => self.nearest,
            RoundingMode::Ceil => self.ceil,
            RoundingMode::Floor => self.floor,
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Fills in whichever of hours/minutes is missing from the other.
///
/// When both are given they are returned as-is, with no consistency check.
/// When neither is usable both come back as NaN.
pub fn normalize_time(hours: Option<f64>, minutes: Option<f64>) -> (f64, f64) {
    match (finite(hours), finite(minutes)) {
        (Some(h), Some(m)) => (h, m),
        (Some(h), None) => (h, h * 60.0),
        (None, Some(m)) => (m / 60.0, m),
        (None, None) => (f64::NAN, f64::NAN),
    }
}

/// Nearest rounds half away from zero.
pub fn apply_rounding(raw: f64, mode: RoundingMode) -> f64 {
    match mode {
        RoundingMode::Nearest => raw.round(),
        RoundingMode::Ceil => raw.ceil(),
        RoundingMode::Floor => raw.floor(),
    }
}
