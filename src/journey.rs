//! Journey model: turns raw age and life-expectancy inputs into the
//! canonical numeric state every other stage works from.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParseSexError};

pub const FEMALE_LIFE_EXPECTANCY: i32 = 81;
pub const MALE_LIFE_EXPECTANCY: i32 = 76;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Rounded population averages (75.8 and 81.1).
    pub fn base_life_expectancy(self) -> i32 {
        match self {
            Sex::Female => FEMALE_LIFE_EXPECTANCY,
            Sex::Male => MALE_LIFE_EXPECTANCY,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
        }
    }
}

impl FromStr for Sex {
    type Err = ParseSexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(ParseSexError(s.to_string())),
        }
    }
}

/// Anything the host can hand over as a number: form text, JSON numbers,
/// already-normalized integers. `None` means "unparseable".
///
/// Text is read the way a browser reads form fields: leading whitespace is
/// skipped and the longest numeric prefix wins, so `"40 years"` is 40.
pub trait NumericInput {
    /// Decimal read. May be infinite (`"Infinity"`), never NaN.
    fn parse_number(&self) -> Option<f64>;

    /// Integer read, always finite. Defaults to truncating the decimal read.
    fn parse_integer(&self) -> Option<f64> {
        self.parse_number()
            .filter(|v| v.is_finite())
            .map(f64::trunc)
    }
}

impl NumericInput for str {
    fn parse_number(&self) -> Option<f64> {
        let (sign, rest) = split_sign(self.trim_start());
        if rest.starts_with("Infinity") {
            return Some(sign * f64::INFINITY);
        }
        let prefix = &rest[..float_prefix_len(rest)];
        prefix.parse::<f64>().ok().map(|v| sign * v)
    }

    fn parse_integer(&self) -> Option<f64> {
        let (sign, rest) = split_sign(self.trim_start());
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        rest[..digits].parse::<f64>().ok().map(|v| sign * v)
    }
}

fn split_sign(text: &str) -> (f64, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (-1.0, rest)
    } else {
        (1.0, text.strip_prefix('+').unwrap_or(text))
    }
}

/// Length of the `digits[.digits][e[+-]digits]` prefix, or 0 when there is
/// no mantissa digit at all.
fn float_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits_from(0);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}

impl NumericInput for String {
    fn parse_number(&self) -> Option<f64> {
        self.as_str().parse_number()
    }

    fn parse_integer(&self) -> Option<f64> {
        self.as_str().parse_integer()
    }
}

impl NumericInput for f64 {
    fn parse_number(&self) -> Option<f64> {
        Some(*self).filter(|v| !v.is_nan())
    }
}

impl NumericInput for i32 {
    fn parse_number(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl<T: NumericInput + ?Sized> NumericInput for &T {
    fn parse_number(&self) -> Option<f64> {
        (**self).parse_number()
    }

    fn parse_integer(&self) -> Option<f64> {
        (**self).parse_integer()
    }
}

impl<T: NumericInput> NumericInput for Option<T> {
    fn parse_number(&self) -> Option<f64> {
        self.as_ref().and_then(NumericInput::parse_number)
    }

    fn parse_integer(&self) -> Option<f64> {
        self.as_ref().and_then(NumericInput::parse_integer)
    }
}

/// A raw value as it arrives over JSON: either a number or the text of a
/// form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Number(f64),
    Text(String),
}

impl Default for RawInput {
    fn default() -> Self {
        RawInput::Text(String::new())
    }
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        RawInput::Text(value.to_string())
    }
}

impl From<f64> for RawInput {
    fn from(value: f64) -> Self {
        RawInput::Number(value)
    }
}

impl From<i32> for RawInput {
    fn from(value: i32) -> Self {
        RawInput::Number(f64::from(value))
    }
}

impl NumericInput for RawInput {
    fn parse_number(&self) -> Option<f64> {
        match self {
            RawInput::Number(v) => v.parse_number(),
            RawInput::Text(text) => text.parse_number(),
        }
    }

    fn parse_integer(&self) -> Option<f64> {
        match self {
            RawInput::Number(v) => v.parse_integer(),
            RawInput::Text(text) => text.parse_integer(),
        }
    }
}

/// Integer parse: reads the leading digit run of text, truncates numbers.
pub fn parse_integer(input: &impl NumericInput) -> Option<f64> {
    input.parse_integer()
}

/// Inclusive bounds for a life-expectancy override. Always `0 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverrideRange {
    min: i32,
    max: i32,
}

impl OverrideRange {
    pub fn new(min: i32, max: i32) -> Result<Self, ConfigError> {
        if min < 0 {
            return Err(ConfigError::NegativeRange { min });
        }
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn clamp(&self, value: f64) -> i32 {
        value.clamp(f64::from(self.min), f64::from(self.max)) as i32
    }
}

impl Default for OverrideRange {
    fn default() -> Self {
        Self { min: 10, max: 120 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JourneyState {
    pub effective_life_expectancy: i32,
    pub age: i32,
    pub years_remaining: i32,
    pub journey_fraction: f64,
    pub journey_percent: i32,
}

pub fn effective_life_expectancy(
    sex: Sex,
    override_enabled: bool,
    override_value: impl NumericInput,
    range: OverrideRange,
) -> i32 {
    let base = sex.base_life_expectancy();
    if !override_enabled {
        return base;
    }
    let value = parse_integer(&override_value).unwrap_or(f64::from(base));
    range.clamp(value)
}

/// Derives the full journey state. Never fails: unparseable age counts as 0,
/// an unparseable override falls back to the sex default.
pub fn compute_journey_state(
    sex: Sex,
    age: impl NumericInput,
    override_enabled: bool,
    override_value: impl NumericInput,
    range: OverrideRange,
) -> JourneyState {
    let life = effective_life_expectancy(sex, override_enabled, override_value, range);

    let age = age
        .parse_number()
        .unwrap_or(0.0)
        .round()
        .clamp(0.0, f64::from(life.max(0))) as i32;

    let years_remaining = (life - age).max(0);
    let journey_fraction = if life > 0 {
        (f64::from(age) / f64::from(life)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let journey_percent = (journey_fraction * 100.0).round() as i32;

    JourneyState {
        effective_life_expectancy: life,
        age,
        years_remaining,
        journey_fraction,
        journey_percent,
    }
}
