use thiserror::Error;

/// Problems with a journey configuration. The engine itself never fails;
/// these only surface when a configuration is built or validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("override range is inverted: min {min} > max {max}")]
    InvertedRange { min: i32, max: i32 },
    #[error("override range must not go below zero (min is {min})")]
    NegativeRange { min: i32 },
    #[error("calibration fractions must satisfy 0 <= rear <= front <= 1 (rear {rear}, front {front})")]
    Calibration { rear: f64, front: f64 },
    #[error("label rows must be finite pixel offsets (top {top}, second {second})")]
    LabelRows { top: f64, second: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sex '{0}', expected 'male' or 'female'")]
pub struct ParseSexError(pub String);
