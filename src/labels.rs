//! Second layout pass: decides where the "You are here" and "End of your
//! ride" pills go once the host has measured them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ages within this distance of the life expectancy count as arrived.
const ARRIVAL_TOLERANCE: f64 = 0.01;

/// Horizontal extent of a rendered label, in the same coordinates as the
/// pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelBounds {
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelRows {
    top: f64,
    second: f64,
}

impl LabelRows {
    pub fn new(top: f64, second: f64) -> Result<Self, ConfigError> {
        if !top.is_finite() || !second.is_finite() {
            return Err(ConfigError::LabelRows { top, second });
        }
        Ok(Self { top, second })
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn second(&self) -> f64 {
        self.second
    }
}

impl Default for LabelRows {
    fn default() -> Self {
        Self {
            top: 6.0,
            second: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelLayout {
    pub show_age_label: bool,
    pub age_label_top: f64,
    pub end_label_top: f64,
}

pub fn has_arrived(age: i32, effective_life_expectancy: i32) -> bool {
    f64::from(age) >= f64::from(effective_life_expectancy) - ARRIVAL_TOLERANCE
}

pub fn resolve_label_layout(
    age: i32,
    effective_life_expectancy: i32,
    age_label: LabelBounds,
    end_label: LabelBounds,
    rows: LabelRows,
) -> LabelLayout {
    if has_arrived(age, effective_life_expectancy) {
        return LabelLayout {
            show_age_label: false,
            age_label_top: rows.top,
            end_label_top: rows.top,
        };
    }

    let overlapping = age_label.right >= end_label.left;
    LabelLayout {
        show_age_label: true,
        age_label_top: rows.top,
        end_label_top: if overlapping { rows.second } else { rows.top },
    }
}
