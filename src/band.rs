//! Prime riding years: the fixed age interval highlighted on the bike.

use serde::{Deserialize, Serialize};

pub const BEST_START_AGE: i32 = 18;
pub const BEST_END_AGE: i32 = 65;

/// Age interval of the highlighted band. Not validated: an inverted band is
/// handled by the guards below rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeBand {
    #[serde(default = "default_start_age")]
    pub start_age: i32,
    #[serde(default = "default_end_age")]
    pub end_age: i32,
}

fn default_start_age() -> i32 {
    BEST_START_AGE
}

fn default_end_age() -> i32 {
    BEST_END_AGE
}

impl Default for PrimeBand {
    fn default() -> Self {
        Self {
            start_age: BEST_START_AGE,
            end_age: BEST_END_AGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandFractions {
    pub start_frac: f64,
    pub end_frac: f64,
}

impl PrimeBand {
    pub fn span(&self) -> i32 {
        (self.end_age - self.start_age).max(0)
    }

    /// Years left in the band for someone of `age`: zero once past the end,
    /// never more than the whole band.
    pub fn years_left(&self, age: i32) -> i32 {
        (self.end_age - age).max(0).min(self.span())
    }

    pub fn tooltip_text(&self, age: i32) -> String {
        format!(
            "Prime Biking ({}–{}) • {} yrs remaining",
            self.start_age,
            self.end_age,
            self.years_left(age)
        )
    }
}

pub fn compute_band_fractions(effective_life_expectancy: i32, band: PrimeBand) -> BandFractions {
    let life = f64::from(effective_life_expectancy);
    let start_frac = fraction_of_life(band.start_age, life);
    let end_frac = fraction_of_life(band.end_age, life).max(start_frac);
    BandFractions {
        start_frac,
        end_frac,
    }
}

// life == 0 divides to +/-inf (or NaN for 0/0); both land on a bound.
fn fraction_of_life(age: i32, life: f64) -> f64 {
    let frac = f64::from(age) / life;
    if frac.is_nan() {
        0.0
    } else {
        frac.clamp(0.0, 1.0)
    }
}
