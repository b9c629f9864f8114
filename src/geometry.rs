//! Maps journey fractions onto the pixels of the bike graphic.

use serde::{Deserialize, Serialize};

use crate::{band::BandFractions, error::ConfigError};

/// Fractions of the bike image width where the tyres sit. Tied to the
/// proportions of the bundled graphic.
pub const REAR_TIRE_FRACTION: f64 = 0.085;
pub const FRONT_TIRE_FRACTION: f64 = 0.933;

/// Measured position of the bike image inside its stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    pub offset: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    rear: f64,
    front: f64,
}

impl Calibration {
    pub fn new(rear: f64, front: f64) -> Result<Self, ConfigError> {
        let ordered = (0.0..=1.0).contains(&rear) && (0.0..=1.0).contains(&front) && rear <= front;
        if !ordered {
            return Err(ConfigError::Calibration { rear, front });
        }
        Ok(Self { rear, front })
    }

    pub fn rear(&self) -> f64 {
        self.rear
    }

    pub fn front(&self) -> f64 {
        self.front
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            rear: REAR_TIRE_FRACTION,
            front: FRONT_TIRE_FRACTION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelLayout {
    pub life_start_x: f64,
    pub life_end_x: f64,
    pub age_marker_x: f64,
    /// Always the front calibration point, whatever the life expectancy.
    pub end_marker_x: f64,
    pub band_start_x: f64,
    pub band_end_x: f64,
    pub band_width: f64,
    pub band_center_x: f64,
}

pub fn map_to_pixels(
    journey_fraction: f64,
    band: BandFractions,
    surface: SurfaceGeometry,
    calibration: Calibration,
) -> PixelLayout {
    let life_start_x = surface.offset + surface.width * calibration.rear;
    let life_end_x = surface.offset + surface.width * calibration.front;
    let span = life_end_x - life_start_x;

    let band_start_x = life_start_x + span * band.start_frac;
    let band_end_x = life_start_x + span * band.end_frac;

    PixelLayout {
        life_start_x,
        life_end_x,
        age_marker_x: life_start_x + span * journey_fraction,
        end_marker_x: life_end_x,
        band_start_x,
        band_end_x,
        band_width: (band_end_x - band_start_x).max(0.0),
        band_center_x: (band_start_x + band_end_x) / 2.0,
    }
}
