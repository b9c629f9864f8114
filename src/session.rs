//! The adapter between a host UI and the pure journey functions.
//!
//! A session keeps one canonical value per quantity the host shows twice
//! (age slider and age field, override slider and override field). Every
//! event is normalized into that value, the journey is recomputed from
//! scratch, and the canonical values are rewritten from the result so both
//! views can be refreshed from a single place.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    band::{compute_band_fractions, BandFractions},
    config::JourneySettings,
    geometry::{map_to_pixels, PixelLayout, SurfaceGeometry},
    journey::{compute_journey_state, parse_integer, JourneyState, NumericInput, RawInput, Sex},
    labels::{resolve_label_layout, LabelBounds, LabelLayout},
};

pub const CUSTOM_MODE_LABEL: &str = "Custom life expectancy";
pub const DEFAULT_MODE_LABEL: &str = "Using default for sex";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum ControlEvent {
    AgeSlider(RawInput),
    AgeField(RawInput),
    SexChanged(Sex),
    OverrideToggled(bool),
    OverrideSlider(RawInput),
    OverrideField(RawInput),
    Resized(SurfaceGeometry),
    BandHover(bool),
}

impl ControlEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ControlEvent::AgeSlider(_) => "age_slider",
            ControlEvent::AgeField(_) => "age_field",
            ControlEvent::SexChanged(_) => "sex_changed",
            ControlEvent::OverrideToggled(_) => "override_toggled",
            ControlEvent::OverrideSlider(_) => "override_slider",
            ControlEvent::OverrideField(_) => "override_field",
            ControlEvent::Resized(_) => "resized",
            ControlEvent::BandHover(_) => "band_hover",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub text: String,
    pub visible: bool,
}

/// Everything a host needs to paint one complete view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyFrame {
    pub sex: Sex,
    pub state: JourneyState,
    pub mode_label: &'static str,
    pub override_enabled: bool,
    pub override_value: i32,
    pub age_slider_max: i32,
    pub band: BandFractions,
    /// `None` until the host has reported a measured surface.
    pub layout: Option<PixelLayout>,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone)]
pub struct JourneySession {
    settings: JourneySettings,
    sex: Sex,
    age: i32,
    override_enabled: bool,
    override_value: i32,
    surface: Option<SurfaceGeometry>,
    hovered: bool,
}

impl JourneySession {
    pub fn new(settings: JourneySettings, sex: Sex) -> Self {
        Self {
            settings,
            sex,
            age: 0,
            override_enabled: false,
            override_value: sex.base_life_expectancy(),
            surface: None,
            hovered: false,
        }
    }

    /// Builds a session straight from a full set of raw inputs, as a
    /// stateless host would submit them.
    pub fn with_inputs(
        settings: JourneySettings,
        sex: Sex,
        age: impl NumericInput,
        override_enabled: bool,
        override_value: impl NumericInput,
    ) -> Self {
        let mut session = Self::new(settings, sex);
        session.override_enabled = override_enabled;
        session.recompute(age, override_value);
        session
    }

    pub fn settings(&self) -> &JourneySettings {
        &self.settings
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn override_enabled(&self) -> bool {
        self.override_enabled
    }

    pub fn override_value(&self) -> i32 {
        self.override_value
    }

    pub fn surface(&self) -> Option<SurfaceGeometry> {
        self.surface
    }

    /// Applies one host event. Returns `false` when the event was ignored
    /// (unparseable field text, or override input while overrides are off).
    pub fn apply(&mut self, event: ControlEvent) -> bool {
        trace!(?event, "applying control event");
        match event {
            ControlEvent::AgeSlider(raw) => {
                let age = raw.parse_number().unwrap_or(0.0);
                self.recompute(age, self.override_value);
            }
            ControlEvent::AgeField(raw) => {
                let Some(age) = raw.parse_number() else {
                    debug!(?raw, "ignoring unparseable age field");
                    return false;
                };
                let slider_max = f64::from(self.state().effective_life_expectancy);
                self.recompute(age.round().clamp(0.0, slider_max), self.override_value);
            }
            ControlEvent::SexChanged(sex) => {
                self.sex = sex;
                if !self.override_enabled {
                    self.override_value = sex.base_life_expectancy();
                }
                self.recompute(self.age, self.override_value);
            }
            ControlEvent::OverrideToggled(enabled) => {
                self.override_enabled = enabled;
                if !enabled {
                    self.override_value = self.sex.base_life_expectancy();
                }
                self.recompute(self.age, self.override_value);
            }
            ControlEvent::OverrideSlider(raw) => {
                if !self.override_enabled {
                    debug!("override slider moved while overrides are disabled");
                    return false;
                }
                self.recompute(self.age, raw);
            }
            ControlEvent::OverrideField(raw) => {
                if !self.override_enabled {
                    debug!("override field edited while overrides are disabled");
                    return false;
                }
                let Some(value) = parse_integer(&raw) else {
                    debug!(?raw, "ignoring unparseable override field");
                    return false;
                };
                let value = self.settings.override_range.clamp(value);
                self.recompute(self.age, value);
            }
            ControlEvent::Resized(surface) => {
                self.surface = Some(surface);
            }
            ControlEvent::BandHover(hovered) => {
                self.hovered = hovered;
            }
        }
        true
    }

    pub fn state(&self) -> JourneyState {
        compute_journey_state(
            self.sex,
            self.age,
            self.override_enabled,
            self.override_value,
            self.settings.override_range,
        )
    }

    pub fn render(&self) -> JourneyFrame {
        let state = self.state();
        let band = compute_band_fractions(state.effective_life_expectancy, self.settings.prime_band);
        let layout = self.surface.map(|surface| {
            map_to_pixels(
                state.journey_fraction,
                band,
                surface,
                self.settings.calibration,
            )
        });

        JourneyFrame {
            sex: self.sex,
            state,
            mode_label: if self.override_enabled {
                CUSTOM_MODE_LABEL
            } else {
                DEFAULT_MODE_LABEL
            },
            override_enabled: self.override_enabled,
            override_value: self.override_value,
            age_slider_max: state.effective_life_expectancy,
            band,
            layout,
            tooltip: Tooltip {
                text: self.settings.prime_band.tooltip_text(state.age),
                visible: self.hovered,
            },
        }
    }

    /// Second pass, once the host has laid out both marker labels.
    pub fn resolve_labels(&self, age_label: LabelBounds, end_label: LabelBounds) -> LabelLayout {
        let state = self.state();
        resolve_label_layout(
            state.age,
            state.effective_life_expectancy,
            age_label,
            end_label,
            self.settings.label_rows,
        )
    }

    fn recompute(&mut self, age: impl NumericInput, override_value: impl NumericInput) {
        let state = compute_journey_state(
            self.sex,
            age,
            self.override_enabled,
            override_value,
            self.settings.override_range,
        );
        self.age = state.age;
        self.override_value = state.effective_life_expectancy;
        trace!(
            age = state.age,
            life = state.effective_life_expectancy,
            percent = state.journey_percent,
            "journey recomputed"
        );
    }
}
