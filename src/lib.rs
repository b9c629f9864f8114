pub mod band;
pub mod config;
pub mod error;
pub mod geometry;
pub mod journey;
pub mod labels;
pub mod script;
pub mod session;
pub mod web;

pub use config::{ConfigLoader, JourneyConfig, JourneySettings};
pub use error::ConfigError;
pub use journey::{compute_journey_state, JourneyState, OverrideRange, RawInput, Sex};
pub use session::{ControlEvent, JourneyFrame, JourneySession};
