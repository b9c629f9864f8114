//! Recorded sequences of control events, replayed through a session.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::{
    config::JourneySettings,
    journey::Sex,
    session::{ControlEvent, JourneyFrame, JourneySession},
};

fn default_script_name() -> String {
    "unnamed".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionScript {
    #[serde(default = "default_script_name")]
    pub name: String,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub events: Vec<ControlEvent>,
}

/// One replayed event together with the frame it produced.
#[derive(Debug, Clone)]
pub struct ReplayStep<'a> {
    pub index: usize,
    pub event: &'a ControlEvent,
    pub accepted: bool,
    pub frame: JourneyFrame,
}

impl SessionScript {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to parse session script")
    }

    pub fn replay(&self, settings: JourneySettings) -> Vec<JourneyFrame> {
        let mut frames = Vec::with_capacity(self.events.len());
        self.replay_with_hook(settings, |step| frames.push(step.frame));
        frames
    }

    pub fn replay_with_hook<F>(&self, settings: JourneySettings, mut hook: F) -> JourneySession
    where
        F: FnMut(ReplayStep<'_>),
    {
        let mut session = JourneySession::new(settings, self.sex);
        for (index, event) in self.events.iter().enumerate() {
            let accepted = session.apply(event.clone());
            hook(ReplayStep {
                index,
                event,
                accepted,
                frame: session.render(),
            });
        }
        info!(script = %self.name, events = self.events.len(), "replay finished");
        session
    }
}

pub struct ScriptLoader {
    base_dir: PathBuf,
}

impl ScriptLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<SessionScript> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session script {}", path.display()))?;
        SessionScript::from_yaml_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
