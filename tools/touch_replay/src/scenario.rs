use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use touch_gestures::{BindingId, GestureConfig, TabletGeometry};

/// Replay fixture: the tablet the trace was recorded on and the gestures to
/// run against it.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub tablet: TabletGeometry,
    #[serde(rename = "gesture", default)]
    pub gestures: Vec<ScenarioGesture>,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioGesture {
    pub name: String,
    pub binding: BindingId,
    #[serde(flatten)]
    pub config: GestureConfig,
}

impl Scenario {
    pub fn parse(text: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(text).context("invalid scenario TOML")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        self.tablet.validate()?;
        if self.gestures.is_empty() {
            bail!("scenario defines no gestures");
        }
        for (index, gesture) in self.gestures.iter().enumerate() {
            if self.gestures[..index].iter().any(|g| g.name == gesture.name) {
                bail!("duplicate gesture name '{}'", gesture.name);
            }
            gesture
                .config
                .validate()
                .with_context(|| format!("gesture '{}'", gesture.name))?;
        }
        Ok(())
    }
}
