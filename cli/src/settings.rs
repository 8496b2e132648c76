use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tilelink_core::GameConfig;

/// Contents of the optional TOML settings file.
///
/// ```toml
/// bell = true
///
/// [game]
/// rows = 10
/// cols = 10
/// symbols = 8
/// reshuffle_limit = 32
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub game: GameConfig,
    /// Ring the terminal bell on a match.
    pub bell: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::classic(),
            bell: true,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read settings from {}", path.display()))?;
        let settings: Self = toml::from_str(&text)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }
}
