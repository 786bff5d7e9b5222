use anyhow::{Context, Result};
use bevy::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

use super::display::DisplaySettings;

pub const SETTINGS_FILE_NAME: &str = "settings.json";
/// Subdirectory of the platform data dir that holds this game's files.
pub const APP_DIR_NAME: &str = "game_demo";

/// File-backed persistence for [`DisplaySettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/game_demo/settings.json`, or `./settings.json` on platforms
    /// without a known data dir.
    pub fn in_user_data_dir() -> Self {
        let path = dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when there is nothing saved yet (no file, or a `null` document).
    pub fn load(&self) -> Result<Option<DisplaySettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("read settings {}", self.path.display()))?;
        let settings: Option<DisplaySettings> = serde_json::from_str(&data)
            .with_context(|| format!("parse settings {}", self.path.display()))?;
        Ok(settings)
    }

    pub fn load_or_default(&self) -> DisplaySettings {
        match self.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                info!(
                    target: "settings",
                    "No settings saved at {}; using defaults",
                    self.path.display()
                );
                DisplaySettings::DEFAULT
            }
            Err(e) => {
                warn!(target: "settings", "{e:#}; using defaults");
                DisplaySettings::DEFAULT
            }
        }
    }

    pub fn save(&self, settings: &DisplaySettings) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("create settings dir {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)
            .with_context(|| format!("write settings {}", self.path.display()))?;
        debug!(target: "settings", "Saved display settings to {}", self.path.display());
        Ok(())
    }
}
