use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::layout::{LayoutOptions, DEFAULT_PADDING, DEFAULT_SPACING};
use crate::model::DEFAULT_ALGORITHM;

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_AUTOSAVE_KEY: &str = "arch-atlas-autosave";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub layout: LayoutOptions,
    pub autosave_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutOptions {
                algorithm: DEFAULT_ALGORITHM.to_string(),
                spacing: Some(DEFAULT_SPACING),
                padding: Some(DEFAULT_PADDING),
            },
            autosave_key: DEFAULT_AUTOSAVE_KEY.to_string(),
        }
    }
}

/// Settings from `<dir>/settings.json`. Missing or unreadable files give defaults.
pub fn read_settings(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Settings::default();
    }
    match fs::read_to_string(&path)
        .map_err(StoreError::from)
        .and_then(|s| serde_json::from_str(&s).map_err(StoreError::from))
    {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        }
    }
}

pub fn write_settings(dir: &Path, settings: &Settings) -> Result<(), StoreError> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(dir.join(SETTINGS_FILE), json)?;
    Ok(())
}
