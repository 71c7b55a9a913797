//! Persistent Settings Management
//!
//! Loads and saves the capture and processing configuration.
//!
//! # Storage Locations
//! - Linux: `~/.config/vkav/settings.json`
//! - Windows: `%APPDATA%\vkav\config\settings.json`
//! - macOS: `~/Library/Application Support/vkav/settings.json`

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use vkav_dsp::ProcessSettings;

use crate::config::AudioSettings;
use crate::error::{EngineError, EngineResult};

fn default_frame_rate() -> u32 {
    60
}

/// Root settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VkavSettings {
    pub audio: AudioSettings,
    pub process: ProcessSettings,
    /// Render frames per second driving the pipeline tick
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

impl Default for VkavSettings {
    fn default() -> Self {
        Self {
            audio: AudioSettings::default(),
            process: ProcessSettings::default(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl VkavSettings {
    /// Load settings from disk, or return default if missing/corrupt
    pub fn load() -> Self {
        if let Some(path) = Self::get_config_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(settings) => {
                        info!("Settings loaded from {:?}", path);
                        return settings;
                    }
                    Err(e) => error!("{}", e),
                }
            }
        }

        info!("Using default settings");
        Self::default()
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> EngineResult<Self> {
        let file = fs::File::open(path).map_err(|e| {
            EngineError::SettingsError(format!("Failed to open settings file: {e}"))
        })?;
        serde_json::from_reader(file).map_err(|e| {
            EngineError::SettingsError(format!("Failed to parse settings file: {e}"))
        })
    }

    /// Save settings to the platform config directory
    pub fn save(&self) -> EngineResult<()> {
        let path = Self::get_config_path().ok_or_else(|| {
            EngineError::SettingsError("Could not determine config path".to_string())
        })?;
        self.save_to(&path)?;
        info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Save settings to a specific file, creating its directory
    pub fn save_to(&self, path: &Path) -> EngineResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EngineError::SettingsError(e.to_string()))?;
        }

        let file = fs::File::create(path).map_err(|e| EngineError::SettingsError(e.to_string()))?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| EngineError::SettingsError(e.to_string()))
    }

    /// Get the platform-specific configuration file path
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vkav").map(|proj| proj.config_dir().join("settings.json"))
    }
}
