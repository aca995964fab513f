//! Application configuration loaded from `config.toml`.
//!
//! Every field has a default, so a partial file only overrides what it names.
//! A missing file is created with the defaults on first launch.

use crate::models::decal::Placement;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    /// JSON file backing the key-value store.
    pub storage_path: PathBuf,
    /// Opacity of decals other than the active one.
    pub inactive_decal_opacity: f32,
    /// Below this window width (logical px) the compact layout is used.
    pub compact_breakpoint: f32,
    pub window_width: f64,
    pub window_height: f64,
    /// Transform given to every new decal.
    pub placement: Placement,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("data/local_storage.json"),
            inactive_decal_opacity: 0.7,
            compact_breakpoint: 768.0,
            window_width: 1280.0,
            window_height: 800.0,
            placement: Placement::default(),
        }
    }
}

impl ConfiguratorConfig {
    /// Loads the configuration, falling back to defaults on any error.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                log::warn!("CONFIG: Could not write default config {:?}: {}", path, e);
            }
            return config;
        }

        match load_toml::<Self>(path) {
            Ok(config) => config.sanitized(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, content).map_err(|e| e.to_string())
    }

    fn sanitized(mut self) -> Self {
        self.inactive_decal_opacity = self.inactive_decal_opacity.clamp(0.0, 1.0);
        if self.compact_breakpoint < 0.0 {
            self.compact_breakpoint = 0.0;
        }
        self
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    match toml::from_str(&content) {
        Ok(data) => Ok(data),
        Err(e) => {
            log::error!("Failed to parse TOML file {:?}: {}", path, e);
            Err(e.to_string())
        }
    }
}
