//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, lighting, model placement, star field,
//! audio, asset paths, keybindings) are consolidated here. Every section
//! uses `#[serde(default)]`, so a file that only overrides `[stars]` is
//! valid.

mod assets;
mod audio;
mod camera;
mod keybindings;
mod lighting;
mod model;
mod stars;

use std::path::Path;

pub use assets::AssetOptions;
pub use audio::AudioOptions;
pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use model::ModelOptions;
use serde::{Deserialize, Serialize};
pub use stars::StarOptions;

use crate::error::ViewerError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Model and music file locations.
    pub assets: AssetOptions,
    /// Camera projection and orbit controls.
    pub camera: CameraOptions,
    /// Lights and background.
    pub lighting: LightingOptions,
    /// Model placement and input sensitivity.
    pub model: ModelOptions,
    /// Star field generation and motion.
    pub stars: StarOptions,
    /// Background music behavior.
    pub audio: AudioOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] for malformed TOML or values
    /// rejected by [`validate`](Self::validate).
    pub fn from_toml(content: &str) -> Result<Self, ViewerError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ViewerError> {
        self.stars.validate()
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
