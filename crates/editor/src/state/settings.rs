//! Editor settings

use serde::{Deserialize, Serialize};
use shared::MAX_SCENES;

use crate::i18n::Lang;

fn default_capacity() -> usize {
    MAX_SCENES
}

fn default_autosave() -> bool {
    true
}

/// All editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Interface language (also drives default scene names)
    #[serde(default)]
    pub language: Lang,
    /// Maximum number of scenes per project
    #[serde(default = "default_capacity")]
    pub scene_capacity: usize,
    /// Write the scene list to the autosave file after each session
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            language: Lang::default(),
            scene_capacity: default_capacity(),
            autosave: default_autosave(),
        }
    }
}

impl EditorSettings {
    /// Scene capacity clamped to `1..=MAX_SCENES`
    pub fn capacity(&self) -> usize {
        self.scene_capacity.clamp(1, MAX_SCENES)
    }

    /// Load settings from file. On first run the defaults are written out
    /// so they can be edited by hand.
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "scene-editor", "scene-editor") {
            let config_path = dirs.config_dir().join("settings.json");
            match std::fs::read_to_string(&config_path) {
                Ok(json) => match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring invalid settings file: {e}"),
                },
                Err(_) => {
                    let settings = Self::default();
                    settings.save();
                    tracing::info!("Wrote default settings to {}", config_path.display());
                    return settings;
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "scene-editor", "scene-editor") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }
}
