//! Scene list serialization and autosave

use shared::SceneList;

use super::SceneStore;

impl SceneStore {
    /// Ordered `{id, name}` records of the current collection
    pub fn serialize(&self) -> SceneList {
        self.scenes.clone()
    }

    /// Serialized scene list as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.scenes)
    }

    /// Parse a scene list previously produced by `to_json`
    pub fn scenes_from_json(json: &str) -> serde_json::Result<SceneList> {
        serde_json::from_str(json)
    }

    /// Get autosave file path
    fn autosave_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "scene-editor", "scene-editor")
            .map(|dirs| dirs.data_dir().join("scenes_autosave.json"))
    }

    /// Save the scene list to the autosave file
    pub fn autosave(&self) {
        if let Some(path) = Self::autosave_path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match self.to_json() {
                Ok(json) => {
                    if let Err(e) = std::fs::write(&path, json) {
                        tracing::warn!("Autosave to {} failed: {e}", path.display());
                    }
                }
                Err(e) => tracing::warn!("Autosave serialization failed: {e}"),
            }
        }
    }

    /// Load the scene list from the autosave file
    pub fn load_autosave() -> Option<SceneList> {
        let path = Self::autosave_path()?;
        let json = std::fs::read_to_string(&path).ok()?;
        Self::scenes_from_json(&json).ok()
    }

    /// Check if autosave file exists
    pub fn has_autosave() -> bool {
        Self::autosave_path()
            .map(|p| p.exists())
            .unwrap_or(false)
    }
}
