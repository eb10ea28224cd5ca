use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lang {
    Ru,
    #[default]
    En,
}

/// Translate a key to an explicit language.
pub fn tr(lang: Lang, key: &str) -> &'static str {
    let ru = lang == Lang::Ru;
    match key {
        // ── Scene labels ────────────────────────────────────
        "scene.base_name" => if ru { "Сцена" } else { "Scene" },
        "scene.clone_prefix" => if ru { "Копия " } else { "Copy of " },

        // ── Notices ─────────────────────────────────────────
        "msg.scene_delete_error" => if ru {
            "Нельзя удалить единственную сцену"
        } else {
            "The last scene cannot be deleted"
        },
        "msg.scene_add_error" => if ru {
            "Достигнуто максимальное количество сцен"
        } else {
            "The maximum number of scenes has been reached"
        },
        "msg.scene_not_found" => if ru { "Сцена не найдена" } else { "Scene not found" },
        "msg.scene_duplicate_id" => if ru {
            "Сцена с таким идентификатором уже существует"
        } else {
            "A scene with this id already exists"
        },
        "msg.invalid_index" => if ru { "Неверная позиция сцены" } else { "Invalid scene position" },
        "msg.text_sync_error" => if ru {
            "Исправьте ошибку в коде перед сменой сцены"
        } else {
            "Fix the code error before switching scenes"
        },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

/// Localized labels used when naming new scenes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneLabels {
    /// Base of default names (`Scene` → `Scene1`, `Scene2`, ...)
    pub scene_base: String,
    /// Prefix of cloned scene names
    pub clone_prefix: String,
}

impl SceneLabels {
    pub fn for_lang(lang: Lang) -> Self {
        Self {
            scene_base: tr(lang, "scene.base_name").to_string(),
            clone_prefix: tr(lang, "scene.clone_prefix").to_string(),
        }
    }
}

impl Default for SceneLabels {
    fn default() -> Self {
        Self::for_lang(Lang::En)
    }
}
