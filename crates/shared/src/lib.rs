use serde::{Deserialize, Serialize};

/// Уникальный идентификатор сцены
pub type SceneId = String;

/// Уникальный идентификатор объекта внутри сцены
pub type ObjectId = String;

/// Максимальная длина имени сцены (в символах)
pub const SCENE_NAME_MAX_LEN: usize = 10;

/// Максимальное количество сцен в проекте
pub const MAX_SCENES: usize = 20;

/// Сцена: отдельное рабочее пространство редактора.
///
/// Хранит только идентификатор и отображаемое имя. Представление (вкладка,
/// поле ввода) живёт в слое UI и ссылается на сцену по `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
}

impl Scene {
    /// Создать сцену; имя обрезается до `SCENE_NAME_MAX_LEN` символов
    pub fn new(id: impl Into<SceneId>, name: impl AsRef<str>) -> Self {
        Self {
            id: id.into(),
            name: truncate_name(name.as_ref()),
        }
    }
}

/// Обрезать имя до `SCENE_NAME_MAX_LEN` символов (не байт)
pub fn truncate_name(name: &str) -> String {
    name.chars().take(SCENE_NAME_MAX_LEN).collect()
}

/// Сериализованный список сцен проекта (порядок значим)
pub type SceneList = Vec<Scene>;
