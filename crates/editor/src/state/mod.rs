pub mod scenes;
pub mod settings;

pub use scenes::{
    next_default_name, CloneReport, NewScene, SceneEvent, SceneStore, SelectOutcome, StoreConfig,
};
pub use settings::EditorSettings;
