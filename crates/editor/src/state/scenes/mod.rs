//! Scene collection state
//!
//! `SceneStore` owns the ordered scene list and the active-scene pointer.
//! Every command first updates the store's own state and only then notifies
//! the collaborators passed in through [`Bridges`](crate::bridge::Bridges),
//! so anything a bridge triggers sees a consistent collection.

mod clone_ops;
mod lifecycle;
pub mod naming;
mod ordering;
mod persistence;
mod selection;

pub use naming::next_default_name;

use shared::{ObjectId, Scene, SceneId, MAX_SCENES};

use crate::bridge::{IdGenerator, UuidGenerator};
use crate::error::CloneObjectFailure;
use crate::i18n::SceneLabels;
use crate::state::settings::EditorSettings;

/// Construction parameters for a `SceneStore`
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of scenes
    pub capacity: usize,
    pub labels: SceneLabels,
}

impl StoreConfig {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            capacity: settings.capacity(),
            labels: SceneLabels::for_lang(settings.language),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_SCENES,
            labels: SceneLabels::default(),
        }
    }
}

/// What `add` should insert
#[derive(Debug, Clone)]
pub enum NewScene {
    /// Fresh id, default name
    Auto,
    /// Fresh id, given name
    Named(String),
    /// Given id, default name
    WithId(SceneId),
    /// A complete scene record
    Existing(Scene),
}

/// Outcome of a selection request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Target was already active (or there is nothing to select)
    Unchanged,
    Switched { previous: Option<SceneId> },
    /// Text-mode sync failed; the failing object was re-selected instead
    Aborted { failed_object: ObjectId },
}

/// Structural change notifications, drained by the editor shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    Loaded { count: usize },
    Created { id: SceneId, index: usize },
    Removed { id: SceneId },
    Selected { previous: Option<SceneId>, current: SceneId },
    Moved { from: usize, to: usize },
    Renamed { id: SceneId, name: String },
    Cleared,
}

/// Result of cloning a scene
#[derive(Debug, Clone)]
pub struct CloneReport {
    pub scene: Scene,
    /// (source object, clone) pairs that succeeded
    pub cloned: Vec<(ObjectId, ObjectId)>,
    pub failures: Vec<CloneObjectFailure>,
}

/// Ordered, bounded scene collection with a single active scene
pub struct SceneStore {
    scenes: Vec<Scene>,
    active: Option<SceneId>,
    capacity: usize,
    labels: SceneLabels,
    ids: Box<dyn IdGenerator>,
    /// Scene active before a run started
    pre_run_snapshot: Option<SceneId>,
    events: Vec<SceneEvent>,
    /// Monotonically increasing version counter for cache invalidation
    version: u64,
}

impl SceneStore {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_id_generator(config, Box::new(UuidGenerator))
    }

    pub fn with_id_generator(config: StoreConfig, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            scenes: Vec::new(),
            active: None,
            capacity: config.capacity.max(1),
            labels: config.labels,
            ids,
            pre_run_snapshot: None,
            events: Vec::new(),
            version: 0,
        }
    }

    /// Scenes in tab order
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_at_capacity(&self) -> bool {
        self.scenes.len() >= self.capacity
    }

    pub fn active_id(&self) -> Option<&SceneId> {
        self.active.as_ref()
    }

    pub fn active_scene(&self) -> Option<&Scene> {
        self.active.as_deref().and_then(|id| self.get_by_id(id))
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.id == id)
    }

    /// Scene right after the active one
    pub fn next_scene(&self) -> Option<&Scene> {
        let index = self.index_of(self.active.as_deref()?)?;
        self.scenes.get(index + 1)
    }

    pub fn labels(&self) -> &SceneLabels {
        &self.labels
    }

    pub fn pre_run_snapshot(&self) -> Option<&SceneId> {
        self.pre_run_snapshot.as_ref()
    }

    /// Current version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    fn default_name(&self) -> String {
        next_default_name(
            self.scenes.iter().map(|s| s.name.as_str()),
            &self.labels.scene_base,
        )
    }

    /// Point the store at a new active scene. State only, no bridge calls.
    fn set_active(&mut self, id: SceneId) -> Option<SceneId> {
        let previous = self.active.replace(id.clone());
        self.events.push(SceneEvent::Selected {
            previous: previous.clone(),
            current: id,
        });
        self.version += 1;
        previous
    }
}
