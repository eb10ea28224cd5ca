//! Headless harness for programmatic scene manipulation.
//!
//! Provides in-memory implementations of every collaborator the scene store
//! talks to, and `SceneHarness`, which wires them to a store. Used by the
//! command protocol, the CLI and the tests.

use std::collections::HashSet;

use shared::{ObjectId, Scene, SceneId, SceneList};

use crate::bridge::{
    Bridges, ObjectContainerBridge, PlaygroundBridge, SequentialIds, StageBridge, SyncResult,
    TextSync,
};
use crate::error::{CloneObjectFailure, SceneResult};
use crate::i18n::Lang;
use crate::state::scenes::{CloneReport, NewScene, SceneStore, SelectOutcome, StoreConfig};

// ── Object container ──────────────────────────────────────

/// Calls recorded by `MemoryContainer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerCall {
    CreateContainer(SceneId),
    RemoveObjects(SceneId),
    SetCurrentObjects(SceneId),
    CloneObject { object: ObjectId, target: SceneId },
    AdjustReferences { old: Vec<ObjectId>, new: Vec<ObjectId> },
    UpdateObjectsOrder,
    SelectObject(ObjectId),
    ResetSceneDuringRun,
}

/// A drawable object owned by one scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObject {
    pub id: ObjectId,
    pub scene_id: SceneId,
    pub name: String,
    /// Objects this one points at (e.g. "go to object" blocks)
    pub references: Vec<ObjectId>,
}

/// Object container kept in a flat list, newest clones first
#[derive(Debug, Default)]
pub struct MemoryContainer {
    objects: Vec<MemoryObject>,
    containers: Vec<SceneId>,
    current_scene: Option<SceneId>,
    selected: Option<ObjectId>,
    next_clone: u64,
    /// Objects whose cloning should fail
    pub fail_clone_of: HashSet<ObjectId>,
    /// Pretend an external object list widget is attached
    pub list_view: bool,
    pub calls: Vec<ContainerCall>,
}

impl MemoryContainer {
    /// Add an object to a scene; the id doubles as its name
    pub fn add_object(&mut self, scene_id: &str, object_id: &str) -> ObjectId {
        self.objects.push(MemoryObject {
            id: object_id.to_string(),
            scene_id: scene_id.to_string(),
            name: object_id.to_string(),
            references: Vec::new(),
        });
        object_id.to_string()
    }

    /// Make `from` reference `to`
    pub fn link(&mut self, from: &str, to: &str) {
        if let Some(object) = self.objects.iter_mut().find(|o| o.id == from) {
            object.references.push(to.to_string());
        }
    }

    pub fn objects_of(&self, scene_id: &str) -> Vec<MemoryObject> {
        self.objects
            .iter()
            .filter(|o| o.scene_id == scene_id)
            .cloned()
            .collect()
    }

    pub fn has_container(&self, scene_id: &str) -> bool {
        self.containers.iter().any(|c| c == scene_id)
    }

    pub fn current_scene(&self) -> Option<&str> {
        self.current_scene.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

impl ObjectContainerBridge for MemoryContainer {
    fn create_container_for(&mut self, scene_id: &SceneId) {
        self.containers.push(scene_id.clone());
        self.calls.push(ContainerCall::CreateContainer(scene_id.clone()));
    }

    fn remove_container_objects(&mut self, scene_id: &SceneId) {
        self.objects.retain(|o| &o.scene_id != scene_id);
        self.containers.retain(|c| c != scene_id);
        if self.current_scene.as_ref() == Some(scene_id) {
            self.current_scene = None;
        }
        if let Some(selected) = &self.selected {
            if !self.objects.iter().any(|o| &o.id == selected) {
                self.selected = None;
            }
        }
        self.calls.push(ContainerCall::RemoveObjects(scene_id.clone()));
    }

    fn set_current_objects(&mut self, scene_id: &SceneId) {
        self.current_scene = Some(scene_id.clone());
        self.calls.push(ContainerCall::SetCurrentObjects(scene_id.clone()));
    }

    fn current_objects(&self) -> Vec<ObjectId> {
        match &self.current_scene {
            Some(scene_id) => self.scene_objects(scene_id),
            None => Vec::new(),
        }
    }

    fn scene_objects(&self, scene_id: &SceneId) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| &o.scene_id == scene_id)
            .map(|o| o.id.clone())
            .collect()
    }

    fn clone_object(
        &mut self,
        object_id: &ObjectId,
        target_scene: &SceneId,
    ) -> Result<ObjectId, CloneObjectFailure> {
        self.calls.push(ContainerCall::CloneObject {
            object: object_id.clone(),
            target: target_scene.clone(),
        });
        if self.fail_clone_of.contains(object_id) {
            return Err(CloneObjectFailure {
                object_id: object_id.clone(),
                reason: "clone rejected".to_string(),
            });
        }
        let original = self
            .objects
            .iter()
            .find(|o| &o.id == object_id)
            .cloned()
            .ok_or_else(|| CloneObjectFailure {
                object_id: object_id.clone(),
                reason: "unknown object".to_string(),
            })?;

        self.next_clone += 1;
        let clone = MemoryObject {
            id: format!("{}#{}", original.id, self.next_clone),
            scene_id: target_scene.clone(),
            ..original
        };
        let id = clone.id.clone();
        self.objects.insert(0, clone);
        Ok(id)
    }

    fn adjust_references(&mut self, old_ids: &[ObjectId], new_ids: &[ObjectId]) {
        for object in self.objects.iter_mut().filter(|o| new_ids.contains(&o.id)) {
            for reference in &mut object.references {
                if let Some(pos) = old_ids.iter().position(|old| old == reference) {
                    *reference = new_ids[pos].clone();
                }
            }
        }
        self.calls.push(ContainerCall::AdjustReferences {
            old: old_ids.to_vec(),
            new: new_ids.to_vec(),
        });
    }

    fn update_objects_order(&mut self) {
        self.calls.push(ContainerCall::UpdateObjectsOrder);
    }

    fn select_object(&mut self, object_id: &ObjectId) {
        self.selected = Some(object_id.clone());
        self.calls.push(ContainerCall::SelectObject(object_id.clone()));
    }

    fn reset_scene_during_run(&mut self) {
        self.calls.push(ContainerCall::ResetSceneDuringRun);
    }

    fn has_list_view(&self) -> bool {
        self.list_view
    }
}

// ── Stage ─────────────────────────────────────────────────

/// Calls recorded by `MemoryStage`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageCall {
    CreateContainer(SceneId),
    RemoveContainer(SceneId),
    SelectContainer(SceneId),
    SelectObject(Option<ObjectId>),
    SortZOrder,
}

#[derive(Debug, Default)]
pub struct MemoryStage {
    /// Live render containers, in creation order
    pub containers: Vec<SceneId>,
    pub focused: Option<SceneId>,
    pub selected_object: Option<ObjectId>,
    pub calls: Vec<StageCall>,
}

impl StageBridge for MemoryStage {
    fn create_render_container(&mut self, scene: &Scene) {
        self.containers.push(scene.id.clone());
        self.calls.push(StageCall::CreateContainer(scene.id.clone()));
    }

    fn remove_render_container(&mut self, scene: &Scene) {
        self.containers.retain(|c| c != &scene.id);
        if self.focused.as_ref() == Some(&scene.id) {
            self.focused = None;
        }
        self.calls.push(StageCall::RemoveContainer(scene.id.clone()));
    }

    fn select_render_container(&mut self, scene: &Scene) {
        self.focused = Some(scene.id.clone());
        self.calls.push(StageCall::SelectContainer(scene.id.clone()));
    }

    fn select_object(&mut self, object_id: Option<&ObjectId>) {
        self.selected_object = object_id.cloned();
        self.calls.push(StageCall::SelectObject(object_id.cloned()));
    }

    fn sort_z_order(&mut self) {
        self.calls.push(StageCall::SortZOrder);
    }
}

// ── Playground / text mode ────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryPlayground {
    pub refreshes: usize,
    pub flushes: usize,
    pub variable_updates: usize,
}

impl PlaygroundBridge for MemoryPlayground {
    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }

    fn update_variables(&mut self) {
        self.variable_updates += 1;
    }
}

/// Text board whose next sync result is scripted by the caller
#[derive(Debug)]
pub struct MemoryText {
    pub next_result: SyncResult,
    pub syncs: usize,
    pub clears: usize,
}

impl Default for MemoryText {
    fn default() -> Self {
        Self {
            next_result: SyncResult::Ok,
            syncs: 0,
            clears: 0,
        }
    }
}

impl TextSync for MemoryText {
    fn sync(&mut self) -> SyncResult {
        self.syncs += 1;
        self.next_result.clone()
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

// ── Harness ───────────────────────────────────────────────

/// Headless editor — scene store plus in-memory collaborators
pub struct SceneHarness {
    pub store: SceneStore,
    pub container: MemoryContainer,
    pub stage: MemoryStage,
    pub playground: MemoryPlayground,
    /// Present while the editor is in text mode
    pub text: Option<MemoryText>,
    lang: Lang,
}

impl SceneHarness {
    /// Harness with a single default scene and deterministic ids
    pub fn new() -> Self {
        Self::with_scenes(Vec::new())
    }

    /// Harness initialized from a serialized scene list
    pub fn with_scenes(scenes: SceneList) -> Self {
        let store = SceneStore::with_id_generator(
            StoreConfig::default(),
            Box::new(SequentialIds::new("scene")),
        );
        Self::with_store(store, Lang::En, scenes)
    }

    /// Harness around a preconfigured (uninitialized) store
    pub fn with_store(store: SceneStore, lang: Lang, scenes: SceneList) -> Self {
        let mut harness = Self {
            store,
            container: MemoryContainer::default(),
            stage: MemoryStage::default(),
            playground: MemoryPlayground::default(),
            text: None,
            lang,
        };
        harness.load(scenes);
        harness
    }

    /// Language used for user-facing notices
    pub fn lang(&self) -> Lang {
        self.lang
    }

    fn with_bridges<R>(&mut self, f: impl FnOnce(&mut SceneStore, &mut Bridges<'_>) -> R) -> R {
        let Self {
            store,
            container,
            stage,
            playground,
            text,
            ..
        } = self;
        let mut bridges = Bridges::new(container, stage, playground);
        if let Some(text) = text.as_mut() {
            bridges = bridges.with_text_sync(text);
        }
        f(store, &mut bridges)
    }

    // ── Scene commands ────────────────────────────────────────

    /// Replace all scenes (project load)
    pub fn load(&mut self, scenes: SceneList) {
        self.with_bridges(|store, bridges| store.initialize(bridges, scenes));
    }

    /// Append an auto-named scene
    pub fn add_scene(&mut self) -> SceneResult<Scene> {
        self.add(NewScene::Auto, None)
    }

    pub fn add(&mut self, new: NewScene, index: Option<usize>) -> SceneResult<Scene> {
        self.with_bridges(|store, bridges| store.add(bridges, new, index))
    }

    pub fn remove_scene(&mut self, id: &str) -> SceneResult<Scene> {
        self.with_bridges(|store, bridges| store.remove(bridges, id))
    }

    pub fn select(&mut self, id: Option<&str>) -> SceneResult<SelectOutcome> {
        self.with_bridges(|store, bridges| store.select(bridges, id))
    }

    pub fn rename(&mut self, id: &str, name: &str) -> SceneResult<String> {
        self.store.rename(id, name)
    }

    pub fn move_scene(&mut self, from: usize, to: usize) -> SceneResult<()> {
        self.with_bridges(|store, bridges| store.move_scene(bridges, from, to))
    }

    pub fn clone_scene(&mut self, id: &str) -> SceneResult<CloneReport> {
        self.with_bridges(|store, bridges| store.clone_scene(bridges, id))
    }

    /// Program started: remember the active scene
    pub fn start_run(&mut self) {
        self.store.snapshot_active_scene();
    }

    /// Program stopped: go back to the scene active before the run
    pub fn stop_run(&mut self) -> SceneResult<SelectOutcome> {
        self.with_bridges(|store, bridges| store.restore_snapshot(bridges))
    }

    /// Drop every scene
    pub fn clear(&mut self) {
        self.with_bridges(|store, bridges| store.clear(bridges));
    }

    // ── Objects / modes ───────────────────────────────────────

    pub fn add_object(&mut self, scene_id: &str, object_id: &str) -> ObjectId {
        self.container.add_object(scene_id, object_id)
    }

    pub fn link_objects(&mut self, from: &str, to: &str) {
        self.container.link(from, to);
    }

    /// Attach a text board (text coding mode)
    pub fn enable_text_mode(&mut self) {
        self.text = Some(MemoryText::default());
    }

    /// Back to block mode; scene switches no longer sync text
    pub fn disable_text_mode(&mut self) {
        self.text = None;
    }

    // ── Inspection ────────────────────────────────────────────

    /// Active scene id, or empty when the store is cleared
    pub fn active_id(&self) -> SceneId {
        self.store.active_id().cloned().unwrap_or_default()
    }

    pub fn scene_count(&self) -> usize {
        self.store.len()
    }

    /// Total number of collaborator notifications so far
    pub fn total_calls(&self) -> usize {
        let text = self
            .text
            .as_ref()
            .map(|t| t.syncs + t.clears)
            .unwrap_or(0);
        self.container.calls.len()
            + self.stage.calls.len()
            + self.playground.refreshes
            + self.playground.flushes
            + self.playground.variable_updates
            + text
    }
}

impl Default for SceneHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_has_one_scene() {
        let h = SceneHarness::new();
        assert_eq!(h.scene_count(), 1);
        assert_eq!(h.active_id(), "scene1");
        assert_eq!(h.stage.focused.as_deref(), Some("scene1"));
    }

    #[test]
    fn test_list_view_skips_z_sort() {
        let mut h = SceneHarness::new();
        h.container.list_view = true;
        h.stage.calls.clear();
        h.add_scene().unwrap();
        assert!(!h.stage.calls.contains(&StageCall::SortZOrder));

        h.container.list_view = false;
        let first = h.store.scenes()[0].id.clone();
        h.select(Some(first.as_str())).unwrap();
        assert_eq!(h.stage.calls.last(), Some(&StageCall::SortZOrder));
    }

    #[test]
    fn test_selection_effect_order() {
        let mut h = SceneHarness::new();
        let first = h.active_id();
        h.add_object(&first, "cat");
        h.add_scene().unwrap();
        h.container.calls.clear();

        h.select(Some(first.as_str())).unwrap();
        assert_eq!(
            h.container.calls,
            vec![
                ContainerCall::ResetSceneDuringRun,
                ContainerCall::SetCurrentObjects(first.clone()),
                ContainerCall::SelectObject("cat".to_string()),
            ]
        );
    }

    #[test]
    fn test_block_mode_skips_text_sync() {
        let mut h = SceneHarness::new();
        h.enable_text_mode();
        h.text.as_mut().unwrap().next_result = SyncResult::Error {
            failed_object: "x".to_string(),
        };
        assert!(h.add_scene().is_err());

        h.disable_text_mode();
        assert!(h.text.is_none());
        h.add_scene().unwrap();
        assert_eq!(h.scene_count(), 2);
    }

    #[test]
    fn test_remove_container_objects_clears_selection() {
        let mut c = MemoryContainer::default();
        c.add_object("a", "o1");
        c.select_object(&"o1".to_string());
        c.remove_container_objects(&"a".to_string());
        assert!(c.selected().is_none());
        assert!(c.objects_of("a").is_empty());
    }
}
