//! Collaborator interfaces the scene store drives.
//!
//! The store owns the scene list; everything else (objects, stage, playground,
//! text editor) lives behind these traits and only receives notifications.
//! Bridges are borrowed for the duration of a single command through
//! [`Bridges`], so they have no way to call back into the store while it is
//! mutating.

use std::sync::atomic::{AtomicU64, Ordering};

use shared::{ObjectId, Scene, SceneId};

use crate::error::CloneObjectFailure;

/// Produces unique scene identifiers
pub trait IdGenerator {
    fn generate(&self) -> SceneId;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> SceneId {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic ids (`prefix1`, `prefix2`, ...) for tests and replays
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> SceneId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

/// Subsystem holding the drawable objects of every scene
pub trait ObjectContainerBridge {
    /// Register an (empty) object container for a new scene
    fn create_container_for(&mut self, scene_id: &SceneId);
    /// Remove every object belonging to a scene
    fn remove_container_objects(&mut self, scene_id: &SceneId);
    /// Recompute the "current objects" view for the given scene
    fn set_current_objects(&mut self, scene_id: &SceneId);
    /// Objects of the current scene, in display order
    fn current_objects(&self) -> Vec<ObjectId>;
    /// Objects of an arbitrary scene, in display order
    fn scene_objects(&self, scene_id: &SceneId) -> Vec<ObjectId>;
    /// Deep-clone an object into another scene, returning the clone's id
    fn clone_object(
        &mut self,
        object_id: &ObjectId,
        target_scene: &SceneId,
    ) -> Result<ObjectId, CloneObjectFailure>;
    /// Retarget references inside cloned objects (`old_ids[i]` → `new_ids[i]`)
    fn adjust_references(&mut self, old_ids: &[ObjectId], new_ids: &[ObjectId]);
    /// Recompute global object order from scene order
    fn update_objects_order(&mut self);
    /// Make an object the selected one
    fn select_object(&mut self, object_id: &ObjectId);
    /// Drop any scene override installed while a program is running
    fn reset_scene_during_run(&mut self);
    /// Whether an external object list widget keeps z-order itself
    fn has_list_view(&self) -> bool {
        false
    }
}

/// Rendering subsystem: one render container per scene
pub trait StageBridge {
    fn create_render_container(&mut self, scene: &Scene);
    fn remove_render_container(&mut self, scene: &Scene);
    fn select_render_container(&mut self, scene: &Scene);
    fn select_object(&mut self, object_id: Option<&ObjectId>);
    fn sort_z_order(&mut self);
}

/// Playground: shows the selected object of the active scene
pub trait PlaygroundBridge {
    fn refresh(&mut self);
    fn flush(&mut self);
    /// Refresh the global variable/list display
    fn update_variables(&mut self);
}

/// Result of flushing pending text-mode edits into the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResult {
    Ok,
    Error { failed_object: ObjectId },
}

/// Text-mode editor. Only present while the editor is in text mode.
pub trait TextSync {
    /// Push unsaved text edits into the model
    fn sync(&mut self) -> SyncResult;
    /// Clear the text board
    fn clear(&mut self);
}

/// Collaborators borrowed for one store command.
pub struct Bridges<'a> {
    pub container: &'a mut dyn ObjectContainerBridge,
    pub stage: &'a mut dyn StageBridge,
    pub playground: &'a mut dyn PlaygroundBridge,
    pub text_sync: Option<&'a mut dyn TextSync>,
}

impl<'a> Bridges<'a> {
    pub fn new(
        container: &'a mut dyn ObjectContainerBridge,
        stage: &'a mut dyn StageBridge,
        playground: &'a mut dyn PlaygroundBridge,
    ) -> Self {
        Self {
            container,
            stage,
            playground,
            text_sync: None,
        }
    }

    pub fn with_text_sync(mut self, text_sync: &'a mut dyn TextSync) -> Self {
        self.text_sync = Some(text_sync);
        self
    }
}
