//! Scene duplication

use shared::Scene;

use super::{CloneReport, NewScene, SceneStore};
use crate::bridge::Bridges;
use crate::error::{SceneError, SceneResult};

impl SceneStore {
    /// Duplicate a scene and all of its objects.
    ///
    /// The copy is appended and becomes active. In text mode pending edits
    /// are synced first, and a parse error aborts before anything is created.
    /// Object cloning is best effort: objects that fail are logged and
    /// reported, and the new scene stays in place either way.
    pub fn clone_scene(&mut self, bridges: &mut Bridges<'_>, source_id: &str) -> SceneResult<CloneReport> {
        if self.is_at_capacity() {
            tracing::warn!("Cannot duplicate scene: limit of {} reached", self.capacity);
            return Err(SceneError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let source = self
            .get_by_id(source_id)
            .cloned()
            .ok_or_else(|| SceneError::SceneNotFound(source_id.to_string()))?;

        let name = format!("{}{}", self.labels.clone_prefix, source.name);
        let copy = Scene::new(self.ids.generate(), name);
        let copy = self.prepare_scene(NewScene::Existing(copy))?;
        Self::sync_text(bridges, &copy.id)
            .map_err(|failed_object| SceneError::TextSyncFailed { failed_object })?;
        let scene = self.insert_scene(bridges, copy, None);

        // Reverse order keeps relative ordering under point insertion
        let objects = bridges.container.scene_objects(&source.id);
        let mut old_ids = Vec::with_capacity(objects.len());
        let mut new_ids = Vec::with_capacity(objects.len());
        let mut failures = Vec::new();
        for object_id in objects.iter().rev() {
            match bridges.container.clone_object(object_id, &scene.id) {
                Ok(new_id) => {
                    old_ids.push(object_id.clone());
                    new_ids.push(new_id);
                }
                Err(failure) => {
                    tracing::warn!("Scene clone {}: {}", scene.id, failure);
                    failures.push(failure);
                }
            }
        }

        if !new_ids.is_empty() {
            bridges.container.adjust_references(&old_ids, &new_ids);
        }
        bridges.container.set_current_objects(&scene.id);
        bridges.container.update_objects_order();
        if let Some(last) = new_ids.last() {
            bridges.container.select_object(last);
            bridges.playground.refresh();
        }
        bridges.playground.update_variables();

        tracing::info!(
            "Duplicated scene {} as {} ({}) with {} object(s), {} failed",
            source.id,
            scene.id,
            scene.name,
            new_ids.len(),
            failures.len()
        );

        Ok(CloneReport {
            scene,
            cloned: old_ids.into_iter().zip(new_ids).collect(),
            failures,
        })
    }
}
