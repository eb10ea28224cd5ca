//! Scene creation, removal, renaming and teardown

use std::collections::HashSet;

use shared::{truncate_name, Scene, SceneList};

use super::{NewScene, SceneEvent, SceneStore};
use crate::bridge::Bridges;
use crate::error::{SceneError, SceneResult};

impl SceneStore {
    /// Replace the collection with `scenes` and select the first one.
    ///
    /// An empty list yields a single default scene. Duplicate ids and
    /// anything beyond capacity are dropped with a warning.
    pub fn initialize(&mut self, bridges: &mut Bridges<'_>, scenes: SceneList) {
        if !self.scenes.is_empty() {
            self.clear(bridges);
        }

        let mut seen = HashSet::new();
        let mut loaded = Vec::with_capacity(scenes.len().min(self.capacity));
        for scene in scenes {
            if loaded.len() >= self.capacity {
                tracing::warn!("Dropping scene {}: limit of {} reached", scene.id, self.capacity);
                continue;
            }
            if !seen.insert(scene.id.clone()) {
                tracing::warn!("Dropping scene {}: duplicate id", scene.id);
                continue;
            }
            loaded.push(Scene::new(scene.id, &scene.name));
        }

        self.scenes = loaded;
        if self.scenes.is_empty() {
            let scene = Scene::new(self.ids.generate(), self.default_name());
            self.scenes.push(scene);
        }

        self.pre_run_snapshot = None;
        self.events.push(SceneEvent::Loaded {
            count: self.scenes.len(),
        });
        self.version += 1;

        let first = self.scenes[0].clone();
        self.set_active(first.id.clone());
        tracing::info!("Initialized {} scene(s)", self.scenes.len());

        for scene in &self.scenes {
            bridges.container.create_container_for(&scene.id);
            bridges.stage.create_render_container(scene);
        }
        self.apply_selection(bridges, &first);
    }

    /// Insert a scene (appended unless `index` is given) and make it active.
    ///
    /// In text mode pending edits are synced first; a parse error leaves
    /// the collection untouched and returns `TextSyncFailed`.
    pub fn add(
        &mut self,
        bridges: &mut Bridges<'_>,
        new: NewScene,
        index: Option<usize>,
    ) -> SceneResult<Scene> {
        let scene = self.prepare_scene(new)?;
        Self::sync_text(bridges, &scene.id)
            .map_err(|failed_object| SceneError::TextSyncFailed { failed_object })?;
        Ok(self.insert_scene(bridges, scene, index))
    }

    /// Build the record for a new scene, checking capacity and id uniqueness
    pub(super) fn prepare_scene(&mut self, new: NewScene) -> SceneResult<Scene> {
        if self.is_at_capacity() {
            tracing::warn!("Cannot add scene: limit of {} reached", self.capacity);
            return Err(SceneError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let scene = match new {
            NewScene::Auto => Scene::new(self.ids.generate(), self.default_name()),
            NewScene::Named(name) => Scene::new(self.ids.generate(), name),
            NewScene::WithId(id) => Scene::new(id, self.default_name()),
            NewScene::Existing(scene) => Scene::new(scene.id, &scene.name),
        };
        if self.get_by_id(&scene.id).is_some() {
            return Err(SceneError::DuplicateSceneId(scene.id));
        }
        Ok(scene)
    }

    pub(super) fn insert_scene(
        &mut self,
        bridges: &mut Bridges<'_>,
        scene: Scene,
        index: Option<usize>,
    ) -> Scene {
        let position = index.map_or(self.scenes.len(), |i| i.min(self.scenes.len()));
        self.scenes.insert(position, scene.clone());
        self.events.push(SceneEvent::Created {
            id: scene.id.clone(),
            index: position,
        });
        self.version += 1;
        self.set_active(scene.id.clone());
        tracing::info!("Added scene {} ({}) at {}", scene.id, scene.name, position);

        bridges.container.create_container_for(&scene.id);
        bridges.stage.create_render_container(&scene);
        self.apply_selection(bridges, &scene);
        scene
    }

    /// Delete a scene together with its objects and render container.
    ///
    /// Removing the active scene switches to the first remaining one, so in
    /// text mode pending edits are synced before anything is deleted.
    pub fn remove(&mut self, bridges: &mut Bridges<'_>, id: &str) -> SceneResult<Scene> {
        if self.scenes.len() <= 1 {
            tracing::warn!("Refusing to delete the last scene");
            return Err(SceneError::LastSceneUndeletable);
        }
        let index = self
            .index_of(id)
            .ok_or_else(|| SceneError::SceneNotFound(id.to_string()))?;

        let was_active = self.active.as_deref() == Some(id);
        if was_active {
            let fallback = if index == 0 { 1 } else { 0 };
            Self::sync_text(bridges, &self.scenes[fallback].id)
                .map_err(|failed_object| SceneError::TextSyncFailed { failed_object })?;
        }

        let removed = self.scenes.remove(index);
        self.events.push(SceneEvent::Removed {
            id: removed.id.clone(),
        });
        self.version += 1;

        let fallback = if was_active {
            let first = self.scenes[0].clone();
            self.set_active(first.id.clone());
            Some(first)
        } else {
            None
        };
        tracing::info!("Removed scene {} ({})", removed.id, removed.name);

        bridges.container.remove_container_objects(&removed.id);
        bridges.stage.remove_render_container(&removed);
        if let Some(first) = fallback {
            self.apply_selection(bridges, &first);
        }
        Ok(removed)
    }

    /// Change a scene's display name; returns the stored (truncated) name
    pub fn rename(&mut self, id: &str, name: &str) -> SceneResult<String> {
        let scene = self
            .scenes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SceneError::SceneNotFound(id.to_string()))?;

        let name = truncate_name(name);
        if scene.name != name {
            scene.name = name.clone();
            self.events.push(SceneEvent::Renamed {
                id: id.to_string(),
                name: name.clone(),
            });
            self.version += 1;
        }
        Ok(name)
    }

    /// Drop every scene (project teardown). Leaves the store uninitialized.
    pub fn clear(&mut self, bridges: &mut Bridges<'_>) {
        let removed = std::mem::take(&mut self.scenes);
        self.active = None;
        self.pre_run_snapshot = None;
        self.events.push(SceneEvent::Cleared);
        self.version += 1;
        tracing::info!("Cleared {} scene(s)", removed.len());

        for scene in &removed {
            bridges.stage.remove_render_container(scene);
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::Scene;

    use crate::bridge::SyncResult;
    use crate::error::SceneError;
    use crate::fixtures::scene_list;
    use crate::harness::{ContainerCall, SceneHarness, StageCall};
    use crate::state::scenes::{NewScene, SceneEvent};

    #[test]
    fn test_initialize_empty_creates_default() {
        let h = SceneHarness::new();
        assert_eq!(h.store.len(), 1);
        assert_eq!(h.store.scenes()[0].name, "Scene1");
        assert_eq!(h.active_id(), h.store.scenes()[0].id);
    }

    #[test]
    fn test_initialize_with_list() {
        let h = SceneHarness::with_scenes(scene_list(&["Intro", "Level"]));
        assert_eq!(h.store.len(), 2);
        assert_eq!(h.active_id(), "s1");
        assert_eq!(h.stage.containers, vec!["s1".to_string(), "s2".to_string()]);
    }

    #[test]
    fn test_initialize_drops_duplicates_and_overflow() {
        let mut scenes = vec![Scene::new("a", "A"), Scene::new("a", "Again")];
        for i in 0..25 {
            scenes.push(Scene::new(format!("x{i}"), "X"));
        }
        let h = SceneHarness::with_scenes(scenes);
        assert_eq!(h.store.len(), 20);
        assert_eq!(h.store.scenes()[0].name, "A");
        assert_eq!(h.store.scenes()[1].id, "x0");
    }

    #[test]
    fn test_reinitialize_tears_down_previous() {
        let mut h = SceneHarness::new();
        let old = h.active_id();
        h.load(scene_list(&["Fresh"]));
        assert_eq!(h.store.len(), 1);
        assert!(h.stage.calls.contains(&StageCall::RemoveContainer(old)));
        assert_eq!(h.stage.containers, vec!["s1".to_string()]);
    }

    #[test]
    fn test_add_three_auto_names() {
        let mut h = SceneHarness::new();
        h.add_scene().unwrap();
        let third = h.add_scene().unwrap();
        let names: Vec<_> = h.store.scenes().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Scene1", "Scene2", "Scene3"]);
        assert_eq!(h.active_id(), third.id);
    }

    #[test]
    fn test_add_at_index_and_named() {
        let mut h = SceneHarness::new();
        let scene = h.add(NewScene::Named("Title screen".into()), Some(0)).unwrap();
        assert_eq!(scene.name, "Title scre");
        assert_eq!(h.store.scenes()[0].id, scene.id);

        // past the end appends
        let last = h.add(NewScene::Auto, Some(99)).unwrap();
        assert_eq!(h.store.scenes().last().unwrap().id, last.id);
    }

    #[test]
    fn test_add_registers_containers_and_event() {
        let mut h = SceneHarness::new();
        h.store.drain_events();
        let scene = h.add(NewScene::WithId("fixed".into()), None).unwrap();
        assert_eq!(scene.id, "fixed");
        assert!(h.container.has_container("fixed"));
        assert!(h.stage.containers.contains(&"fixed".to_string()));
        let events = h.store.drain_events();
        assert_eq!(
            events[0],
            SceneEvent::Created {
                id: "fixed".into(),
                index: 1
            }
        );
    }

    #[test]
    fn test_add_duplicate_id_rejected() {
        let mut h = SceneHarness::with_scenes(scene_list(&["A"]));
        let err = h.add(NewScene::WithId("s1".into()), None).unwrap_err();
        assert_eq!(err, SceneError::DuplicateSceneId("s1".into()));
        assert_eq!(h.store.len(), 1);
    }

    #[test]
    fn test_add_at_capacity() {
        let mut h = SceneHarness::new();
        for _ in 1..20 {
            h.add_scene().unwrap();
        }
        assert!(h.store.is_at_capacity());
        let version = h.store.version();
        assert_eq!(
            h.add_scene().unwrap_err(),
            SceneError::CapacityExceeded { capacity: 20 }
        );
        assert_eq!(h.store.len(), 20);
        assert_eq!(h.store.version(), version);
    }

    #[test]
    fn test_add_syncs_text_first() {
        let mut h = SceneHarness::new();
        h.enable_text_mode();
        h.add_scene().unwrap();
        assert_eq!(h.text.as_ref().unwrap().syncs, 1);
    }

    #[test]
    fn test_add_aborted_by_text_error() {
        let mut h = SceneHarness::new();
        let first = h.active_id();
        h.add_object(&first, "dog");
        h.enable_text_mode();
        h.text.as_mut().unwrap().next_result = SyncResult::Error {
            failed_object: "dog".to_string(),
        };
        let version = h.store.version();
        let stage_calls = h.stage.calls.len();

        assert_eq!(
            h.add_scene().unwrap_err(),
            SceneError::TextSyncFailed {
                failed_object: "dog".to_string()
            }
        );
        assert_eq!(h.store.len(), 1);
        assert_eq!(h.active_id(), first);
        assert_eq!(h.store.version(), version);
        assert_eq!(h.stage.calls.len(), stage_calls);
        assert_eq!(h.text.as_ref().unwrap().clears, 0);
        assert_eq!(
            h.container.calls.last(),
            Some(&ContainerCall::SelectObject("dog".to_string()))
        );
    }

    #[test]
    fn test_remove_active_aborted_by_text_error() {
        let mut h = SceneHarness::with_scenes(scene_list(&["A", "B"]));
        h.select(Some("s2")).unwrap();
        h.add_object("s2", "bad");
        h.enable_text_mode();
        h.text.as_mut().unwrap().next_result = SyncResult::Error {
            failed_object: "bad".to_string(),
        };

        assert!(matches!(
            h.remove_scene("s2"),
            Err(SceneError::TextSyncFailed { .. })
        ));
        assert_eq!(h.store.len(), 2);
        assert_eq!(h.active_id(), "s2");
        assert_eq!(h.container.objects_of("s2").len(), 1);

        // removing a scene that is not active needs no sync
        h.remove_scene("s1").unwrap();
        assert_eq!(h.text.as_ref().unwrap().syncs, 1);
    }

    #[test]
    fn test_remove_last_scene_rejected() {
        let mut h = SceneHarness::new();
        let id = h.active_id();
        assert_eq!(h.remove_scene(&id).unwrap_err(), SceneError::LastSceneUndeletable);
        assert_eq!(h.store.len(), 1);
    }

    #[test]
    fn test_remove_active_falls_back_to_first() {
        let mut h = SceneHarness::with_scenes(scene_list(&["A", "B", "C"]));
        h.select(Some("s3")).unwrap();
        h.add_object("s3", "obj");

        let removed = h.remove_scene("s3").unwrap();
        assert_eq!(removed.name, "C");
        assert_eq!(h.active_id(), "s1");
        assert!(h.container.objects_of("s3").is_empty());
        assert!(!h.stage.containers.contains(&"s3".to_string()));
    }

    #[test]
    fn test_remove_inactive_keeps_selection() {
        let mut h = SceneHarness::with_scenes(scene_list(&["A", "B", "C"]));
        h.select(Some("s2")).unwrap();
        h.remove_scene("s3").unwrap();
        assert_eq!(h.active_id(), "s2");
    }

    #[test]
    fn test_remove_unknown() {
        let mut h = SceneHarness::with_scenes(scene_list(&["A", "B"]));
        assert_eq!(
            h.remove_scene("nope").unwrap_err(),
            SceneError::SceneNotFound("nope".into())
        );
    }

    #[test]
    fn test_rename_truncates() {
        let mut h = SceneHarness::new();
        let id = h.active_id();
        let name = h.store.rename(&id, "A much longer name").unwrap();
        assert_eq!(name, "A much lon");
        assert_eq!(h.store.get_by_id(&id).unwrap().name, "A much lon");
        assert!(h.store.rename("missing", "x").is_err());
    }

    #[test]
    fn test_clear() {
        let mut h = SceneHarness::with_scenes(scene_list(&["A", "B"]));
        h.clear();
        assert!(h.store.is_empty());
        assert!(h.store.active_id().is_none());
        assert!(h.stage.containers.is_empty());
    }
}
