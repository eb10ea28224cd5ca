//! Active scene switching and run snapshots

use shared::{ObjectId, Scene};

use super::{SceneStore, SelectOutcome};
use crate::bridge::{Bridges, SyncResult};
use crate::error::{SceneError, SceneResult};

impl SceneStore {
    /// Make a scene active. `None` selects the first scene.
    ///
    /// Selecting the already active scene does nothing. In text mode pending
    /// edits are synced first; if that fails the switch is abandoned and the
    /// object that failed to parse is re-selected.
    pub fn select(
        &mut self,
        bridges: &mut Bridges<'_>,
        target: Option<&str>,
    ) -> SceneResult<SelectOutcome> {
        let scene = match target {
            Some(id) => self
                .get_by_id(id)
                .cloned()
                .ok_or_else(|| SceneError::SceneNotFound(id.to_string()))?,
            None => match self.scenes.first() {
                Some(scene) => scene.clone(),
                None => return Ok(SelectOutcome::Unchanged),
            },
        };

        if self.active.as_deref() == Some(scene.id.as_str()) {
            return Ok(SelectOutcome::Unchanged);
        }

        if let Err(failed_object) = Self::sync_text(bridges, &scene.id) {
            return Ok(SelectOutcome::Aborted { failed_object });
        }

        let previous = self.set_active(scene.id.clone());
        tracing::debug!("Selected scene {} ({})", scene.id, scene.name);
        self.apply_selection(bridges, &scene);
        Ok(SelectOutcome::Switched { previous })
    }

    /// Remember the active scene before a run starts
    pub fn snapshot_active_scene(&mut self) {
        self.pre_run_snapshot = self.active.clone();
    }

    /// Re-select the scene remembered by `snapshot_active_scene`
    pub fn restore_snapshot(&mut self, bridges: &mut Bridges<'_>) -> SceneResult<SelectOutcome> {
        let Some(saved) = self.pre_run_snapshot.take() else {
            return Ok(SelectOutcome::Unchanged);
        };
        if self.get_by_id(&saved).is_some() {
            self.select(bridges, Some(saved.as_str()))
        } else {
            tracing::warn!("Snapshot scene {} no longer exists, selecting first scene", saved);
            self.select(bridges, None)
        }
    }

    /// Flush pending text-mode edits before leaving the current scene.
    ///
    /// On a parse error the offending object is re-selected and returned;
    /// the caller must then abandon the switch without touching its state.
    pub(super) fn sync_text(bridges: &mut Bridges<'_>, target: &str) -> Result<(), ObjectId> {
        let Some(text) = bridges.text_sync.as_mut() else {
            return Ok(());
        };
        match text.sync() {
            SyncResult::Ok => Ok(()),
            SyncResult::Error { failed_object } => {
                tracing::warn!(
                    "Scene switch to {} aborted: text sync failed on {}",
                    target,
                    failed_object
                );
                bridges.container.select_object(&failed_object);
                Err(failed_object)
            }
        }
    }

    /// Bridge side of a scene switch. The store must already point at `scene`.
    pub(super) fn apply_selection(&self, bridges: &mut Bridges<'_>, scene: &Scene) {
        bridges.container.reset_scene_during_run();
        bridges.container.set_current_objects(&scene.id);
        bridges.stage.select_render_container(scene);

        match bridges.container.current_objects().first() {
            Some(first) => {
                bridges.container.select_object(first);
                bridges.playground.refresh();
            }
            None => {
                if let Some(text) = bridges.text_sync.as_mut() {
                    text.clear();
                }
                bridges.stage.select_object(None);
                bridges.playground.flush();
                bridges.playground.update_variables();
            }
        }

        if !bridges.container.has_list_view() {
            bridges.stage.sort_z_order();
        }
    }
}
