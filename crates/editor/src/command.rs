//! JSON command protocol for driving the scene store headlessly.
//!
//! Mirrors the editor's scene commands (add, remove, select, rename, move,
//! duplicate) plus run start/stop and project load/export.

use serde::{Deserialize, Serialize};
use shared::SceneList;

use crate::error::SceneError;
use crate::harness::SceneHarness;
use crate::i18n::tr;
use crate::state::scenes::{NewScene, SelectOutcome};

/// A scene command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SceneCommand {
    /// Add a scene (auto-named unless `name` is given)
    AddScene {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        index: Option<usize>,
    },
    /// Delete a scene by ID
    RemoveScene {
        id: String,
    },
    /// Select a scene (first scene when `id` is omitted)
    SelectScene {
        #[serde(default)]
        id: Option<String>,
    },
    /// Rename a scene
    RenameScene {
        id: String,
        name: String,
    },
    /// Reorder: move the scene at `from` to `to`
    MoveScene {
        from: usize,
        to: usize,
    },
    /// Duplicate a scene with its objects
    CloneScene {
        id: String,
    },
    /// Program started: remember the active scene
    StartRun,
    /// Program stopped: restore the remembered scene
    StopRun,
    /// Drop every scene.
    Clear,
    /// Replace the collection with a serialized list
    LoadScenes {
        scenes: SceneList,
    },
    /// List scenes and the active one.
    Inspect,
    /// Export the serialized scene list.
    ExportScenes,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Localized user-facing notice for a store error
fn error_response(harness: &SceneHarness, err: &SceneError) -> CommandResponse {
    let key = match err {
        SceneError::LastSceneUndeletable => "msg.scene_delete_error",
        SceneError::CapacityExceeded { .. } => "msg.scene_add_error",
        SceneError::SceneNotFound(_) => "msg.scene_not_found",
        SceneError::DuplicateSceneId(_) => "msg.scene_duplicate_id",
        SceneError::InvalidIndex { .. } => "msg.invalid_index",
        SceneError::TextSyncFailed { .. } => "msg.text_sync_error",
    };
    CommandResponse::err(tr(harness.lang(), key))
}

fn outcome_json(outcome: &SelectOutcome) -> serde_json::Value {
    match outcome {
        SelectOutcome::Unchanged => serde_json::json!({ "changed": false }),
        SelectOutcome::Switched { previous } => {
            serde_json::json!({ "changed": true, "previous": previous })
        }
        SelectOutcome::Aborted { failed_object } => {
            serde_json::json!({ "changed": false, "aborted": true, "failed_object": failed_object })
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut SceneHarness, cmd: SceneCommand) -> CommandResponse {
    match cmd {
        SceneCommand::AddScene { name, index } => {
            let new = match name {
                Some(name) => NewScene::Named(name),
                None => NewScene::Auto,
            };
            match harness.add(new, index) {
                Ok(scene) => CommandResponse::ok_with_data(
                    serde_json::json!({ "id": scene.id, "name": scene.name }),
                ),
                Err(e) => error_response(harness, &e),
            }
        }

        SceneCommand::RemoveScene { id } => match harness.remove_scene(&id) {
            Ok(removed) => CommandResponse::ok_with_data(serde_json::json!({
                "removed": removed.id,
                "active": harness.active_id(),
            })),
            Err(e) => error_response(harness, &e),
        },

        SceneCommand::SelectScene { id } => match harness.select(id.as_deref()) {
            Ok(outcome) => CommandResponse::ok_with_data(outcome_json(&outcome)),
            Err(e) => error_response(harness, &e),
        },

        SceneCommand::RenameScene { id, name } => match harness.rename(&id, &name) {
            Ok(name) => CommandResponse::ok_with_data(serde_json::json!({ "name": name })),
            Err(e) => error_response(harness, &e),
        },

        SceneCommand::MoveScene { from, to } => match harness.move_scene(from, to) {
            Ok(()) => CommandResponse::ok(),
            Err(e) => error_response(harness, &e),
        },

        SceneCommand::CloneScene { id } => match harness.clone_scene(&id) {
            Ok(report) => CommandResponse::ok_with_data(serde_json::json!({
                "id": report.scene.id,
                "name": report.scene.name,
                "cloned_objects": report.cloned.len(),
                "failed_objects": report
                    .failures
                    .iter()
                    .map(|f| f.object_id.clone())
                    .collect::<Vec<_>>(),
            })),
            Err(e) => error_response(harness, &e),
        },

        SceneCommand::StartRun => {
            harness.start_run();
            CommandResponse::ok()
        }

        SceneCommand::StopRun => match harness.stop_run() {
            Ok(outcome) => CommandResponse::ok_with_data(outcome_json(&outcome)),
            Err(e) => error_response(harness, &e),
        },

        SceneCommand::Clear => {
            harness.clear();
            CommandResponse::ok()
        }

        SceneCommand::LoadScenes { scenes } => {
            harness.load(scenes);
            CommandResponse::ok_with_data(serde_json::json!({ "scene_count": harness.scene_count() }))
        }

        SceneCommand::Inspect => {
            let scenes: Vec<serde_json::Value> = harness
                .store
                .scenes()
                .iter()
                .map(|scene| {
                    serde_json::json!({
                        "id": scene.id,
                        "name": scene.name,
                        "object_count": harness.container.objects_of(&scene.id).len(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "scene_count": scenes.len(),
                "active": harness.store.active_id(),
                "at_capacity": harness.store.is_at_capacity(),
                "scenes": scenes,
            }))
        }

        SceneCommand::ExportScenes => match harness.store.to_json() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "scenes_json": json })),
            Err(e) => CommandResponse::err(format!("Export failed: {e}")),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut SceneHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: SceneCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut SceneHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<SceneCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
