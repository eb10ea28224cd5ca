//! Integration tests for the SceneCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use scene_editor_lib::bridge::SyncResult;
use scene_editor_lib::command::{execute_json, execute_json_batch};
use scene_editor_lib::fixtures::harness_with_objects;
use scene_editor_lib::harness::SceneHarness;
use scene_editor_lib::i18n::Lang;
use scene_editor_lib::state::{SceneStore, StoreConfig};

#[test]
fn test_command_full_workflow_via_json_batch() {
    let mut h = SceneHarness::new();

    let json = r#"[
        {"command": "add_scene"},
        {"command": "add_scene", "name": "Boss fight!"},
        {"command": "move_scene", "from": 2, "to": 0},
        {"command": "inspect"}
    ]"#;

    let responses = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(responses.len(), 4);
    for resp in &responses {
        assert!(resp.success, "Failed: {:?}", resp.error);
    }

    let inspect = responses[3].data.as_ref().unwrap();
    assert_eq!(inspect["scene_count"], 3);
    let scenes = inspect["scenes"].as_array().unwrap();
    assert_eq!(scenes[0]["name"], "Boss fight");
    assert_eq!(scenes[1]["name"], "Scene1");
    assert_eq!(scenes[2]["name"], "Scene2");
    assert_eq!(inspect["active"], scenes[0]["id"]);
}

#[test]
fn test_command_clone_scene() {
    let mut h = harness_with_objects();

    let resp = execute_json(&mut h, r#"{"command": "clone_scene", "id": "s1"}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["name"], "Copy of Ma");
    assert_eq!(data["cloned_objects"], 2);
    assert_eq!(data["failed_objects"].as_array().unwrap().len(), 0);
    assert_eq!(h.scene_count(), 3);
}

#[test]
fn test_command_capacity_notice() {
    let mut h = SceneHarness::new();
    let adds = vec![r#"{"command": "add_scene"}"#; 19].join(",");
    let responses = execute_json_batch(&mut h, &format!("[{adds}]")).unwrap();
    assert!(responses.iter().all(|r| r.success));

    let resp = execute_json(&mut h, r#"{"command": "add_scene"}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(
        resp.error.as_deref(),
        Some("The maximum number of scenes has been reached")
    );
    assert_eq!(h.scene_count(), 20);
}

#[test]
fn test_command_run_snapshot() {
    let mut h = SceneHarness::new();
    let first = h.active_id();

    let json = r#"[
        {"command": "add_scene"},
        {"command": "select_scene"},
        {"command": "start_run"},
        {"command": "add_scene"},
        {"command": "stop_run"}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(h.active_id(), first);
    assert_eq!(responses[4].data.as_ref().unwrap()["changed"], true);
}

#[test]
fn test_command_rename_and_export_reload() {
    let mut h = SceneHarness::new();
    let id = h.active_id();

    let rename = format!(r#"{{"command": "rename_scene", "id": "{id}", "name": "Opening credits"}}"#);
    let resp = execute_json(&mut h, &rename).unwrap();
    assert_eq!(resp.data.unwrap()["name"], "Opening cr");

    let resp = execute_json(&mut h, r#"{"command": "export_scenes"}"#).unwrap();
    let json = resp.data.unwrap()["scenes_json"].as_str().unwrap().to_string();

    let mut h2 = SceneHarness::new();
    let load = format!(r#"{{"command": "load_scenes", "scenes": {json}}}"#);
    let resp = execute_json(&mut h2, &load).unwrap();
    assert!(resp.success);
    assert_eq!(h2.store.serialize(), h.store.serialize());
}

#[test]
fn test_command_unknown_scene() {
    let mut h = SceneHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "select_scene", "id": "nope"}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("Scene not found"));

    let resp = execute_json(&mut h, r#"{"command": "move_scene", "from": 0, "to": 5}"#).unwrap();
    assert!(!resp.success);
}

#[test]
fn test_command_clear() {
    let mut h = SceneHarness::new();
    execute_json(&mut h, r#"{"command": "add_scene"}"#).unwrap();
    let resp = execute_json(&mut h, r#"{"command": "clear"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(h.scene_count(), 0);
}

#[test]
fn test_command_localized_notices_and_names() {
    let store = SceneStore::new(StoreConfig {
        labels: scene_editor_lib::i18n::SceneLabels::for_lang(Lang::Ru),
        ..StoreConfig::default()
    });
    let mut h = SceneHarness::with_store(store, Lang::Ru, Vec::new());
    assert_eq!(h.store.labels().scene_base, "Сцена");
    assert_eq!(h.store.scenes()[0].name, "Сцена1");

    let id = h.active_id();
    let json = format!(r#"{{"command": "remove_scene", "id": "{id}"}}"#);
    let resp = execute_json(&mut h, &json).unwrap();
    assert_eq!(
        resp.error.as_deref(),
        Some("Нельзя удалить единственную сцену")
    );

    let json = format!(r#"{{"command": "clone_scene", "id": "{id}"}}"#);
    let resp = execute_json(&mut h, &json).unwrap();
    assert_eq!(resp.data.unwrap()["name"], "Копия Сцен");
}

#[test]
fn test_command_text_error_blocks_structural_commands() {
    let mut h = harness_with_objects();
    h.enable_text_mode();
    if let Some(text) = h.text.as_mut() {
        text.next_result = SyncResult::Error {
            failed_object: "enemy".to_string(),
        };
    }

    let json = r#"[
        {"command": "add_scene"},
        {"command": "clone_scene", "id": "s1"},
        {"command": "remove_scene", "id": "s1"},
        {"command": "select_scene", "id": "s2"}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();
    for resp in &responses[..3] {
        assert!(!resp.success);
        assert_eq!(
            resp.error.as_deref(),
            Some("Fix the code error before switching scenes")
        );
    }
    assert_eq!(responses[3].data.as_ref().unwrap()["aborted"], true);
    assert_eq!(h.scene_count(), 2);
    assert_eq!(h.active_id(), "s1");
}

#[test]
fn test_command_invalid_json_error() {
    let mut h = SceneHarness::new();
    let result = execute_json(&mut h, "not valid json");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Invalid command JSON"));
}
