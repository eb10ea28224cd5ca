use std::io::Read;

use scene_editor_lib::command::execute_json_batch;
use scene_editor_lib::harness::SceneHarness;
use scene_editor_lib::state::{EditorSettings, SceneStore, StoreConfig};
use shared::SceneList;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scene_editor=info".into()),
        )
        .init();

    let settings = EditorSettings::load();

    let script_path = parse_arg("--script");
    let initial_scenes = parse_arg("--scenes")
        .and_then(|path| load_scene_file(&path))
        .or_else(|| {
            if settings.autosave && SceneStore::has_autosave() {
                SceneStore::load_autosave()
            } else {
                None
            }
        })
        .unwrap_or_default();

    let store = SceneStore::new(StoreConfig::from_settings(&settings));
    let mut harness = SceneHarness::with_store(store, settings.language, initial_scenes);
    tracing::info!("Scene editor ready ({} scene(s))", harness.scene_count());

    let script = match script_path {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(script) => script,
            Err(e) => {
                tracing::error!("Failed to read script {path}: {e}");
                std::process::exit(1);
            }
        },
        None => {
            let mut script = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut script) {
                tracing::error!("Failed to read commands from stdin: {e}");
                std::process::exit(1);
            }
            script
        }
    };

    match execute_json_batch(&mut harness, &script) {
        Ok(responses) => match serde_json::to_string_pretty(&responses) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("Failed to encode responses: {e}"),
        },
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    }

    for event in harness.store.drain_events() {
        tracing::debug!("Scene event: {:?}", event);
    }

    if settings.autosave && !harness.store.is_empty() {
        harness.store.autosave();
    }
}

fn parse_arg(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
        i += 1;
    }
    None
}

fn load_scene_file(path: &str) -> Option<SceneList> {
    match std::fs::read_to_string(path) {
        Ok(json) => match SceneStore::scenes_from_json(&json) {
            Ok(scenes) => {
                tracing::info!("Loaded {} scene(s) from {path}", scenes.len());
                Some(scenes)
            }
            Err(e) => {
                tracing::error!("Failed to parse scene list from {path}: {e}");
                None
            }
        },
        Err(e) => {
            tracing::error!("Failed to read scene file {path}: {e}");
            None
        }
    }
}
