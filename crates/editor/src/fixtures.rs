//! Factory functions for creating test data.
//!
//! Provides helpers to construct scene lists and populated harnesses used in
//! tests and by the command protocol examples.

use shared::{Scene, SceneList};

use crate::harness::SceneHarness;

/// Scenes named after `names`, with ids `s1`, `s2`, ...
pub fn scene_list(names: &[&str]) -> SceneList {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Scene::new(format!("s{}", i + 1), name))
        .collect()
}

/// `count` scenes named `Scene1`..`SceneN`
pub fn numbered_scenes(count: usize) -> SceneList {
    (1..=count)
        .map(|i| Scene::new(format!("s{i}"), format!("Scene{i}")))
        .collect()
}

/// Harness holding a full collection (20 scenes)
pub fn full_harness() -> SceneHarness {
    SceneHarness::with_scenes(numbered_scenes(shared::MAX_SCENES))
}

/// Two scenes; the first holds `hero` and `enemy`, with `enemy` pointing at `hero`
pub fn harness_with_objects() -> SceneHarness {
    let mut h = SceneHarness::with_scenes(scene_list(&["Main", "Boss"]));
    h.add_object("s1", "hero");
    h.add_object("s1", "enemy");
    h.link_objects("enemy", "hero");
    h
}
