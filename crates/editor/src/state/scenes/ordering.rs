//! Scene reordering

use super::{SceneEvent, SceneStore};
use crate::bridge::Bridges;
use crate::error::{SceneError, SceneResult};

impl SceneStore {
    /// Move the scene at `from` so that it ends up at `to` (drag reorder)
    pub fn move_scene(&mut self, bridges: &mut Bridges<'_>, from: usize, to: usize) -> SceneResult<()> {
        let len = self.scenes.len();
        for index in [from, to] {
            if index >= len {
                return Err(SceneError::InvalidIndex { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        let scene = self.scenes.remove(from);
        self.scenes.insert(to, scene);
        self.events.push(SceneEvent::Moved { from, to });
        self.version += 1;
        tracing::info!("Moved scene from {} to {}", from, to);

        bridges.container.update_objects_order();
        bridges.stage.sort_z_order();
        Ok(())
    }
}
