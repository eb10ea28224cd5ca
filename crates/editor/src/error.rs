//! Error types for scene collection operations

use shared::{ObjectId, SceneId};
use thiserror::Error;

/// Errors returned by `SceneStore` commands.
///
/// None of these are fatal: every failing command leaves the collection
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("the last remaining scene cannot be deleted")]
    LastSceneUndeletable,
    #[error("scene limit of {capacity} reached")]
    CapacityExceeded { capacity: usize },
    #[error("scene {0} not found")]
    SceneNotFound(SceneId),
    #[error("scene id {0} is already in use")]
    DuplicateSceneId(SceneId),
    #[error("index {index} out of range for {len} scenes")]
    InvalidIndex { index: usize, len: usize },
    #[error("text code of object {failed_object} could not be parsed")]
    TextSyncFailed { failed_object: ObjectId },
}

/// A single object that could not be cloned during a bulk scene clone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to clone object {object_id}: {reason}")]
pub struct CloneObjectFailure {
    pub object_id: ObjectId,
    pub reason: String,
}

pub type SceneResult<T> = Result<T, SceneError>;
