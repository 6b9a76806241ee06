//! Core data types for the task API.

use serde::{Deserialize, Serialize};

/// A persisted task record.
///
/// The JSON shape is `{id, title, description|null, completed}`; `id` is
/// assigned by the database and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Payload for creating a task.
///
/// There is deliberately no `id` field: the database assigns identifiers,
/// so a caller-supplied id can never reach the insert path.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Sparse update payload.
///
/// A field left as `None` (omitted or explicit null in the request body)
/// keeps its stored value; only `Some` fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}
