//! Task service: thin orchestration over the repository.
//!
//! The repository reports absence as `None`/`false`; this layer is the sole
//! place those sentinels become a user-facing not-found error, so the HTTP
//! handlers never see repository-level sentinel values.

use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::types::{NewTask, Task, TaskPatch};

/// Stateless orchestration object shared by every request handler.
///
/// One instance is constructed at startup and cloned into the router state;
/// clones share the underlying database handle.
#[derive(Clone)]
pub struct TaskService {
    db: Database,
}

impl TaskService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List every task.
    pub fn get_all_tasks(&self) -> ApiResult<Vec<Task>> {
        Ok(self.db.list_tasks()?)
    }

    /// Fetch a task by id, failing with not-found when absent.
    pub fn get_task_by_id(&self, task_id: i64) -> ApiResult<Task> {
        self.db
            .get_task(task_id)?
            .ok_or_else(|| ApiError::task_not_found(task_id))
    }

    /// Create a task. New tasks always start with `completed = false`.
    pub fn create_new_task(&self, title: String, description: Option<String>) -> ApiResult<Task> {
        Ok(self.db.create_task(&NewTask { title, description })?)
    }

    /// Apply a sparse update, failing with not-found when absent.
    pub fn update_existing_task(&self, task_id: i64, patch: &TaskPatch) -> ApiResult<Task> {
        self.db
            .update_task(task_id, patch)?
            .ok_or_else(|| ApiError::task_not_found(task_id))
    }

    /// Delete a task, failing with not-found when nothing was removed.
    pub fn delete_task(&self, task_id: i64) -> ApiResult<()> {
        if self.db.delete_task(task_id)? {
            Ok(())
        } else {
            Err(ApiError::task_not_found(task_id))
        }
    }
}
