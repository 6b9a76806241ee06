//! Task CRUD operations against the `tasks` table.
//!
//! Absence is a sentinel here, never an error: `get_task` and `update_task`
//! return `None` and `delete_task` returns `false` for unknown ids. The
//! service layer owns the translation to a user-facing not-found.

use super::Database;
use crate::types::{NewTask, Task, TaskPatch};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, Row, params};

/// Map a `tasks` row to a [`Task`].
pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let id: i64 = row.get("id")?;
    let title: String = row.get("title")?;
    let description: Option<String> = row.get("description")?;
    let completed: bool = row.get("completed")?;

    Ok(Task {
        id,
        title,
        description,
        completed,
    })
}

/// Internal helper to fetch a task using an existing connection.
fn get_task_internal(conn: &Connection, task_id: i64) -> Result<Option<Task>> {
    let mut stmt =
        conn.prepare("SELECT id, title, description, completed FROM tasks WHERE id = ?1")?;

    let result = stmt.query_row(params![task_id], parse_task_row);

    match result {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// List every task. No ordering is guaranteed.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, title, description, completed FROM tasks")?;
            let tasks = stmt
                .query_map([], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// Fetch a single task by id, or `None` if no row matches.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| get_task_internal(conn, task_id))
    }

    /// Insert a new task and return the persisted row.
    ///
    /// The database assigns the id; the row is re-read afterwards so the
    /// returned value reflects applied column defaults.
    pub fn create_task(&self, new_task: &NewTask) -> Result<Task> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (title, description, completed) VALUES (?1, ?2, ?3)",
                params![new_task.title, new_task.description, false],
            )?;
            let task_id = conn.last_insert_rowid();

            get_task_internal(conn, task_id)?
                .ok_or_else(|| anyhow!("inserted task {} not found on re-read", task_id))
        })
    }

    /// Apply a sparse update to an existing task.
    ///
    /// Only fields present in the patch are written; the rest keep their
    /// stored values. Returns `None` if no row matches the id.
    pub fn update_task(&self, task_id: i64, patch: &TaskPatch) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let Some(current) = get_task_internal(conn, task_id)? else {
                return Ok(None);
            };

            let title = patch.title.as_deref().unwrap_or(&current.title);
            let description = patch
                .description
                .as_deref()
                .or(current.description.as_deref());
            let completed = patch.completed.unwrap_or(current.completed);

            conn.execute(
                "UPDATE tasks SET title = ?1, description = ?2, completed = ?3 WHERE id = ?4",
                params![title, description, completed, task_id],
            )?;

            get_task_internal(conn, task_id)
        })
    }

    /// Delete a task by id. Returns `true` if a row was removed.
    pub fn delete_task(&self, task_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
            Ok(affected > 0)
        })
    }
}
