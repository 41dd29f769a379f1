//! Todo model.
//!
//! A todo is owned by a single user and identified by a server-assigned id.
//! The client never invents ids for stored todos; provisional ids exist only
//! on [`PendingTodo`] while a create request is in flight.

use serde::{Deserialize, Serialize};

/// A todo as stored by the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned identifier
    pub id: i64,

    /// Title (non-empty after trim)
    pub title: String,

    /// Whether the todo is done
    pub completed: bool,

    /// Owner identity
    pub user_id: i64,
}

/// Optimistic placeholder for a create request awaiting acknowledgment.
///
/// Rendered as a disabled overlay after the stored todos. It is never
/// merged into the collection; on success it is replaced by the todo the
/// server returns, on failure it is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTodo {
    /// Provisional id (Unix milliseconds at submit time)
    pub temp_id: i64,
    pub title: String,
    pub completed: bool,
    pub user_id: i64,
}

impl PendingTodo {
    /// Build a placeholder whose provisional id collides with none of `taken`.
    ///
    /// Starts from the current Unix time in milliseconds and bumps until free.
    #[must_use]
    pub fn new(title: String, user_id: i64, taken: &[Todo]) -> Self {
        let mut temp_id = chrono::Utc::now().timestamp_millis();
        while taken.iter().any(|t| t.id == temp_id) {
            temp_id += 1;
        }

        Self {
            temp_id,
            title,
            completed: false,
            user_id,
        }
    }
}

/// Request body for creating a todo.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo<'a> {
    pub title: &'a str,
    pub user_id: i64,
    pub completed: bool,
}
