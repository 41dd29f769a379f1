//! Engine-owned state and the read-only snapshot handed to renderers.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{Filter, PendingTodo, Todo};

use super::notice::{Notice, NoticeKind};

/// Mutable state owned by the engine.
///
/// Only ever touched inside `SyncEngine::update`, so each settlement is one
/// coherent transition.
#[derive(Debug, Default)]
pub(crate) struct SyncState {
    pub todos: Vec<Todo>,
    pub pending: Option<PendingTodo>,
    pub in_flight: BTreeSet<i64>,
    pub notice: Option<Notice>,
    pub filter: Filter,
    pub draft: String,
    pub focus_requested: bool,
    notice_epoch: u64,
}

impl SyncState {
    /// Replace the current notice and return its epoch for the expiry timer.
    pub fn raise(&mut self, kind: NoticeKind) -> u64 {
        self.notice_epoch += 1;
        self.notice = Some(Notice::new(kind, self.notice_epoch));
        self.notice_epoch
    }

    /// Clear the notice if it is still the one raised at `epoch`.
    pub fn expire(&mut self, epoch: u64) -> bool {
        if self.notice.as_ref().is_some_and(|n| n.epoch() == epoch) {
            self.notice = None;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.todos.iter().any(|t| t.id == id)
    }

    pub fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot {
            todos: self.todos.clone(),
            pending: self.pending.clone(),
            in_flight: self.in_flight.clone(),
            notice: self.notice.clone(),
            filter: self.filter,
            draft: self.draft.clone(),
        }
    }
}

/// One rendered row: a stored todo or the pending overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    Stored { todo: &'a Todo, loading: bool },
    Pending(&'a PendingTodo),
}

/// Point-in-time copy of engine state.
///
/// Counts are derived on every call rather than cached.
#[derive(Debug, Clone, Serialize)]
pub struct TodoSnapshot {
    pub todos: Vec<Todo>,
    pub pending: Option<PendingTodo>,
    pub in_flight: BTreeSet<i64>,
    pub notice: Option<Notice>,
    pub filter: Filter,
    pub draft: String,
}

impl TodoSnapshot {
    /// Whether todo `id` has an outstanding round trip.
    #[must_use]
    pub fn is_loading(&self, id: i64) -> bool {
        self.in_flight.contains(&id)
    }

    /// The new-todo field is disabled while a create is pending.
    #[must_use]
    pub const fn input_disabled(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Todos passing the current filter, in collection order.
    pub fn visible(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(|t| self.filter.matches(t))
    }

    /// Visible rows followed by the pending overlay, if any.
    #[must_use]
    pub fn rows(&self) -> Vec<Row<'_>> {
        let mut rows: Vec<Row<'_>> = self
            .visible()
            .map(|todo| Row::Stored {
                todo,
                loading: self.is_loading(todo.id),
            })
            .collect();

        if let Some(pending) = &self.pending {
            rows.push(Row::Pending(pending));
        }

        rows
    }
}
