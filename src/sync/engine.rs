//! Optimistic synchronization engine.
//!
//! The engine owns the authoritative todo collection together with the
//! pending-create slot, the in-flight id set and the notice slot. Every
//! operation follows the same shape:
//!
//! 1. apply the optimistic change in one `update`
//! 2. await the remote call (no lock held)
//! 3. fold the settlement back in one `update`
//!
//! Renderers may call [`SyncEngine::snapshot`] at any suspension point and
//! always observe a coherent state. Remote failures never escape; they end
//! up in the notice slot.

use std::sync::{Arc, Mutex, PoisonError};

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::{Filter, PendingTodo, Todo};
use crate::remote::TodoClient;

use super::notice::{NOTICE_TTL, NoticeKind, NoticeTimer};
use super::state::{SyncState, TodoSnapshot};

/// Result of [`SyncEngine::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The server stored the todo; it is now in the collection.
    Created(Todo),
    /// Blank title; nothing was sent.
    Rejected,
    /// Another create is still pending; nothing was sent.
    Busy,
    /// The server call failed; the placeholder was discarded.
    Failed,
}

/// Per-id result of [`SyncEngine::clear_completed`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClearReport {
    pub deleted: Vec<i64>,
    pub failed: Vec<i64>,
}

/// Keeps a local todo list in sync with a [`TodoClient`].
pub struct SyncEngine<C> {
    client: C,
    user_id: i64,
    state: Arc<Mutex<SyncState>>,
    notices: NoticeTimer,
}

impl<C: TodoClient> SyncEngine<C> {
    /// Create an engine for `user_id` with an empty collection.
    pub fn new(client: C, user_id: i64) -> Self {
        let state = Arc::new(Mutex::new(SyncState::default()));
        let notices = NoticeTimer::new(Arc::clone(&state), NOTICE_TTL);

        Self {
            client,
            user_id,
            state,
            notices,
        }
    }

    /// Owner identity all requests are scoped to.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Apply one atomic change to the state.
    ///
    /// Never call across an `.await`.
    fn update<R>(&self, f: impl FnOnce(&mut SyncState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *state)
    }

    /// Start the expiry window for a notice raised inside `update`.
    fn arm_notice(&self, epoch: Option<u64>) {
        if let Some(epoch) = epoch {
            self.notices.arm(epoch);
        }
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> TodoSnapshot {
        self.update(|s| s.snapshot())
    }

    /// Replace the collection with the server's list.
    ///
    /// Clears any notice first. On failure the collection is left as it was.
    pub async fn load_all(&self) {
        self.dismiss_error();
        info!(user_id = self.user_id, "Loading todos");

        match self.client.list(self.user_id).await {
            Ok(todos) => {
                debug!(count = todos.len(), "Todos loaded");
                self.update(|s| s.todos = todos);
            }
            Err(e) => {
                warn!(error = %e, "Failed to load todos");
                let epoch = self.update(|s| s.raise(NoticeKind::Load));
                self.arm_notice(Some(epoch));
            }
        }
    }

    /// Create a todo with optimistic feedback.
    ///
    /// The trimmed title is shown as a pending placeholder until the server
    /// answers. Only one create may be pending at a time.
    pub async fn create(&self, title: &str) -> CreateOutcome {
        let title = title.trim();
        let user_id = self.user_id;

        if title.is_empty() {
            let epoch = self.update(|s| {
                s.focus_requested = true;
                s.raise(NoticeKind::EmptyTitle)
            });
            self.arm_notice(Some(epoch));
            return CreateOutcome::Rejected;
        }

        let started = self.update(|s| {
            if s.pending.is_some() {
                return None;
            }
            let pending = PendingTodo::new(title.to_string(), user_id, &s.todos);
            let temp_id = pending.temp_id;
            s.pending = Some(pending);
            Some(temp_id)
        });

        let Some(temp_id) = started else {
            debug!(title, "Create refused: another create is pending");
            return CreateOutcome::Busy;
        };

        debug!(temp_id, title, "Creating todo");

        match self.client.create(user_id, title, false).await {
            Ok(todo) => {
                info!(id = todo.id, temp_id, "Todo created");
                self.update(|s| {
                    s.pending = None;
                    s.todos.push(todo.clone());
                    s.draft.clear();
                });
                CreateOutcome::Created(todo)
            }
            Err(e) => {
                warn!(temp_id, error = %e, "Failed to create todo");
                let epoch = self.update(|s| {
                    s.pending = None;
                    s.focus_requested = true;
                    s.raise(NoticeKind::Add)
                });
                self.arm_notice(Some(epoch));
                CreateOutcome::Failed
            }
        }
    }

    /// Create a todo from the current draft.
    pub async fn submit(&self) -> CreateOutcome {
        let draft = self.update(|s| s.draft.clone());
        self.create(&draft).await
    }

    /// Delete one todo.
    ///
    /// Returns `true` if the server confirmed the deletion. Ids that are not
    /// in the collection, or already being deleted, are ignored.
    pub async fn delete(&self, id: i64) -> bool {
        let started = self.update(|s| s.contains(id) && s.in_flight.insert(id));
        if !started {
            debug!(id, "Delete ignored: unknown or already in flight");
            return false;
        }

        debug!(id, "Deleting todo");
        let result = self.client.delete(id).await;
        if let Err(e) = &result {
            warn!(id, error = %e, "Failed to delete todo");
        }

        let deleted = result.is_ok();
        let epoch = self.update(|s| {
            s.in_flight.remove(&id);
            if deleted {
                s.todos.retain(|t| t.id != id);
                None
            } else {
                Some(s.raise(NoticeKind::Delete))
            }
        });
        self.arm_notice(epoch);

        deleted
    }

    /// Delete every completed todo concurrently.
    ///
    /// Each delete succeeds or fails on its own; only the successes are
    /// removed, and a single notice is raised if anything failed.
    pub async fn clear_completed(&self) -> ClearReport {
        let ids = self.update(|s| {
            let ids: Vec<i64> = s
                .todos
                .iter()
                .filter(|t| t.completed && !s.in_flight.contains(&t.id))
                .map(|t| t.id)
                .collect();
            s.in_flight.extend(ids.iter().copied());
            ids
        });

        if ids.is_empty() {
            debug!("Nothing to clear");
            return ClearReport::default();
        }

        info!(count = ids.len(), "Clearing completed todos");

        let outcomes = join_all(ids.iter().map(|&id| async move {
            let result = self.client.delete(id).await;
            if let Err(e) = &result {
                warn!(id, error = %e, "Failed to delete completed todo");
            }
            (id, result.is_ok())
        }))
        .await;

        let mut report = ClearReport::default();
        for (id, ok) in outcomes {
            if ok {
                report.deleted.push(id);
            } else {
                report.failed.push(id);
            }
        }

        let epoch = self.update(|s| {
            for id in &ids {
                s.in_flight.remove(id);
            }
            s.todos.retain(|t| !report.deleted.contains(&t.id));
            if report.failed.is_empty() {
                None
            } else {
                Some(s.raise(NoticeKind::Delete))
            }
        });
        self.arm_notice(epoch);

        debug!(deleted = report.deleted.len(), failed = report.failed.len(), "Clear settled");
        report
    }

    /// Change which todos are visible.
    pub fn set_filter(&self, filter: Filter) {
        self.update(|s| s.filter = filter);
    }

    /// Clear the notice now and cancel its expiry.
    pub fn dismiss_error(&self) {
        self.notices.cancel();
        self.update(|s| s.notice = None);
    }

    /// Replace the new-todo draft text.
    pub fn set_draft(&self, text: &str) {
        self.update(|s| {
            s.draft.clear();
            s.draft.push_str(text);
        });
    }

    /// Consume the one-shot request to focus the new-todo field.
    pub fn take_focus_request(&self) -> bool {
        self.update(|s| std::mem::take(&mut s.focus_requested))
    }
}
