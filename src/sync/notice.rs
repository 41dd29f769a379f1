//! Transient error notices and their auto-dismiss timer.
//!
//! A notice is shown until the user dismisses it or [`NOTICE_TTL`] elapses,
//! whichever comes first. Raising a new notice replaces the old one and
//! restarts the window; at most one timer is alive at any time.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

use super::state::SyncState;

/// How long a notice stays visible without user interaction.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Blank title submitted; never reaches the network.
    EmptyTitle,
    /// Initial list request failed.
    Load,
    /// Create request failed.
    Add,
    /// Single or bulk delete failed (bulk does not say which ids).
    Delete,
}

impl NoticeKind {
    /// User-facing message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "Title should not be empty",
            Self::Load => "Unable to load todos",
            Self::Add => "Unable to add todo",
            Self::Delete => "Unable to delete todo",
        }
    }
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// The notice currently occupying the error slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    kind: NoticeKind,
    message: &'static str,
    #[serde(skip)]
    epoch: u64,
}

impl Notice {
    pub(crate) const fn new(kind: NoticeKind, epoch: u64) -> Self {
        Self {
            kind,
            message: kind.message(),
            epoch,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NoticeKind {
        self.kind
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    pub(crate) const fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Owns the single expiry timer for the notice slot.
///
/// The timer is aborted when replaced, cancelled, or dropped. A timer that
/// already woke up before being aborted still checks the epoch, so it can
/// only ever clear the notice it was armed for. The armed epoch never goes
/// backwards: arming an older epoch than the current timer's is a no-op.
pub(crate) struct NoticeTimer {
    state: Arc<Mutex<SyncState>>,
    handle: Mutex<Option<(u64, JoinHandle<()>)>>,
    ttl: Duration,
}

impl NoticeTimer {
    pub fn new(state: Arc<Mutex<SyncState>>, ttl: Duration) -> Self {
        Self {
            state,
            handle: Mutex::new(None),
            ttl,
        }
    }

    /// Start a fresh expiry window for the notice raised at `epoch`.
    ///
    /// Raising and arming happen under different locks, so concurrent
    /// callers may arrive here out of order. A stale epoch is dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&self, epoch: u64) {
        let mut slot = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|(armed, _)| *armed > epoch) {
            debug!(epoch, "Stale notice timer skipped");
            return;
        }

        let state = Arc::clone(&self.state);
        let ttl = self.ttl;
        let task = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
            if guard.expire(epoch) {
                debug!(epoch, "Notice expired");
            }
        });

        if let Some((_, previous)) = slot.replace((epoch, task)) {
            previous.abort();
        }
    }

    /// Abort the pending expiry, if any.
    pub fn cancel(&self) {
        let previous = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some((_, previous)) = previous {
            previous.abort();
        }
    }
}

impl Drop for NoticeTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
