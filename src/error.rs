//! Error types for the tasksync client.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=config, 3=not_found, 4=validation, etc.)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! These errors describe the *outer* surface (config, transport, CLI).
//! Failures inside the synchronization engine never escape as `Error`;
//! they are folded into the engine's notice slot instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tasksync operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config (exit 2)
    NotConfigured,
    ConfigError,

    // Not Found (exit 3)
    TodoNotFound,

    // Validation (exit 4)
    InvalidArgument,

    // Remote (exit 5)
    RemoteError,

    // Sync (exit 6)
    SyncError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::TodoNotFound => "TODO_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::RemoteError => "REMOTE_ERROR",
            Self::SyncError => "SYNC_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::NotConfigured | Self::ConfigError => 2,
            Self::TodoNotFound => 3,
            Self::InvalidArgument => 4,
            Self::RemoteError => 5,
            Self::SyncError => 6,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether the same command may succeed if simply run again.
    ///
    /// True for remote and sync failures; the server may recover.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RemoteError | Self::SyncError)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in tasksync operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No user id configured")]
    NotConfigured,

    #[error("Todo not found: {id}")]
    TodoNotFound {
        id: i64,
        /// Ids that are currently present, for hint display.
        available: Vec<i64>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("{message}")]
    Sync { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file unreadable at {path}: {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(err.to_string())
    }
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotConfigured => ErrorCode::NotConfigured,
            Self::Config(_) | Self::ConfigFile { .. } => ErrorCode::ConfigError,
            Self::TodoNotFound { .. } => ErrorCode::TodoNotFound,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Remote(_) => ErrorCode::RemoteError,
            Self::Sync { .. } => ErrorCode::SyncError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotConfigured => Some(
                "Tasks are scoped to a user id.\n  \
                 Set one: tasks config set --user-id <id>\n  \
                 Or export TASKS_USER_ID=<id>"
                    .to_string(),
            ),

            Self::TodoNotFound { available, .. } => {
                if available.is_empty() {
                    Some("The list is empty. Add one with: tasks add \"title\"".to_string())
                } else {
                    let ids: Vec<String> = available.iter().take(10).map(i64::to_string).collect();
                    let mut hint = format!("Known ids: {}", ids.join(", "));
                    if available.len() > 10 {
                        hint.push_str(&format!(" ... and {} more", available.len() - 10));
                    }
                    Some(hint)
                }
            }

            Self::Remote(_) | Self::Sync { .. } => {
                Some("Check the API url with `tasks config show` and try again.".to_string())
            }

            Self::ConfigFile { path, .. } => Some(format!(
                "Fix or remove {} and retry, or reset it with `tasks config reset`.",
                path.display()
            )),

            Self::InvalidArgument(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
