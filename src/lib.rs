//! tasksync - optimistic todo list client
//!
//! Keeps an in-memory todo list in sync with a remote REST collection,
//! showing creates and deletes immediately and reconciling when the server
//! answers.
//!
//! # Architecture
//!
//! - [`model`] - Data types (Todo, PendingTodo, Filter)
//! - [`remote`] - Remote collection client trait and HTTP implementation
//! - [`sync`] - Synchronization engine, snapshots, and error notices
//! - [`config`] - Connection settings
//! - [`cli`] - Command-line front-end using clap
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod remote;
pub mod sync;

pub use error::{Error, Result};

/// Global quiet flag for `--quiet`.
///
/// When set, commands print nothing on success. Errors are still reported.
pub static QUIET: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if quiet mode is active.
#[inline]
pub fn is_quiet() -> bool {
    QUIET.load(std::sync::atomic::Ordering::Relaxed)
}
