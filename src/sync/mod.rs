//! Optimistic synchronization between the local todo list and the remote store.
//!
//! - **Engine**: create / delete / clear-completed protocols with
//!   optimistic placeholders and per-id in-flight markers
//! - **State**: engine-owned state and render snapshots
//! - **Notice**: transient error slot with a 3-second auto-dismiss timer
//!
//! # Example
//!
//! ```ignore
//! use tasksync::remote::HttpTodoClient;
//! use tasksync::sync::SyncEngine;
//!
//! let client = HttpTodoClient::new("https://example.com/api", timeout)?;
//! let engine = SyncEngine::new(client, user_id);
//!
//! engine.load_all().await;
//! engine.create("Buy milk").await;
//! let snapshot = engine.snapshot();
//! println!("{} items left", snapshot.active_count());
//! ```

mod engine;
mod notice;
mod state;

pub use engine::{ClearReport, CreateOutcome, SyncEngine};
pub use notice::{NOTICE_TTL, Notice, NoticeKind};
pub use state::{Row, TodoSnapshot};
