//! Todo commands: list, add, delete, clear-completed.
//!
//! Each invocation builds a fresh engine, loads the collection, runs one
//! operation, and renders the resulting snapshot. A notice left in the
//! snapshot turns into `Error::Sync` so the exit code reflects it.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::cli::render::{print_snapshot, ListOutput};
use crate::cli::ConnectionArgs;
use crate::config::{load_config, resolve_config_path, resolve_settings};
use crate::error::{Error, Result};
use crate::model::{Filter, Todo};
use crate::remote::{HttpTodoClient, TodoClient};
use crate::sync::{ClearReport, CreateOutcome, SyncEngine, TodoSnapshot};

/// One todo operation.
#[derive(Debug, Clone)]
pub enum TodoOp {
    List(Filter),
    Add(String),
    Delete(i64),
    ClearCompleted,
}

#[derive(Serialize)]
struct AddOutput<'a> {
    created: &'a Todo,
}

#[derive(Serialize)]
struct DeleteOutput {
    deleted: i64,
}

/// Execute a todo command against the configured remote store.
pub fn execute(
    op: TodoOp,
    config_path: Option<&PathBuf>,
    connection: &ConnectionArgs,
    json: bool,
) -> Result<()> {
    let path = resolve_config_path(config_path.map(PathBuf::as_path))?;
    let settings = resolve_settings(&connection.as_config(), &load_config(&path)?)?;
    debug!(api_url = %settings.api_url, user_id = settings.user_id, "Resolved settings");

    let client = HttpTodoClient::new(&settings.api_url, settings.timeout)?;
    let engine = SyncEngine::new(client, settings.user_id);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(run(&engine, op, json))
}

/// Load, apply `op`, render.
///
/// Generic over the client so tests can drive it without a server.
pub async fn run<C: TodoClient>(engine: &SyncEngine<C>, op: TodoOp, json: bool) -> Result<()> {
    engine.load_all().await;
    ensure_no_notice(&engine.snapshot())?;

    match op {
        TodoOp::List(filter) => {
            engine.set_filter(filter);
        }
        TodoOp::Add(title) => {
            engine.set_draft(&title);
            if let CreateOutcome::Created(todo) = engine.submit().await {
                if json {
                    println!("{}", serde_json::to_string(&AddOutput { created: &todo })?);
                    return Ok(());
                }
            }
        }
        TodoOp::Delete(id) => {
            let snapshot = engine.snapshot();
            if !snapshot.todos.iter().any(|t| t.id == id) {
                return Err(Error::TodoNotFound {
                    id,
                    available: snapshot.todos.iter().map(|t| t.id).collect(),
                });
            }
            if engine.delete(id).await && json {
                println!("{}", serde_json::to_string(&DeleteOutput { deleted: id })?);
                return Ok(());
            }
        }
        TodoOp::ClearCompleted => {
            let report: ClearReport = engine.clear_completed().await;
            if json {
                println!("{}", serde_json::to_string(&report)?);
                return ensure_no_notice(&engine.snapshot());
            }
        }
    }

    let snapshot = engine.snapshot();
    if json {
        println!("{}", serde_json::to_string(&ListOutput::new(&snapshot))?);
    } else if !crate::is_quiet() {
        print_snapshot(&snapshot);
    }

    ensure_no_notice(&snapshot)
}

/// Surface a pending notice as an error.
fn ensure_no_notice(snapshot: &TodoSnapshot) -> Result<()> {
    match &snapshot.notice {
        Some(notice) => Err(Error::Sync {
            message: notice.message().to_string(),
        }),
        None => Ok(()),
    }
}
