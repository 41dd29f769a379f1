//! Terminal rendering of engine snapshots.

use colored::Colorize;
use serde::Serialize;

use crate::model::{Filter, PendingTodo, Todo};
use crate::sync::{Row, TodoSnapshot};

/// JSON view of a snapshot.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub filter: Filter,
    pub todos: Vec<&'a Todo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<&'a PendingTodo>,
    pub active_count: usize,
    pub completed_count: usize,
}

impl<'a> ListOutput<'a> {
    #[must_use]
    pub fn new(snapshot: &'a TodoSnapshot) -> Self {
        Self {
            filter: snapshot.filter,
            todos: snapshot.visible().collect(),
            pending: snapshot.pending.as_ref(),
            active_count: snapshot.active_count(),
            completed_count: snapshot.completed_count(),
        }
    }
}

/// Format one row as plain text (no colors).
#[must_use]
pub fn format_row(row: &Row<'_>) -> String {
    match row {
        Row::Stored { todo, loading } => {
            let mark = if todo.completed { "[x]" } else { "[ ]" };
            let suffix = if *loading { "  (deleting…)" } else { "" };
            format!("{mark} {:>6}  {}{suffix}", todo.id, todo.title)
        }
        Row::Pending(pending) => format!("[ ] {:>6}  {}  (saving…)", "…", pending.title),
    }
}

/// Footer line: "N item(s) left", the active filter, and the completed count.
#[must_use]
pub fn format_footer(snapshot: &TodoSnapshot) -> String {
    let active = snapshot.active_count();
    let noun = if active == 1 { "item" } else { "items" };
    let filters: Vec<String> = Filter::ALL
        .iter()
        .map(|f| {
            if *f == snapshot.filter {
                format!("[{f}]")
            } else {
                f.to_string()
            }
        })
        .collect();

    format!(
        "{active} {noun} left  ·  {}  ·  {} completed",
        filters.join(" "),
        snapshot.completed_count()
    )
}

/// Print a snapshot for humans.
pub fn print_snapshot(snapshot: &TodoSnapshot) {
    let rows = snapshot.rows();

    if snapshot.todos.is_empty() && snapshot.pending.is_none() {
        println!("{}", "No todos yet.".dimmed());
        return;
    }

    for row in &rows {
        let line = format_row(row);
        match row {
            Row::Stored { loading: true, .. } => println!("  {}", line.yellow()),
            Row::Stored { todo, .. } if todo.completed => println!("  {}", line.dimmed().strikethrough()),
            Row::Stored { .. } => println!("  {line}"),
            Row::Pending(_) => println!("  {}", line.italic().cyan()),
        }
    }

    if rows.is_empty() {
        println!("  {}", format!("No {} todos.", snapshot.filter).dimmed());
    }

    // Footer only when there is something stored, like the web footer
    if !snapshot.todos.is_empty() {
        println!();
        println!("{}", format_footer(snapshot));
    }
}
