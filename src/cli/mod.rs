//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::TasksConfig;
use crate::model::Filter;

pub mod commands;
pub mod render;

/// tasks - keep a todo list in sync with a remote store
#[derive(Parser, Debug)]
#[command(name = "tasks", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: ~/.tasksync/config.json)
    #[arg(long, global = true, env = "TASKS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Connection overrides; each falls back to the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Base URL of the todo API
    #[arg(long, global = true, env = "TASKS_API_URL")]
    pub api_url: Option<String>,

    /// Owner id all todos are scoped to
    #[arg(long, global = true, env = "TASKS_USER_ID")]
    pub user_id: Option<i64>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "TASKS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Explicit values as a config overlay.
    #[must_use]
    pub fn as_config(&self) -> TasksConfig {
        TasksConfig {
            api_url: self.api_url.clone(),
            user_id: self.user_id,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show todos
    List {
        /// Which todos to show (all, active, completed, or #/active style routes)
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },

    /// Add a todo
    Add {
        /// Title of the new todo
        title: String,
    },

    /// Delete a todo
    Delete {
        /// Id of the todo to delete
        id: i64,
    },

    /// Delete every completed todo
    ClearCompleted,

    /// Manage connection settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show stored and effective settings
    Show,

    /// Store the given --api-url / --user-id / --timeout-secs values
    ///
    /// Options left unset keep their stored value.
    Set,

    /// Delete the config file
    Reset,
}
