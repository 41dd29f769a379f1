//! Config command implementation.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{ConfigCommands, ConnectionArgs};
use crate::config::{
    load_config, reset_config, resolve_config_path, resolve_settings, update_config, Settings,
    TasksConfig,
};
use crate::error::{Error, Result};

#[derive(Serialize)]
struct ShowOutput<'a> {
    path: String,
    stored: &'a TasksConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    effective: Option<&'a Settings>,
}

/// Execute config command.
pub fn execute(
    command: &ConfigCommands,
    config_path: Option<&PathBuf>,
    connection: &ConnectionArgs,
    json: bool,
) -> Result<()> {
    let path = resolve_config_path(config_path.map(PathBuf::as_path))?;

    match command {
        ConfigCommands::Show => {
            let stored = load_config(&path)?;
            // A missing user id is fine here; show what we have
            let effective = match resolve_settings(&connection.as_config(), &stored) {
                Ok(settings) => Some(settings),
                Err(Error::NotConfigured) => None,
                Err(e) => return Err(e),
            };

            if json {
                let output = ShowOutput {
                    path: path.display().to_string(),
                    stored: &stored,
                    effective: effective.as_ref(),
                };
                println!("{}", serde_json::to_string(&output)?);
                return Ok(());
            }

            println!("Config file: {}", path.display());
            match effective {
                Some(settings) => {
                    println!("  API url:  {}", settings.api_url);
                    println!("  User id:  {}", settings.user_id);
                    println!("  Timeout:  {}s", settings.timeout.as_secs());
                }
                None => {
                    println!("  User id:  (not set)");
                    println!();
                    println!("Set one with: tasks config set --user-id <id>");
                }
            }
        }

        ConfigCommands::Set => {
            let update = connection.as_config();
            if update == TasksConfig::default() {
                return Err(Error::InvalidArgument(
                    "nothing to set: pass --api-url, --user-id or --timeout-secs".into(),
                ));
            }
            if update.timeout_secs == Some(0) {
                return Err(Error::InvalidArgument("timeout must be at least 1 second".into()));
            }

            let merged = update_config(&path, &update)?;

            if json {
                println!("{}", serde_json::to_string(&merged)?);
            } else if !crate::is_quiet() {
                println!("Saved {}", path.display());
            }
        }

        ConfigCommands::Reset => {
            reset_config(&path)?;
            if json {
                println!("{}", serde_json::json!({ "reset": true }));
            } else if !crate::is_quiet() {
                println!("Removed {}", path.display());
            }
        }
    }

    Ok(())
}
