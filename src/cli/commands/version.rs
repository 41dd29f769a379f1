//! Version command implementation.

use serde::Serialize;

use crate::config::DEFAULT_API_URL;
use crate::error::Result;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    default_api_url: &'a str,
}

const fn build() -> &'static str {
    if cfg!(debug_assertions) { "dev" } else { "release" }
}

/// Human-readable version line.
#[must_use]
pub fn version_line() -> String {
    format!("tasks {} ({})", env!("CARGO_PKG_VERSION"), build())
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    if json {
        let output = VersionOutput {
            version: env!("CARGO_PKG_VERSION"),
            build: build(),
            default_api_url: DEFAULT_API_URL,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", version_line());
    }
    Ok(())
}
