//! Command implementations.

pub mod completions;
pub mod config;
pub mod todo;
pub mod version;
