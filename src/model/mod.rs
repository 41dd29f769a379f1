//! Data models for tasksync.
//!
//! - Todo (stored item) and PendingTodo (optimistic placeholder)
//! - Filter (view predicate)

pub mod filter;
pub mod todo;

pub use filter::Filter;
pub use todo::{NewTodo, PendingTodo, Todo};
