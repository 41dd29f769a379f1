//! Remote collection clients.
//!
//! - [`TodoClient`] - the async trait the engine depends on
//! - [`HttpTodoClient`] - REST implementation over reqwest

mod client;
mod http;

pub use client::TodoClient;
pub use http::HttpTodoClient;
