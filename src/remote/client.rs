//! Remote collection client trait.
//!
//! Defines the three round trips the synchronization engine needs. Any
//! failure is reported as an `Err`; the engine does not inspect it beyond
//! "it failed".

use crate::error::Result;
use crate::model::Todo;

/// Trait for remote todo collections.
///
/// Implemented by [`HttpTodoClient`](super::HttpTodoClient); tests plug in
/// scripted fakes.
pub trait TodoClient: Send + Sync {
    /// Fetch every todo owned by `user_id`, in server order.
    fn list(&self, user_id: i64) -> impl std::future::Future<Output = Result<Vec<Todo>>> + Send;

    /// Create a todo. The server assigns the id.
    fn create(
        &self,
        user_id: i64,
        title: &str,
        completed: bool,
    ) -> impl std::future::Future<Output = Result<Todo>> + Send;

    /// Delete a todo by id.
    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Share one client between several engines.
impl<T: TodoClient> TodoClient for std::sync::Arc<T> {
    fn list(&self, user_id: i64) -> impl std::future::Future<Output = Result<Vec<Todo>>> + Send {
        (**self).list(user_id)
    }

    fn create(
        &self,
        user_id: i64,
        title: &str,
        completed: bool,
    ) -> impl std::future::Future<Output = Result<Todo>> + Send {
        (**self).create(user_id, title, completed)
    }

    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<()>> + Send {
        (**self).delete(id)
    }
}
