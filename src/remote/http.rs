//! HTTP todo client.
//!
//! Talks to a REST collection exposing:
//! - `GET    {base}/todos?userId={id}`
//! - `POST   {base}/todos`
//! - `DELETE {base}/todos/{id}`

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{NewTodo, Todo};

use super::client::TodoClient;

/// reqwest-backed [`TodoClient`].
pub struct HttpTodoClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTodoClient {
    /// Create a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the URL is blank and `Error::Remote` if
    /// the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("API url is empty".into()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// The normalized base url (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Turn a non-2xx response into `Error::Remote`, keeping the body for context.
async fn check_status(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if body.is_empty() {
        Err(Error::Remote(format!("{what} failed with {status}")))
    } else {
        Err(Error::Remote(format!("{what} failed with {status}: {body}")))
    }
}

impl TodoClient for HttpTodoClient {
    async fn list(&self, user_id: i64) -> Result<Vec<Todo>> {
        let url = self.url("/todos");
        debug!(%url, user_id, "GET todos");

        let response = self
            .client
            .get(&url)
            .query(&[("userId", user_id)])
            .send()
            .await
            .map_err(|e| Error::Remote(format!("list request failed: {e}")))?;

        let response = check_status(response, "list").await?;

        response
            .json()
            .await
            .map_err(|e| Error::Remote(format!("Failed to parse todo list: {e}")))
    }

    async fn create(&self, user_id: i64, title: &str, completed: bool) -> Result<Todo> {
        let url = self.url("/todos");
        debug!(%url, user_id, title, "POST todo");

        let body = NewTodo {
            title,
            user_id,
            completed,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Remote(format!("create request failed: {e}")))?;

        let response = check_status(response, "create").await?;

        response
            .json()
            .await
            .map_err(|e| Error::Remote(format!("Failed to parse created todo: {e}")))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("/todos/{id}"));
        debug!(%url, "DELETE todo");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Error::Remote(format!("delete request failed: {e}")))?;

        check_status(response, "delete").await?;
        Ok(())
    }
}
