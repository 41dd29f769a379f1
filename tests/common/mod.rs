//! Scripted in-memory todo store for engine tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tasksync::error::{Error, Result};
use tasksync::model::Todo;
use tasksync::remote::TodoClient;
use tasksync::sync::SyncEngine;

pub const USER_ID: i64 = 42;

/// A remote call as observed by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(i64),
    Create { user_id: i64, title: String, completed: bool },
    Delete(i64),
}

#[derive(Default)]
struct Inner {
    todos: Vec<Todo>,
    next_id: i64,
    fail_list: bool,
    fail_create: bool,
    failing_deletes: HashSet<i64>,
    latency: Duration,
    calls: Vec<Call>,
}

/// In-memory [`TodoClient`] with scripted failures and latency.
#[derive(Default)]
pub struct FakeClient {
    inner: Mutex<Inner>,
}

impl FakeClient {
    pub fn with_todos(todos: Vec<Todo>) -> Arc<Self> {
        let next_id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            inner: Mutex::new(Inner {
                todos,
                next_id,
                ..Default::default()
            }),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::with_todos(Vec::new())
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.inner.lock().unwrap().fail_create = fail;
    }

    pub fn fail_delete(&self, id: i64) {
        self.inner.lock().unwrap().failing_deletes.insert(id);
    }

    /// Every call sleeps this long before answering.
    pub fn set_latency(&self, latency: Duration) {
        self.inner.lock().unwrap().latency = latency;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn server_ids(&self) -> Vec<i64> {
        self.inner.lock().unwrap().todos.iter().map(|t| t.id).collect()
    }

    fn record(&self, call: Call) -> Duration {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        inner.latency
    }
}

async fn pause(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

impl TodoClient for FakeClient {
    async fn list(&self, user_id: i64) -> Result<Vec<Todo>> {
        pause(self.record(Call::List(user_id))).await;

        let inner = self.inner.lock().unwrap();
        if inner.fail_list {
            return Err(Error::Remote("list failed".into()));
        }
        Ok(inner
            .todos
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, user_id: i64, title: &str, completed: bool) -> Result<Todo> {
        pause(self.record(Call::Create {
            user_id,
            title: title.to_string(),
            completed,
        }))
        .await;

        let mut inner = self.inner.lock().unwrap();
        if inner.fail_create {
            return Err(Error::Remote("create failed".into()));
        }
        let todo = Todo {
            id: inner.next_id,
            title: title.to_string(),
            completed,
            user_id,
        };
        inner.next_id += 1;
        inner.todos.push(todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        pause(self.record(Call::Delete(id))).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.failing_deletes.contains(&id) {
            return Err(Error::Remote(format!("delete {id} failed")));
        }
        inner.todos.retain(|t| t.id != id);
        Ok(())
    }
}

pub fn todo(id: i64, title: &str, completed: bool) -> Todo {
    Todo {
        id,
        title: title.to_string(),
        completed,
        user_id: USER_ID,
    }
}

/// Engine over a shared fake, already loaded.
pub async fn loaded_engine(fake: &Arc<FakeClient>) -> SyncEngine<Arc<FakeClient>> {
    let engine = SyncEngine::new(Arc::clone(fake), USER_ID);
    engine.load_all().await;
    engine
}
