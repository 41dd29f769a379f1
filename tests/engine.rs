//! Synchronization engine behaviour against a scripted store.

mod common;

use std::collections::BTreeSet;
use std::time::Duration;

use common::{Call, FakeClient, USER_ID, loaded_engine, todo};
use tasksync::model::Filter;
use tasksync::sync::{CreateOutcome, NoticeKind, Row, SyncEngine};

fn notice_kind<C: tasksync::remote::TodoClient>(engine: &SyncEngine<C>) -> Option<NoticeKind> {
    engine.snapshot().notice.map(|n| n.kind())
}

fn ids<C: tasksync::remote::TodoClient>(engine: &SyncEngine<C>) -> Vec<i64> {
    engine.snapshot().todos.iter().map(|t| t.id).collect()
}

// ── Load ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_keeps_server_order() {
    let fake = FakeClient::with_todos(vec![todo(3, "c", false), todo(1, "a", true), todo(2, "b", false)]);
    let engine = loaded_engine(&fake).await;

    assert_eq!(ids(&engine), vec![3, 1, 2]);
    assert_eq!(fake.calls(), vec![Call::List(USER_ID)]);
    assert!(notice_kind(&engine).is_none());
}

#[tokio::test]
async fn test_load_twice_is_idempotent() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false), todo(2, "b", true)]);
    let engine = loaded_engine(&fake).await;
    let first = engine.snapshot();

    engine.load_all().await;
    let second = engine.snapshot();

    assert_eq!(first.todos, second.todos);
    assert_eq!(first.in_flight, second.in_flight);
    assert_eq!(first.pending, second.pending);
    assert_eq!(first.notice, second.notice);
}

#[tokio::test]
async fn test_load_failure_keeps_collection_and_raises_notice() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    let engine = loaded_engine(&fake).await;

    fake.fail_list(true);
    engine.load_all().await;

    assert_eq!(ids(&engine), vec![1]);
    assert_eq!(notice_kind(&engine), Some(NoticeKind::Load));

    // A fresh load is the only retry path, and it clears the notice
    fake.fail_list(false);
    engine.load_all().await;
    assert!(notice_kind(&engine).is_none());
}

#[tokio::test]
async fn test_first_load_failure_leaves_empty_list() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    fake.fail_list(true);
    let engine = loaded_engine(&fake).await;

    assert!(engine.snapshot().todos.is_empty());
    assert_eq!(
        engine.snapshot().notice.map(|n| n.message()),
        Some("Unable to load todos")
    );
}

// ── Create ────────────────────────────────────────────────────

#[tokio::test]
async fn test_blank_title_never_reaches_server() {
    let fake = FakeClient::empty();
    let engine = loaded_engine(&fake).await;

    for title in ["", "   ", "\t\n"] {
        assert_eq!(engine.create(title).await, CreateOutcome::Rejected);
        assert_eq!(notice_kind(&engine), Some(NoticeKind::EmptyTitle));
        assert!(engine.take_focus_request());
    }

    assert_eq!(fake.calls(), vec![Call::List(USER_ID)]);
    assert!(engine.snapshot().pending.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_create_shows_pending_then_appends_server_todo() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    let engine = loaded_engine(&fake).await;
    fake.set_latency(Duration::from_millis(100));
    engine.set_draft("  Buy milk ");

    let (outcome, during) = tokio::join!(engine.submit(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        engine.snapshot()
    });

    // While in flight: overlay only, input disabled
    let pending = during.pending.clone().expect("pending todo while in flight");
    assert_eq!(pending.title, "Buy milk");
    assert!(!pending.completed);
    assert_eq!(pending.user_id, USER_ID);
    assert!(during.input_disabled());
    assert!(during.todos.iter().all(|t| t.id != pending.temp_id));
    assert!(matches!(during.rows().last(), Some(Row::Pending(_))));

    // Settled
    let CreateOutcome::Created(created) = outcome else {
        panic!("expected the create to succeed");
    };
    let after = engine.snapshot();
    assert!(after.pending.is_none());
    assert!(!after.input_disabled());
    assert_eq!(after.draft, "");
    assert_eq!(after.todos.len(), 2);
    assert_eq!(after.todos.last(), Some(&created));
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.id, 2);

    assert_eq!(
        fake.calls().last(),
        Some(&Call::Create {
            user_id: USER_ID,
            title: "Buy milk".into(),
            completed: false,
        })
    );
}

#[tokio::test]
async fn test_failed_create_discards_pending() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    let engine = loaded_engine(&fake).await;
    let before = engine.snapshot().todos;

    fake.fail_create(true);
    engine.set_draft("Buy milk");
    assert_eq!(engine.submit().await, CreateOutcome::Failed);

    let after = engine.snapshot();
    assert!(after.pending.is_none());
    assert_eq!(after.todos, before);
    assert_eq!(after.draft, "Buy milk");
    assert_eq!(notice_kind(&engine), Some(NoticeKind::Add));
    assert!(engine.take_focus_request());
    assert!(!engine.take_focus_request());
}

#[tokio::test(start_paused = true)]
async fn test_second_create_while_pending_is_refused() {
    let fake = FakeClient::empty();
    let engine = loaded_engine(&fake).await;
    fake.set_latency(Duration::from_millis(100));

    let (first, second) = tokio::join!(engine.create("one"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        engine.create("two").await
    });

    assert!(matches!(first, CreateOutcome::Created(_)));
    assert_eq!(second, CreateOutcome::Busy);

    let creates = fake
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Create { .. }))
        .count();
    assert_eq!(creates, 1);
    assert_eq!(engine.snapshot().todos.len(), 1);
}

// ── Delete ────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_delete_marks_in_flight_until_settled() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false), todo(2, "b", false)]);
    let engine = loaded_engine(&fake).await;
    fake.set_latency(Duration::from_millis(100));

    let (deleted, during) = tokio::join!(engine.delete(2), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        engine.snapshot()
    });

    assert!(during.is_loading(2));
    assert!(!during.is_loading(1));
    assert!(during.todos.iter().any(|t| t.id == 2));

    assert!(deleted);
    let after = engine.snapshot();
    assert!(after.in_flight.is_empty());
    assert_eq!(ids(&engine), vec![1]);
    assert!(after.notice.is_none());
}

#[tokio::test]
async fn test_failed_delete_keeps_todo_and_clears_marker() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    let engine = loaded_engine(&fake).await;
    fake.fail_delete(1);

    assert!(!engine.delete(1).await);

    let after = engine.snapshot();
    assert_eq!(ids(&engine), vec![1]);
    assert!(after.in_flight.is_empty());
    assert_eq!(after.notice.map(|n| n.message()), Some("Unable to delete todo"));
}

#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    let engine = loaded_engine(&fake).await;

    assert!(!engine.delete(99).await);
    assert_eq!(fake.calls(), vec![Call::List(USER_ID)]);
    assert!(engine.snapshot().in_flight.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_repeated_delete_of_in_flight_id_is_ignored() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    let engine = loaded_engine(&fake).await;
    fake.set_latency(Duration::from_millis(100));

    let (first, second) = tokio::join!(engine.delete(1), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        engine.delete(1).await
    });

    assert!(first);
    assert!(!second);
    assert_eq!(
        fake.calls().iter().filter(|c| **c == Call::Delete(1)).count(),
        1
    );
}

// ── Clear completed ───────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_clear_completed_tolerates_partial_failure() {
    let fake = FakeClient::with_todos(vec![
        todo(1, "a", false),
        todo(2, "b", true),
        todo(5, "c", true),
        todo(7, "d", false),
        todo(9, "e", true),
    ]);
    let engine = loaded_engine(&fake).await;
    fake.fail_delete(5);
    fake.set_latency(Duration::from_millis(100));

    let start = tokio::time::Instant::now();
    let (report, during) = tokio::join!(engine.clear_completed(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        engine.snapshot()
    });

    // Concurrent dispatch: bounded by one call, not three
    assert!(start.elapsed() < Duration::from_millis(150));
    assert_eq!(during.in_flight, BTreeSet::from([2, 5, 9]));

    assert_eq!(report.deleted, vec![2, 9]);
    assert_eq!(report.failed, vec![5]);

    let after = engine.snapshot();
    assert_eq!(ids(&engine), vec![1, 5, 7]);
    assert!(after.in_flight.is_empty());
    assert_eq!(notice_kind(&engine), Some(NoticeKind::Delete));
    assert_eq!(fake.server_ids(), vec![1, 5, 7]);
}

#[tokio::test]
async fn test_clear_completed_all_succeed() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", true), todo(2, "b", false)]);
    let engine = loaded_engine(&fake).await;

    let report = engine.clear_completed().await;

    assert_eq!(report.deleted, vec![1]);
    assert!(report.failed.is_empty());
    assert_eq!(ids(&engine), vec![2]);
    assert!(notice_kind(&engine).is_none());
    assert_eq!(engine.snapshot().completed_count(), 0);
}

#[tokio::test]
async fn test_clear_completed_with_nothing_completed_sends_nothing() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    let engine = loaded_engine(&fake).await;

    let report = engine.clear_completed().await;

    assert!(report.deleted.is_empty() && report.failed.is_empty());
    assert_eq!(fake.calls(), vec![Call::List(USER_ID)]);
}

// ── Filter and counts ─────────────────────────────────────────

#[tokio::test]
async fn test_filter_changes_visible_not_counts() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false), todo(2, "b", true), todo(3, "c", false)]);
    let engine = loaded_engine(&fake).await;

    engine.set_filter(Filter::Completed);
    let snap = engine.snapshot();
    assert_eq!(snap.visible().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(snap.active_count(), 2);
    assert_eq!(snap.completed_count(), 1);

    engine.set_filter(Filter::Active);
    let snap = engine.snapshot();
    assert_eq!(snap.visible().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
}

// ── Notice lifecycle ──────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_notice_auto_clears_after_three_seconds() {
    let engine = loaded_engine(&FakeClient::empty()).await;

    engine.create(" ").await;
    tokio::time::sleep(Duration::from_millis(2_999)).await;
    assert_eq!(notice_kind(&engine), Some(NoticeKind::EmptyTitle));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(notice_kind(&engine).is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_notices_still_auto_clear() {
    let engine = std::sync::Arc::new(loaded_engine(&FakeClient::empty()).await);

    let tasks: Vec<_> = (0..4_000)
        .map(|_| {
            let engine = std::sync::Arc::clone(&engine);
            tokio::spawn(async move { engine.create(" ").await })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), CreateOutcome::Rejected);
    }
    assert_eq!(notice_kind(&engine), Some(NoticeKind::EmptyTitle));

    tokio::time::sleep(Duration::from_millis(3_300)).await;
    assert!(notice_kind(&engine).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_clears_now_and_cancels_expiry() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    let engine = loaded_engine(&fake).await;
    fake.fail_delete(1);

    engine.create("").await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    engine.dismiss_error();
    assert!(notice_kind(&engine).is_none());

    // A newer notice raised before the old deadline keeps its full window
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    engine.delete(1).await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(notice_kind(&engine), Some(NoticeKind::Delete));
}

#[tokio::test(start_paused = true)]
async fn test_newer_notice_restarts_window() {
    let fake = FakeClient::with_todos(vec![todo(1, "a", false)]);
    let engine = loaded_engine(&fake).await;
    fake.fail_create(true);

    engine.create("").await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    engine.create("retry").await;
    assert_eq!(notice_kind(&engine), Some(NoticeKind::Add));

    // Past the first notice's deadline, still inside the second's
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(notice_kind(&engine), Some(NoticeKind::Add));

    tokio::time::sleep(Duration::from_millis(1_001)).await;
    assert!(notice_kind(&engine).is_none());
}
