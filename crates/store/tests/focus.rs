//! Focus log flows against the fake gateway.

mod common;

use chrono::NaiveDate;
use uuid::Uuid;

use common::FakeGateway;
use store::focus::FocusLog;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn completing_a_session_records_actual_time() {
    let gateway = FakeGateway::new();
    let mut log = FocusLog::new(Uuid::new_v4());

    let session = log
        .start_session(&gateway, date(2026, 3, 14), 25)
        .await
        .unwrap();
    assert!(!log.sessions.get(session).unwrap().completed);

    log.complete_session(&gateway, session, 22, "interrupted twice")
        .await
        .unwrap();
    let closed = log.sessions.get(session).unwrap();
    assert!(closed.completed);
    assert_eq!(closed.actual_duration_minutes, Some(22));
    assert_eq!(closed.notes.as_deref(), Some("interrupted twice"));
}

#[tokio::test]
async fn daily_minutes_prefer_actual_time_and_skip_open_sessions() {
    let gateway = FakeGateway::new();
    let mut log = FocusLog::new(Uuid::new_v4());
    let day = date(2026, 3, 14);

    let first = log.start_session(&gateway, day, 25).await.unwrap();
    log.complete_session(&gateway, first, 20, "").await.unwrap();
    // Still open, must not count.
    log.start_session(&gateway, day, 25).await.unwrap();
    // Different day.
    let other = log
        .start_session(&gateway, date(2026, 3, 15), 25)
        .await
        .unwrap();
    log.complete_session(&gateway, other, 25, "").await.unwrap();

    assert_eq!(log.minutes_on(day), 20);
}

#[tokio::test]
async fn focus_tasks_toggle_and_delete() {
    let gateway = FakeGateway::new();
    let mut log = FocusLog::new(Uuid::new_v4());

    let task = log.add_task(&gateway, "clear inbox").await.unwrap();
    log.toggle_task(&gateway, task).await.unwrap();
    assert!(log.tasks.get(task).unwrap().completed);

    log.delete_task(&gateway, task).await.unwrap();
    assert!(log.tasks.is_empty());
}
