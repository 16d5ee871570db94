//! Task board flows against the fake gateway.

mod common;

use uuid::Uuid;

use common::FakeGateway;
use store::records::TaskStatus;
use store::tasks::{TaskBoard, TaskDraft};

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn completing_a_task_stamps_completed_at() {
    let gateway = FakeGateway::new();
    let mut board = TaskBoard::new(Uuid::new_v4());

    let id = board.create_task(&gateway, &draft("Grade homework")).await.unwrap();
    assert_eq!(board.tasks.get(id).unwrap().status, TaskStatus::Pending);

    board
        .set_status(&gateway, id, TaskStatus::Completed)
        .await
        .unwrap();
    let task = board.tasks.get(id).unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(task.completed_at.is_some());

    board
        .set_status(&gateway, id, TaskStatus::InProgress)
        .await
        .unwrap();
    let task = board.tasks.get(id).unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert!(task.completed_at.is_none());
}

#[tokio::test]
async fn subtasks_toggle_and_follow_their_parent() {
    let gateway = FakeGateway::new();
    let mut board = TaskBoard::new(Uuid::new_v4());

    let task = board.create_task(&gateway, &draft("Prepare lesson")).await.unwrap();
    let subtask = board
        .add_subtask(&gateway, task, "Print exercises")
        .await
        .unwrap();
    assert_eq!(board.subtasks_of(task).len(), 1);

    board.toggle_subtask(&gateway, subtask).await.unwrap();
    assert_eq!(
        board.subtasks.get(subtask).unwrap().status,
        TaskStatus::Completed
    );
    board.toggle_subtask(&gateway, subtask).await.unwrap();
    assert_eq!(
        board.subtasks.get(subtask).unwrap().status,
        TaskStatus::Pending
    );

    board.delete_task(&gateway, task).await.unwrap();
    assert!(board.tasks.is_empty());
    assert!(board.subtasks.is_empty());
}
