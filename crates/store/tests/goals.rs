//! Goal list flows against the fake gateway.

mod common;

use uuid::Uuid;

use common::FakeGateway;
use store::goals::{GoalDraft, GoalList};

fn draft(title: &str) -> GoalDraft {
    GoalDraft {
        title: title.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn subgoals_append_at_the_end_of_the_order() {
    let gateway = FakeGateway::new();
    let mut list = GoalList::new(Uuid::new_v4());

    let goal = list.create_goal(&gateway, &draft("Pass the exam")).await.unwrap();
    list.add_subgoal(&gateway, goal, "Chapter 1").await.unwrap();
    list.add_subgoal(&gateway, goal, "Chapter 2").await.unwrap();
    list.add_subgoal(&gateway, goal, "Mock test").await.unwrap();

    let ordered: Vec<&str> = list
        .subgoals_of(goal)
        .iter()
        .map(|subgoal| subgoal.title.as_str())
        .collect();
    assert_eq!(ordered, ["Chapter 1", "Chapter 2", "Mock test"]);
    assert_eq!(
        list.subgoals_of(goal)
            .iter()
            .map(|s| s.position)
            .collect::<Vec<_>>(),
        [0, 1, 2]
    );
}

#[tokio::test]
async fn progress_counts_completed_subgoals() {
    let gateway = FakeGateway::new();
    let mut list = GoalList::new(Uuid::new_v4());

    let goal = list.create_goal(&gateway, &draft("Pass the exam")).await.unwrap();
    let first = list.add_subgoal(&gateway, goal, "Chapter 1").await.unwrap();
    list.add_subgoal(&gateway, goal, "Chapter 2").await.unwrap();
    assert_eq!(list.progress(goal), (0, 2));

    list.toggle_subgoal(&gateway, first).await.unwrap();
    assert_eq!(list.progress(goal), (1, 2));
}

#[tokio::test]
async fn toggling_a_goal_flips_completion() {
    let gateway = FakeGateway::new();
    let mut list = GoalList::new(Uuid::new_v4());

    let goal = list.create_goal(&gateway, &draft("Read 12 books")).await.unwrap();
    assert!(!list.goals.get(goal).unwrap().completed);

    list.toggle_goal(&gateway, goal).await.unwrap();
    assert!(list.goals.get(goal).unwrap().completed);
}
