//! Filter and sort behaviour of the view projection.

use chrono::{Duration, Utc};
use uuid::Uuid;

use store::records::Note;
use store::{SortOrder, ViewFilter, project};

fn note(title: &str, age_minutes: i64) -> Note {
    Note {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: None,
        category_id: None,
        created_at: Utc::now() - Duration::minutes(age_minutes),
        updated_at: None,
    }
}

fn titles(items: &[&Note]) -> Vec<String> {
    items.iter().map(|note| note.title.clone()).collect()
}

#[test]
fn newest_puts_most_recent_first() {
    let notes = vec![note("oldest", 30), note("middle", 20), note("newest", 10)];
    let shown = project(&notes, &ViewFilter::default(), SortOrder::Newest);
    assert_eq!(titles(&shown), ["newest", "middle", "oldest"]);
}

#[test]
fn oldest_reverses_newest() {
    let notes = vec![note("middle", 20), note("newest", 10), note("oldest", 30)];
    let shown = project(&notes, &ViewFilter::default(), SortOrder::Oldest);
    assert_eq!(titles(&shown), ["oldest", "middle", "newest"]);
}

#[test]
fn alphabetical_ignores_case() {
    let notes = vec![note("Banana", 1), note("apple", 2), note("Cherry", 3)];
    let shown = project(&notes, &ViewFilter::default(), SortOrder::Alphabetical);
    assert_eq!(titles(&shown), ["apple", "Banana", "Cherry"]);
}

#[test]
fn empty_search_matches_everything() {
    let notes = vec![note("a", 1), note("b", 2)];
    let filter = ViewFilter {
        search: "   ".to_string(),
        ..Default::default()
    };
    assert_eq!(project(&notes, &filter, SortOrder::Newest).len(), 2);
}

#[test]
fn search_is_case_insensitive_over_title_and_body() {
    let mut by_title = note("Linear Algebra", 1);
    by_title.content = None;
    let mut by_body = note("untitled", 2);
    by_body.content = Some("revise ALGEBRA chapter 3".to_string());
    let miss = note("Chemistry", 3);
    let notes = vec![by_title, by_body, miss];

    let filter = ViewFilter {
        search: "algebra".to_string(),
        ..Default::default()
    };
    let shown = project(&notes, &filter, SortOrder::Newest);
    assert_eq!(titles(&shown), ["Linear Algebra", "untitled"]);
}

#[test]
fn category_filter_and_search_are_conjunctive() {
    let math = Uuid::new_v4();
    let physics = Uuid::new_v4();
    let mut in_category = note("algebra homework", 1);
    in_category.category_id = Some(math);
    let mut wrong_category = note("algebra reading", 2);
    wrong_category.category_id = Some(physics);
    let mut wrong_text = note("geometry homework", 3);
    wrong_text.category_id = Some(math);
    let notes = vec![in_category, wrong_category, wrong_text];

    let filter = ViewFilter {
        category: Some(math),
        search: "algebra".to_string(),
        ..Default::default()
    };
    let shown = project(&notes, &filter, SortOrder::Newest);
    assert_eq!(titles(&shown), ["algebra homework"]);
}

#[test]
fn projection_is_pure_and_repeatable() {
    let notes = vec![note("b", 1), note("a", 2)];
    let filter = ViewFilter::default();
    let first = titles(&project(&notes, &filter, SortOrder::Alphabetical));
    let second = titles(&project(&notes, &filter, SortOrder::Alphabetical));
    assert_eq!(first, second);
    // Source order is untouched.
    assert_eq!(notes[0].title, "b");
}
