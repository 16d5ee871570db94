//! Notebook flows against the fake gateway.

mod common;

use uuid::Uuid;

use common::FakeGateway;
use store::StoreError;
use store::notes::Notebook;

#[tokio::test]
async fn note_crud_round_trip() {
    let gateway = FakeGateway::new();
    let mut notebook = Notebook::new(Uuid::new_v4());

    let id = notebook
        .create_note(&gateway, "Derivatives", "chain rule examples", None)
        .await
        .unwrap();
    assert_eq!(notebook.notes.len(), 1);

    notebook
        .update_note(&gateway, id, "Derivatives", "chain and product rule", None)
        .await
        .unwrap();
    let note = notebook.notes.get(id).unwrap();
    assert_eq!(note.content.as_deref(), Some("chain and product rule"));

    notebook.delete_note(&gateway, id).await.unwrap();
    assert!(notebook.notes.is_empty());
    assert_eq!(gateway.rows::<api_types::note::NoteRow>(), 0);
}

#[tokio::test]
async fn blank_titles_never_reach_the_gateway() {
    let gateway = FakeGateway::new();
    let mut notebook = Notebook::new(Uuid::new_v4());

    let err = notebook
        .create_note(&gateway, "   ", "body", None)
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(gateway.rows::<api_types::note::NoteRow>(), 0);
}

#[tokio::test]
async fn category_delete_is_refused_while_notes_reference_it() {
    let gateway = FakeGateway::new();
    let mut notebook = Notebook::new(Uuid::new_v4());

    let school = notebook.create_category(&gateway, "School").await.unwrap();
    let note = notebook
        .create_note(&gateway, "Derivatives", "", Some(school))
        .await
        .unwrap();

    let err = notebook
        .delete_category(&gateway, school)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::InUse {
            entity: "category",
            dependents: "notes"
        }
    ));

    // Moving the note out unblocks the delete.
    notebook
        .update_note(&gateway, note, "Derivatives", "", None)
        .await
        .unwrap();
    notebook.delete_category(&gateway, school).await.unwrap();
    assert!(!notebook.categories.contains(school));
}

#[tokio::test]
async fn unknown_categories_render_as_uncategorized() {
    let gateway = FakeGateway::new();
    let mut notebook = Notebook::new(Uuid::new_v4());
    let school = notebook.create_category(&gateway, "School").await.unwrap();

    assert_eq!(notebook.category_name(Some(school)), "School");
    assert_eq!(notebook.category_name(None), "Uncategorized");
    assert_eq!(
        notebook.category_name(Some(Uuid::new_v4())),
        "Uncategorized"
    );
}
