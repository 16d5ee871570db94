//! Resource library flows against the fake gateway.

mod common;

use uuid::Uuid;

use common::FakeGateway;
use store::StoreError;
use store::gateway::GatewayError;
use store::records::ResourceKind;
use store::resources::{ResourceDraft, ResourceLibrary};

fn library() -> ResourceLibrary {
    ResourceLibrary::new(Uuid::new_v4())
}

fn link_draft(title: &str, category_id: Uuid) -> ResourceDraft {
    ResourceDraft {
        title: title.to_string(),
        kind: Some(ResourceKind::Link),
        category_id: Some(category_id),
        url: "https://example.com/algebra".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn counts_follow_resource_mutations() {
    let gateway = FakeGateway::new();
    let mut library = library();

    let math = library.create_category(&gateway, "Math").await.unwrap();
    assert_eq!(library.count_for(math), 0);

    let first = library
        .create_resource(&gateway, &link_draft("Khan Academy", math))
        .await
        .unwrap();
    library
        .create_resource(&gateway, &link_draft("3blue1brown", math))
        .await
        .unwrap();
    assert_eq!(library.count_for(math), 2);

    library.delete_resource(&gateway, first).await.unwrap();
    assert_eq!(library.count_for(math), 1);
}

#[tokio::test]
async fn category_delete_is_refused_while_resources_remain() {
    let gateway = FakeGateway::new();
    let mut library = library();

    let math = library.create_category(&gateway, "Math").await.unwrap();
    let resource = library
        .create_resource(&gateway, &link_draft("Khan Academy", math))
        .await
        .unwrap();

    let err = library.delete_category(&gateway, math).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InUse {
            entity: "category",
            dependents: "resources"
        }
    ));
    // Nothing was removed, remotely or locally.
    assert!(library.categories.contains(math));
    assert_eq!(gateway.rows::<api_types::resource::CategoryRow>(), 1);

    library.delete_resource(&gateway, resource).await.unwrap();
    library.delete_category(&gateway, math).await.unwrap();
    assert!(!library.categories.contains(math));
}

#[tokio::test]
async fn failed_insert_leaves_the_collection_unchanged() {
    let gateway = FakeGateway::new();
    let mut library = library();
    let math = library.create_category(&gateway, "Math").await.unwrap();

    gateway.fail_next(GatewayError::Server("boom".to_string()));
    let err = library
        .create_resource(&gateway, &link_draft("Khan Academy", math))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Gateway(_)));
    assert!(library.resources.is_empty());
    assert_eq!(library.count_for(math), 0);
}

#[tokio::test]
async fn duplicate_category_names_are_rejected_locally() {
    let gateway = FakeGateway::new();
    let mut library = library();
    library.create_category(&gateway, "Math").await.unwrap();

    let err = library.create_category(&gateway, "math").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(gateway.rows::<api_types::resource::CategoryRow>(), 1);
}

#[tokio::test]
async fn subcategory_must_belong_to_the_chosen_category() {
    let gateway = FakeGateway::new();
    let mut library = library();
    let math = library.create_category(&gateway, "Math").await.unwrap();
    let physics = library.create_category(&gateway, "Physics").await.unwrap();
    let mechanics = library
        .create_subcategory(&gateway, "Mechanics", physics)
        .await
        .unwrap();

    let mut draft = link_draft("Khan Academy", math);
    draft.subcategory_id = Some(mechanics);
    let err = library.create_resource(&gateway, &draft).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn link_resources_require_a_url() {
    let gateway = FakeGateway::new();
    let mut library = library();
    let math = library.create_category(&gateway, "Math").await.unwrap();

    let mut draft = link_draft("Khan Academy", math);
    draft.url.clear();
    let err = library.create_resource(&gateway, &draft).await.unwrap_err();
    assert!(err.is_validation());
    assert!(library.resources.is_empty());
}

#[tokio::test]
async fn subcategory_delete_is_refused_while_resources_remain() {
    let gateway = FakeGateway::new();
    let mut library = library();
    let math = library.create_category(&gateway, "Math").await.unwrap();
    let algebra = library
        .create_subcategory(&gateway, "Algebra", math)
        .await
        .unwrap();

    let mut draft = link_draft("Khan Academy", math);
    draft.subcategory_id = Some(algebra);
    library.create_resource(&gateway, &draft).await.unwrap();

    let err = library
        .delete_subcategory(&gateway, algebra)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InUse { .. }));
    assert!(library.subcategories.contains(algebra));
}

#[tokio::test]
async fn refetch_replaces_state_and_recounts() {
    let gateway = FakeGateway::new();
    let mut library = library();
    let math = library.create_category(&gateway, "Math").await.unwrap();
    library
        .create_resource(&gateway, &link_draft("Khan Academy", math))
        .await
        .unwrap();

    let mut fresh = ResourceLibrary::new(Uuid::new_v4());
    fresh.refetch(&gateway).await.unwrap();
    assert_eq!(fresh.resources.len(), 1);
    assert_eq!(fresh.count_for(math), 1);
}
