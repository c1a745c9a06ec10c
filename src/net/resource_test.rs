use super::*;
use crate::net::types::{Id, Skill};
use crate::test_support::Harness;

// =============================================================
// Helpers
// =============================================================

fn project_skill(skill: &Skill) -> Value {
    Body::new()
        .field("name", skill.name.as_ref())
        .field("description", skill.description.as_ref())
        .finish()
}

static WIDGETS: ResourceSpec<Skill> = ResourceSpec {
    name: "widgets",
    base_path: "/widgets",
    reads: Access::Public,
    create: Some(project_skill),
    update: Some(project_skill),
    delete: true,
};

static READ_ONLY: ResourceSpec<Skill> = ResourceSpec {
    name: "gadgets",
    base_path: "/gadgets",
    reads: Access::Protected,
    create: None,
    update: None,
    delete: false,
};

fn rust_skill() -> Skill {
    Skill { id: Some(Id::Num(1)), name: Some("Rust".to_owned()), description: None }
}

// =============================================================
// Path shapes
// =============================================================

#[tokio::test]
async fn list_puts_filters_before_page() {
    let h = Harness::new();
    let client = ResourceClient::new(h.api.clone(), &WIDGETS);
    client.list(Some(3), &[("entrepreneur-id", "9")]).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.target(), "/widgets?entrepreneur-id=9&page=3");
}

#[tokio::test]
async fn list_without_page_sends_no_page_param() {
    let h = Harness::new();
    ResourceClient::new(h.api.clone(), &WIDGETS).list(None, &[]).await.unwrap();
    assert_eq!(h.transport.last().target(), "/widgets");
}

#[tokio::test]
async fn get_by_id_uses_item_path() {
    let h = Harness::new();
    ResourceClient::new(h.api.clone(), &WIDGETS).get_by_id(12).await.unwrap();
    assert_eq!(h.transport.last().target(), "/widgets/12");
}

#[tokio::test]
async fn create_posts_projected_body() {
    let h = Harness::with_token("\"tok\"");
    ResourceClient::new(h.api.clone(), &WIDGETS).create(&rust_skill()).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.path, "/widgets/create");
    assert_eq!(req.body, Some(serde_json::json!({"name": "Rust"})));
    assert_eq!(req.authorization().as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn update_patches_item_update_path() {
    let h = Harness::with_token("tok");
    ResourceClient::new(h.api.clone(), &WIDGETS).update("ab-12", &rust_skill()).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.method, Method::Patch);
    assert_eq!(req.path, "/widgets/ab-12/update");
    assert_eq!(req.authorization().as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn delete_uses_item_delete_path() {
    let h = Harness::with_token("tok");
    ResourceClient::new(h.api.clone(), &WIDGETS).delete(4).await.unwrap();
    let req = h.transport.last();
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.path, "/widgets/4/delete");
    assert_eq!(req.body, None);
    assert_eq!(req.authorization().as_deref(), Some("Bearer tok"));
}

// =============================================================
// Access and unsupported operations
// =============================================================

#[tokio::test]
async fn protected_reads_carry_token() {
    let h = Harness::with_token("\"tok\"");
    ResourceClient::new(h.api.clone(), &READ_ONLY).get_by_id(1).await.unwrap();
    assert_eq!(h.transport.last().authorization().as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn public_reads_do_not_carry_token() {
    let h = Harness::with_token("tok");
    ResourceClient::new(h.api.clone(), &WIDGETS).get_by_id(1).await.unwrap();
    assert_eq!(h.transport.last().bearer, None);
}

#[tokio::test]
async fn unsupported_operations_fail_without_network() {
    let h = Harness::new();
    let client = ResourceClient::new(h.api.clone(), &READ_ONLY);
    assert!(matches!(
        client.create(&rust_skill()).await,
        Err(ApiError::Unsupported { resource: "gadgets", operation: "create" })
    ));
    assert!(matches!(client.update(1, &rust_skill()).await, Err(ApiError::Unsupported { .. })));
    assert!(matches!(client.delete(1).await, Err(ApiError::Unsupported { .. })));
    assert!(h.transport.requests().is_empty());
}

// =============================================================
// Body
// =============================================================

#[test]
fn body_skips_absent_fields() {
    let body = Body::new()
        .field("a", Some(&1_i64))
        .field::<String>("b", None)
        .field("c", Some(&"x".to_owned()))
        .finish();
    assert_eq!(body, serde_json::json!({"a": 1, "c": "x"}));
}
