//! Service tests for idempotent user upsert.

use crate::identity::{
    adapters::memory::InMemoryUserStore,
    domain::{EmailAddress, UserDocument},
    ports::UserStore,
    services::{IdentityService, IdentityServiceError},
};
use rstest::{fixture, rstest};
use serde_json::{Map, Value, json};
use std::sync::Arc;

struct Harness {
    store: Arc<InMemoryUserStore>,
    service: IdentityService<InMemoryUserStore>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryUserStore::new());
    let service = IdentityService::new(Arc::clone(&store));
    Harness { store, service }
}

fn profile(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("JSON object")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upsert_creates_a_new_user(harness: Harness) {
    let user = harness
        .service
        .upsert_user("ada@example.com", profile(json!({"name": "Ada"})))
        .await
        .expect("upsert should succeed");

    assert_eq!(user.email().as_str(), "ada@example.com");
    assert_eq!(user.profile().get("name"), Some(&json!("Ada")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_upsert_returns_the_stored_user_unchanged(harness: Harness) {
    let first = harness
        .service
        .upsert_user("ada@example.com", profile(json!({"name": "Ada"})))
        .await
        .expect("first upsert should succeed");

    // The second call's profile is discarded; no merge takes place.
    let second = harness
        .service
        .upsert_user("ada@example.com", profile(json!({"name": "Grace"})))
        .await
        .expect("second upsert should succeed");

    assert_eq!(second, first);
    assert_eq!(second.profile().get("name"), Some(&json!("Ada")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn email_is_normalised_before_lookup(harness: Harness) {
    let first = harness
        .service
        .upsert_user("  Ada@Example.COM ", profile(json!({"name": "Ada"})))
        .await
        .expect("upsert should succeed");
    assert_eq!(first.email().as_str(), "ada@example.com");

    let second = harness
        .service
        .upsert_user("ada@example.com", profile(json!({"name": "Other"})))
        .await
        .expect("upsert should succeed");
    assert_eq!(second, first);
}

#[rstest]
#[case("")]
#[case("plainaddress")]
#[case("a@b@c")]
#[case("spa ce@example.com")]
#[case("@example.com")]
#[case("ada@")]
#[tokio::test(flavor = "multi_thread")]
async fn upsert_rejects_malformed_emails(harness: Harness, #[case] raw: &str) {
    let result = harness.service.upsert_user(raw, Map::new()).await;
    assert!(matches!(result, Err(IdentityServiceError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upsert_returns_existing_user_already_in_store(harness: Harness) {
    let email = EmailAddress::new("grace@example.com").expect("valid email");
    let stored = UserDocument::new(email, profile(json!({"name": "Grace"})));
    harness
        .store
        .insert(&stored)
        .await
        .expect("insert should succeed");

    let upserted = harness
        .service
        .upsert_user("grace@example.com", profile(json!({"name": "Impostor"})))
        .await
        .expect("upsert should succeed");
    assert_eq!(upserted, stored);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_cannot_shadow_the_email_key(harness: Harness) {
    let user = harness
        .service
        .upsert_user(
            "ada@example.com",
            profile(json!({"email": "spoof@example.com", "name": "Ada"})),
        )
        .await
        .expect("upsert should succeed");

    assert_eq!(user.profile().get("email"), None);
    let wire = serde_json::to_value(&user).expect("serialisable user");
    assert_eq!(wire.get("email"), Some(&json!("ada@example.com")));
}
