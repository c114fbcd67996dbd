//! Domain-focused tests for task value types, patches, and event payloads.

use crate::board::domain::{
    CategoryName, Placement, Position, TaskChange, TaskDocument, TaskDomainError, TaskDraft,
    TaskId, TaskPatch,
};
use chrono::Utc;
use rstest::rstest;
use serde_json::{Map, Value, json};
use std::str::FromStr;

fn category(label: &str) -> CategoryName {
    CategoryName::new(label).expect("valid category")
}

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("JSON object")
}

fn sample_document() -> TaskDocument {
    let draft = TaskDraft::new(category("todo"))
        .with_position(Position::ZERO)
        .with_field("title", json!("Write the report"))
        .with_field("notes", json!("due Friday"));
    TaskDocument::from_draft(TaskId::new(), draft, Utc::now())
}

#[rstest]
fn task_id_round_trips_through_display() {
    let id = TaskId::new();
    let parsed = TaskId::from_str(&id.to_string()).expect("valid id text");
    assert_eq!(parsed, id);
}

#[rstest]
#[case("not-an-id")]
#[case("12345")]
#[case("")]
fn task_id_rejects_malformed_text(#[case] raw: &str) {
    assert!(TaskId::from_str(raw).is_err());
}

#[rstest]
fn category_name_trims_and_rejects_empty() {
    let name = CategoryName::new("  todo  ").expect("valid category");
    assert_eq!(name.as_str(), "todo");
    assert_eq!(CategoryName::new("   "), Err(TaskDomainError::EmptyCategory));
}

#[rstest]
fn position_rejects_negative_values() {
    assert_eq!(
        Position::new(-1),
        Err(TaskDomainError::NegativePosition(-1))
    );
    let front = Position::new(0).expect("valid position");
    assert_eq!(front, Position::ZERO);
    assert_eq!(front.next().value(), 1);
}

#[rstest]
#[case("id")]
#[case("createdAt")]
fn patch_rejects_immutable_fields(#[case] field: &str) {
    let mut map = Map::new();
    map.insert(field.to_owned(), json!("anything"));
    assert_eq!(
        TaskPatch::from_map(map),
        Err(TaskDomainError::ImmutableField(field.to_owned()))
    );
}

#[rstest]
fn patch_parses_typed_ordering_fields() {
    let patch = TaskPatch::from_map(object(json!({"category": "doing", "index": 3})))
        .expect("valid patch");
    assert_eq!(patch.category(), Some(&category("doing")));
    assert_eq!(patch.position(), Some(Position::from_ordinal(3)));
}

#[rstest]
#[case(json!({"category": 7}), TaskDomainError::NonStringCategory)]
#[case(json!({"category": ""}), TaskDomainError::EmptyCategory)]
#[case(json!({"index": "three"}), TaskDomainError::NonIntegerPosition)]
#[case(json!({"index": 1.5}), TaskDomainError::NonIntegerPosition)]
#[case(json!({"index": -2}), TaskDomainError::NegativePosition(-2))]
fn patch_rejects_malformed_ordering_fields(
    #[case] body: Value,
    #[case] expected: TaskDomainError,
) {
    assert_eq!(TaskPatch::from_map(object(body)), Err(expected));
}

#[rstest]
fn document_serialises_to_wire_shape() {
    let document = sample_document();
    let wire = object(serde_json::to_value(&document).expect("serialisable document"));

    assert_eq!(wire.get("id"), Some(&json!(document.id().to_string())));
    assert_eq!(wire.get("category"), Some(&json!("todo")));
    assert_eq!(wire.get("index"), Some(&json!(0)));
    assert!(wire.get("createdAt").is_some_and(|value| !value.is_null()));
    assert_eq!(wire.get("title"), Some(&json!("Write the report")));
}

#[rstest]
fn draft_strips_reserved_payload_fields() {
    let draft = TaskDraft::new(category("todo"))
        .with_field("id", json!("spoofed"))
        .with_field("createdAt", json!("1970-01-01"))
        .with_field("title", json!("Legit"));
    let document = TaskDocument::from_draft(TaskId::new(), draft, Utc::now());

    assert_eq!(document.payload().get("id"), None);
    assert_eq!(document.payload().get("createdAt"), None);
    assert_eq!(document.payload().get("title"), Some(&json!("Legit")));
}

#[rstest]
fn apply_patch_reports_whether_fields_changed() {
    let mut document = sample_document();

    let noop = TaskPatch::from_map(object(json!({"title": "Write the report"})))
        .expect("valid patch");
    assert!(!document.apply_patch(&noop));

    let change = TaskPatch::from_map(object(json!({"title": "Rewrite the report"})))
        .expect("valid patch");
    assert!(document.apply_patch(&change));
    assert_eq!(
        document.payload().get("title"),
        Some(&json!("Rewrite the report"))
    );
    // Unpatched fields retain their prior values.
    assert_eq!(document.payload().get("notes"), Some(&json!("due Friday")));
}

#[rstest]
fn apply_patch_moves_ordering_fields() {
    let mut document = sample_document();
    let patch = TaskPatch::from_map(object(json!({"category": "done", "index": 4})))
        .expect("valid patch");

    assert!(document.apply_patch(&patch));
    assert_eq!(document.category(), &category("done"));
    assert_eq!(document.position(), Position::from_ordinal(4));
}

#[rstest]
fn created_and_updated_changes_carry_the_full_document() {
    let document = sample_document();
    for change in [
        TaskChange::Created(document.clone()),
        TaskChange::Updated(document.clone()),
    ] {
        let payload = object(change.payload());
        assert!(payload.contains_key("createdAt"));
        assert_eq!(payload.get("title"), Some(&json!("Write the report")));
    }
}

#[rstest]
fn reordered_change_carries_only_partial_identifiers() {
    let placement = Placement {
        id: TaskId::new(),
        category: category("doing"),
        position: Position::from_ordinal(2),
    };
    let payload = object(TaskChange::Reordered(placement.clone()).payload());

    assert_eq!(payload.len(), 3);
    assert_eq!(payload.get("id"), Some(&json!(placement.id.to_string())));
    assert_eq!(payload.get("category"), Some(&json!("doing")));
    assert_eq!(payload.get("index"), Some(&json!(2)));
}

#[rstest]
fn deleted_change_carries_the_raw_id_string() {
    let id = TaskId::new();
    assert_eq!(
        TaskChange::Deleted(id).payload(),
        Value::String(id.to_string())
    );
}
