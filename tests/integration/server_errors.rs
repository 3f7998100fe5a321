//! Server error ingestion and one-shot display.

use crate::common::{self, builders::SchemaBuilder, fixtures};
use form_schema::engine::Provenance;
use form_schema::{ErrorChange, Form, ServerErrors, SharedValues, ValueSnapshot};
use serde_json::{Value, json};

fn contact_document(errors: Value) -> String {
    SchemaBuilder::new()
        .string("name", json!(["required"]))
        .string("email", json!(["email"]))
        .object(
            "address",
            SchemaBuilder::new().string("city", json!([])),
        )
        .document(errors)
        .to_string()
}

#[test]
fn test_server_errors_do_not_survive_client_validation() {
    common::init_logging();

    let values = SharedValues::new(json!({"name": "", "email": ""}));
    let mut form = Form::new();
    let had_errors = form
        .render_json(
            &contact_document(json!({"name": ["required"]})),
            values.clone(),
        )
        .unwrap();
    assert!(had_errors);
    assert_field_errors!(form, "name", ["required"]);

    values.update(|v| v["name"] = json!("Alice"));
    assert!(!form.validate().unwrap());
    assert_field_errors!(form, "name", []);
}

#[test]
fn test_server_errors_are_tagged() {
    let mut form = Form::new();
    form.render_json(
        &contact_document(json!({"address.city": ["Not delivered here"]})),
        ValueSnapshot(Value::Null),
    )
    .unwrap();

    let engine = form.engine().unwrap();
    let entries = engine.entries_for(&common::path("address.city"));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].provenance, Provenance::Server);
}

#[test]
fn test_unmatched_paths_leave_other_fields_untouched() {
    common::init_logging();

    let mut form = Form::new();
    form.render_json(
        &contact_document(json!({"email": ["Address already registered"]})),
        ValueSnapshot(Value::Null),
    )
    .unwrap();

    let mut errors = ServerErrors::new();
    errors.insert("email", "Address already registered");
    errors.insert("ghost.field", "x");
    errors.insert("name[", "x");
    assert!(form.process_server(&errors).unwrap());
    assert_field_errors!(form, "email", ["Address already registered"]);
    assert_field_errors!(form, "name", []);
    assert_eq!(form.engine().unwrap().error_state().len(), 1);
}

#[test]
fn test_server_verdict_is_about_matched_errors() {
    let mut form = Form::new();
    let had_errors = form
        .render_json(
            &contact_document(json!({"ghost.field": ["x"]})),
            ValueSnapshot(json!({"name": ""})),
        )
        .unwrap();
    assert!(!had_errors);

    // Client verdict ignores what the server said
    assert!(form.validate().unwrap());
}

#[test]
fn test_keyed_server_errors_from_fixture() {
    common::init_logging();

    let mut form = Form::new();
    let had_errors = form
        .render(
            &fixtures::load_form("order"),
            ValueSnapshot(json!({"lines": [{}, {}]})),
        )
        .unwrap();

    assert!(had_errors);
    assert_field_errors!(form, "lines[0].sku", ["Unknown product"]);
    assert_field_errors!(form, "lines[1].quantity", ["Must be less than or equal to 5"]);
    assert_field_errors!(form, "shipping.address", []);
}

#[test]
fn test_server_messages_use_configured_catalog() {
    let mut form = Form::builder()
        .options(json!({"messages": {"error_number_le": "Hasta {0}"}}))
        .build()
        .unwrap();
    form.render(&fixtures::load_form("order"), ValueSnapshot(Value::Null))
        .unwrap();

    assert_field_errors!(form, "lines[1].quantity", ["Hasta 5"]);
}

#[test]
fn test_form_level_errors_use_the_root_path() {
    let mut form = Form::new();
    form.render_json(
        &contact_document(json!({"": ["Too many attempts, try again later"]})),
        ValueSnapshot(Value::Null),
    )
    .unwrap();

    assert_field_errors!(form, "", ["Too many attempts, try again later"]);
}

#[test]
fn test_changes_track_server_and_client_passes() {
    let values = SharedValues::new(json!({"name": "Alice", "email": "alice@example.com"}));
    let mut form = Form::new();
    form.render_json(
        &contact_document(json!({"email": ["Address already registered"]})),
        values.clone(),
    )
    .unwrap();

    assert_eq!(
        form.take_changes().unwrap(),
        vec![ErrorChange::Shown {
            path: common::path("email"),
            messages: vec!["Address already registered".to_string()],
        }]
    );

    form.validate().unwrap();
    assert_eq!(
        form.take_changes().unwrap(),
        vec![ErrorChange::Cleared {
            path: common::path("email")
        }]
    );
}
