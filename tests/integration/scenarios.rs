//! Rendering and validating complete form documents.

use crate::common::{self, builders::SchemaBuilder, fixtures};
use form_schema::{Form, FormBuilder, SharedValues, ValueSnapshot};
use serde_json::{Value, json};

fn valid_signup() -> Value {
    json!({
        "name": "Alice",
        "email": "alice@example.com",
        "password": "correct horse",
        "password_confirmation": "correct horse",
        "age": 34,
        "birthday": "1990-04-12",
        "plan": "pro",
        "terms": true
    })
}

#[test]
fn test_name_and_age_scenario() {
    common::init_logging();

    let document = SchemaBuilder::new()
        .string("name", json!(["required"]))
        .integer("age", json!([{"type": "min", "params": 18}]))
        .document(Value::Null);

    let mut form = FormBuilder::new()
        .options(json!({"messages": {
            "error_value_required": "required",
            "error_number_ge": "min violation, minimum {0}"
        }}))
        .build()
        .unwrap();
    form.render_json(
        &document.to_string(),
        ValueSnapshot(json!({"name": "", "age": 15})),
    )
    .unwrap();

    assert!(form.validate().unwrap());
    assert_field_errors!(form, "name", ["required"]);
    assert_field_errors!(form, "age", ["min violation, minimum 18"]);
}

#[test]
fn test_valid_signup_passes() {
    common::init_logging();

    let mut form = Form::new();
    form.render(&fixtures::load_form("signup"), ValueSnapshot(valid_signup()))
        .unwrap();

    assert!(!form.validate().unwrap());
    assert!(form.is_valid().unwrap());
}

#[test]
fn test_signup_accumulates_every_violation() {
    common::init_logging();

    let values = SharedValues::new(valid_signup());
    let mut form = Form::new();
    form.render(&fixtures::load_form("signup"), values.clone())
        .unwrap();

    values.update(|v| {
        v["name"] = json!("A");
        v["email"] = json!("alice@");
        v["password"] = json!("short");
        v["password_confirmation"] = json!("different");
        v["age"] = json!(12);
        v["birthday"] = json!("12/04/1990");
        v["plan"] = json!("enterprise");
    });

    assert!(form.validate().unwrap());
    assert_field_errors!(form, "name", ["Too short; minimum length: 2"]);
    assert_field_errors!(form, "email", ["Must be a valid email address"]);
    assert_field_errors!(form, "password", ["Too short; minimum length: 8"]);
    assert_field_errors!(form, "password_confirmation", ["Must match password"]);
    assert_field_errors!(form, "age", ["Must be greater than or equal to 18"]);
    assert_field_errors!(form, "birthday", ["Must be a date in the format YYYY-MM-DD"]);
    assert_field_errors!(form, "plan", ["Must be one of: free, pro, team"]);
    assert_field_errors!(form, "terms", []);
}

#[test]
fn test_blank_optional_fields_are_valid() {
    let mut form = Form::new();
    form.render(
        &fixtures::load_form("signup"),
        ValueSnapshot(json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "correct horse",
            "password_confirmation": "",
            "age": null,
            "birthday": "",
            "plan": "free"
        })),
    )
    .unwrap();

    assert!(!form.validate().unwrap());
}

#[test]
fn test_untouched_form_reports_required_fields() {
    let mut form = Form::new();
    form.render(&fixtures::load_form("signup"), SharedValues::default())
        .unwrap();

    assert_eq!(
        form.value().unwrap(),
        json!({
            "name": "",
            "email": "",
            "password": "",
            "password_confirmation": "",
            "age": null,
            "birthday": null,
            "plan": "",
            "terms": false
        })
    );

    assert!(form.validate().unwrap());
    let invalid: Vec<String> = form
        .engine()
        .unwrap()
        .error_state()
        .paths()
        .map(ToString::to_string)
        .collect();
    assert_eq!(invalid, vec!["email", "name", "password", "plan"]);
}

#[test]
fn test_render_tree_metadata_from_fixture() {
    let mut form = Form::new();
    form.render(&fixtures::load_form("signup"), ValueSnapshot(Value::Null))
        .unwrap();
    let tree = form.render_tree().unwrap();

    assert_eq!(tree.root().label_key, "signup_title");
    let keys: Vec<&str> = tree
        .root()
        .children
        .iter()
        .filter_map(|c| c.key.as_deref())
        .collect();
    assert_eq!(
        keys,
        vec![
            "name",
            "email",
            "password",
            "password_confirmation",
            "age",
            "birthday",
            "plan",
            "terms"
        ]
    );

    let email = tree.find(&common::path("email")).unwrap();
    assert_eq!(email.widget, "email");
    assert!(email.is_required());
    assert_eq!(tree.find(&common::path("terms")).unwrap().widget, "checkbox");
    assert_eq!(tree.find(&common::path("birthday")).unwrap().label_key, "label_birthday");
}

#[test]
fn test_unknown_validator_produces_no_form() {
    let document = SchemaBuilder::new()
        .string("name", json!(["required", "doesNotExist"]))
        .document(Value::Null);

    let mut form = Form::new();
    let err = form
        .render_json(&document.to_string(), ValueSnapshot(Value::Null))
        .unwrap_err();

    assert!(err.to_string().contains("doesNotExist"));
    assert!(form.render_tree().is_none());
}
