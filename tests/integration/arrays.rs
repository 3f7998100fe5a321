//! Array templates, element expansion and element re-compilation.

use crate::common::{self, builders::SchemaBuilder, fixtures};
use form_schema::{Form, SharedValues, ValueSnapshot};
use serde_json::json;

#[test]
fn test_each_element_is_validated_at_its_own_path() {
    common::init_logging();

    let values = SharedValues::new(json!({
        "customer": {"name": "Acme", "phone": "+64 21 555 0100"},
        "lines": [
            {"sku": "A-1", "quantity": 2, "price": 9.5},
            {"sku": "", "quantity": 0, "price": -1},
            {"sku": "C-3", "quantity": "lots"}
        ]
    }));
    let mut form = Form::new();
    form.render(&fixtures::load_form("order"), values.clone())
        .unwrap();

    assert!(form.validate().unwrap());
    assert_field_errors!(form, "lines[0].sku", []);
    assert_field_errors!(form, "lines[0].quantity", []);
    assert_field_errors!(form, "lines[1].sku", ["Value is required"]);
    assert_field_errors!(form, "lines[1].quantity", ["Must be greater than 0"]);
    assert_field_errors!(form, "lines[1].price", ["Must be greater than or equal to 0"]);
    assert_field_errors!(form, "lines[2].quantity", ["Must be a number"]);
    assert_field_errors!(form, "lines[2].price", []);
}

#[test]
fn test_removed_elements_lose_their_errors() {
    let values = SharedValues::new(json!({
        "customer": {"name": "Acme"},
        "lines": [{"sku": "A-1", "quantity": 1}, {"sku": "", "quantity": 1}]
    }));
    let mut form = Form::new();
    form.render(&fixtures::load_form("order"), values.clone())
        .unwrap();

    assert!(form.validate().unwrap());
    assert_field_errors!(form, "lines[1].sku", ["Value is required"]);

    values.update(|v| {
        if let Some(lines) = v["lines"].as_array_mut() {
            lines.pop();
        }
    });
    assert!(!form.validate().unwrap());
    assert_field_errors!(form, "lines[1].sku", []);
}

#[test]
fn test_array_level_validators_apply_to_the_list() {
    let mut form = Form::new();
    form.render(
        &fixtures::load_form("order"),
        ValueSnapshot(json!({"customer": {"name": "Acme"}, "lines": []})),
    )
    .unwrap();

    assert!(form.validate().unwrap());
    assert_field_errors!(form, "lines", ["Too short; minimum length: 1"]);
}

#[test]
fn test_nested_arrays_expand_per_level() {
    let schema = SchemaBuilder::new().array(
        "groups",
        json!({
            "type": "object",
            "children": {
                "members": {
                    "type": "array",
                    "items": {"type": "string", "validators": ["email"]}
                }
            }
        }),
    );
    let mut form = Form::new();
    form.render_json(
        &schema.document(json!(null)).to_string(),
        ValueSnapshot(json!({"groups": [
            {"members": ["a@example.com", "nope"]},
            {"members": []},
            {"members": ["also-nope"]}
        ]})),
    )
    .unwrap();

    assert!(form.validate().unwrap());
    assert_field_errors!(form, "groups[0].members[0]", []);
    assert_field_errors!(form, "groups[0].members[1]", ["Must be a valid email address"]);
    assert_field_errors!(form, "groups[2].members[0]", ["Must be a valid email address"]);
    assert_eq!(form.engine().unwrap().error_state().len(), 2);
}

#[test]
fn test_adding_an_element_does_not_touch_siblings() {
    let mut form = Form::new();
    form.render(&fixtures::load_form("order"), ValueSnapshot(json!(null)))
        .unwrap();
    let lines = common::path("lines");

    let first = form.add_array_item(&lines, 0).unwrap();
    let second = form.add_array_item(&lines, 1).unwrap();
    let first_again = form.add_array_item(&lines, 0).unwrap();

    assert_eq!(first, first_again);
    let second_paths: Vec<String> = second
        .dictionary
        .paths()
        .map(ToString::to_string)
        .collect();
    assert!(second_paths.iter().all(|p| p.starts_with("lines[1]")));
    assert_eq!(
        second
            .render_tree
            .root()
            .child("quantity")
            .unwrap()
            .label_key,
        "label_lines.quantity"
    );
}

#[test]
fn test_template_paths_never_carry_errors() {
    let mut form = Form::new();
    form.render(
        &fixtures::load_form("order"),
        ValueSnapshot(json!({"customer": {"name": ""}, "lines": [{}]})),
    )
    .unwrap();

    assert!(form.validate().unwrap());
    let paths: Vec<String> = form
        .engine()
        .unwrap()
        .error_state()
        .paths()
        .map(ToString::to_string)
        .collect();
    assert!(paths.iter().all(|p| !p.contains("[*]")));
    assert!(paths.contains(&"lines[0].sku".to_string()));
    assert!(paths.contains(&"customer.name".to_string()));
}
