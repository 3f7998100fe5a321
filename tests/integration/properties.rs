//! Property-based tests for accumulation and server error matching.
//!
//! Uses proptest to generate validator chains and server payloads with
//! automatic shrinking.

use form_schema::validators::validator_fn;
use form_schema::{
    FieldPath, Form, FormBuilder, MessageCatalog, ServerErrors, ValidationOutcome, ValidatorFn,
    ValueSnapshot,
};
use proptest::prelude::*;
use serde_json::{Value, json};

/// A validator that fails when `params.fails` is true, with `params.message`.
fn scripted(params: &Value, _: &MessageCatalog) -> Result<ValidatorFn, String> {
    let message = params
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing message".to_string())?
        .to_string();
    let fails = params.get("fails").and_then(Value::as_bool).unwrap_or(false);
    Ok(validator_fn(move |_, _| {
        Ok(if fails {
            ValidationOutcome::violation(message.clone())
        } else {
            ValidationOutcome::Valid
        })
    }))
}

fn scripted_form(chain: &[bool]) -> Form {
    let validators: Vec<Value> = chain
        .iter()
        .enumerate()
        .map(|(i, fails)| {
            json!({"type": "scripted", "params": {"message": format!("message {i}"), "fails": fails}})
        })
        .collect();
    let document = json!({
        "main_form": {
            "type": "object",
            "children": {"field": {"type": "string", "validators": validators}}
        }
    });

    let mut form = FormBuilder::new()
        .validator("scripted", scripted)
        .build()
        .expect("default options are valid");
    form.render_json(&document.to_string(), ValueSnapshot(json!({"field": "x"})))
        .expect("scripted schema compiles");
    form
}

proptest! {
    #[test]
    fn prop_every_failing_validator_reports_in_order(chain in prop::collection::vec(any::<bool>(), 0..12)) {
        let mut form = scripted_form(&chain);
        let field: FieldPath = "field".parse().unwrap();

        let invalid = form.validate().unwrap();
        let expected: Vec<String> = chain
            .iter()
            .enumerate()
            .filter(|(_, fails)| **fails)
            .map(|(i, _)| format!("message {i}"))
            .collect();

        prop_assert_eq!(invalid, chain.iter().any(|f| *f));
        let actual: Vec<String> = form
            .errors_for(&field)
            .unwrap()
            .into_iter()
            .map(str::to_string)
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_unknown_server_paths_are_ignored(ghosts in prop::collection::vec("[a-z]{1,8}(\\.[a-z]{1,8}){0,2}", 0..8)) {
        let mut form = scripted_form(&[false]);

        let mut errors = ServerErrors::new();
        errors.insert("field", "kept");
        for ghost in &ghosts {
            errors.insert(format!("ghost_{ghost}"), "dropped");
        }

        prop_assert!(form.process_server(&errors).unwrap());
        let state = form.engine().unwrap().error_state();
        prop_assert_eq!(state.len(), 1);
        prop_assert_eq!(
            state.messages(&"field".parse().unwrap()),
            vec!["kept"]
        );
    }
}
