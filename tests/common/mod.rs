//! Common test utilities for form compilation and validation testing.

use form_schema::{FieldPath, Form, MessageCatalog, ValidatorFactoryRegistry};
use form_schema::compiler::{CompiledForm, SchemaCompiler};
use form_schema::config::RenderOptions;
use form_schema::schema::SchemaNode;
use serde_json::Value;
use std::sync::Once;

pub mod builders;
pub mod fixtures;

static LOGGER: Once = Once::new();

/// Route `log` output to the test harness. Set `RUST_LOG` to see it.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Parse a field path, panicking on malformed test input.
pub fn path(text: &str) -> FieldPath {
    text.parse()
        .unwrap_or_else(|e| panic!("Invalid test path '{}': {}", text, e))
}

/// Compile a schema with the built-in validators and default options.
pub fn compile(schema: Value) -> CompiledForm {
    let schema = SchemaNode::from_json(schema).expect("Failed to parse test schema");
    let registry = ValidatorFactoryRegistry::with_builtins();
    let catalog = MessageCatalog::new();
    let options = RenderOptions::default();
    SchemaCompiler::new(&registry, &catalog, &options)
        .compile(&schema)
        .expect("Failed to compile test schema")
}

/// Messages currently shown for `field` on a rendered form.
pub fn errors_of(form: &Form, field: &str) -> Vec<String> {
    form.errors_for(&path(field))
        .expect("Form is not rendered")
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Assert the messages shown for one field of a rendered form.
#[macro_export]
macro_rules! assert_field_errors {
    ($form:expr, $field:expr, []) => {
        let actual = $crate::common::errors_of(&$form, $field);
        assert!(
            actual.is_empty(),
            "Expected no errors for '{}', got {:?}",
            $field,
            actual
        );
    };
    ($form:expr, $field:expr, [$($message:expr),+ $(,)?]) => {
        let actual = $crate::common::errors_of(&$form, $field);
        let expected: Vec<String> = vec![$($message.to_string()),+];
        assert_eq!(actual, expected, "Unexpected errors for '{}'", $field);
    };
}
