//! Fluent builders for test schemas and documents.

use serde_json::{Map, Value, json};

/// Builder for object schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    children: Map<String, Value>,
    validators: Vec<Value>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar field with the given validators.
    pub fn field(mut self, key: &str, node_type: &str, validators: Value) -> Self {
        self.children.insert(
            key.to_string(),
            json!({"type": node_type, "validators": validators}),
        );
        self
    }

    /// Add a string field.
    pub fn string(self, key: &str, validators: Value) -> Self {
        self.field(key, "string", validators)
    }

    /// Add an integer field.
    pub fn integer(self, key: &str, validators: Value) -> Self {
        self.field(key, "integer", validators)
    }

    /// Add a nested object.
    pub fn object(mut self, key: &str, nested: SchemaBuilder) -> Self {
        self.children.insert(key.to_string(), nested.build());
        self
    }

    /// Add an array whose elements follow `items`.
    pub fn array(mut self, key: &str, items: Value) -> Self {
        self.children
            .insert(key.to_string(), json!({"type": "array", "items": items}));
        self
    }

    /// Add a validator on the object itself.
    pub fn validator(mut self, validator: Value) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn build(self) -> Value {
        json!({
            "type": "object",
            "validators": self.validators,
            "children": self.children,
        })
    }

    /// Wrap the schema in a form document carrying `errors`.
    pub fn document(self, errors: Value) -> Value {
        json!({"main_form": self.build(), "errors": errors})
    }
}
