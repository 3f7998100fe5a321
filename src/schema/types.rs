//! Core schema type definitions for forms.
//!
//! A form schema is a tree of [`SchemaNode`]s. Object nodes name their
//! children, array nodes carry an item sub-schema applied to every element,
//! and any node may declare an ordered list of [`ValidatorSpec`]s.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node of a form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Data type of the node
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Label message key; generated from the path when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Widget kind; the per-type default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    /// Help text message key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Validators in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<ValidatorSpec>,
    /// Named children of an object node, in declaration order
    #[serde(
        default,
        with = "ordered_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<(String, SchemaNode)>,
    /// Sub-schema applied to every element of an array node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// A node of the given type with no metadata, validators or children.
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            label: None,
            widget: None,
            hint: None,
            validators: Vec::new(),
            children: Vec::new(),
            items: None,
        }
    }

    pub fn object() -> Self {
        Self::new(NodeType::Object)
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(NodeType::Array)
        }
    }

    pub fn with_child(mut self, key: impl Into<String>, child: SchemaNode) -> Self {
        self.children.push((key.into(), child));
        self
    }

    pub fn with_validator(mut self, spec: ValidatorSpec) -> Self {
        self.validators.push(spec);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn child(&self, key: &str) -> Option<&SchemaNode> {
        self.children
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }

    pub fn is_scalar(&self) -> bool {
        self.node_type.is_scalar()
    }
}

/// Data types of schema nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    /// Text value
    String,
    /// Whole number
    Integer,
    /// Decimal number
    Decimal,
    /// Boolean flag
    Boolean,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// Named children
    Object,
    /// Repeated item sub-schema
    Array,
}

impl NodeType {
    pub fn is_scalar(self) -> bool {
        !matches!(self, NodeType::Object | NodeType::Array)
    }

    /// Value used for a field the user has not touched.
    pub fn empty_value(self) -> Value {
        match self {
            NodeType::String => Value::String(String::new()),
            NodeType::Integer | NodeType::Decimal | NodeType::Date => Value::Null,
            NodeType::Boolean => Value::Bool(false),
            NodeType::Object => Value::Object(serde_json::Map::new()),
            NodeType::Array => Value::Array(Vec::new()),
        }
    }
}

/// A validator declaration: a type identifier and its parameters.
///
/// In JSON a spec is either an object `{"type": "min", "params": 18}` or the
/// bare type identifier `"required"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatorSpec {
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl ValidatorSpec {
    pub fn new(type_id: impl Into<String>, params: Value) -> Self {
        Self {
            type_id: type_id.into(),
            params,
        }
    }

    /// A spec without parameters.
    pub fn bare(type_id: impl Into<String>) -> Self {
        Self::new(type_id, Value::Null)
    }

    /// Cache key identifying functionally equivalent validators.
    pub fn cache_key(&self) -> (String, String) {
        (self.type_id.clone(), self.params.to_string())
    }
}

impl<'de> Deserialize<'de> for ValidatorSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(String),
            Full {
                #[serde(rename = "type")]
                type_id: String,
                #[serde(default)]
                params: Value,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bare(type_id) => ValidatorSpec::bare(type_id),
            Repr::Full { type_id, params } => ValidatorSpec::new(type_id, params),
        })
    }
}

/// Children as a JSON object whose key order is the declaration order.
mod ordered_children {
    use super::*;

    pub fn serialize<S: Serializer>(
        children: &[(String, SchemaNode)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(children.len()))?;
        for (key, node) in children {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, SchemaNode)>, D::Error> {
        let entries = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        entries
            .into_iter()
            .map(|(key, value)| {
                serde_json::from_value(value)
                    .map(|node| (key.clone(), node))
                    .map_err(|e| de::Error::custom(format!("child '{key}': {e}")))
            })
            .collect()
    }
}
