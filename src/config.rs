//! Component configuration built from defaults and caller overrides.
//!
//! Each component owns an explicit options struct. Caller-supplied options are
//! applied once with [`merge`], which produces a new value and leaves the
//! defaults untouched.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::NodeType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Apply `overrides` on top of `defaults`, key by key.
///
/// Only top-level keys are replaced. Keys unknown to `T` are ignored, since a
/// single custom options object is shared by several components. An override
/// whose value does not fit the target option is rejected.
pub fn merge<T>(defaults: &T, overrides: &Value) -> ConfigResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut base = serde_json::to_value(defaults)?;
    if overrides.is_null() {
        return Ok(serde_json::from_value(base)?);
    }

    let Some(source) = overrides.as_object() else {
        return Err(ConfigError::invalid_override(
            std::any::type_name::<T>(),
            "overrides must be a JSON object",
        ));
    };

    if let Some(target) = base.as_object_mut() {
        for (key, value) in source {
            match target.get_mut(key) {
                Some(slot) => *slot = value.clone(),
                None => log::trace!(
                    "Ignoring option '{}' not used by {}",
                    key,
                    std::any::type_name::<T>()
                ),
            }
        }
    }

    serde_json::from_value(base)
        .map_err(|e| ConfigError::invalid_override(std::any::type_name::<T>(), e.to_string()))
}

/// Default widget kind per node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDefaults {
    pub string: String,
    pub integer: String,
    pub decimal: String,
    pub boolean: String,
    pub date: String,
    pub object: String,
    pub array: String,
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        Self {
            string: "text".to_string(),
            integer: "number".to_string(),
            decimal: "number".to_string(),
            boolean: "checkbox".to_string(),
            date: "date".to_string(),
            object: "fieldset".to_string(),
            array: "list".to_string(),
        }
    }
}

impl WidgetDefaults {
    pub fn for_type(&self, node_type: NodeType) -> &str {
        match node_type {
            NodeType::String => &self.string,
            NodeType::Integer => &self.integer,
            NodeType::Decimal => &self.decimal,
            NodeType::Boolean => &self.boolean,
            NodeType::Date => &self.date,
            NodeType::Object => &self.object,
            NodeType::Array => &self.array,
        }
    }
}

/// Options used by the schema compiler when annotating render nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Prefix of the generated label key for nodes without an explicit label
    pub label_prefix: String,
    /// Widget used when a node does not name one
    pub widgets: WidgetDefaults,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            label_prefix: "label_".to_string(),
            widgets: WidgetDefaults::default(),
        }
    }
}

/// Options used by the validation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Catalog key of the message shown when a validator faults
    pub fallback_message_key: String,
    /// Drop repeated messages within one field
    pub deduplicate_messages: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            fallback_message_key: crate::i18n::keys::VALIDATOR_FAULT.to_string(),
            deduplicate_messages: true,
        }
    }
}
