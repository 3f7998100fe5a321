//! Server error payloads.
//!
//! Two encodings are accepted:
//!
//! ```json
//! {"name": ["Name already taken"], "phones[0].number": ["Unknown prefix"]}
//! ```
//!
//! ```json
//! [{"field_path": "age", "error_key": "error_number_ge", "error_params": [18]},
//!  {"field_path": "name", "message": "Name already taken"}]
//! ```
//!
//! Keyed entries are localized through the message catalog on ingestion.

use crate::i18n::MessageCatalog;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// One error message as sent by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// Already localized text
    Text(String),
    /// A catalog key with positional parameters
    Keyed { key: String, params: Vec<Value> },
}

impl ServerMessage {
    pub fn localize(&self, catalog: &MessageCatalog) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Keyed { key, params } => catalog.format_json(key, params),
        }
    }
}

/// Errors per field path, in the order received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerErrors {
    entries: Vec<(String, Vec<ServerMessage>)>,
}

impl ServerErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a localized message for `path`.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(path.into(), ServerMessage::Text(message.into()));
    }

    /// Add a catalog-keyed message for `path`.
    pub fn insert_keyed(&mut self, path: impl Into<String>, key: impl Into<String>, params: Vec<Value>) {
        self.push(
            path.into(),
            ServerMessage::Keyed {
                key: key.into(),
                params,
            },
        );
    }

    fn push(&mut self, path: String, message: ServerMessage) {
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((path, vec![message])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ServerMessage])> {
        self.entries
            .iter()
            .map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a payload in either accepted encoding. `null` is an empty payload.
    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

impl<P, M> FromIterator<(P, Vec<M>)> for ServerErrors
where
    P: Into<String>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, Vec<M>)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (path, messages) in iter {
            let path = path.into();
            for message in messages {
                errors.insert(path.clone(), message);
            }
        }
        errors
    }
}

#[derive(Deserialize)]
struct KeyedEntry {
    field_path: String,
    #[serde(default)]
    error_key: Option<String>,
    #[serde(default)]
    error_params: Vec<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl<'de> Deserialize<'de> for ServerErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut errors = ServerErrors::new();
        match Value::deserialize(deserializer)? {
            Value::Null => {}
            Value::Object(map) => {
                for (path, messages) in map {
                    match messages {
                        Value::String(text) => errors.insert(path, text),
                        Value::Array(items) => {
                            for item in items {
                                let text = item.as_str().ok_or_else(|| {
                                    <D::Error as de::Error>::custom(format!(
                                        "message for '{path}' is not a string"
                                    ))
                                })?;
                                errors.insert(path.clone(), text);
                            }
                        }
                        _ => {
                            return Err(de::Error::custom(format!(
                                "messages for '{path}' must be a string or a list of strings"
                            )));
                        }
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    let entry: KeyedEntry = serde_json::from_value(item)
                        .map_err(<D::Error as de::Error>::custom)?;
                    match (entry.error_key, entry.message) {
                        (Some(key), _) => errors.insert_keyed(entry.field_path, key, entry.error_params),
                        (None, Some(text)) => errors.insert(entry.field_path, text),
                        (None, None) => {
                            return Err(de::Error::custom(format!(
                                "entry for '{}' has neither error_key nor message",
                                entry.field_path
                            )));
                        }
                    }
                }
            }
            other => {
                return Err(de::Error::custom(format!(
                    "server errors must be an object or a list, got {other}"
                )));
            }
        }
        Ok(errors)
    }
}

impl Serialize for ServerErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let count = self.entries.iter().map(|(_, m)| m.len()).sum();
        let mut seq = serializer.serialize_seq(Some(count))?;
        for (path, messages) in &self.entries {
            for message in messages {
                let mut entry = Map::new();
                entry.insert("field_path".to_string(), json!(path));
                match message {
                    ServerMessage::Text(text) => {
                        entry.insert("message".to_string(), json!(text));
                    }
                    ServerMessage::Keyed { key, params } => {
                        entry.insert("error_key".to_string(), json!(key));
                        entry.insert("error_params".to_string(), json!(params));
                    }
                }
                seq.serialize_element(&entry)?;
            }
        }
        seq.end()
    }
}
