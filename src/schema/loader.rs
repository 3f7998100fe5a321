//! Loading form documents from JSON.
//!
//! A form document bundles the schema of the main form with the validation
//! errors the server returned for the last submission.

use super::types::SchemaNode;
use crate::engine::ServerErrors;
use crate::error::FormResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A form as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    /// Schema of the form
    pub main_form: SchemaNode,
    /// Errors from the previous submission, if any
    #[serde(default)]
    pub errors: ServerErrors,
}

impl FormDocument {
    pub fn new(main_form: SchemaNode) -> Self {
        Self {
            main_form,
            errors: ServerErrors::default(),
        }
    }

    /// Parse a document from a JSON string.
    pub fn from_json_str(content: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a document from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(&path)?;
        Ok(Self::from_json_str(&content)?)
    }
}

impl SchemaNode {
    /// Parse a schema from a JSON string.
    pub fn from_json_str(content: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a schema from a JSON value.
    pub fn from_json(value: serde_json::Value) -> FormResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
