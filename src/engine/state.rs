//! Error state owned by the validation engine.

use crate::path::FieldPath;
use serde::Serialize;
use std::collections::BTreeMap;

/// Where an error message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Provenance {
    /// Returned by the server and not yet re-validated on the client
    Server,
    /// Produced by the last client validation pass
    Client,
}

/// One error message attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub message: String,
    pub provenance: Provenance,
}

impl FieldError {
    pub fn server(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            provenance: Provenance::Server,
        }
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            provenance: Provenance::Client,
        }
    }
}

/// Current errors per field. A field without errors has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorState {
    fields: BTreeMap<FieldPath, Vec<FieldError>>,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error to a field.
    ///
    /// With `deduplicate`, a message already present for the field is
    /// skipped.
    pub fn push(&mut self, path: FieldPath, error: FieldError, deduplicate: bool) {
        let errors = self.fields.entry(path).or_default();
        if deduplicate && errors.iter().any(|e| e.message == error.message) {
            return;
        }
        errors.push(error);
    }

    pub fn get(&self, path: &FieldPath) -> &[FieldError] {
        self.fields.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn messages(&self, path: &FieldPath) -> Vec<&str> {
        self.get(path).iter().map(|e| e.message.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &[FieldError])> {
        self.fields.iter().map(|(path, errors)| (path, errors.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.fields.keys()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Changes a renderer must apply to go from `previous` to `self`.
    pub fn changes_since(&self, previous: &ErrorState) -> Vec<ErrorChange> {
        let cleared = previous
            .fields
            .keys()
            .filter(|path| !self.fields.contains_key(*path))
            .map(|path| ErrorChange::Cleared { path: path.clone() });

        let shown = self
            .fields
            .iter()
            .filter(|(path, errors)| {
                previous.fields.get(*path).map(|old| old != *errors).unwrap_or(true)
            })
            .map(|(path, errors)| ErrorChange::Shown {
                path: path.clone(),
                messages: errors.iter().map(|e| e.message.clone()).collect(),
            });

        cleared.chain(shown).collect()
    }
}

/// A change in the errors displayed for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum ErrorChange {
    /// The field now shows these messages
    Shown {
        path: FieldPath,
        messages: Vec<String>,
    },
    /// The field no longer shows any message
    Cleared { path: FieldPath },
}

impl ErrorChange {
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::Shown { path, .. } | Self::Cleared { path } => path,
        }
    }
}
