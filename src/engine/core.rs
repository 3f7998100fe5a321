//! The validation engine.
//!
//! The engine owns the [`ErrorState`] of one rendered form and is its only
//! writer. Both entry points compute a complete new state and swap it in, so
//! a reader sees either the state before a pass or the state after it.

use super::reader::ValueReader;
use super::server::ServerErrors;
use super::state::{ErrorChange, ErrorState, FieldError};
use crate::compiler::{BoundValidator, RenderTree, ValidatorDictionary};
use crate::config::ValidationOptions;
use crate::error::{PathError, PathResult};
use crate::i18n::MessageCatalog;
use crate::path::FieldPath;
use crate::validators::ValidationContext;
use log::{debug, error, info, trace, warn};
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Runs validators and reconciles server errors for one form instance.
pub struct ValidationEngine {
    dictionary: ValidatorDictionary,
    render_tree: Arc<RenderTree>,
    reader: Box<dyn ValueReader>,
    catalog: MessageCatalog,
    options: ValidationOptions,
    state: ErrorState,
    changes: Vec<ErrorChange>,
}

impl ValidationEngine {
    /// Engine with the built-in messages and default options.
    pub fn new<R>(dictionary: ValidatorDictionary, render_tree: Arc<RenderTree>, reader: R) -> Self
    where
        R: ValueReader + 'static,
    {
        Self {
            dictionary,
            render_tree,
            reader: Box::new(reader),
            catalog: MessageCatalog::new(),
            options: ValidationOptions::default(),
            state: ErrorState::new(),
            changes: Vec::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the error state with errors returned by the server.
    ///
    /// Entries whose path is malformed or names no field of this form are
    /// dropped and logged. No validator runs.
    ///
    /// Returns `true` if any error was accepted, i.e. there were errors to
    /// display.
    pub fn process_server(&mut self, errors: &ServerErrors) -> bool {
        let mut state = ErrorState::new();

        for (raw_path, messages) in errors.iter() {
            let path = match self.match_server_path(raw_path) {
                Ok(path) => path,
                Err(e) => {
                    warn!("Dropping {} server error(s): {}", messages.len(), e);
                    continue;
                }
            };
            for message in messages {
                state.push(
                    path.clone(),
                    FieldError::server(message.localize(&self.catalog)),
                    self.options.deduplicate_messages,
                );
            }
        }

        self.replace_state(state);
        let had_errors = !self.state.is_empty();
        debug!(
            "Ingested server errors: {} field(s) with errors",
            self.state.len()
        );
        had_errors
    }

    /// Validate the current form values.
    ///
    /// Reads values through the [`ValueReader`], runs every validator of every
    /// field without short-circuiting, and replaces the error state with the
    /// result. Server errors from a previous [`process_server`] are discarded.
    ///
    /// Returns `true` if the form is currently invalid.
    ///
    /// [`process_server`]: Self::process_server
    pub fn process_client(&mut self) -> bool {
        let values = self.reader.read_values(&self.render_tree);
        self.process_client_with(&values)
    }

    /// Like [`process_client`](Self::process_client), with the given values.
    pub fn process_client_with(&mut self, values: &Value) -> bool {
        let mut state = ErrorState::new();

        for (template, validators) in self.dictionary.iter() {
            if validators.is_empty() {
                continue;
            }
            for path in template.instantiate(values) {
                let value = path.lookup(values).unwrap_or(&Value::Null);
                let ctx = ValidationContext::new(&path, values);
                for validator in validators {
                    if let Some(message) = self.run_validator(validator, value, &ctx) {
                        state.push(
                            path.clone(),
                            FieldError::client(message),
                            self.options.deduplicate_messages,
                        );
                    }
                }
            }
        }

        self.replace_state(state);
        let invalid = !self.state.is_empty();
        info!(
            "Client validation {}: {} field(s) with errors",
            if invalid { "failed" } else { "passed" },
            self.state.len()
        );
        invalid
    }

    /// Current messages of a field, in order. Empty when the field is valid.
    pub fn errors_for(&self, path: &FieldPath) -> Vec<&str> {
        self.state.messages(path)
    }

    /// Current errors of a field with their provenance.
    pub fn entries_for(&self, path: &FieldPath) -> &[FieldError] {
        self.state.get(path)
    }

    pub fn has_errors(&self) -> bool {
        !self.state.is_empty()
    }

    pub fn error_state(&self) -> &ErrorState {
        &self.state
    }

    /// Display changes accumulated since the last call.
    pub fn take_changes(&mut self) -> Vec<ErrorChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn dictionary(&self) -> &ValidatorDictionary {
        &self.dictionary
    }

    pub fn render_tree(&self) -> &RenderTree {
        &self.render_tree
    }

    /// Current values as seen by the reader.
    pub fn read_values(&self) -> Value {
        self.reader.read_values(&self.render_tree)
    }

    fn match_server_path(&self, raw: &str) -> PathResult<FieldPath> {
        let path: FieldPath = raw.parse()?;
        if path.is_template() {
            return Err(PathError::malformed(raw, "item placeholder in a concrete path"));
        }
        if !self.dictionary.accepts(&path) {
            return Err(PathError::malformed(raw, "no such field in form"));
        }
        Ok(path)
    }

    /// Message of a violation, if any. Faults become the fallback message.
    fn run_validator(
        &self,
        validator: &BoundValidator,
        value: &Value,
        ctx: &ValidationContext<'_>,
    ) -> Option<String> {
        let type_id = &validator.spec().type_id;
        let fault = match panic::catch_unwind(AssertUnwindSafe(|| validator.run(value, ctx))) {
            Ok(Ok(outcome)) => {
                trace!("Validator '{}' on '{}': {:?}", type_id, ctx.path(), outcome);
                return outcome.message().map(str::to_string);
            }
            Ok(Err(fault)) => fault.message,
            Err(payload) => panic_message(payload.as_ref()),
        };

        error!(
            "Validator '{}' faulted on field '{}': {}",
            type_id,
            ctx.path(),
            fault
        );
        Some(self.catalog.format(&self.options.fallback_message_key, &[]))
    }

    fn replace_state(&mut self, state: ErrorState) {
        let changes = state.changes_since(&self.state);
        self.changes.extend(changes);
        self.state = state;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        return (*text).to_string();
    }
    if let Some(text) = payload.downcast_ref::<String>() {
        return text.clone();
    }
    "validator panicked".to_string()
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("paths", &self.dictionary.len())
            .field("state", &self.state)
            .finish()
    }
}
