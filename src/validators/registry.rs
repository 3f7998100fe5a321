//! Registry of validator factories keyed by type identifier.
//!
//! The registry is configured once from the built-in validator types plus any
//! caller-supplied extensions, merged by identifier with the caller's factory
//! taking precedence.

use super::{ValidatorFactory, ValidatorFn, ValidatorKind, builtin};
use crate::error::{CompileError, CompileResult};
use crate::i18n::MessageCatalog;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maps validator type identifiers to the factories that build them.
#[derive(Clone, Default)]
pub struct ValidatorFactoryRegistry {
    factories: HashMap<String, Arc<dyn ValidatorFactory>>,
}

impl ValidatorFactoryRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in validator type.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in ValidatorKind::BUILTIN {
            if let Some(factory) = builtin::factory_for(kind) {
                registry.register(kind.as_str(), factory);
            }
        }
        registry
    }

    /// Merge caller extensions into this registry; extensions win.
    pub fn with_extensions<I>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = (String, Arc<dyn ValidatorFactory>)>,
    {
        for (type_id, factory) in extensions {
            if self.factories.contains_key(&type_id) {
                log::debug!("Validator type '{}' overridden by extension", type_id);
            }
            self.factories.insert(type_id, factory);
        }
        self
    }

    /// Register a factory, replacing any previous one for `type_id`.
    pub fn register<F>(&mut self, type_id: impl Into<String>, factory: F)
    where
        F: ValidatorFactory + 'static,
    {
        self.factories.insert(type_id.into(), Arc::new(factory));
    }

    /// Build a validator of type `type_id`.
    ///
    /// # Errors
    ///
    /// `UnknownValidatorType` when no factory is registered for `type_id`,
    /// `InvalidValidatorParams` when the factory rejects `params`. The `path`
    /// of the returned error is empty; the compiler attributes it.
    pub fn build(
        &self,
        type_id: &str,
        params: &Value,
        catalog: &MessageCatalog,
    ) -> CompileResult<ValidatorFn> {
        let factory = self
            .factories
            .get(type_id)
            .ok_or_else(|| CompileError::unknown_validator(type_id, ""))?;
        factory
            .build(params, catalog)
            .map_err(|details| CompileError::invalid_params(type_id, "", details))
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.factories.contains_key(type_id)
    }

    /// Registered type identifiers, sorted.
    pub fn type_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl fmt::Debug for ValidatorFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorFactoryRegistry")
            .field("types", &self.type_ids())
            .finish()
    }
}
