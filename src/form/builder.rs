//! Builder for configuring form instances.

use super::core::Form;
use crate::config::{self, RenderOptions, ValidationOptions};
use crate::error::FormResult;
use crate::i18n::MessageCatalog;
use crate::validators::{ValidatorFactory, ValidatorFactoryRegistry};
use serde_json::Value;
use std::sync::Arc;

/// Builder for [`Form`].
///
/// Custom options are one JSON object with up to three sections:
///
/// - `render`: overrides for [`RenderOptions`]
/// - `validation`: overrides for [`ValidationOptions`]
/// - `messages`: catalog entries added to or replacing the built-in messages
///
/// Each component configuration is built once from its defaults and its
/// section.
///
/// # Examples
///
/// ```rust
/// use form_schema::form::FormBuilder;
/// use serde_json::json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let form = FormBuilder::new()
///     .options(json!({
///         "render": {"label_prefix": "signup_"},
///         "messages": {"error_value_required": "Please fill in this field"}
///     }))
///     .build()?;
/// assert_eq!(form.render_options().label_prefix, "signup_");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct FormBuilder {
    options: Value,
    extensions: Vec<(String, Arc<dyn ValidatorFactory>)>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the custom options object.
    pub fn options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    /// Register a validator type, replacing a built-in of the same name.
    pub fn validator<F>(mut self, type_id: impl Into<String>, factory: F) -> Self
    where
        F: ValidatorFactory + 'static,
    {
        self.extensions.push((type_id.into(), Arc::new(factory)));
        self
    }

    /// Build the form.
    ///
    /// # Errors
    ///
    /// `FormError::Config` when a section of the options does not fit the
    /// configuration it targets.
    pub fn build(self) -> FormResult<Form> {
        let catalog = MessageCatalog::new().with_overrides(section(&self.options, "messages"))?;
        let render_options = config::merge(&RenderOptions::default(), section(&self.options, "render"))?;
        let validation_options =
            config::merge(&ValidationOptions::default(), section(&self.options, "validation"))?;
        let registry = ValidatorFactoryRegistry::with_builtins().with_extensions(self.extensions);

        log::debug!(
            "Built form with {} validator types, label prefix '{}'",
            registry.type_ids().len(),
            render_options.label_prefix
        );

        Ok(Form::from_parts(
            registry,
            catalog,
            render_options,
            validation_options,
        ))
    }
}

fn section<'a>(options: &'a Value, name: &str) -> &'a Value {
    options.get(name).unwrap_or(&Value::Null)
}

impl std::fmt::Debug for FormBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let extensions: Vec<&str> = self.extensions.iter().map(|(id, _)| id.as_str()).collect();
        f.debug_struct("FormBuilder")
            .field("options", &self.options)
            .field("extensions", &extensions)
            .finish()
    }
}
