//! The form facade.

use super::builder::FormBuilder;
use crate::compiler::{CompiledForm, RenderTree, SchemaCompiler};
use crate::config::{RenderOptions, ValidationOptions};
use crate::engine::{ErrorChange, ServerErrors, ValidationEngine, ValueReader};
use crate::error::{FormError, FormResult, PathError};
use crate::i18n::MessageCatalog;
use crate::path::FieldPath;
use crate::schema::FormDocument;
use crate::validators::ValidatorFactoryRegistry;
use log::info;
use serde_json::Value;
use std::sync::Arc;

/// A form: configuration, and once rendered, its compiled schema and engine.
///
/// A form is configured once through [`FormBuilder`] and rendered from a
/// [`FormDocument`]. Rendering again replaces the previous schema and error
/// state.
pub struct Form {
    registry: ValidatorFactoryRegistry,
    catalog: MessageCatalog,
    render_options: RenderOptions,
    validation_options: ValidationOptions,
    engine: Option<ValidationEngine>,
}

impl Form {
    /// Form with default configuration and the built-in validators.
    pub fn new() -> Self {
        Self::from_parts(
            ValidatorFactoryRegistry::with_builtins(),
            MessageCatalog::new(),
            RenderOptions::default(),
            ValidationOptions::default(),
        )
    }

    pub fn builder() -> FormBuilder {
        FormBuilder::new()
    }

    pub(crate) fn from_parts(
        registry: ValidatorFactoryRegistry,
        catalog: MessageCatalog,
        render_options: RenderOptions,
        validation_options: ValidationOptions,
    ) -> Self {
        Self {
            registry,
            catalog,
            render_options,
            validation_options,
            engine: None,
        }
    }

    /// Compiler bound to this form's registry, catalog and render options.
    pub fn compiler(&self) -> SchemaCompiler<'_> {
        SchemaCompiler::new(&self.registry, &self.catalog, &self.render_options)
    }

    /// Compile the document's form and show the errors it carries.
    ///
    /// Returns what [`ValidationEngine::process_server`] returns for the
    /// document's errors: `true` if any of them matched a field.
    ///
    /// # Errors
    ///
    /// `FormError::Compile` when the schema does not compile. The previously
    /// rendered form, if any, is kept.
    pub fn render<R>(&mut self, document: &FormDocument, reader: R) -> FormResult<bool>
    where
        R: ValueReader + 'static,
    {
        let CompiledForm {
            render_tree,
            dictionary,
        } = self.compiler().compile(&document.main_form)?;

        let mut engine = ValidationEngine::new(dictionary, Arc::new(render_tree), reader)
            .with_catalog(self.catalog.clone())
            .with_options(self.validation_options.clone());
        let had_errors = engine.process_server(&document.errors);

        info!(
            "Rendered form with {} fields, {} server error field(s)",
            engine.dictionary().len(),
            engine.error_state().len()
        );
        self.engine = Some(engine);
        Ok(had_errors)
    }

    /// Parse a form document and render it.
    pub fn render_json<R>(&mut self, document: &str, reader: R) -> FormResult<bool>
    where
        R: ValueReader + 'static,
    {
        let document = FormDocument::from_json_str(document)?;
        self.render(&document, reader)
    }

    /// Show errors from a later server round trip.
    pub fn process_server(&mut self, errors: &ServerErrors) -> FormResult<bool> {
        Ok(self.engine_mut()?.process_server(errors))
    }

    /// Validate the current values. Returns `true` if the form is invalid.
    pub fn validate(&mut self) -> FormResult<bool> {
        Ok(self.engine_mut()?.process_client())
    }

    /// Current value tree.
    pub fn value(&self) -> FormResult<Value> {
        Ok(self.engine()?.read_values())
    }

    pub fn errors_for(&self, path: &FieldPath) -> FormResult<Vec<&str>> {
        Ok(self.engine()?.errors_for(path))
    }

    pub fn is_valid(&self) -> FormResult<bool> {
        Ok(!self.engine()?.has_errors())
    }

    pub fn take_changes(&mut self) -> FormResult<Vec<ErrorChange>> {
        Ok(self.engine_mut()?.take_changes())
    }

    pub fn render_tree(&self) -> Option<&RenderTree> {
        self.engine.as_ref().map(ValidationEngine::render_tree)
    }

    /// Compile the element `index` of the array at `array`, for a UI that is
    /// adding it.
    ///
    /// Validation picks up new elements on the next pass by itself; the
    /// returned fragment is what the UI renders.
    ///
    /// # Errors
    ///
    /// `FormError::Path` when `array` names no field or is a template path,
    /// `FormError::NotAnArray` when it names a field that is not an array.
    pub fn add_array_item(&self, array: &FieldPath, index: usize) -> FormResult<CompiledForm> {
        let tree = self.engine()?.render_tree();
        if array.is_template() {
            return Err(PathError::malformed(
                array.to_string(),
                "array elements are added under a concrete path",
            )
            .into());
        }
        let node = tree
            .find(array)
            .ok_or_else(|| PathError::malformed(array.to_string(), "no such field in form"))?;
        let item_schema = node.item_schema().ok_or_else(|| FormError::NotAnArray {
            path: array.to_string(),
        })?;

        Ok(self.compiler().compile_array_item(array, item_schema, index)?)
    }

    pub fn engine(&self) -> FormResult<&ValidationEngine> {
        self.engine.as_ref().ok_or(FormError::NotRendered)
    }

    pub fn engine_mut(&mut self) -> FormResult<&mut ValidationEngine> {
        self.engine.as_mut().ok_or(FormError::NotRendered)
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    pub fn validation_options(&self) -> &ValidationOptions {
        &self.validation_options
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("registry", &self.registry)
            .field("render_options", &self.render_options)
            .field("validation_options", &self.validation_options)
            .field("engine", &self.engine)
            .finish()
    }
}
