//! Form schema compiler and dual-mode validation engine.
//!
//! Compiles a declarative JSON form schema into a render tree for the UI
//! layer and a dictionary of validator functions keyed by field path, then
//! keeps a per-field error state in sync with the current form values.
//!
//! # Core Components
//!
//! - [`SchemaCompiler`] - Compiles a [`SchemaNode`] into a [`CompiledForm`]
//! - [`ValidatorFactoryRegistry`] - Validator type identifiers to factories
//! - [`ValidationEngine`] - Reconciles server errors and runs client validation
//! - [`MessageCatalog`] - Localized message templates
//! - [`Form`] - Facade combining all of the above
//!
//! # Quick Start
//!
//! ```rust
//! use form_schema::{Form, ValueSnapshot};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut form = Form::new();
//! form.render_json(
//!     r#"{"main_form": {
//!         "type": "object",
//!         "children": {
//!             "name": {"type": "string", "validators": ["required"]},
//!             "age": {"type": "integer", "validators": [{"type": "min", "params": 18}]}
//!         }
//!     }}"#,
//!     ValueSnapshot(json!({"name": "", "age": 15})),
//! )?;
//!
//! assert!(form.validate()?);
//! assert_eq!(form.errors_for(&"age".parse()?)?, vec!["Must be greater than or equal to 18"]);
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod i18n;
pub mod path;
pub mod schema;
pub mod validators;

// Re-export commonly used types for convenience
pub use compiler::{CompiledForm, RenderNode, RenderTree, SchemaCompiler, ValidatorDictionary};
pub use config::{RenderOptions, ValidationOptions};
pub use engine::{
    ErrorChange, ErrorState, ServerErrors, SharedValues, ValidationEngine, ValueReader,
    ValueSnapshot,
};
pub use error::{CompileError, FormError, FormResult, PathError, ValidatorFault};
pub use form::{Form, FormBuilder};
pub use i18n::MessageCatalog;
pub use path::{FieldPath, PathSegment};
pub use schema::{FormDocument, NodeType, SchemaNode, ValidatorSpec};
pub use validators::{
    ValidationContext, ValidationOutcome, ValidatorFactory, ValidatorFactoryRegistry, ValidatorFn,
};
