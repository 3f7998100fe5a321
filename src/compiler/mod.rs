//! Compilation of form schemas.
//!
//! [`SchemaCompiler::compile`] walks a schema once and produces a
//! [`CompiledForm`]: the [`RenderTree`] consumed by the UI layer and the
//! [`ValidatorDictionary`] consumed by the validation engine.
//!
//! # Examples
//!
//! ```rust
//! use form_schema::compiler::SchemaCompiler;
//! use form_schema::config::RenderOptions;
//! use form_schema::i18n::MessageCatalog;
//! use form_schema::schema::SchemaNode;
//! use form_schema::validators::ValidatorFactoryRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaNode::from_json_str(r#"{
//!     "type": "object",
//!     "children": {"age": {"type": "integer", "validators": [{"type": "min", "params": 18}]}}
//! }"#)?;
//!
//! let registry = ValidatorFactoryRegistry::with_builtins();
//! let catalog = MessageCatalog::new();
//! let options = RenderOptions::default();
//! let compiled = SchemaCompiler::new(&registry, &catalog, &options).compile(&schema)?;
//! assert_eq!(compiled.dictionary.validator_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod dictionary;
pub mod render;


pub use self::core::{CompiledForm, SchemaCompiler};
pub use dictionary::{BoundValidator, ValidatorDictionary};
pub use render::{RenderNode, RenderTree};
