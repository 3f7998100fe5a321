//! Dual-mode validation of rendered forms.
//!
//! A [`ValidationEngine`] holds the current [`ErrorState`] of one form and
//! updates it in two ways:
//!
//! - [`process_server`](ValidationEngine::process_server) replaces it with
//!   errors returned by a server round trip. These are shown once.
//! - [`process_client`](ValidationEngine::process_client) re-validates the
//!   current values through the compiled validators and replaces it with the
//!   result, dropping any server errors.
//!
//! Values are pulled through a [`ValueReader`] at the start of each client
//! pass.
//!
//! # Examples
//!
//! ```rust
//! use form_schema::compiler::SchemaCompiler;
//! use form_schema::config::RenderOptions;
//! use form_schema::engine::{ValidationEngine, ValueSnapshot};
//! use form_schema::i18n::MessageCatalog;
//! use form_schema::schema::SchemaNode;
//! use form_schema::validators::ValidatorFactoryRegistry;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaNode::from_json(json!({
//!     "type": "object",
//!     "children": {"name": {"type": "string", "validators": ["required"]}}
//! }))?;
//! let registry = ValidatorFactoryRegistry::with_builtins();
//! let catalog = MessageCatalog::new();
//! let options = RenderOptions::default();
//! let compiled = SchemaCompiler::new(&registry, &catalog, &options).compile(&schema)?;
//!
//! let mut engine = ValidationEngine::new(
//!     compiled.dictionary,
//!     Arc::new(compiled.render_tree),
//!     ValueSnapshot(json!({"name": ""})),
//! );
//! assert!(engine.process_client());
//! assert_eq!(engine.errors_for(&"name".parse()?), vec!["Value is required"]);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod reader;
pub mod server;
pub mod state;


pub use self::core::ValidationEngine;
pub use reader::{SharedValues, ValueReader, ValueSnapshot};
pub use server::{ServerErrors, ServerMessage};
pub use state::{ErrorChange, ErrorState, FieldError, Provenance};
