//! Form schema definitions.
//!
//! # Key Types
//!
//! - [`SchemaNode`] - A node of the form tree with type, metadata and validators
//! - [`ValidatorSpec`] - A validator declaration resolved at compile time
//! - [`FormDocument`] - Schema plus server errors as delivered by the backend
//!
//! # Examples
//!
//! ```rust
//! use form_schema::schema::{NodeType, SchemaNode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaNode::from_json_str(r#"{
//!     "type": "object",
//!     "children": {
//!         "name": {"type": "string", "validators": ["required"]}
//!     }
//! }"#)?;
//! assert_eq!(schema.child("name").unwrap().node_type, NodeType::String);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod types;


pub use loader::FormDocument;
pub use types::{NodeType, SchemaNode, ValidatorSpec};
