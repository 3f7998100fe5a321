//! Form facade tying compilation and validation together.
//!
//! A [`Form`] is configured once with [`FormBuilder`], rendered from a
//! [`FormDocument`](crate::schema::FormDocument), and then validated as the
//! user edits it.
//!
//! # Examples
//!
//! ```rust
//! use form_schema::engine::SharedValues;
//! use form_schema::form::Form;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let values = SharedValues::new(json!({"email": "alice@"}));
//! let mut form = Form::new();
//! let had_errors = form.render_json(
//!     r#"{
//!         "main_form": {
//!             "type": "object",
//!             "children": {"email": {"type": "string", "validators": ["required", "email"]}}
//!         },
//!         "errors": {"email": ["Address already registered"]}
//!     }"#,
//!     values.clone(),
//! )?;
//! assert!(had_errors);
//! assert_eq!(form.errors_for(&"email".parse()?)?, vec!["Address already registered"]);
//!
//! values.set(json!({"email": "alice@example.com"}));
//! assert!(!form.validate()?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;


pub use self::core::Form;
pub use builder::FormBuilder;
