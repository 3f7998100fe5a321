//! Validator functions and the factories that build them.
//!
//! A validator is a pure function of a field value and a
//! [`ValidationContext`] returning a [`ValidationOutcome`]. Validators never
//! write error state; the engine collects their outcomes.
//!
//! Validators are built from schema declarations by [`ValidatorFactory`]
//! implementations registered in a [`ValidatorFactoryRegistry`] under a type
//! identifier.

pub mod builtin;
pub mod registry;

pub use registry::ValidatorFactoryRegistry;

use crate::error::ValidatorResult;
use crate::i18n::MessageCatalog;
use crate::path::FieldPath;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Result of running one validator against one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Violation(String),
}

impl ValidationOutcome {
    pub fn violation(message: impl Into<String>) -> Self {
        Self::Violation(message.into())
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violation(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Violation(message) => Some(message),
        }
    }
}

/// Read-only view of the form values available to a validator.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    path: &'a FieldPath,
    values: &'a Value,
}

impl<'a> ValidationContext<'a> {
    pub fn new(path: &'a FieldPath, values: &'a Value) -> Self {
        Self { path, values }
    }

    /// Concrete path of the field being validated.
    pub fn path(&self) -> &'a FieldPath {
        self.path
    }

    /// The whole value tree.
    pub fn root(&self) -> &'a Value {
        self.values
    }

    /// Value of a sibling field in the same object.
    pub fn sibling(&self, key: &str) -> Option<&'a Value> {
        let parent = self.path.parent()?;
        parent.key(key).lookup(self.values)
    }

    /// Value at an absolute path.
    pub fn value_at(&self, path: &FieldPath) -> Option<&'a Value> {
        path.lookup(self.values)
    }

    /// Resolve a field reference: a bare key names a sibling, anything else
    /// is parsed as an absolute path.
    pub fn resolve(&self, reference: &str) -> Option<&'a Value> {
        if !reference.contains(['.', '[']) {
            return self.sibling(reference);
        }
        let path: FieldPath = reference.parse().ok()?;
        self.value_at(&path)
    }
}

/// A compiled validator.
pub type ValidatorFn =
    Arc<dyn Fn(&Value, &ValidationContext<'_>) -> ValidatorResult<ValidationOutcome> + Send + Sync>;

/// Wrap a closure as a [`ValidatorFn`].
pub fn validator_fn<F>(f: F) -> ValidatorFn
where
    F: Fn(&Value, &ValidationContext<'_>) -> ValidatorResult<ValidationOutcome> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Builds validators of one type from schema parameters.
///
/// Factories must be pure: the same parameters and catalog always produce
/// functionally equivalent validators. Rejected parameters are reported as a
/// human-readable detail string.
pub trait ValidatorFactory: Send + Sync {
    fn build(&self, params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String>;
}

impl<F> ValidatorFactory for F
where
    F: Fn(&Value, &MessageCatalog) -> Result<ValidatorFn, String> + Send + Sync,
{
    fn build(&self, params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
        self(params, catalog)
    }
}

/// Validator type identifiers known to the crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    Required,
    MinLength,
    MaxLength,
    Gt,
    Ge,
    Lt,
    Le,
    Min,
    Max,
    Pattern,
    Email,
    OneOf,
    EqualsField,
    Date,
    /// A caller-registered type
    Custom(String),
}

impl ValidatorKind {
    /// Every built-in kind.
    pub const BUILTIN: &'static [ValidatorKind] = &[
        ValidatorKind::Required,
        ValidatorKind::MinLength,
        ValidatorKind::MaxLength,
        ValidatorKind::Gt,
        ValidatorKind::Ge,
        ValidatorKind::Lt,
        ValidatorKind::Le,
        ValidatorKind::Min,
        ValidatorKind::Max,
        ValidatorKind::Pattern,
        ValidatorKind::Email,
        ValidatorKind::OneOf,
        ValidatorKind::EqualsField,
        ValidatorKind::Date,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
            Self::Email => "email",
            Self::OneOf => "oneOf",
            Self::EqualsField => "equalsField",
            Self::Date => "date",
            Self::Custom(id) => id,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl FromStr for ValidatorKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::BUILTIN
            .iter()
            .find(|kind| kind.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Self::Custom(s.to_string())))
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl crate::schema::ValidatorSpec {
    pub fn kind(&self) -> ValidatorKind {
        match self.type_id.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}
