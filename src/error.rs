//! Error types for form compilation and validation.
//!
//! Compile-time errors abort a compilation with no partial output. Path errors
//! are produced while ingesting server error payloads and are recoverable: the
//! offending entry is dropped. Validator faults are converted into field
//! violations by the engine.

/// Main error type for form operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The schema could not be compiled
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// A field path could not be parsed or resolved
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Custom options could not be merged into a component configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An operation that needs a rendered form was called before `render`
    #[error("Form has not been rendered yet")]
    NotRendered,

    /// A render-tree node was expected to be an array
    #[error("Field '{path}' is not an array")]
    NotAnArray { path: String },
}

/// Errors raised while compiling a schema.
///
/// Any of these aborts the whole compilation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CompileError {
    /// The schema references a validator type with no registered factory
    #[error("Unknown validator type '{type_id}' at field '{path}'")]
    UnknownValidatorType { type_id: String, path: String },

    /// A registered factory rejected the parameters given in the schema
    #[error("Invalid parameters for validator '{type_id}' at field '{path}': {details}")]
    InvalidValidatorParams {
        type_id: String,
        path: String,
        details: String,
    },

    /// A child key is empty or contains a path delimiter
    #[error("Invalid field key '{key}' under '{path}': keys must be non-empty and free of '.', '[' and ']'")]
    InvalidFieldKey { key: String, path: String },
}

/// Errors raised while parsing or matching field paths.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    /// The path text is not a valid encoding, or names no compiled field
    #[error("Malformed field path '{path}': {details}")]
    MalformedFieldPath { path: String, details: String },
}

/// A validator failed to produce an outcome.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Validator fault: {message}")]
pub struct ValidatorFault {
    pub message: String,
}

/// Errors raised while building component configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An override value does not fit the option it targets
    #[error("Invalid override for '{section}': {details}")]
    InvalidOverride { section: String, details: String },

    /// Defaults could not be converted to or from JSON
    #[error("Configuration serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CompileError {
    /// Create an unknown validator type error
    pub fn unknown_validator(type_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnknownValidatorType {
            type_id: type_id.into(),
            path: path.into(),
        }
    }

    /// Create an invalid validator parameters error
    pub fn invalid_params(
        type_id: impl Into<String>,
        path: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::InvalidValidatorParams {
            type_id: type_id.into(),
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create an invalid field key error
    pub fn invalid_key(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self::InvalidFieldKey {
            key: key.into(),
            path: path.into(),
        }
    }

    /// The same error attributed to the field at `at`.
    pub fn at(self, at: impl Into<String>) -> Self {
        let at = at.into();
        match self {
            Self::UnknownValidatorType { type_id, .. } => Self::UnknownValidatorType { type_id, path: at },
            Self::InvalidValidatorParams { type_id, details, .. } => Self::InvalidValidatorParams {
                type_id,
                path: at,
                details,
            },
            Self::InvalidFieldKey { key, .. } => Self::InvalidFieldKey { key, path: at },
        }
    }
}

impl PathError {
    /// Create a malformed field path error
    pub fn malformed(path: impl Into<String>, details: impl Into<String>) -> Self {
        Self::MalformedFieldPath {
            path: path.into(),
            details: details.into(),
        }
    }
}

impl ValidatorFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Create an invalid override error
    pub fn invalid_override(section: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidOverride {
            section: section.into(),
            details: details.into(),
        }
    }
}

// Result type aliases for convenience
pub type FormResult<T> = Result<T, FormError>;
pub type CompileResult<T> = Result<T, CompileError>;
pub type PathResult<T> = Result<T, PathError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ValidatorResult<T> = Result<T, ValidatorFault>;
