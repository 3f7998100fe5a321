//! Localized message lookup.
//!
//! [`MessageCatalog`] maps message keys to templates. Templates use positional
//! placeholders `{0}`, `{1}`, … filled by [`MessageCatalog::format`].

use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;

/// Keys of the built-in messages.
pub mod keys {
    pub const VALUE_REQUIRED: &str = "error_value_required";
    pub const LENGTH_TOO_SHORT: &str = "error_length_too_short";
    pub const LENGTH_TOO_LONG: &str = "error_length_too_long";
    pub const NUMBER_GT: &str = "error_number_gt";
    pub const NUMBER_GE: &str = "error_number_ge";
    pub const NUMBER_LT: &str = "error_number_lt";
    pub const NUMBER_LE: &str = "error_number_le";
    pub const NUMBER_INVALID: &str = "error_number_invalid";
    pub const PATTERN_MISMATCH: &str = "error_pattern_mismatch";
    pub const EMAIL_INVALID: &str = "error_email_invalid";
    pub const ONE_OF: &str = "error_one_of";
    pub const FIELDS_NOT_EQUAL: &str = "error_fields_not_equal";
    pub const DATE_INVALID: &str = "error_date_invalid";
    pub const VALIDATOR_FAULT: &str = "error_validator_fault";
}

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    (keys::VALUE_REQUIRED, "Value is required"),
    (keys::LENGTH_TOO_SHORT, "Too short; minimum length: {0}"),
    (keys::LENGTH_TOO_LONG, "Too long; maximum length: {0}"),
    (keys::NUMBER_GT, "Must be greater than {0}"),
    (keys::NUMBER_GE, "Must be greater than or equal to {0}"),
    (keys::NUMBER_LT, "Must be less than {0}"),
    (keys::NUMBER_LE, "Must be less than or equal to {0}"),
    (keys::NUMBER_INVALID, "Must be a number"),
    (keys::PATTERN_MISMATCH, "Does not match the required format"),
    (keys::EMAIL_INVALID, "Must be a valid email address"),
    (keys::ONE_OF, "Must be one of: {0}"),
    (keys::FIELDS_NOT_EQUAL, "Must match {0}"),
    (keys::DATE_INVALID, "Must be a date in the format {0}"),
    (keys::VALIDATOR_FAULT, "This value could not be validated"),
];

/// Key → localized template lookup used to produce error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Catalog holding the built-in English messages.
    pub fn new() -> Self {
        let messages = DEFAULT_MESSAGES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { messages }
    }

    pub fn empty() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    /// Copy of this catalog with the entries of a JSON object applied on top.
    pub fn with_overrides(&self, overrides: &Value) -> ConfigResult<Self> {
        let mut catalog = self.clone();
        let Some(entries) = overrides.as_object() else {
            if overrides.is_null() {
                return Ok(catalog);
            }
            return Err(ConfigError::invalid_override(
                "messages",
                "expected an object of message templates",
            ));
        };

        for (key, value) in entries {
            let text = value.as_str().ok_or_else(|| {
                ConfigError::invalid_override("messages", format!("message '{key}' is not a string"))
            })?;
            catalog.insert(key.clone(), text);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(key.into(), text.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Localized text for `key` with positional arguments substituted.
    ///
    /// An unknown key is returned verbatim.
    pub fn format(&self, key: &str, args: &[&dyn Display]) -> String {
        let Some(template) = self.get(key) else {
            log::debug!("No message for key '{}'", key);
            return key.to_string();
        };

        args.iter()
            .enumerate()
            .fold(template.to_string(), |text, (position, arg)| {
                text.replace(&format!("{{{position}}}"), &arg.to_string())
            })
    }

    /// Like [`format`](Self::format), for arguments carried as JSON values.
    pub fn format_json(&self, key: &str, args: &[Value]) -> String {
        let rendered: Vec<String> = args
            .iter()
            .map(|arg| match arg {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        let refs: Vec<&dyn Display> = rendered.iter().map(|s| s as &dyn Display).collect();
        self.format(key, &refs)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}
