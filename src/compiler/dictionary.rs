//! Path → validators mapping produced by compilation.

use crate::error::ValidatorResult;
use crate::path::FieldPath;
use crate::schema::ValidatorSpec;
use crate::validators::{ValidationContext, ValidationOutcome, ValidatorFn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A compiled validator together with the declaration it was built from.
///
/// Equality compares declarations only; functions built from equal
/// declarations are functionally equivalent.
#[derive(Clone)]
pub struct BoundValidator {
    spec: ValidatorSpec,
    func: ValidatorFn,
}

impl BoundValidator {
    pub fn new(spec: ValidatorSpec, func: ValidatorFn) -> Self {
        Self { spec, func }
    }

    pub fn spec(&self) -> &ValidatorSpec {
        &self.spec
    }

    pub fn run(&self, value: &Value, ctx: &ValidationContext<'_>) -> ValidatorResult<ValidationOutcome> {
        (self.func)(value, ctx)
    }
}

impl PartialEq for BoundValidator {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec
    }
}

impl fmt::Debug for BoundValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoundValidator").field(&self.spec).finish()
    }
}

/// Validators per field path, in declaration order.
///
/// Every compiled node has an entry, possibly with no validators, so that
/// server errors can be attached to any field of the form. Paths below an
/// array are templates containing `[*]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatorDictionary {
    entries: BTreeMap<FieldPath, Vec<BoundValidator>>,
}

impl ValidatorDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, path: FieldPath, validators: Vec<BoundValidator>) {
        self.entries.insert(path, validators);
    }

    pub fn get(&self, path: &FieldPath) -> Option<&[BoundValidator]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Entry that governs a concrete path: an exact entry, or the template
    /// the path is an instance of.
    pub fn resolve(&self, path: &FieldPath) -> Option<(&FieldPath, &[BoundValidator])> {
        if let Some((template, validators)) = self.entries.get_key_value(path) {
            return Some((template, validators.as_slice()));
        }
        self.entries
            .iter()
            .find(|(template, _)| template.is_template() && path.matches(template))
            .map(|(template, validators)| (template, validators.as_slice()))
    }

    pub fn accepts(&self, path: &FieldPath) -> bool {
        self.resolve(path).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &[BoundValidator])> {
        self.entries.iter().map(|(path, v)| (path, v.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.entries.keys()
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of validators across all paths.
    pub fn validator_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
