//! Field paths identifying nodes in a form tree.
//!
//! A [`FieldPath`] is a sequence of [`PathSegment`]s. Its text encoding is the
//! wire contract used by server error payloads:
//!
//! - object keys are joined with `.`: `address.street`
//! - array indices are bracketed: `phones[0].number`, `grid[1][2]`
//! - the array item placeholder is `[*]`: `phones[*].number`
//! - the root is the empty string
//!
//! Keys must be non-empty and must not contain `.`, `[` or `]`.

use crate::error::{PathError, PathResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const DELIMITERS: [char; 3] = ['.', '[', ']'];

/// Whether `key` can be a [`PathSegment::Key`] that survives the text encoding.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(DELIMITERS)
}

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Named child of an object node
    Key(String),
    /// Concrete element of an array node
    Index(usize),
    /// Placeholder for any element of an array node
    Item,
}

/// Stable identifier of a node within a form tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path, identifying the form root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path of an object child.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with(PathSegment::Key(key.into()))
    }

    /// Path of a concrete array element.
    pub fn index(&self, index: usize) -> Self {
        self.with(PathSegment::Index(index))
    }

    /// Path of the array item template.
    pub fn item(&self) -> Self {
        self.with(PathSegment::Item)
    }

    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Whether the path contains an item placeholder.
    pub fn is_template(&self) -> bool {
        self.segments.iter().any(|s| *s == PathSegment::Item)
    }

    /// Whether this concrete path is an instance of `template`.
    ///
    /// `Item` in the template matches any `Index`; every other segment must be
    /// equal.
    pub fn matches(&self, template: &FieldPath) -> bool {
        self.segments.len() == template.segments.len()
            && self
                .segments
                .iter()
                .zip(&template.segments)
                .all(|(concrete, pattern)| match (concrete, pattern) {
                    (PathSegment::Index(_), PathSegment::Item) => true,
                    (a, b) => a == b,
                })
    }

    /// Look up the value at this path in a value tree.
    ///
    /// Returns `None` when any step is missing. Placeholders never resolve.
    pub fn lookup<'a>(&self, values: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(values, |current, segment| match segment {
                PathSegment::Key(key) => current.as_object()?.get(key),
                PathSegment::Index(index) => current.as_array()?.get(*index),
                PathSegment::Item => None,
            })
    }

    /// Expand a template against a value tree.
    ///
    /// Each `Item` segment produces one concrete path per element of the array
    /// found at that point; a missing or non-array value produces none. Key
    /// segments always expand, so a field missing from the tree still yields
    /// its path.
    pub fn instantiate(&self, values: &Value) -> Vec<FieldPath> {
        let mut out = Vec::new();
        expand(&self.segments, Some(values), FieldPath::root(), &mut out);
        out
    }
}

fn expand(rest: &[PathSegment], current: Option<&Value>, prefix: FieldPath, out: &mut Vec<FieldPath>) {
    let Some((segment, tail)) = rest.split_first() else {
        out.push(prefix);
        return;
    };

    match segment {
        PathSegment::Key(key) => {
            let next = current.and_then(|v| v.as_object()).and_then(|o| o.get(key));
            expand(tail, next, prefix.key(key.clone()), out);
        }
        PathSegment::Index(index) => {
            let next = current.and_then(|v| v.as_array()).and_then(|a| a.get(*index));
            expand(tail, next, prefix.index(*index), out);
        }
        PathSegment::Item => {
            if let Some(elements) = current.and_then(|v| v.as_array()) {
                for (index, element) in elements.iter().enumerate() {
                    expand(tail, Some(element), prefix.index(index), out);
                }
            }
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if position == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Item => write!(f, "[*]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> PathResult<Self> {
        let mut segments = Vec::new();
        let mut chars = s.char_indices().peekable();
        let mut expect_key = true;

        while let Some(&(start, c)) = chars.peek() {
            match c {
                '[' => {
                    chars.next();
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some((_, ']')) => break,
                            Some((_, ch)) => inner.push(ch),
                            None => return Err(PathError::malformed(s, "unterminated '['")),
                        }
                    }
                    let segment = if inner == "*" {
                        PathSegment::Item
                    } else {
                        inner.parse::<usize>().map(PathSegment::Index).map_err(|_| {
                            PathError::malformed(s, format!("invalid array index '{inner}'"))
                        })?
                    };
                    segments.push(segment);
                    expect_key = false;
                }
                '.' => {
                    if segments.is_empty() {
                        return Err(PathError::malformed(s, "leading '.'"));
                    }
                    chars.next();
                    expect_key = true;
                    if matches!(chars.peek(), None | Some((_, '.')) | Some((_, '['))) {
                        return Err(PathError::malformed(s, "empty key"));
                    }
                }
                ']' => return Err(PathError::malformed(s, "unexpected ']'")),
                _ => {
                    if !expect_key {
                        return Err(PathError::malformed(
                            s,
                            format!("missing '.' before key at offset {start}"),
                        ));
                    }
                    let mut key = String::new();
                    while let Some(&(_, ch)) = chars.peek() {
                        if DELIMITERS.contains(&ch) {
                            break;
                        }
                        key.push(ch);
                        chars.next();
                    }
                    segments.push(PathSegment::Key(key));
                    expect_key = false;
                }
            }
        }

        Ok(Self { segments })
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
