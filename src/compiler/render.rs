//! Render tree produced by compilation.
//!
//! The render tree mirrors the schema with every node bound to its
//! [`FieldPath`] and annotated with render metadata. It is handed to the UI
//! layer and never modified by the core after compilation.

use crate::path::{FieldPath, PathSegment};
use crate::schema::{NodeType, SchemaNode, ValidatorSpec};
use serde::Serialize;
use serde_json::{Map, Value};

/// A compiled schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    /// Path of the node; array item templates contain `[*]`
    pub path: FieldPath,
    /// Key within the parent object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Message key of the label
    pub label_key: String,
    pub widget: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Declared validators, for client-side decoration such as a required marker
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<ValidatorSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
    /// Compiled item template of an array node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Box<RenderNode>>,
    #[serde(skip)]
    pub(crate) item_schema: Option<Box<SchemaNode>>,
}

impl RenderNode {
    /// Item sub-schema of an array node, kept for re-compiling elements.
    pub fn item_schema(&self) -> Option<&SchemaNode> {
        self.item_schema.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.validators.iter().any(|spec| spec.type_id == "required")
    }

    pub fn child(&self, key: &str) -> Option<&RenderNode> {
        self.children
            .iter()
            .find(|child| child.key.as_deref() == Some(key))
    }

    /// Value of this node when the user has not touched it.
    pub fn empty_value(&self) -> Value {
        match self.node_type {
            NodeType::Object => Value::Object(
                self.children
                    .iter()
                    .filter_map(|child| Some((child.key.clone()?, child.empty_value())))
                    .collect::<Map<String, Value>>(),
            ),
            other => other.empty_value(),
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a RenderNode>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
        if let Some(item) = &self.item {
            item.collect(out);
        }
    }
}

/// Root of a compiled form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderTree {
    root: RenderNode,
}

impl RenderTree {
    pub fn new(root: RenderNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &RenderNode {
        &self.root
    }

    /// Node at `path`.
    ///
    /// Array indices and the item placeholder both resolve to the item
    /// template, so a concrete element path finds the node it was compiled
    /// from.
    pub fn find(&self, path: &FieldPath) -> Option<&RenderNode> {
        path.segments()
            .iter()
            .try_fold(&self.root, |node, segment| match segment {
                PathSegment::Key(key) => node.child(key),
                PathSegment::Index(_) | PathSegment::Item => node.item.as_deref(),
            })
    }

    /// Every node, depth first, item templates included.
    pub fn nodes(&self) -> Vec<&RenderNode> {
        let mut out = Vec::new();
        self.root.collect(&mut out);
        out
    }

    /// Value tree of an untouched form.
    pub fn empty_values(&self) -> Value {
        self.root.empty_value()
    }
}
