//! Boundary to the live UI: reading the current form values.

use crate::compiler::RenderTree;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Supplies the current value tree of a rendered form.
///
/// The returned tree is shaped like the render tree and holds every value as
/// the user currently sees it, uncommitted input included. Reading is
/// synchronous and total: untouched fields carry a type-appropriate empty
/// value (see [`RenderTree::empty_values`]).
pub trait ValueReader {
    fn read_values(&self, tree: &RenderTree) -> Value;
}

impl<F> ValueReader for F
where
    F: Fn(&RenderTree) -> Value,
{
    fn read_values(&self, tree: &RenderTree) -> Value {
        self(tree)
    }
}

/// A fixed value tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSnapshot(pub Value);

impl ValueReader for ValueSnapshot {
    fn read_values(&self, _tree: &RenderTree) -> Value {
        self.0.clone()
    }
}

/// A value tree the UI layer updates in place between validation passes.
///
/// Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct SharedValues {
    inner: Rc<RefCell<Value>>,
}

impl SharedValues {
    pub fn new(values: Value) -> Self {
        Self {
            inner: Rc::new(RefCell::new(values)),
        }
    }

    /// Replace the whole tree.
    pub fn set(&self, values: Value) {
        *self.inner.borrow_mut() = values;
    }

    /// Edit the tree in place.
    pub fn update<F: FnOnce(&mut Value)>(&self, edit: F) {
        edit(&mut self.inner.borrow_mut());
    }

    pub fn get(&self) -> Value {
        self.inner.borrow().clone()
    }
}

impl ValueReader for SharedValues {
    fn read_values(&self, tree: &RenderTree) -> Value {
        let values = self.inner.borrow();
        if values.is_null() {
            return tree.empty_values();
        }
        values.clone()
    }
}
