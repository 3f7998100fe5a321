//! The schema compiler.

use super::dictionary::{BoundValidator, ValidatorDictionary};
use super::render::{RenderNode, RenderTree};
use crate::config::RenderOptions;
use crate::error::{CompileError, CompileResult};
use crate::i18n::MessageCatalog;
use crate::path::{FieldPath, PathSegment, is_valid_key};
use crate::schema::SchemaNode;
use crate::validators::{ValidatorFactoryRegistry, ValidatorFn};
use std::collections::HashMap;

/// Output of a successful compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledForm {
    pub render_tree: RenderTree,
    pub dictionary: ValidatorDictionary,
}

/// Validators already built during one compilation, by `(type, params)`.
type BuildCache = HashMap<(String, String), ValidatorFn>;

/// Compiles form schemas into a render tree and a validator dictionary.
///
/// Compilation is a single top-down traversal with no side effects; the same
/// schema always yields structurally equal output.
#[derive(Debug, Clone, Copy)]
pub struct SchemaCompiler<'a> {
    registry: &'a ValidatorFactoryRegistry,
    catalog: &'a MessageCatalog,
    options: &'a RenderOptions,
}

impl<'a> SchemaCompiler<'a> {
    pub fn new(
        registry: &'a ValidatorFactoryRegistry,
        catalog: &'a MessageCatalog,
        options: &'a RenderOptions,
    ) -> Self {
        Self {
            registry,
            catalog,
            options,
        }
    }

    /// Compile a whole form rooted at `schema`.
    ///
    /// # Errors
    ///
    /// Fails on the first validator that cannot be resolved or built. No
    /// partial output is produced.
    pub fn compile(&self, schema: &SchemaNode) -> CompileResult<CompiledForm> {
        self.compile_at(schema, FieldPath::root(), None)
    }

    /// Compile one element of an array at its concrete index.
    ///
    /// Used when elements are added or removed at runtime. Only paths under
    /// `array_path[index]` are produced, so sibling elements are unaffected.
    pub fn compile_array_item(
        &self,
        array_path: &FieldPath,
        item_schema: &SchemaNode,
        index: usize,
    ) -> CompileResult<CompiledForm> {
        self.compile_at(item_schema, array_path.index(index), None)
    }

    fn compile_at(
        &self,
        schema: &SchemaNode,
        path: FieldPath,
        key: Option<&str>,
    ) -> CompileResult<CompiledForm> {
        let mut dictionary = ValidatorDictionary::new();
        let mut cache = BuildCache::new();
        let root = self.compile_node(schema, path, key, &mut dictionary, &mut cache)?;

        log::debug!(
            "Compiled form at '{}': {} paths, {} validators",
            root.path,
            dictionary.len(),
            dictionary.validator_count()
        );

        Ok(CompiledForm {
            render_tree: RenderTree::new(root),
            dictionary,
        })
    }

    fn compile_node(
        &self,
        schema: &SchemaNode,
        path: FieldPath,
        key: Option<&str>,
        dictionary: &mut ValidatorDictionary,
        cache: &mut BuildCache,
    ) -> CompileResult<RenderNode> {
        let validators = self.build_validators(schema, &path, cache)?;
        dictionary.insert(path.clone(), validators);

        let children = schema
            .children
            .iter()
            .map(|(child_key, child)| {
                if !is_valid_key(child_key) {
                    return Err(CompileError::invalid_key(child_key.clone(), path.to_string()));
                }
                self.compile_node(child, path.key(child_key.clone()), Some(child_key), dictionary, cache)
            })
            .collect::<CompileResult<Vec<_>>>()?;

        let item = match &schema.items {
            Some(items) => Some(Box::new(self.compile_node(
                items,
                path.item(),
                None,
                dictionary,
                cache,
            )?)),
            None => None,
        };

        let widget = schema
            .widget
            .clone()
            .unwrap_or_else(|| self.options.widgets.for_type(schema.node_type).to_string());

        Ok(RenderNode {
            label_key: schema
                .label
                .clone()
                .unwrap_or_else(|| self.label_key(&path)),
            key: key.map(str::to_string),
            node_type: schema.node_type,
            widget,
            hint: schema.hint.clone(),
            validators: schema.validators.clone(),
            children,
            item,
            item_schema: schema.items.clone(),
            path,
        })
    }

    /// Resolve every declared validator in declaration order.
    fn build_validators(
        &self,
        schema: &SchemaNode,
        path: &FieldPath,
        cache: &mut BuildCache,
    ) -> CompileResult<Vec<BoundValidator>> {
        schema
            .validators
            .iter()
            .map(|spec| {
                let func = match cache.get(&spec.cache_key()) {
                    Some(func) => func.clone(),
                    None => {
                        let func = self
                            .registry
                            .build(&spec.type_id, &spec.params, self.catalog)
                            .map_err(|e| e.at(path.to_string()))?;
                        cache.insert(spec.cache_key(), func.clone());
                        func
                    }
                };
                log::trace!("Bound validator '{}' to '{}'", spec.type_id, path);
                Ok(BoundValidator::new(spec.clone(), func))
            })
            .collect()
    }

    /// Label key derived from the keys of a path; indices are left out so all
    /// elements of an array share their labels.
    fn label_key(&self, path: &FieldPath) -> String {
        let keys: Vec<&str> = path
            .segments()
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Key(key) => Some(key.as_str()),
                _ => None,
            })
            .collect();
        if keys.is_empty() {
            return format!("{}form", self.options.label_prefix);
        }
        format!("{}{}", self.options.label_prefix, keys.join("."))
    }
}
