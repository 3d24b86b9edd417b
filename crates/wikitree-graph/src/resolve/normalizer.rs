//! Turns raw microdata trees into normalized attribute values.
//!
//! Shapes are handled by case:
//! - a one-element list collapses to its element unless the attribute is
//!   always-multivalued; other lists normalize element-wise;
//! - a bag whose first declared type is in the [`TypeMapping`] becomes an
//!   unloaded [`EntityNode`] built from its `url` property;
//! - any other bag normalizes property by property into a map;
//! - scalars pass through.
//!
//! No I/O happens here. Constructing a node never loads it.

use crate::error::{ResolveError, Result};
use crate::model::{Attributes, PropertyBag, RawNode, Value};
use crate::resolve::graph::Graph;
use crate::resolve::kinds::TypeMapping;
use crate::resolve::node::EntityNode;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::trace;

/// Normalizer configuration: the type table and the multivalued set.
#[derive(Debug, Clone)]
pub struct Normalizer {
    types: TypeMapping,
    multivalued: HashSet<String>,
}

impl Normalizer {
    /// Build from a type table and the always-multivalued attribute names.
    pub fn new<I, S>(types: TypeMapping, multivalued: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types,
            multivalued: multivalued.into_iter().map(Into::into).collect(),
        }
    }

    pub fn types(&self) -> &TypeMapping {
        &self.types
    }

    pub fn is_multivalued(&self, name: &str) -> bool {
        self.multivalued.contains(name)
    }

    /// Normalize one raw value found under attribute `name` (`None` at the root).
    ///
    /// Referenced entities are constructed against `graph` but not loaded.
    pub fn normalize(
        &self,
        graph: &Arc<Graph>,
        name: Option<&str>,
        raw: &RawNode,
    ) -> Result<Value> {
        match raw {
            RawNode::List(items) => {
                if let [single] = items.as_slice() {
                    if !name.is_some_and(|n| self.is_multivalued(n)) {
                        return self.normalize(graph, name, single);
                    }
                }
                items
                    .iter()
                    .map(|item| self.normalize(graph, name, item))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List)
            }
            RawNode::Bag(bag) => self.normalize_bag(graph, bag),
            RawNode::Scalar(s) => Ok(Value::Text(s.clone())),
        }
    }

    /// Normalize a property mapping, each value under its own attribute name.
    pub fn normalize_properties(
        &self,
        graph: &Arc<Graph>,
        properties: &BTreeMap<String, RawNode>,
    ) -> Result<Attributes> {
        properties
            .iter()
            .map(|(key, raw)| {
                let value = self.normalize(graph, Some(key.as_str()), raw)?;
                Ok((key.clone(), value))
            })
            .collect()
    }

    fn normalize_bag(&self, graph: &Arc<Graph>, bag: &PropertyBag) -> Result<Value> {
        if let Some(type_uri) = bag.primary_type() {
            if let Some(kind) = self.types.resolve(type_uri) {
                let reference = bag.first_scalar("url").ok_or_else(|| {
                    ResolveError::MalformedReference {
                        type_uri: type_uri.to_string(),
                    }
                })?;
                trace!(kind = %kind.name, reference, "entity reference");
                let node = EntityNode::new(graph, Arc::clone(kind), reference);
                return Ok(Value::Entity(node));
            }
        }
        self.normalize_properties(graph, &bag.properties).map(Value::Map)
    }
}
