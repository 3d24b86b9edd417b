//! Normalized attribute values.

use crate::resolve::node::EntityNode;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;

/// The attribute set of a loaded node.
pub type Attributes = BTreeMap<String, Value>;

/// A normalized microdata value.
///
/// References to recognized entity types are kept as unloaded
/// [`EntityNode`]s rather than expanded in place.
#[derive(Debug, Clone)]
pub enum Value {
    /// Scalar text, passed through unchanged.
    Text(String),
    /// Multiple values, or a singleton of a multivalued attribute.
    List(Vec<Value>),
    /// An item of an unmapped type, keyed by property name.
    Map(BTreeMap<String, Value>),
    /// Reference to another entity, not loaded until read.
    Entity(EntityNode),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&EntityNode> {
        match self {
            Value::Entity(node) => Some(node),
            _ => None,
        }
    }

    /// Entities held by this value: itself, or the entity elements of a list.
    pub fn entities(&self) -> Vec<&EntityNode> {
        match self {
            Value::Entity(node) => vec![node],
            Value::List(items) => items.iter().filter_map(Value::as_entity).collect(),
            _ => Vec::new(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Two distinct node instances are equal when they denote the same profile.
            (Value::Entity(a), Value::Entity(b)) => a.url() == b.url() && a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::Entity(node) => serializer.serialize_str(node.url()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}
