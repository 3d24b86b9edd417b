//! Raw microdata trees, as produced by the extraction step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One value in an extracted microdata tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNode {
    /// A single text or URL value.
    Scalar(String),
    /// Values of one property, in document order.
    List(Vec<RawNode>),
    /// A nested microdata item.
    Bag(PropertyBag),
}

/// A microdata item: a property mapping, optionally tagged with entity types.
///
/// Serializes to the conventional `{"type": [...], "properties": {...}}` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyBag {
    /// Declared `itemtype` URIs, in document order. Only the first one is
    /// consulted when deciding whether the bag is an entity reference.
    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// The `itemid`, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub properties: BTreeMap<String, RawNode>,
}

impl PropertyBag {
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    /// First scalar of a property, looking through a list wrapper.
    pub fn first_scalar(&self, name: &str) -> Option<&str> {
        match self.properties.get(name)? {
            RawNode::Scalar(s) => Some(s),
            RawNode::List(items) => match items.first()? {
                RawNode::Scalar(s) => Some(s),
                _ => None,
            },
            RawNode::Bag(_) => None,
        }
    }
}

impl From<&str> for RawNode {
    fn from(s: &str) -> Self {
        RawNode::Scalar(s.to_string())
    }
}
