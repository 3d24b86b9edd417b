//! Typed access to WikiTree person profiles.

use crate::error::Result;
use crate::resolve::kinds::PERSON_TYPE;
use crate::resolve::node::EntityNode;
use std::fmt;

/// A person profile. Thin typed view over an [`EntityNode`] of the Person kind.
///
/// Getters load the profile on first use, exactly like [`EntityNode::get`].
/// Text getters return `None` for attributes the profile does not carry;
/// relation getters return an empty list.
#[derive(Clone)]
pub struct Person(EntityNode);

impl Person {
    /// Wrap a node if it is of the Person kind.
    pub fn from_node(node: EntityNode) -> Option<Self> {
        (node.kind().type_uri == PERSON_TYPE).then_some(Person(node))
    }

    pub(crate) fn from_node_unchecked(node: EntityNode) -> Self {
        Person(node)
    }

    pub fn node(&self) -> &EntityNode {
        &self.0
    }

    pub fn into_node(self) -> EntityNode {
        self.0
    }

    pub fn url(&self) -> &str {
        self.0.url()
    }

    pub async fn name(&self) -> Result<Option<&str>> {
        self.text("name").await
    }

    pub async fn given_name(&self) -> Result<Option<&str>> {
        self.text("givenName").await
    }

    pub async fn family_name(&self) -> Result<Option<&str>> {
        self.text("familyName").await
    }

    pub async fn gender(&self) -> Result<Option<&str>> {
        self.text("gender").await
    }

    pub async fn birth_date(&self) -> Result<Option<&str>> {
        self.text("birthDate").await
    }

    pub async fn death_date(&self) -> Result<Option<&str>> {
        self.text("deathDate").await
    }

    pub async fn parents(&self) -> Result<Vec<Person>> {
        self.related("parent").await
    }

    pub async fn children(&self) -> Result<Vec<Person>> {
        self.related("children").await
    }

    pub async fn siblings(&self) -> Result<Vec<Person>> {
        self.related("sibling").await
    }

    pub async fn spouses(&self) -> Result<Vec<Person>> {
        self.related("spouse").await
    }

    /// A text attribute, or `None` when absent or not text.
    pub async fn text(&self, name: &str) -> Result<Option<&str>> {
        let attributes = self.0.load().await?;
        Ok(attributes.get(name).and_then(|v| v.as_text()))
    }

    /// Person references held by a relation attribute. Not loaded.
    pub async fn related(&self, name: &str) -> Result<Vec<Person>> {
        let attributes = self.0.load().await?;
        Ok(attributes
            .get(name)
            .map(|v| {
                v.entities()
                    .into_iter()
                    .filter_map(|node| Person::from_node(node.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl fmt::Debug for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
