//! Lazily loaded entity nodes.
//!
//! A node starts `unloaded`, knowing only its kind and canonical URL. The
//! first attribute read (or an explicit [`EntityNode::load`]) fetches the
//! document once, normalizes its first microdata item, and caches the
//! result for the node's lifetime. There is no refresh: a second `load` is
//! a no-op. A failed load leaves the node unloaded and the next read retries.

use crate::error::{ResolveError, Result};
use crate::model::{Attributes, PropertyBag, Value};
use crate::resolve::graph::Graph;
use crate::resolve::kinds::EntityKind;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// A typed, identity-bearing node whose attributes load on first access.
///
/// Cloning shares the underlying node and its cache. References produced by
/// normalization are always fresh nodes.
#[derive(Clone)]
pub struct EntityNode {
    inner: Arc<NodeInner>,
}

struct NodeInner {
    kind: Arc<EntityKind>,
    url: String,
    graph: Arc<Graph>,
    state: OnceCell<Loaded>,
}

struct Loaded {
    attributes: Attributes,
    raw: PropertyBag,
}

impl EntityNode {
    /// Construct an unloaded node from an identifier, path or URL.
    ///
    /// Total and free of I/O.
    pub fn new(graph: &Arc<Graph>, kind: Arc<EntityKind>, reference: &str) -> Self {
        let url = kind.canonical_url(graph.origin(), reference);
        debug!(kind = %kind.name, %url, "new entity node");
        Self {
            inner: Arc::new(NodeInner {
                kind,
                url,
                graph: Arc::clone(graph),
                state: OnceCell::new(),
            }),
        }
    }

    /// Canonical identity URL.
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Kind this node was constructed as.
    pub fn kind(&self) -> &EntityKind {
        &self.inner.kind
    }

    /// Whether attributes have been materialized.
    pub fn is_loaded(&self) -> bool {
        self.inner.state.initialized()
    }

    /// Materialize the attribute set. Fetches at most once per node.
    pub async fn load(&self) -> Result<&Attributes> {
        let loaded = self
            .inner
            .state
            .get_or_try_init(|| self.materialize())
            .await?;
        Ok(&loaded.attributes)
    }

    /// Read one attribute, loading the node first if needed.
    pub async fn get(&self, name: &str) -> Result<&Value> {
        self.load()
            .await?
            .get(name)
            .ok_or_else(|| ResolveError::UnknownAttribute {
                name: name.to_string(),
                url: self.inner.url.clone(),
            })
    }

    /// Read one attribute only if the node is already loaded.
    pub fn try_get(&self, name: &str) -> Option<&Value> {
        self.inner.state.get()?.attributes.get(name)
    }

    /// The un-normalized item the attributes were built from, once loaded.
    pub fn raw(&self) -> Option<&PropertyBag> {
        self.inner.state.get().map(|l| &l.raw)
    }

    /// Attribute names: materialized ones when loaded, else the kind's
    /// declared set. Never loads.
    pub fn attribute_names(&self) -> Vec<&str> {
        match self.inner.state.get() {
            Some(loaded) => loaded.attributes.keys().map(String::as_str).collect(),
            None => self
                .inner
                .kind
                .declared_attributes
                .iter()
                .map(String::as_str)
                .collect(),
        }
    }

    /// Debug rendering. Full attribute dump when loaded, a short
    /// `<Kind identifier>` tag otherwise. Never loads.
    pub fn describe(&self) -> String {
        match self.inner.state.get() {
            Some(loaded) => serde_json::to_string_pretty(&loaded.attributes)
                .unwrap_or_else(|_| self.tag()),
            None => self.tag(),
        }
    }

    fn tag(&self) -> String {
        let kind = &self.inner.kind;
        format!("<{} {}>", kind.name, kind.short_label(&self.inner.url))
    }

    async fn materialize(&self) -> Result<Loaded> {
        let url = self.inner.url.as_str();
        let graph = &self.inner.graph;
        debug!(kind = %self.inner.kind.name, url, "loading");

        let loaded = graph.fetch_item(url).await.and_then(|item| {
            graph
                .normalizer()
                .normalize_properties(graph, &item.properties)
                .map(|attributes| Loaded {
                    attributes,
                    raw: item,
                })
        });

        match loaded {
            Ok(loaded) => {
                let attributes = loaded.attributes.len();
                info!(url, attributes, "loaded {}", self.inner.kind.name);
                Ok(loaded)
            }
            Err(e) => {
                warn!(url, "load failed: {e}");
                Err(e)
            }
        }
    }
}

impl fmt::Debug for EntityNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl fmt::Display for EntityNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
