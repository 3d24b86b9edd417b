//! The graph context shared by every node of one traversal session.

use crate::acquisition::{Extractor, Fetcher, HttpClient, MicrodataExtractor};
use crate::config::GraphConfig;
use crate::error::{ResolveError, Result};
use crate::model::PropertyBag;
use crate::person::Person;
use crate::resolve::kinds::{EntityKind, TypeMapping, PERSON_TYPE};
use crate::resolve::node::EntityNode;
use crate::resolve::normalizer::Normalizer;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Collaborators and configuration used to load nodes.
///
/// Immutable once built. Nodes hold an `Arc<Graph>`; the graph holds no
/// nodes, so the same profile reached twice yields two independent nodes.
pub struct Graph {
    origin: Url,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    normalizer: Normalizer,
}

impl Graph {
    /// Start a builder with the default collaborators and type mapping.
    pub fn builder(config: GraphConfig) -> GraphBuilder {
        GraphBuilder {
            types: TypeMapping::default(),
            config,
            fetcher: None,
            extractor: None,
        }
    }

    /// A graph backed by the HTTP client and microdata extractor.
    pub fn new(config: GraphConfig) -> Result<Arc<Self>> {
        Self::builder(config).build()
    }

    /// Origin bare identifiers and site-relative paths resolve against.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Normalizer used for every load in this graph.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Construct an unloaded node. Performs no I/O.
    pub fn entity(self: &Arc<Self>, kind: &Arc<EntityKind>, reference: &str) -> EntityNode {
        EntityNode::new(self, Arc::clone(kind), reference)
    }

    /// Construct an unloaded node of the kind registered for `type_uri`.
    pub fn entity_of_type(self: &Arc<Self>, type_uri: &str, reference: &str) -> Option<EntityNode> {
        let kind = self.normalizer.types().resolve(type_uri)?;
        Some(self.entity(kind, reference))
    }

    /// Construct an unloaded person from an identifier, path or URL.
    pub fn person(self: &Arc<Self>, reference: &str) -> Person {
        let kind = self
            .normalizer
            .types()
            .resolve(PERSON_TYPE)
            .cloned()
            .unwrap_or_else(|| Arc::new(EntityKind::person()));
        Person::from_node_unchecked(EntityNode::new(self, kind, reference))
    }

    /// Fetch `url` and return its first microdata item.
    pub(crate) async fn fetch_item(&self, url: &str) -> Result<PropertyBag> {
        if Url::parse(url).is_err() {
            return Err(ResolveError::InvalidUrl {
                url: url.to_string(),
            });
        }

        let html = self.fetcher.fetch(url).await?;
        let mut items = self.extractor.extract(&html, url);
        debug!(url, items = items.len(), "extracted microdata");
        if items.is_empty() {
            return Err(ResolveError::NoMicrodata {
                url: url.to_string(),
            });
        }
        Ok(items.swap_remove(0))
    }
}

/// Builder for [`Graph`].
pub struct GraphBuilder {
    config: GraphConfig,
    fetcher: Option<Arc<dyn Fetcher>>,
    extractor: Option<Arc<dyn Extractor>>,
    types: TypeMapping,
}

impl GraphBuilder {
    /// Use `fetcher` instead of the HTTP client.
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use `extractor` instead of the microdata extractor.
    pub fn extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Register an additional entity kind for its type URI.
    pub fn kind(mut self, kind: EntityKind) -> Self {
        self.types = self.types.with_kind(kind);
        self
    }

    /// Replace the whole type mapping.
    pub fn types(mut self, types: TypeMapping) -> Self {
        self.types = types;
        self
    }

    /// Validate the base URL and assemble the graph.
    pub fn build(self) -> Result<Arc<Graph>> {
        let origin = Url::parse(&self.config.base_url).map_err(|e| {
            ResolveError::Config(format!("invalid base_url '{}': {e}", self.config.base_url))
        })?;

        let fetcher: Arc<dyn Fetcher> = match self.fetcher {
            Some(f) => f,
            None => Arc::new(HttpClient::new(&self.config)?),
        };
        let extractor: Arc<dyn Extractor> = match self.extractor {
            Some(e) => e,
            None => Arc::new(MicrodataExtractor),
        };
        let normalizer = Normalizer::new(self.types, self.config.multivalued.iter().cloned());

        Ok(Arc::new(Graph {
            origin,
            fetcher,
            extractor,
            normalizer,
        }))
    }
}
