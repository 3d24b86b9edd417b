//! Lazy object graph over WikiTree profile microdata.
//!
//! Profiles are fetched only when an attribute is first read. References to
//! other profiles come back as unloaded nodes, so cyclic relations such as
//! parent and children can be walked one hop at a time.
//!
//! ```no_run
//! # async fn demo() -> wikitree_graph::Result<()> {
//! use wikitree_graph::{Graph, GraphConfig};
//!
//! let graph = Graph::new(GraphConfig::from_env())?;
//! let person = graph.person("Sloan-518");
//! println!("{:?}", person.name().await?);
//! for child in person.children().await? {
//!     println!("{:?}", child.birth_date().await?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod acquisition;
pub mod config;
pub mod error;
pub mod model;
pub mod person;
pub mod resolve;

#[cfg(test)]
pub(crate) mod testing;

pub use acquisition::{Extractor, Fetcher, HttpClient, MicrodataExtractor};
pub use config::GraphConfig;
pub use error::{FetchError, ResolveError, Result};
pub use model::{Attributes, PropertyBag, RawNode, Value};
pub use person::Person;
pub use resolve::{EntityKind, EntityNode, Graph, GraphBuilder, Normalizer, TypeMapping};
