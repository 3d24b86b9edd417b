//! The resolver: entity kinds, the normalizer, lazy nodes and the graph
//! context that wires them to the fetch and extraction collaborators.

pub mod graph;
pub mod kinds;
pub mod node;
pub mod normalizer;

pub use graph::{Graph, GraphBuilder};
pub use kinds::{EntityKind, TypeMapping, PERSON_ATTRIBUTES, PERSON_TYPE};
pub use node::EntityNode;
pub use normalizer::Normalizer;
