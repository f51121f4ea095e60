//! SPDX Graph
//!
//! In-memory subject-predicate-object store that backs SPDX model objects.
//!
//! # Core Concepts
//!
//! - [`TripleGraph`]: insertion-ordered set of triples plus node table
//! - [`ModelContainer`]: shared handle to one document's graph; allocates
//!   element identifiers
//! - [`PropertyStore`]: get/set of single, multi-valued, IRI and node
//!   properties on one subject, keyed by [`Iri`]
//!
//! # Example
//!
//! ```rust
//! use spdx_graph::{ModelContainer, vocab::PROP_FILE_NAME};
//!
//! let container = ModelContainer::new("http://example.org/doc").unwrap();
//! let node = container.element_node("SPDXRef-1").unwrap();
//! container.store(node).write_single(PROP_FILE_NAME, Some("main.c")).unwrap();
//!
//! assert_eq!(
//!     container.store(node).read_single(PROP_FILE_NAME).as_deref(),
//!     Some("main.c")
//! );
//! ```

#![warn(unreachable_pub)]

mod container;
mod error;
mod graph;
mod store;
mod term;

/// Namespaces, predicates and classes
pub mod vocab;

pub use container::{ContainerId, ModelContainer, ELEMENT_REF_PREFIX};
pub use error::{GraphError, GraphResult};
pub use graph::TripleGraph;
pub use store::PropertyStore;
pub use term::{NodeId, Term, Triple, TriplePattern};
pub use vocab::Iri;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
