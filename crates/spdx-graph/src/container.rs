//! Model container
//!
//! [`ModelContainer`] is the shared handle to one document's graph. It maps
//! element identifiers to node IRIs and hands out fresh identifiers.

use crate::error::{GraphError, GraphResult};
use crate::graph::TripleGraph;
use crate::store::PropertyStore;
use crate::term::{NodeId, Term};
use crate::vocab::{Iri, RDF_TYPE};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Prefix for generated element identifiers
pub const ELEMENT_REF_PREFIX: &str = "SPDXRef-";

/// Unique identity of a container instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(Uuid);

impl Display for ContainerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct ContainerInner {
    id: ContainerId,
    namespace: String,
    graph: RwLock<TripleGraph>,
    next_ref: AtomicU64,
}

/// Cheaply clonable handle to a document graph
///
/// Several model objects may hold handles to the same container; a write
/// made through one is visible to every other on its next refresh.
#[derive(Debug, Clone)]
pub struct ModelContainer {
    inner: Arc<ContainerInner>,
}

impl ModelContainer {
    /// Create a container with an empty graph
    ///
    /// `namespace` is the document namespace; element nodes are named
    /// `<namespace>#<identifier>`.
    ///
    /// # Errors
    /// Returns error if the namespace is empty or already contains `#`
    pub fn new(namespace: impl Into<String>) -> GraphResult<Self> {
        let namespace = namespace.into();
        if namespace.trim().is_empty() {
            return Err(GraphError::InvalidNamespace {
                namespace,
                reason: "empty namespace".to_string(),
            });
        }
        if namespace.contains('#') {
            return Err(GraphError::InvalidNamespace {
                namespace,
                reason: "namespace must not contain '#'".to_string(),
            });
        }
        Ok(Self {
            inner: Arc::new(ContainerInner {
                id: ContainerId(Uuid::new_v4()),
                namespace,
                graph: RwLock::new(TripleGraph::new()),
                next_ref: AtomicU64::new(1),
            }),
        })
    }

    /// Container identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.inner.id
    }

    /// Document namespace
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    /// True if both handles point at the same container
    #[inline]
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Shared read access to the graph
    #[inline]
    pub fn graph(&self) -> RwLockReadGuard<'_, TripleGraph> {
        self.inner.graph.read()
    }

    /// Exclusive write access to the graph
    #[inline]
    pub fn graph_mut(&self) -> RwLockWriteGuard<'_, TripleGraph> {
        self.inner.graph.write()
    }

    /// Property store bound to `node`
    #[inline]
    #[must_use]
    pub fn store(&self, node: NodeId) -> PropertyStore<'_> {
        PropertyStore::new(self, node)
    }

    /// IRI for an element identifier
    #[must_use]
    pub fn element_uri(&self, identifier: &str) -> String {
        format!("{}#{}", self.inner.namespace, identifier)
    }

    /// Element identifier of a node, if the node is named in this document
    #[must_use]
    pub fn identifier_of(&self, node: NodeId) -> Option<String> {
        let graph = self.graph();
        let uri = graph.node_uri(node)?;
        uri.strip_prefix(self.inner.namespace.as_str())
            .and_then(|rest| rest.strip_prefix('#'))
            .map(str::to_string)
    }

    /// Node for an element identifier, if it exists
    #[must_use]
    pub fn node_for_identifier(&self, identifier: &str) -> Option<NodeId> {
        self.graph().node_for_uri(&self.element_uri(identifier))
    }

    /// Get or create the node for an element identifier
    ///
    /// # Errors
    /// Returns error if the identifier is empty or contains whitespace or `#`
    pub fn element_node(&self, identifier: &str) -> GraphResult<NodeId> {
        if identifier.is_empty()
            || identifier.contains('#')
            || identifier.chars().any(char::is_whitespace)
        {
            return Err(GraphError::InvalidIdentifier(identifier.to_string()));
        }
        let uri = self.element_uri(identifier);
        Ok(self.graph_mut().named_node(&uri))
    }

    /// Create a new anonymous node
    #[inline]
    pub fn blank_node(&self) -> NodeId {
        self.graph_mut().create_blank_node()
    }

    /// Allocate an element identifier not yet used in this graph
    pub fn allocate_identifier(&self) -> String {
        loop {
            let n = self.inner.next_ref.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{ELEMENT_REF_PREFIX}{n}");
            if self.node_for_identifier(&candidate).is_none() {
                tracing::debug!(identifier = %candidate, "allocated element identifier");
                return candidate;
            }
        }
    }

    /// Class IRIs asserted for a node
    #[must_use]
    pub fn types_of(&self, node: NodeId) -> Vec<String> {
        let graph = self.graph();
        graph
            .objects(node, &RDF_TYPE.uri())
            .into_iter()
            .filter_map(|term| match term {
                Term::Uri(uri) => Some(uri),
                Term::Node(n) => graph.node_uri(n).map(str::to_string),
                Term::Literal(_) => None,
            })
            .collect()
    }

    /// True if the node is typed with `class`
    #[must_use]
    pub fn has_type(&self, node: NodeId, class: Iri) -> bool {
        self.types_of(node).iter().any(|uri| class.matches(uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::CLASS_FILE;

    fn container() -> ModelContainer {
        ModelContainer::new("http://example.org/doc").unwrap()
    }

    #[test]
    fn rejects_bad_namespaces() {
        assert!(ModelContainer::new("").is_err());
        assert!(ModelContainer::new("http://x#y").is_err());
    }

    #[test]
    fn identifiers_map_to_element_uris() {
        let c = container();
        let node = c.element_node("SPDXRef-7").unwrap();
        assert_eq!(c.graph().node_uri(node), Some("http://example.org/doc#SPDXRef-7"));
        assert_eq!(c.identifier_of(node).as_deref(), Some("SPDXRef-7"));
        assert_eq!(c.node_for_identifier("SPDXRef-7"), Some(node));
    }

    #[test]
    fn blank_nodes_have_no_identifier() {
        let c = container();
        let node = c.blank_node();
        assert_eq!(c.identifier_of(node), None);
    }

    #[test]
    fn allocate_identifier_skips_taken_ids() {
        let c = container();
        c.element_node("SPDXRef-1").unwrap();
        c.element_node("SPDXRef-2").unwrap();
        let id = c.allocate_identifier();
        assert_eq!(id, "SPDXRef-3");
        assert_ne!(c.allocate_identifier(), id);
    }

    #[test]
    fn invalid_identifiers_rejected() {
        let c = container();
        assert!(c.element_node("").is_err());
        assert!(c.element_node("a b").is_err());
        assert!(c.element_node("a#b").is_err());
    }

    #[test]
    fn type_checks() {
        let c = container();
        let node = c.blank_node();
        c.store(node).write_type(CLASS_FILE).unwrap();
        assert!(c.has_type(node, CLASS_FILE));
        assert_eq!(c.types_of(node), vec![CLASS_FILE.uri()]);
    }

    #[test]
    fn clones_share_the_graph() {
        let a = container();
        let b = a.clone();
        let node = a.blank_node();
        assert!(b.graph().contains_node(node));
        assert!(a.same_as(&b));
        assert_eq!(a.id(), b.id());
        assert!(!a.same_as(&container()));
    }
}
