//! Insertion-ordered triple graph
//!
//! Provides [`TripleGraph`], the backing store for model objects. Iteration
//! order is insertion order, which makes "first match" lookups deterministic.

use crate::error::{GraphError, GraphResult};
use crate::term::{NodeId, Term, Triple, TriplePattern};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Set of triples plus the node table they refer to
///
/// Nodes are either named (carry an IRI) or blank. Blank nodes that lose
/// their last inbound reference through [`TripleGraph::remove_property`]
/// are garbage collected together with their outgoing triples.
#[derive(Debug, Default)]
pub struct TripleGraph {
    triples: IndexSet<Triple>,
    nodes: IndexMap<NodeId, Option<String>>,
    by_uri: HashMap<String, NodeId>,
    next_node: u64,
}

impl TripleGraph {
    /// Create empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triples
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// True if the graph holds no triples
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Number of live nodes
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a blank node
    pub fn create_blank_node(&mut self) -> NodeId {
        self.allocate_node(None)
    }

    /// Get or create the node named by `uri`
    pub fn named_node(&mut self, uri: &str) -> NodeId {
        if let Some(node) = self.by_uri.get(uri) {
            return *node;
        }
        let node = self.allocate_node(Some(uri.to_string()));
        self.by_uri.insert(uri.to_string(), node);
        node
    }

    fn allocate_node(&mut self, uri: Option<String>) -> NodeId {
        let node = NodeId::new(self.next_node);
        self.next_node += 1;
        self.nodes.insert(node, uri);
        node
    }

    /// Look up a named node without creating it
    #[inline]
    #[must_use]
    pub fn node_for_uri(&self, uri: &str) -> Option<NodeId> {
        self.by_uri.get(uri).copied()
    }

    /// IRI of a named node; `None` for blank or unknown nodes
    #[inline]
    #[must_use]
    pub fn node_uri(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).and_then(|uri| uri.as_deref())
    }

    /// True if the node exists in this graph
    #[inline]
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// True if the node exists and has no IRI
    #[inline]
    #[must_use]
    pub fn is_blank(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(&node), Some(None))
    }

    /// Assert a triple
    ///
    /// Returns `false` if the exact triple was already present.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] if subject or object node is not in
    /// this graph.
    pub fn insert(&mut self, triple: Triple) -> GraphResult<bool> {
        self.ensure_node(triple.subject)?;
        if let Term::Node(object) = &triple.object {
            self.ensure_node(*object)?;
        }
        Ok(self.triples.insert(triple))
    }

    fn ensure_node(&self, node: NodeId) -> GraphResult<()> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(node))
        }
    }

    /// Iterate triples matching a pattern, in insertion order
    pub fn find<'a>(&'a self, pattern: TriplePattern<'a>) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| pattern.matches(t))
    }

    /// Object terms of `(subject, predicate, *)`, in insertion order
    #[must_use]
    pub fn objects(&self, subject: NodeId, predicate: &str) -> Vec<Term> {
        self.find(TriplePattern::any().subject(subject).predicate(predicate))
            .map(|t| t.object.clone())
            .collect()
    }

    /// Subjects of `(*, predicate, object)`, in insertion order
    #[must_use]
    pub fn subjects(&self, predicate: &str, object: &Term) -> Vec<NodeId> {
        self.find(TriplePattern::any().predicate(predicate).object(object))
            .map(|t| t.subject)
            .collect()
    }

    /// Remove every triple matching a pattern
    pub fn remove_matching(&mut self, pattern: TriplePattern<'_>) -> Vec<Triple> {
        let mut removed = Vec::new();
        self.triples.retain(|t| {
            if pattern.matches(t) {
                removed.push(t.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Remove all values of `(subject, predicate)`
    ///
    /// Blank object nodes left without inbound references are removed along
    /// with everything reachable only through them.
    pub fn remove_property(&mut self, subject: NodeId, predicate: &str) -> usize {
        let removed = self.remove_matching(TriplePattern::any().subject(subject).predicate(predicate));
        let count = removed.len();
        for triple in removed {
            if let Term::Node(object) = triple.object {
                self.collect_orphan(object);
            }
        }
        count
    }

    pub(crate) fn collect_orphan(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(candidate) = pending.pop() {
            if !self.is_blank(candidate) || self.has_inbound(candidate) {
                continue;
            }
            let outgoing = self.remove_matching(TriplePattern::any().subject(candidate));
            self.nodes.shift_remove(&candidate);
            pending.extend(outgoing.into_iter().filter_map(|t| t.object.as_node()));
        }
    }

    fn has_inbound(&self, node: NodeId) -> bool {
        let target = Term::Node(node);
        self.triples.iter().any(|t| t.object == target)
    }

    /// Iterate over all triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lit(s: &str) -> Term {
        Term::Literal(s.to_string())
    }

    #[test]
    fn named_node_is_idempotent() {
        let mut graph = TripleGraph::new();
        let a = graph.named_node("http://x#a");
        let b = graph.named_node("http://x#a");
        assert_eq!(a, b);
        assert_eq!(graph.node_uri(a), Some("http://x#a"));
        assert_eq!(graph.node_for_uri("http://x#a"), Some(a));
    }

    #[test]
    fn insert_rejects_unknown_nodes() {
        let mut graph = TripleGraph::new();
        let a = graph.create_blank_node();
        let mut other = TripleGraph::new();
        other.create_blank_node();
        let foreign = other.create_blank_node();

        let result = graph.insert(Triple::new(a, "p", Term::Node(foreign)));
        assert!(matches!(result, Err(GraphError::UnknownNode(_))));
    }

    #[test]
    fn insert_deduplicates_identical_triples() {
        let mut graph = TripleGraph::new();
        let a = graph.create_blank_node();
        assert!(graph.insert(Triple::new(a, "p", lit("x"))).unwrap());
        assert!(!graph.insert(Triple::new(a, "p", lit("x"))).unwrap());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn find_preserves_insertion_order() {
        let mut graph = TripleGraph::new();
        let a = graph.create_blank_node();
        for v in ["c", "a", "b"] {
            graph.insert(Triple::new(a, "p", lit(v))).unwrap();
        }
        assert_eq!(graph.objects(a, "p"), vec![lit("c"), lit("a"), lit("b")]);
    }

    #[test]
    fn subjects_by_object() {
        let mut graph = TripleGraph::new();
        let a = graph.create_blank_node();
        let b = graph.create_blank_node();
        graph.insert(Triple::new(a, "name", lit("foo"))).unwrap();
        graph.insert(Triple::new(b, "name", lit("foo"))).unwrap();
        assert_eq!(graph.subjects("name", &lit("foo")), vec![a, b]);
    }

    #[test]
    fn remove_property_collects_orphaned_blank_nodes() {
        let mut graph = TripleGraph::new();
        let file = graph.named_node("http://x#file");
        let checksum = graph.create_blank_node();
        graph.insert(Triple::new(file, "checksum", Term::Node(checksum))).unwrap();
        graph.insert(Triple::new(checksum, "value", lit("abc"))).unwrap();

        assert_eq!(graph.remove_property(file, "checksum"), 1);
        assert!(graph.is_empty());
        assert!(!graph.contains_node(checksum));
        assert!(graph.contains_node(file));
    }

    #[test]
    fn remove_property_keeps_shared_blank_nodes() {
        let mut graph = TripleGraph::new();
        let a = graph.named_node("http://x#a");
        let b = graph.named_node("http://x#b");
        let shared = graph.create_blank_node();
        graph.insert(Triple::new(a, "p", Term::Node(shared))).unwrap();
        graph.insert(Triple::new(b, "p", Term::Node(shared))).unwrap();
        graph.insert(Triple::new(shared, "v", lit("1"))).unwrap();

        graph.remove_property(a, "p");
        assert!(graph.contains_node(shared));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn remove_property_keeps_named_nodes() {
        let mut graph = TripleGraph::new();
        let a = graph.named_node("http://x#a");
        let b = graph.named_node("http://x#b");
        graph.insert(Triple::new(a, "dep", Term::Node(b))).unwrap();
        graph.insert(Triple::new(b, "name", lit("b"))).unwrap();

        graph.remove_property(a, "dep");
        assert!(graph.contains_node(b));
        assert_eq!(graph.objects(b, "name"), vec![lit("b")]);
    }

    #[test]
    fn remove_property_handles_blank_cycles() {
        let mut graph = TripleGraph::new();
        let root = graph.named_node("http://x#root");
        let x = graph.create_blank_node();
        let y = graph.create_blank_node();
        graph.insert(Triple::new(root, "p", Term::Node(x))).unwrap();
        graph.insert(Triple::new(x, "next", Term::Node(y))).unwrap();
        graph.insert(Triple::new(y, "next", Term::Node(x))).unwrap();

        // y still points at x, so x is not an orphan; the cycle is left alone
        graph.remove_property(root, "p");
        assert!(graph.contains_node(x));
        assert_eq!(graph.len(), 2);
    }
}
