//! Property store adapter
//!
//! [`PropertyStore`] reads and writes the values of one subject node, keyed
//! by `(namespace, predicate)`. Every write replaces all prior values of the
//! predicate on that subject.

use crate::container::ModelContainer;
use crate::error::{GraphError, GraphResult};
use crate::term::{NodeId, Term, Triple, TriplePattern};
use crate::vocab::{Iri, RDF_TYPE};

/// Read/write access to the properties of one node
#[derive(Debug, Clone, Copy)]
pub struct PropertyStore<'a> {
    container: &'a ModelContainer,
    subject: NodeId,
}

impl<'a> PropertyStore<'a> {
    /// Bind a store to a subject node
    #[inline]
    #[must_use]
    pub fn new(container: &'a ModelContainer, subject: NodeId) -> Self {
        Self { container, subject }
    }

    /// Subject node
    #[inline]
    #[must_use]
    pub fn subject(&self) -> NodeId {
        self.subject
    }

    /// Owning container
    #[inline]
    #[must_use]
    pub fn container(&self) -> &'a ModelContainer {
        self.container
    }

    fn objects(&self, property: Iri) -> Vec<Term> {
        self.container.graph().objects(self.subject, &property.uri())
    }

    /// First literal value of the property
    #[must_use]
    pub fn read_single(&self, property: Iri) -> Option<String> {
        self.objects(property).into_iter().find_map(|term| match term {
            Term::Literal(value) => Some(value),
            _ => None,
        })
    }

    /// All literal values of the property, in graph order
    #[must_use]
    pub fn read_literals(&self, property: Iri) -> Vec<String> {
        self.objects(property)
            .into_iter()
            .filter_map(|term| match term {
                Term::Literal(value) => Some(value),
                _ => None,
            })
            .collect()
    }

    /// All IRI values of the property
    ///
    /// Named node objects contribute their IRI; blank nodes and literals are
    /// skipped.
    #[must_use]
    pub fn read_uris(&self, property: Iri) -> Vec<String> {
        let graph = self.container.graph();
        graph
            .objects(self.subject, &property.uri())
            .into_iter()
            .filter_map(|term| match term {
                Term::Uri(uri) => Some(uri),
                Term::Node(node) => graph.node_uri(node).map(str::to_string),
                Term::Literal(_) => None,
            })
            .collect()
    }

    /// All node values of the property
    #[must_use]
    pub fn read_nodes(&self, property: Iri) -> Vec<NodeId> {
        self.objects(property)
            .into_iter()
            .filter_map(|term| term.as_node())
            .collect()
    }

    /// Raw object terms of the property, in graph order
    #[inline]
    #[must_use]
    pub fn read_terms(&self, property: Iri) -> Vec<Term> {
        self.objects(property)
    }

    /// Replace the property with arbitrary terms
    ///
    /// # Errors
    /// Returns error if the subject or any node term is not in the graph
    pub fn write_terms(&self, property: Iri, terms: Vec<Term>) -> GraphResult<()> {
        self.replace(property, terms)
    }

    /// Replace the property with at most one literal
    ///
    /// # Errors
    /// Returns error if the subject node is not in the graph
    pub fn write_single(&self, property: Iri, value: Option<&str>) -> GraphResult<()> {
        let terms = value
            .map(|v| vec![Term::Literal(v.to_string())])
            .unwrap_or_default();
        self.replace(property, terms)
    }

    /// Replace the property with literal values
    ///
    /// # Errors
    /// Returns error if the subject node is not in the graph
    pub fn write_literals<S: AsRef<str>>(&self, property: Iri, values: &[S]) -> GraphResult<()> {
        let terms = values
            .iter()
            .map(|v| Term::Literal(v.as_ref().to_string()))
            .collect();
        self.replace(property, terms)
    }

    /// Replace the property with IRI values
    ///
    /// # Errors
    /// Returns error if the subject node is not in the graph
    pub fn write_uris<S: AsRef<str>>(&self, property: Iri, uris: &[S]) -> GraphResult<()> {
        let terms = uris
            .iter()
            .map(|u| Term::Uri(u.as_ref().to_string()))
            .collect();
        self.replace(property, terms)
    }

    /// Replace the property with node values
    ///
    /// # Errors
    /// Returns error if the subject or any value node is not in the graph
    pub fn write_nodes(&self, property: Iri, nodes: &[NodeId]) -> GraphResult<()> {
        let terms = nodes.iter().map(|n| Term::Node(*n)).collect();
        self.replace(property, terms)
    }

    /// Replace the `rdf:type` of the subject
    ///
    /// # Errors
    /// Returns error if the subject node is not in the graph
    pub fn write_type(&self, class: Iri) -> GraphResult<()> {
        self.replace(RDF_TYPE, vec![Term::Uri(class.uri())])
    }

    fn replace(&self, property: Iri, terms: Vec<Term>) -> GraphResult<()> {
        let predicate = property.uri();
        let mut graph = self.container.graph_mut();
        if !graph.contains_node(self.subject) {
            return Err(GraphError::UnknownNode(self.subject));
        }
        for term in &terms {
            if let Term::Node(node) = term {
                if !graph.contains_node(*node) {
                    return Err(GraphError::UnknownNode(*node));
                }
            }
        }
        let stale = graph.remove_matching(
            TriplePattern::any()
                .subject(self.subject)
                .predicate(&predicate),
        );
        for term in terms {
            graph.insert(Triple::new(self.subject, predicate.clone(), term))?;
        }
        for triple in stale {
            if let Term::Node(node) = triple.object {
                graph.collect_orphan(node);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{PROP_FILE_CHECKSUM, PROP_FILE_CONTRIBUTOR, PROP_FILE_NOTICE, PROP_FILE_TYPE};
    use pretty_assertions::assert_eq;

    fn setup() -> (ModelContainer, NodeId) {
        let c = ModelContainer::new("http://example.org/doc").unwrap();
        let node = c.element_node("SPDXRef-1").unwrap();
        (c, node)
    }

    #[test]
    fn single_value_round_trip() {
        let (c, node) = setup();
        let store = c.store(node);
        assert_eq!(store.read_single(PROP_FILE_NOTICE), None);

        store.write_single(PROP_FILE_NOTICE, Some("notice")).unwrap();
        assert_eq!(store.read_single(PROP_FILE_NOTICE).as_deref(), Some("notice"));

        store.write_single(PROP_FILE_NOTICE, Some("")).unwrap();
        assert_eq!(store.read_single(PROP_FILE_NOTICE).as_deref(), Some(""));

        store.write_single(PROP_FILE_NOTICE, None).unwrap();
        assert_eq!(store.read_single(PROP_FILE_NOTICE), None);
    }

    #[test]
    fn literal_writes_replace_prior_values() {
        let (c, node) = setup();
        let store = c.store(node);
        store.write_literals(PROP_FILE_CONTRIBUTOR, &["a", "b"]).unwrap();
        store.write_literals(PROP_FILE_CONTRIBUTOR, &["c"]).unwrap();
        assert_eq!(store.read_literals(PROP_FILE_CONTRIBUTOR), vec!["c".to_string()]);
    }

    #[test]
    fn uri_values() {
        let (c, node) = setup();
        let store = c.store(node);
        store.write_uris(PROP_FILE_TYPE, &["http://x#a", "http://x#b"]).unwrap();
        assert_eq!(
            store.read_uris(PROP_FILE_TYPE),
            vec!["http://x#a".to_string(), "http://x#b".to_string()]
        );
        assert!(store.read_literals(PROP_FILE_TYPE).is_empty());
    }

    #[test]
    fn node_writes_collect_replaced_sub_entities() {
        let (c, node) = setup();
        let store = c.store(node);
        let first = c.blank_node();
        c.store(first).write_single(PROP_FILE_NOTICE, Some("x")).unwrap();
        store.write_nodes(PROP_FILE_CHECKSUM, &[first]).unwrap();
        let size = c.graph().len();

        let second = c.blank_node();
        c.store(second).write_single(PROP_FILE_NOTICE, Some("x")).unwrap();
        store.write_nodes(PROP_FILE_CHECKSUM, &[second]).unwrap();

        assert_eq!(c.graph().len(), size);
        assert!(!c.graph().contains_node(first));
        assert_eq!(store.read_nodes(PROP_FILE_CHECKSUM), vec![second]);
    }

    #[test]
    fn rewriting_same_node_keeps_it() {
        let (c, node) = setup();
        let store = c.store(node);
        let sub = c.blank_node();
        c.store(sub).write_single(PROP_FILE_NOTICE, Some("x")).unwrap();
        store.write_nodes(PROP_FILE_CHECKSUM, &[sub]).unwrap();
        store.write_nodes(PROP_FILE_CHECKSUM, &[sub]).unwrap();

        assert!(c.graph().contains_node(sub));
        assert_eq!(store.read_nodes(PROP_FILE_CHECKSUM), vec![sub]);
    }

    #[test]
    fn writes_to_unknown_subject_fail() {
        let (c, _) = setup();
        let other = ModelContainer::new("http://example.org/other").unwrap();
        other.blank_node();
        let foreign = other.blank_node();
        let result = c.store(foreign).write_single(PROP_FILE_NOTICE, Some("x"));
        assert!(matches!(result, Err(GraphError::UnknownNode(_))));
    }
}
