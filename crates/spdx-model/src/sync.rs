//! Shared plumbing between cached values and the graph
//!
//! Sub-entity values (checksums, projects, licenses, annotations) implement
//! [`GraphValue`] to convert to and from a single object term. The helpers
//! below read such values leniently, write them through a
//! [`PropertyStore`], and apply merge-on-change when refreshing caches.

use crate::config::SyncConfig;
use crate::error::{ModelError, ModelResult};
use spdx_graph::{Iri, ModelContainer, NodeId, PropertyStore, Term};

/// Value stored as one object term of a property
pub trait GraphValue: Sized {
    /// Short name used in log messages
    const KIND: &'static str;

    /// Reconstruct the value from an object term
    ///
    /// # Errors
    /// Returns error if the term does not describe a valid value.
    fn from_term(container: &ModelContainer, term: &Term) -> ModelResult<Self>;

    /// Create the graph representation and return the term referencing it
    ///
    /// # Errors
    /// Returns error if the graph rejects the writes.
    fn to_term(&self, container: &ModelContainer) -> ModelResult<Term>;
}

/// Semantic equality that may be looser than `PartialEq`
pub trait Equivalent {
    /// True if both values describe the same thing
    fn equivalent(&self, other: &Self) -> bool;
}

/// Attachment of a model object to a graph node
#[derive(Debug, Clone)]
pub struct Resource {
    container: ModelContainer,
    node: NodeId,
}

impl Resource {
    /// Bind to a node of `container`
    #[inline]
    #[must_use]
    pub fn new(container: ModelContainer, node: NodeId) -> Self {
        Self { container, node }
    }

    /// Owning container
    #[inline]
    #[must_use]
    pub fn container(&self) -> &ModelContainer {
        &self.container
    }

    /// Subject node
    #[inline]
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Property store for the subject node
    #[inline]
    #[must_use]
    pub fn store(&self) -> PropertyStore<'_> {
        self.container.store(self.node)
    }
}

/// Store to refresh from, if the object is attached and the policy allows it
#[inline]
pub(crate) fn refreshing<'a>(
    resource: &'a Option<Resource>,
    config: &SyncConfig,
) -> Option<PropertyStore<'a>> {
    if config.refresh_on_get {
        resource.as_ref().map(Resource::store)
    } else {
        None
    }
}

/// Read every value of a property, skipping malformed ones
pub(crate) fn read_values<T: GraphValue>(store: &PropertyStore<'_>, property: Iri) -> Vec<T> {
    store
        .read_terms(property)
        .iter()
        .filter_map(|term| match T::from_term(store.container(), term) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    kind = T::KIND,
                    subject = %store.subject(),
                    error = %e,
                    "skipping malformed value"
                );
                None
            }
        })
        .collect()
}

/// Read the first well-formed value of a property
pub(crate) fn read_value<T: GraphValue>(store: &PropertyStore<'_>, property: Iri) -> Option<T> {
    read_values(store, property).into_iter().next()
}

/// Replace a property with freshly created representations of `values`
pub(crate) fn write_values<T: GraphValue>(
    store: &PropertyStore<'_>,
    property: Iri,
    values: &[T],
) -> ModelResult<()> {
    let terms = values
        .iter()
        .map(|value| value.to_term(store.container()))
        .collect::<ModelResult<Vec<_>>>()?;
    store.write_terms(property, terms)?;
    Ok(())
}

/// Both-ways containment under [`Equivalent`]; lengths are not compared
pub(crate) fn all_equivalent<T: Equivalent>(a: &[T], b: &[T]) -> bool {
    a.iter().all(|x| b.iter().any(|y| x.equivalent(y)))
        && b.iter().all(|y| a.iter().any(|x| x.equivalent(y)))
}

/// Replace the cache only when the fresh collection differs semantically
pub(crate) fn merge_if_changed<T: Equivalent>(cached: &mut Vec<T>, fresh: Vec<T>) {
    if !all_equivalent(cached, &fresh) {
        *cached = fresh;
    }
}

/// Replace the cache only when the fresh collection differs
pub(crate) fn replace_if_different<T: PartialEq>(cached: &mut Vec<T>, fresh: Vec<T>) {
    if *cached != fresh {
        *cached = fresh;
    }
}

/// Typed blank node for a new sub-entity
pub(crate) fn new_sub_entity(container: &ModelContainer, class: Iri) -> ModelResult<NodeId> {
    let node = container.blank_node();
    container.store(node).write_type(class)?;
    Ok(node)
}

/// Blank or named node behind a term, checked against an expected class
pub(crate) fn expect_node(
    container: &ModelContainer,
    term: &Term,
    class: Iri,
) -> ModelResult<NodeId> {
    match term.as_node() {
        Some(node) if container.has_type(node, class) => Ok(node),
        _ => Err(ModelError::TypeMismatch {
            expected: class.uri(),
            found: term.to_string(),
        }),
    }
}
