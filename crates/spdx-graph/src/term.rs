//! Graph terms and triples

use std::fmt::{self, Display, Formatter};

/// Opaque handle to a node in a [`TripleGraph`](crate::TripleGraph)
///
/// Handles are graph-local: the same number in two graphs names unrelated
/// nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    #[inline]
    #[must_use]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "_:n{}", self.0)
    }
}

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Another node in the same graph (named or blank)
    Node(NodeId),

    /// A bare IRI that is not modelled as a node (enumeration values)
    Uri(String),

    /// Plain string literal
    Literal(String),
}

impl Term {
    /// Node handle, if this term is a node
    #[inline]
    #[must_use]
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(node) => Some(*node),
            _ => None,
        }
    }

    /// Literal text, if this term is a literal
    #[inline]
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// IRI text, if this term is a bare IRI
    #[inline]
    #[must_use]
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(uri) => Some(uri),
            _ => None,
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => write!(f, "{node}"),
            Self::Uri(uri) => write!(f, "<{uri}>"),
            Self::Literal(value) => write!(f, "{value:?}"),
        }
    }
}

/// A single subject-predicate-object statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject node
    pub subject: NodeId,
    /// Full predicate IRI
    pub predicate: String,
    /// Object term
    pub object: Term,
}

impl Triple {
    /// Create a new triple
    #[inline]
    #[must_use]
    pub fn new(subject: NodeId, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

impl Display for Triple {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// Match pattern over triples; `None` positions are wildcards
#[derive(Debug, Clone, Copy, Default)]
pub struct TriplePattern<'a> {
    /// Required subject
    pub subject: Option<NodeId>,
    /// Required predicate IRI
    pub predicate: Option<&'a str>,
    /// Required object
    pub object: Option<&'a Term>,
}

impl<'a> TriplePattern<'a> {
    /// Pattern matching every triple
    #[inline]
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict the subject
    #[inline]
    #[must_use]
    pub fn subject(mut self, subject: NodeId) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Restrict the predicate
    #[inline]
    #[must_use]
    pub fn predicate(mut self, predicate: &'a str) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Restrict the object
    #[inline]
    #[must_use]
    pub fn object(mut self, object: &'a Term) -> Self {
        self.object = Some(object);
        self
    }

    /// Check a triple against the pattern
    #[must_use]
    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.map_or(true, |s| s == triple.subject)
            && self.predicate.map_or(true, |p| p == triple.predicate)
            && self.object.map_or(true, |o| *o == triple.object)
    }
}
