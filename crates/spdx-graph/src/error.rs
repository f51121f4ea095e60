//! Error types for the triple graph

use crate::term::NodeId;

/// Errors raised by graph and property-store operations
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node handle does not belong to this graph
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// Document namespace is unusable as an IRI prefix
    #[error("invalid document namespace '{namespace}': {reason}")]
    InvalidNamespace {
        /// Namespace as given
        namespace: String,
        /// What is wrong with it
        reason: String,
    },

    /// Identifier cannot be turned into a node IRI
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),
}

impl GraphError {
    /// Check if the caller can recover by adjusting its input
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnknownNode(_))
    }
}

/// Result alias for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
