//! Error types for SPDX model objects
//!
//! Validity problems are not errors: they are reported as strings by the
//! `verify` functions. The variants here cover construction failures and
//! graph access problems.

use crate::arena::FileId;
use spdx_graph::{GraphError, NodeId};

/// Main model error type
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Enumeration value that maps to no known tag
    #[error("invalid {kind}: {value}")]
    InvalidTag {
        /// Enumeration name, e.g. `file type`
        kind: &'static str,
        /// Value as given
        value: String,
    },

    /// Checksum value unusable for construction
    #[error("invalid checksum: {0}")]
    InvalidChecksum(String),

    /// License expression unusable for construction
    #[error("invalid license expression: {0}")]
    InvalidLicense(String),

    /// Other constructor argument rejected
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        /// Argument name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Required property absent from a sub-entity node
    #[error("missing required property {property} on {node}")]
    MissingProperty {
        /// Full property IRI
        property: String,
        /// Sub-entity node lacking it
        node: NodeId,
    },

    /// Term does not reference a node of the expected class
    #[error("{found} is not a {expected}")]
    TypeMismatch {
        /// Expected class IRI
        expected: String,
        /// Offending term
        found: String,
    },

    /// Handle does not belong to the arena
    #[error("unknown file handle {0}")]
    UnknownFile(FileId),

    /// Record is already attached to another container
    #[error("file {0} is attached to a different container")]
    ForeignContainer(FileId),

    /// Digest cannot be computed locally for this algorithm
    #[error("cannot compute {0} checksums")]
    UnsupportedAlgorithm(String),

    /// Graph access failed
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Snapshot could not be serialized
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl ModelError {
    /// Check if the error stems from malformed input rather than the graph
    #[inline]
    #[must_use]
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTag { .. }
                | Self::InvalidChecksum(_)
                | Self::InvalidLicense(_)
                | Self::InvalidArgument { .. }
        )
    }

    /// Check if the caller can recover by correcting its input
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Graph(e) => e.is_recoverable(),
            Self::UnknownFile(_) | Self::ForeignContainer(_) => false,
            _ => true,
        }
    }
}

/// Result alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
