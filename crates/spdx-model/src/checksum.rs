//! Checksums
//!
//! A checksum is an `(algorithm, hex value)` pair stored as a typed blank
//! node. Values compare case-insensitively.

use crate::error::{ModelError, ModelResult};
use crate::sync::{expect_node, new_sub_entity, Equivalent, GraphValue};
use crate::tag::{parse_tag, uri_tags, TagParse, UriTag};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use spdx_graph::vocab::{CLASS_CHECKSUM, PROP_CHECKSUM_ALGORITHM, PROP_CHECKSUM_VALUE};
use spdx_graph::{ModelContainer, Term};

uri_tags! {
    /// Digest algorithm of a checksum
    #[non_exhaustive]
    pub enum ChecksumAlgorithm ("checksumAlgorithm_", "checksum algorithm") {
        Sha1 => "sha1",
        Sha224 => "sha224",
        Sha256 => "sha256",
        Sha384 => "sha384",
        Sha512 => "sha512",
        Md2 => "md2",
        Md4 => "md4",
        Md5 => "md5",
        Md6 => "md6",
    }
}

impl ChecksumAlgorithm {
    /// Hex length of a digest, when fixed
    #[must_use]
    pub fn digest_hex_len(self) -> Option<usize> {
        match self {
            Self::Sha1 => Some(40),
            Self::Sha224 => Some(56),
            Self::Sha256 => Some(64),
            Self::Sha384 => Some(96),
            Self::Sha512 => Some(128),
            Self::Md2 | Self::Md4 | Self::Md5 => Some(32),
            Self::Md6 => None,
        }
    }
}

/// Digest of a file's content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    algorithm: ChecksumAlgorithm,
    value: String,
}

impl Checksum {
    /// Create a checksum from a hex value
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidChecksum`] if the value is empty or not
    /// hexadecimal. Digest length is left to [`Checksum::verify`].
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> ModelResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(ModelError::InvalidChecksum(format!(
                "empty {algorithm} value"
            )));
        }
        if !is_hex(&value) {
            return Err(ModelError::InvalidChecksum(format!(
                "{algorithm} value {value} is not hexadecimal"
            )));
        }
        Ok(Self { algorithm, value })
    }

    /// SHA-1 checksum from a hex value
    ///
    /// # Errors
    /// See [`Checksum::new`].
    pub fn sha1(value: impl Into<String>) -> ModelResult<Self> {
        Self::new(ChecksumAlgorithm::Sha1, value)
    }

    /// Compute a checksum over `content`
    ///
    /// # Errors
    /// Returns [`ModelError::UnsupportedAlgorithm`] for MD-family algorithms.
    pub fn compute(algorithm: ChecksumAlgorithm, content: &[u8]) -> ModelResult<Self> {
        let value = match algorithm {
            ChecksumAlgorithm::Sha1 => hex::encode(Sha1::digest(content)),
            ChecksumAlgorithm::Sha224 => hex::encode(Sha224::digest(content)),
            ChecksumAlgorithm::Sha256 => hex::encode(Sha256::digest(content)),
            ChecksumAlgorithm::Sha384 => hex::encode(Sha384::digest(content)),
            ChecksumAlgorithm::Sha512 => hex::encode(Sha512::digest(content)),
            other => return Err(ModelError::UnsupportedAlgorithm(other.to_string())),
        };
        Ok(Self { algorithm, value })
    }

    /// Digest algorithm
    #[inline]
    #[must_use]
    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    /// Hex digest as stored
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True if `content` hashes to this value
    ///
    /// Always false for algorithms that cannot be computed locally.
    #[must_use]
    pub fn matches(&self, content: &[u8]) -> bool {
        Self::compute(self.algorithm, content)
            .map(|computed| computed.equivalent(self))
            .unwrap_or(false)
    }

    /// Validity problems
    #[must_use]
    pub fn verify(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.value.is_empty() {
            problems.push(format!("Missing required checksum value for {}", self.algorithm));
            return problems;
        }
        if !is_hex(&self.value) {
            problems.push(format!(
                "Invalid {} checksum value {}: not hexadecimal",
                self.algorithm, self.value
            ));
        } else if let Some(expected) = self.algorithm.digest_hex_len() {
            if self.value.len() != expected {
                problems.push(format!(
                    "Invalid {} checksum value {}: expected {expected} hex digits",
                    self.algorithm, self.value
                ));
            }
        }
        problems
    }
}

fn is_hex(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_hexdigit())
}

impl Equivalent for Checksum {
    fn equivalent(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && self.value.eq_ignore_ascii_case(&other.value)
    }
}

impl GraphValue for Checksum {
    const KIND: &'static str = "checksum";

    fn from_term(container: &ModelContainer, term: &Term) -> ModelResult<Self> {
        let node = expect_node(container, term, CLASS_CHECKSUM)?;
        let store = container.store(node);
        let algorithm_uri = store
            .read_uris(PROP_CHECKSUM_ALGORITHM)
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::MissingProperty {
                property: PROP_CHECKSUM_ALGORITHM.uri(),
                node,
            })?;
        let algorithm = parse_tag::<ChecksumAlgorithm>(&algorithm_uri, TagParse::Reject)?
            .ok_or_else(|| ModelError::InvalidTag {
                kind: ChecksumAlgorithm::KIND,
                value: algorithm_uri.clone(),
            })?;
        let value = store
            .read_single(PROP_CHECKSUM_VALUE)
            .ok_or_else(|| ModelError::MissingProperty {
                property: PROP_CHECKSUM_VALUE.uri(),
                node,
            })?;
        // Stored values are taken as-is; verify reports malformed ones
        Ok(Self { algorithm, value })
    }

    fn to_term(&self, container: &ModelContainer) -> ModelResult<Term> {
        let node = new_sub_entity(container, CLASS_CHECKSUM)?;
        let store = container.store(node);
        store.write_uris(PROP_CHECKSUM_ALGORITHM, &[self.algorithm.uri()])?;
        store.write_single(PROP_CHECKSUM_VALUE, Some(&self.value))?;
        Ok(Term::Node(node))
    }
}
