//! SPDX Model
//!
//! File records kept in sync with a [`spdx_graph`] triple store.
//!
//! # Core Concepts
//!
//! - [`File`]: cached file metadata; getters re-read the graph and setters
//!   write through while the file is attached
//! - [`FileArena`]: owns files and resolves the references between them;
//!   loads, materializes, compares, clones and verifies
//! - [`SyncConfig`]: refresh and dedup policy passed to every sync call
//!
//! # Example
//!
//! ```rust
//! use spdx_graph::ModelContainer;
//! use spdx_model::{Checksum, File, FileArena, FileType, SyncConfig};
//!
//! let container = ModelContainer::new("http://example.org/doc").unwrap();
//! let config = SyncConfig::default();
//!
//! let mut arena = FileArena::new();
//! let id = arena.insert(
//!     File::builder("src/main.c")
//!         .file_type(FileType::Source)
//!         .checksum(Checksum::compute(spdx_model::ChecksumAlgorithm::Sha1, b"int main;").unwrap())
//!         .build()
//!         .unwrap(),
//! );
//! let node = arena.materialize(id, &container, &config).unwrap();
//!
//! let mut loaded = FileArena::new();
//! let copy = loaded.load(&container, node).unwrap();
//! assert!(arena.equivalent(id, &loaded, copy));
//! assert!(loaded.verify(copy).is_empty());
//! ```

#![warn(unreachable_pub)]

mod annotation;
mod arena;
mod checksum;
mod clone;
mod config;
mod entity;
mod equivalence;
mod error;
mod file;
mod license;
mod project;
mod relationship;
mod snapshot;
mod sync;
mod tag;
mod verify;

pub use annotation::{Annotation, AnnotationType};
pub use arena::{FileArena, FileId};
pub use checksum::{Checksum, ChecksumAlgorithm};
pub use config::SyncConfig;
pub use entity::{ElementVocab, Entity};
pub use error::{ModelError, ModelResult};
pub use file::{find_file_node, File, FileBuilder, FILE_VOCAB};
pub use license::LicenseExpression;
pub use project::ProjectReference;
pub use relationship::{RelatedElement, Relationship, RelationshipType};
pub use snapshot::{FileSnapshot, RelationshipSnapshot};
pub use sync::{Equivalent, GraphValue, Resource};
pub use tag::{parse_tag, parse_tags, FileType, TagParse, UriTag};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
