//! Testing utilities for the SPDX workspace
//!
//! Shared fixtures and tracing setup.

#![allow(missing_docs)]

use spdx_graph::ModelContainer;
use spdx_model::{Checksum, File, FileArena, FileId};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// SHA-1 of the empty input
pub const EMPTY_SHA1: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";

pub const SHA1_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const SHA1_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

pub const TEST_NAMESPACE: &str = "http://example.org/spdx/test-doc";

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn create_test_container() -> ModelContainer {
    ModelContainer::new(TEST_NAMESPACE).unwrap()
}

pub fn create_container_with_namespace(namespace: &str) -> ModelContainer {
    ModelContainer::new(namespace).unwrap()
}

/// File with a name and one SHA-1 checksum
pub fn create_test_file(name: &str, sha1: &str) -> File {
    File::builder(name)
        .checksum(Checksum::sha1(sha1).unwrap())
        .build()
        .unwrap()
}

/// Arena holding one valid file
pub fn setup_single_file(name: &str, sha1: &str) -> (FileArena, FileId) {
    let mut arena = FileArena::new();
    let id = arena.insert(create_test_file(name, sha1));
    (arena, id)
}
