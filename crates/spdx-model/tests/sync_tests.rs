#![allow(deprecated)]

use pretty_assertions::assert_eq;
use spdx_graph::vocab::{
    CLASS_CHECKSUM, CLASS_DOAP_PROJECT, PROP_CHECKSUM_ALGORITHM, PROP_CHECKSUM_VALUE,
    PROP_FILE_ARTIFACT_OF, PROP_FILE_CHECKSUM, PROP_FILE_CONTRIBUTOR, PROP_FILE_NOTICE,
    PROP_FILE_TYPE, PROP_PROJECT_HOMEPAGE, SPDX_NAMESPACE,
};
use spdx_graph::{ModelContainer, NodeId, Term, Triple};
use spdx_model::{
    Annotation, AnnotationType, Checksum, ChecksumAlgorithm, File, FileArena, FileType,
    LicenseExpression, ModelError, ProjectReference, SyncConfig, UriTag,
};
use spdx_test_utils::{create_test_container, create_test_file, init_tracing, SHA1_A, SHA1_B};

fn full_file() -> File {
    File::builder("src/lib.c")
        .comment("core library")
        .copyright_text("Copyright 2024 Example")
        .license_comment("header says MIT")
        .license_concluded(LicenseExpression::simple("MIT").unwrap())
        .license_info_in_file(LicenseExpression::simple("MIT").unwrap())
        .license_info_in_file(LicenseExpression::NoAssertion)
        .annotation(Annotation::new(
            "Person: Jane Doe",
            AnnotationType::Review,
            "2024-03-01T10:00:00Z",
            "headers checked",
        ))
        .file_type(FileType::Source)
        .file_type(FileType::Text)
        .checksum(Checksum::sha1(SHA1_A).unwrap())
        .checksum(Checksum::compute(ChecksumAlgorithm::Sha256, b"lib").unwrap())
        .contributor("Jane Doe")
        .contributor("John Roe")
        .notice_text("NOTICE")
        .artifact_of(
            ProjectReference::new("example")
                .unwrap()
                .with_homepage("https://example.org"),
        )
        .build()
        .unwrap()
}

#[test]
fn test_materialize_then_load_is_equivalent() {
    init_tracing();
    let container = create_test_container();
    let mut arena = FileArena::new();
    let id = arena.insert(full_file());
    let node = arena.materialize(id, &container, &SyncConfig::new()).unwrap();

    let mut loaded = FileArena::new();
    let copy = loaded.load(&container, node).unwrap();
    assert!(arena.equivalent(id, &loaded, copy));
    assert!(loaded.equivalent(copy, &arena, id));
    assert_eq!(
        loaded.get(copy).unwrap().identifier(),
        arena.get(id).unwrap().identifier()
    );
}

#[test]
fn test_empty_collections_and_empty_notice_round_trip() {
    let container = create_test_container();
    let mut arena = FileArena::new();
    let id = arena.insert(File::builder("empty.txt").notice_text("").build().unwrap());
    let node = arena.materialize(id, &container, &SyncConfig::new()).unwrap();

    let mut loaded = FileArena::new();
    let copy = loaded.load(&container, node).unwrap();
    let config = SyncConfig::new();
    let file = loaded.get_mut(copy).unwrap();
    assert!(file.file_types(&config).is_empty());
    assert!(file.checksums(&config).is_empty());
    assert!(file.contributors(&config).is_empty());
    assert!(file.artifact_of(&config).is_empty());
    assert_eq!(file.notice_text(&config), Some(""));
    assert!(loaded.file_dependencies(copy, &config).unwrap().is_empty());
}

#[test]
fn test_getters_observe_external_edits() {
    let container = create_test_container();
    let mut arena = FileArena::new();
    let id = arena.insert(create_test_file("a.c", SHA1_A));
    let node = arena.materialize(id, &container, &SyncConfig::new()).unwrap();

    container
        .store(node)
        .write_literals(PROP_FILE_CONTRIBUTOR, &["Outside Editor"])
        .unwrap();
    container
        .store(node)
        .write_single(PROP_FILE_NOTICE, Some("edited"))
        .unwrap();

    let file = arena.get_mut(id).unwrap();
    assert!(file.contributors(&SyncConfig::cached()).is_empty());
    assert_eq!(
        file.contributors(&SyncConfig::new()),
        &["Outside Editor".to_string()]
    );
    assert_eq!(file.notice_text(&SyncConfig::new()), Some("edited"));
}

#[test]
fn test_setters_write_through_when_attached() {
    let container = create_test_container();
    let mut arena = FileArena::new();
    let id = arena.insert(create_test_file("a.c", SHA1_A));
    let node = arena.materialize(id, &container, &SyncConfig::new()).unwrap();

    let file = arena.get_mut(id).unwrap();
    file.set_file_types(vec![FileType::Binary]).unwrap();
    file.set_checksums(vec![Checksum::sha1(SHA1_B).unwrap()]).unwrap();
    file.set_notice_text(None).unwrap();

    let store = container.store(node);
    assert_eq!(store.read_uris(PROP_FILE_TYPE), vec![FileType::Binary.uri()]);
    assert_eq!(store.read_single(PROP_FILE_NOTICE), None);

    let mut loaded = FileArena::new();
    let copy = loaded.load(&container, node).unwrap();
    assert_eq!(loaded.get(copy).unwrap().sha1(), SHA1_B);
}

#[test]
fn test_detached_setters_do_not_touch_any_graph() {
    let container = create_test_container();
    let mut file = create_test_file("a.c", SHA1_A);
    file.set_contributors(vec!["x".to_string()]).unwrap();
    assert!(container.graph().is_empty());
    assert_eq!(file.contributors(&SyncConfig::new()), &["x".to_string()]);
}

#[test]
fn test_unknown_file_type_dropped_on_read() {
    init_tracing();
    let container = create_test_container();
    let mut arena = FileArena::new();
    let id = arena.insert(create_test_file("a.c", SHA1_A));
    let node = arena.materialize(id, &container, &SyncConfig::new()).unwrap();
    container
        .store(node)
        .write_uris(
            PROP_FILE_TYPE,
            &[
                format!("{SPDX_NAMESPACE}fileType_sourcex"),
                FileType::Archive.uri(),
            ],
        )
        .unwrap();

    let file = arena.get_mut(id).unwrap();
    assert_eq!(file.file_types(&SyncConfig::new()), &[FileType::Archive]);
}

fn append(container: &ModelContainer, subject: NodeId, property: &str, object: NodeId) {
    container
        .graph_mut()
        .insert(Triple::new(subject, property, Term::Node(object)))
        .unwrap();
}

#[test]
fn test_malformed_sub_values_skipped_on_read() {
    init_tracing();
    let container = create_test_container();
    let mut arena = FileArena::new();
    let id = arena.insert(
        File::builder("a.c")
            .checksum(Checksum::sha1(SHA1_A).unwrap())
            .artifact_of(ProjectReference::new("example").unwrap())
            .build()
            .unwrap(),
    );
    let node = arena.materialize(id, &container, &SyncConfig::new()).unwrap();

    let crc = container.blank_node();
    let crc_store = container.store(crc);
    crc_store.write_type(CLASS_CHECKSUM).unwrap();
    crc_store
        .write_uris(PROP_CHECKSUM_ALGORITHM, &[format!("{SPDX_NAMESPACE}checksumAlgorithm_crc")])
        .unwrap();
    crc_store.write_single(PROP_CHECKSUM_VALUE, Some("abcd")).unwrap();
    append(&container, node, &PROP_FILE_CHECKSUM.uri(), crc);

    let valueless = container.blank_node();
    let valueless_store = container.store(valueless);
    valueless_store.write_type(CLASS_CHECKSUM).unwrap();
    valueless_store
        .write_uris(PROP_CHECKSUM_ALGORITHM, &[ChecksumAlgorithm::Md5.uri()])
        .unwrap();
    append(&container, node, &PROP_FILE_CHECKSUM.uri(), valueless);

    let nameless = container.blank_node();
    let nameless_store = container.store(nameless);
    nameless_store.write_type(CLASS_DOAP_PROJECT).unwrap();
    nameless_store
        .write_single(PROP_PROJECT_HOMEPAGE, Some("https://nameless.example"))
        .unwrap();
    append(&container, node, &PROP_FILE_ARTIFACT_OF.uri(), nameless);

    let file = arena.get_mut(id).unwrap();
    assert_eq!(
        file.checksums(&SyncConfig::new()),
        &[Checksum::sha1(SHA1_A).unwrap()]
    );
    assert_eq!(file.sha1(), SHA1_A);
    let projects = file.artifact_of(&SyncConfig::new());
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name(), "example");

    let mut loaded = FileArena::new();
    let copy = loaded.load(&container, node).unwrap();
    assert!(arena.equivalent(id, &loaded, copy));
    assert_eq!(loaded.get(copy).unwrap().sha1(), SHA1_A);
}

#[test]
fn test_unknown_file_type_rejected_on_construction() {
    let err = File::builder("a.c")
        .file_type_tag("sourcex")
        .build()
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidTag { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_refresh_rereads_everything() {
    let container = create_test_container();
    let mut arena = FileArena::new();
    let id = arena.insert(full_file());
    let node = arena.materialize(id, &container, &SyncConfig::new()).unwrap();

    let mut other = FileArena::new();
    let view = other.load(&container, node).unwrap();
    other
        .get_mut(view)
        .unwrap()
        .set_name("renamed.c")
        .unwrap();

    assert_eq!(arena.get(id).unwrap().cached_name(), "src/lib.c");
    arena.refresh(id).unwrap();
    assert_eq!(arena.get(id).unwrap().cached_name(), "renamed.c");
}
