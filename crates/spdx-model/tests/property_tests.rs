use proptest::prelude::*;
use spdx_model::{Checksum, ChecksumAlgorithm, File, FileArena, FileType, SyncConfig, UriTag};
use spdx_test_utils::create_test_container;

fn file_type() -> impl Strategy<Value = FileType> {
    proptest::sample::select(FileType::all().to_vec())
}

fn distinct_file_types() -> impl Strategy<Value = Vec<FileType>> {
    // Order is kept by the graph, duplicates are not
    proptest::sample::subsequence(FileType::all().to_vec(), 0..4)
}

fn contributors() -> impl Strategy<Value = Vec<String>> {
    // Distinct values: the graph stores a set of literals per property
    proptest::collection::btree_set("[A-Za-z ]{1,12}", 0..4).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_repeated_writes_are_idempotent(
        types in distinct_file_types(),
        people in contributors(),
        notice in proptest::option::of("[a-z]{0,8}"),
        payload in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let container = create_test_container();
        let mut arena = FileArena::new();
        let id = arena.insert(File::new("prop.c"));
        arena.materialize(id, &container, &SyncConfig::new()).unwrap();
        let checksum = Checksum::compute(ChecksumAlgorithm::Sha1, &payload).unwrap();

        let write = |arena: &mut FileArena| {
            let file = arena.get_mut(id).unwrap();
            file.set_file_types(types.clone()).unwrap();
            file.set_contributors(people.clone()).unwrap();
            file.set_notice_text(notice.clone()).unwrap();
            file.set_checksums(vec![checksum.clone()]).unwrap();
        };

        write(&mut arena);
        let triples = container.graph().len();
        let nodes = container.graph().node_count();
        write(&mut arena);
        prop_assert_eq!(container.graph().len(), triples);
        prop_assert_eq!(container.graph().node_count(), nodes);

        let mut loaded = FileArena::new();
        let node = arena.get(id).unwrap().resource().unwrap().node();
        let copy = loaded.load(&container, node).unwrap();
        prop_assert!(arena.equivalent(id, &loaded, copy));
        prop_assert_eq!(loaded.get(copy).unwrap().sha1(), checksum.value());
    }

    #[test]
    fn prop_equivalence_is_symmetric(
        left_types in proptest::collection::vec(file_type(), 0..3),
        right_types in proptest::collection::vec(file_type(), 0..3),
        left_notice in proptest::option::of("[a-z]{0,3}"),
        right_notice in proptest::option::of("[a-z]{0,3}"),
    ) {
        let mut arena = FileArena::new();
        let mut build = |types: &[FileType], notice: &Option<String>| {
            let mut builder = File::builder("sym.c");
            for t in types {
                builder = builder.file_type(*t);
            }
            if let Some(n) = notice {
                builder = builder.notice_text(n.clone());
            }
            arena.insert(builder.build().unwrap())
        };
        let a = build(&left_types, &left_notice);
        let b = build(&right_types, &right_notice);
        prop_assert_eq!(arena.equivalent(a, &arena, b), arena.equivalent(b, &arena, a));
        prop_assert!(arena.equivalent(a, &arena, a));
    }
}
