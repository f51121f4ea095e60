//! Detached deep copies
//!
//! A clone carries every property of its source except the identifier and
//! the graph attachment. Referenced files are cloned too, once each, so
//! shared and cyclic references keep their shape in the destination arena.

use crate::arena::{FileArena, FileId};
use crate::relationship::RelatedElement;
use std::collections::HashMap;

struct Cloner<'a> {
    source: &'a FileArena,
    target: &'a mut FileArena,
    copied: HashMap<FileId, FileId>,
}

impl Cloner<'_> {
    fn file(&mut self, id: FileId) -> Option<FileId> {
        if let Some(copy) = self.copied.get(&id) {
            return Some(*copy);
        }
        let source = self.source;
        let Some(original) = source.get(id) else {
            tracing::error!(file = %id, "cannot clone unknown file");
            return None;
        };
        let copy = self.target.insert(original.detached_copy());
        self.copied.insert(id, copy);

        let dependencies: Vec<FileId> = original
            .dependencies
            .iter()
            .filter_map(|dep| self.file(*dep))
            .collect();
        let mut relationships = Vec::with_capacity(original.entity.relationships.len());
        for relationship in &original.entity.relationships {
            let related = match relationship.related() {
                RelatedElement::File(target) => match self.file(*target) {
                    Some(cloned) => RelatedElement::File(cloned),
                    None => continue,
                },
                external @ RelatedElement::External(_) => external.clone(),
            };
            relationships.push(relationship.retarget(related));
        }

        if let Some(file) = self.target.get_mut(copy) {
            file.dependencies = dependencies;
            file.entity.relationships = relationships;
        }
        Some(copy)
    }
}

impl FileArena {
    /// Deep-copy file `id` into `target`, detached from any graph
    ///
    /// Returns `None` only for a handle this arena does not own. A
    /// reference to such a handle is dropped from the copy.
    pub fn clone_into(&self, id: FileId, target: &mut FileArena) -> Option<FileId> {
        Cloner {
            source: self,
            target,
            copied: HashMap::new(),
        }
        .file(id)
    }
}
