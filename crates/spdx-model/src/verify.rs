//! Validation
//!
//! Findings are human-readable strings; nothing here fails. Dependencies
//! are verified recursively and their findings prefixed with the
//! dependency's name. Each file is verified once per call: a dependency
//! reached again, through a cycle or a second referrer, is skipped.

use crate::arena::{FileArena, FileId};
use crate::relationship::RelatedElement;
use std::collections::HashSet;

impl FileArena {
    /// Validity problems of file `id`, including its dependencies
    #[must_use]
    pub fn verify(&self, id: FileId) -> Vec<String> {
        let mut visited = HashSet::new();
        self.verify_once(id, &mut visited)
    }

    fn verify_once(&self, id: FileId, visited: &mut HashSet<FileId>) -> Vec<String> {
        let Some(file) = self.get(id) else {
            return vec![format!("Unknown file reference {id}")];
        };
        visited.insert(id);
        let mut problems = file.verify_local();

        for relationship in &file.entity.relationships {
            match relationship.related() {
                RelatedElement::File(target) if self.get(*target).is_none() => problems.push(format!(
                    "Relationship {} of file {} references unknown file {target}",
                    relationship.relationship_type(),
                    file.label()
                )),
                RelatedElement::External(uri) if uri.is_empty() => problems.push(format!(
                    "Missing related element for relationship {} of file {}",
                    relationship.relationship_type(),
                    file.label()
                )),
                _ => {}
            }
        }

        for dep in &file.dependencies {
            if visited.contains(dep) {
                continue;
            }
            let label = self.get(*dep).map_or("UNKNOWN", |d| d.label());
            for finding in self.verify_once(*dep, visited) {
                problems.push(format!("Invalid file dependency for file named {label}: {finding}"));
            }
        }

        problems
    }
}
