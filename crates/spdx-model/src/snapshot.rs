//! Serializable view of a file
//!
//! Snapshots read cached state only; they never touch the graph.

use crate::arena::{FileArena, FileId};
use crate::checksum::Checksum;
use crate::error::{ModelError, ModelResult};
use crate::project::ProjectReference;
use crate::relationship::{RelatedElement, RelationshipType};
use crate::tag::FileType;
use serde::{Deserialize, Serialize};

/// Plain-data export of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSnapshot {
    /// Element identifier, if assigned
    pub identifier: Option<String>,
    /// File name
    pub name: String,
    /// Comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Concluded license expression as text
    pub license_concluded: String,
    /// Licenses seen in the file, as text
    pub license_info_in_file: Vec<String>,
    /// Copyright notice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_text: Option<String>,
    /// License comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_comment: Option<String>,
    /// File types, in order
    pub file_types: Vec<FileType>,
    /// Checksums
    pub checksums: Vec<Checksum>,
    /// Contributors, in order
    pub contributors: Vec<String>,
    /// Notice text
    pub notice_text: Option<String>,
    /// Projects the file is an artifact of
    pub artifact_of: Vec<ProjectReference>,
    /// Names of the files this one depends on
    pub dependencies: Vec<String>,
    /// Relationships, targets resolved
    pub relationships: Vec<RelationshipSnapshot>,
}

/// Relationship with its target resolved to a name or IRI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSnapshot {
    /// Kind of relationship
    pub relationship_type: RelationshipType,
    /// Target file name, or IRI for other elements
    pub related: String,
    /// Comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FileSnapshot {
    /// Pretty JSON
    ///
    /// # Errors
    /// Returns [`ModelError::Snapshot`] if serialization fails.
    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse JSON produced by [`FileSnapshot::to_json`]
    ///
    /// # Errors
    /// Returns [`ModelError::Snapshot`] for malformed input.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        serde_json::from_str(json).map_err(ModelError::from)
    }
}

impl FileArena {
    /// Snapshot of the cached state of file `id`
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownFile`] for a foreign handle.
    pub fn snapshot(&self, id: FileId) -> ModelResult<FileSnapshot> {
        let file = self.file(id)?;
        let entity = file.entity();
        let name_of = |target: FileId| {
            self.get(target)
                .map_or_else(|| target.to_string(), |f| f.cached_name().to_string())
        };
        Ok(FileSnapshot {
            identifier: entity.identifier.clone(),
            name: entity.name.clone(),
            comment: entity.comment.clone(),
            license_concluded: entity.license_concluded.to_string(),
            license_info_in_file: entity
                .license_info_in_file
                .iter()
                .map(ToString::to_string)
                .collect(),
            copyright_text: entity.copyright_text.clone(),
            license_comment: entity.license_comment.clone(),
            file_types: file.file_types.clone(),
            checksums: file.checksums.clone(),
            contributors: file.contributors.clone(),
            notice_text: file.notice_text.clone(),
            artifact_of: file.artifact_of.clone(),
            dependencies: file.dependencies.iter().map(|dep| name_of(*dep)).collect(),
            relationships: entity
                .relationships
                .iter()
                .map(|r| RelationshipSnapshot {
                    relationship_type: r.relationship_type(),
                    related: match r.related() {
                        RelatedElement::File(target) => name_of(*target),
                        RelatedElement::External(uri) => uri.clone(),
                    },
                    comment: r.comment().map(str::to_string),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;
    use crate::file::File;
    use crate::license::LicenseExpression;
    use crate::relationship::Relationship;
    use pretty_assertions::assert_eq;

    #[test]
    fn snapshot_resolves_references_by_name() {
        let mut arena = FileArena::new();
        let dep = arena.insert(File::new("dep.c"));
        let a = arena.insert(
            File::builder("a.c")
                .license_concluded(LicenseExpression::simple("MIT").unwrap())
                .relationship(Relationship::to_file(RelationshipType::Generates, dep))
                .build()
                .unwrap(),
        );
        arena.set_file_dependencies(a, vec![dep]).unwrap();

        let snapshot = arena.snapshot(a).unwrap();
        assert_eq!(snapshot.name, "a.c");
        assert_eq!(snapshot.license_concluded, "MIT");
        assert_eq!(snapshot.dependencies, vec!["dep.c".to_string()]);
        assert_eq!(snapshot.relationships[0].related, "dep.c");
    }

    #[test]
    fn json_keeps_empty_notice_distinct() {
        let mut arena = FileArena::new();
        let a = arena.insert(File::builder("a.c").notice_text("").build().unwrap());
        let json = arena.snapshot(a).unwrap().to_json().unwrap();
        let parsed = FileSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed.notice_text.as_deref(), Some(""));
        assert!(json.contains("\"notice_text\": \"\""));
    }
}
