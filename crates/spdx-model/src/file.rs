//! File records
//!
//! A [`File`] extends the base [`Entity`] with file types, checksums,
//! contributors, notice text and `artifactOf` projects. References to other
//! files (dependencies and file relationships) are [`FileId`] handles and are
//! read and written through the [`FileArena`](crate::FileArena).

use crate::annotation::Annotation;
use crate::arena::FileId;
use crate::checksum::{Checksum, ChecksumAlgorithm};
use crate::config::SyncConfig;
use crate::entity::{ElementVocab, Entity};
use crate::error::ModelResult;
use crate::license::LicenseExpression;
use crate::project::ProjectReference;
use crate::relationship::Relationship;
use crate::sync::{
    all_equivalent, merge_if_changed, read_values, refreshing, replace_if_different, write_values,
    Resource,
};
use crate::tag::{parse_tag, read_tags, FileType, TagParse, UriTag};
use spdx_graph::vocab::{
    CLASS_FILE, PROP_FILE_ARTIFACT_OF, PROP_FILE_CHECKSUM, PROP_FILE_CONTRIBUTOR, PROP_FILE_NAME,
    PROP_FILE_NOTICE, PROP_FILE_SEEN_LICENSE, PROP_FILE_TYPE,
};
use spdx_graph::{ModelContainer, NodeId, PropertyStore, Term};
use std::cmp::Ordering;

/// Predicates of the File element kind
pub static FILE_VOCAB: ElementVocab = ElementVocab {
    class: CLASS_FILE,
    name: PROP_FILE_NAME,
    license_info: PROP_FILE_SEEN_LICENSE,
    kind: "file",
};

/// SPDX File record
#[derive(Debug)]
pub struct File {
    pub(crate) entity: Entity,
    pub(crate) file_types: Vec<FileType>,
    pub(crate) checksums: Vec<Checksum>,
    pub(crate) contributors: Vec<String>,
    pub(crate) notice_text: Option<String>,
    pub(crate) artifact_of: Vec<ProjectReference>,
    pub(crate) dependencies: Vec<FileId>,
}

impl File {
    /// Unattached file with only a name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_entity(Entity::new(&FILE_VOCAB, name.into()))
    }

    /// Start building a file
    #[must_use]
    pub fn builder(name: impl Into<String>) -> FileBuilder {
        FileBuilder::new(name)
    }

    fn from_entity(entity: Entity) -> Self {
        Self {
            entity,
            file_types: Vec::new(),
            checksums: Vec::new(),
            contributors: Vec::new(),
            notice_text: None,
            artifact_of: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Base element properties
    #[inline]
    #[must_use]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Base element properties, mutable
    #[inline]
    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    /// Element identifier, e.g. `SPDXRef-7`
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.entity.identifier()
    }

    /// True if bound to a graph node
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.entity.is_attached()
    }

    /// Graph attachment, if any
    #[inline]
    #[must_use]
    pub fn resource(&self) -> Option<&Resource> {
        self.entity.resource()
    }

    /// File name, refreshed per `config`
    pub fn name(&mut self, config: &SyncConfig) -> &str {
        self.entity.name(config)
    }

    /// Set the file name
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_name(&mut self, name: impl Into<String>) -> ModelResult<()> {
        self.entity.set_name(name)
    }

    /// Cached file name, without touching the graph
    #[inline]
    #[must_use]
    pub fn cached_name(&self) -> &str {
        &self.entity.name
    }

    /// File types, in order, refreshed per `config`
    pub fn file_types(&mut self, config: &SyncConfig) -> &[FileType] {
        if let Some(store) = refreshing(&self.entity.resource, config) {
            let fresh = read_tags(&store.read_uris(PROP_FILE_TYPE));
            replace_if_different(&mut self.file_types, fresh);
        }
        &self.file_types
    }

    /// Replace the file types
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_file_types(&mut self, file_types: Vec<FileType>) -> ModelResult<()> {
        self.file_types = file_types;
        if let Some(resource) = self.entity.resource() {
            write_file_types(&resource.store(), &self.file_types)?;
        }
        Ok(())
    }

    /// Checksums, in graph order, refreshed per `config`
    pub fn checksums(&mut self, config: &SyncConfig) -> &[Checksum] {
        if let Some(store) = refreshing(&self.entity.resource, config) {
            let fresh = read_values(&store, PROP_FILE_CHECKSUM);
            merge_if_changed(&mut self.checksums, fresh);
        }
        &self.checksums
    }

    /// Replace the checksums
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_checksums(&mut self, checksums: Vec<Checksum>) -> ModelResult<()> {
        self.checksums = checksums;
        if let Some(resource) = self.entity.resource() {
            write_values(&resource.store(), PROP_FILE_CHECKSUM, &self.checksums)?;
        }
        Ok(())
    }

    /// SHA-1 value from the cached checksums; empty if there is none
    #[must_use]
    pub fn sha1(&self) -> &str {
        sha1_of(&self.checksums).unwrap_or_default()
    }

    /// Contributors, in order, refreshed per `config`
    pub fn contributors(&mut self, config: &SyncConfig) -> &[String] {
        if let Some(store) = refreshing(&self.entity.resource, config) {
            let fresh = store.read_literals(PROP_FILE_CONTRIBUTOR);
            replace_if_different(&mut self.contributors, fresh);
        }
        &self.contributors
    }

    /// Replace the contributors
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_contributors(&mut self, contributors: Vec<String>) -> ModelResult<()> {
        self.contributors = contributors;
        if let Some(resource) = self.entity.resource() {
            resource
                .store()
                .write_literals(PROP_FILE_CONTRIBUTOR, &self.contributors)?;
        }
        Ok(())
    }

    /// Notice text; `Some("")` and `None` are distinct
    pub fn notice_text(&mut self, config: &SyncConfig) -> Option<&str> {
        if let Some(store) = refreshing(&self.entity.resource, config) {
            self.notice_text = store.read_single(PROP_FILE_NOTICE);
        }
        self.notice_text.as_deref()
    }

    /// Set or clear the notice text
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_notice_text(&mut self, notice: Option<String>) -> ModelResult<()> {
        self.notice_text = notice;
        if let Some(resource) = self.entity.resource() {
            resource
                .store()
                .write_single(PROP_FILE_NOTICE, self.notice_text.as_deref())?;
        }
        Ok(())
    }

    /// Projects this file is an artifact of, refreshed per `config`
    pub fn artifact_of(&mut self, config: &SyncConfig) -> &[ProjectReference] {
        if let Some(store) = refreshing(&self.entity.resource, config) {
            let fresh = read_values(&store, PROP_FILE_ARTIFACT_OF);
            merge_if_changed(&mut self.artifact_of, fresh);
        }
        &self.artifact_of
    }

    /// Replace the projects this file is an artifact of
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_artifact_of(&mut self, projects: Vec<ProjectReference>) -> ModelResult<()> {
        self.artifact_of = projects;
        if let Some(resource) = self.entity.resource() {
            write_values(&resource.store(), PROP_FILE_ARTIFACT_OF, &self.artifact_of)?;
        }
        Ok(())
    }

    /// Node of an existing file in `container` with the same name and SHA-1
    ///
    /// See [`find_file_node`].
    #[must_use]
    pub fn find_duplicate(&self, container: &ModelContainer) -> Option<NodeId> {
        find_file_node(container, &self.entity.name, self.sha1())
    }

    /// Order by cached name
    #[must_use]
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.entity.name.cmp(&other.entity.name)
    }

    /// File-level properties of a node, file references excluded
    pub(crate) fn read_from(container: &ModelContainer, node: NodeId) -> Self {
        let mut file = Self::from_entity(Entity::read_from(&FILE_VOCAB, container, node));
        file.refresh_from(&container.store(node));
        file
    }

    /// Re-read every property except file references
    pub(crate) fn refresh(&mut self) {
        self.entity.refresh();
        if let Some(resource) = self.entity.resource.clone() {
            self.refresh_from(&resource.store());
        }
    }

    fn refresh_from(&mut self, store: &PropertyStore<'_>) {
        replace_if_different(&mut self.file_types, read_tags(&store.read_uris(PROP_FILE_TYPE)));
        merge_if_changed(&mut self.checksums, read_values(store, PROP_FILE_CHECKSUM));
        replace_if_different(&mut self.contributors, store.read_literals(PROP_FILE_CONTRIBUTOR));
        self.notice_text = store.read_single(PROP_FILE_NOTICE);
        merge_if_changed(&mut self.artifact_of, read_values(store, PROP_FILE_ARTIFACT_OF));
    }

    /// Write every property except file references
    pub(crate) fn write_to(&self, store: &PropertyStore<'_>) -> ModelResult<()> {
        self.entity.write_to(store)?;
        write_file_types(store, &self.file_types)?;
        write_values(store, PROP_FILE_CHECKSUM, &self.checksums)?;
        store.write_literals(PROP_FILE_CONTRIBUTOR, &self.contributors)?;
        store.write_single(PROP_FILE_NOTICE, self.notice_text.as_deref())?;
        write_values(store, PROP_FILE_ARTIFACT_OF, &self.artifact_of)?;
        Ok(())
    }

    /// Unattached copy without identifier or file references
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            entity: self.entity.detached_copy(),
            file_types: self.file_types.clone(),
            checksums: self.checksums.clone(),
            contributors: self.contributors.clone(),
            notice_text: self.notice_text.clone(),
            artifact_of: self.artifact_of.clone(),
            dependencies: Vec::new(),
        }
    }

    /// Everything but file references is equivalent
    pub(crate) fn equivalent_local(&self, other: &Self) -> bool {
        self.entity.equivalent_base(&other.entity)
            && all_equivalent(&self.checksums, &other.checksums)
            && self.file_types == other.file_types
            && self.contributors == other.contributors
            && self.notice_text == other.notice_text
            && all_equivalent(&self.artifact_of, &other.artifact_of)
    }

    /// Validity problems of the file itself, file references excluded
    pub(crate) fn verify_local(&self) -> Vec<String> {
        let mut problems = self.entity.verify_base();
        let label = self.label();
        if self.checksums.is_empty() {
            problems.push(format!("Missing required checksum for file {label}"));
        } else {
            for checksum in &self.checksums {
                problems.extend(checksum.verify());
            }
        }
        if sha1_of(&self.checksums).map_or(true, str::is_empty) {
            problems.push(format!("Missing required SHA1 hashcode value for {label}"));
        }
        for project in &self.artifact_of {
            problems.extend(project.verify());
        }
        problems
    }

    /// Name used in messages
    pub(crate) fn label(&self) -> &str {
        if self.entity.name.is_empty() {
            "UNKNOWN"
        } else {
            &self.entity.name
        }
    }
}

fn sha1_of(checksums: &[Checksum]) -> Option<&str> {
    checksums
        .iter()
        .find(|c| c.algorithm() == ChecksumAlgorithm::Sha1)
        .map(Checksum::value)
}

fn write_file_types(store: &PropertyStore<'_>, file_types: &[FileType]) -> ModelResult<()> {
    let uris: Vec<String> = file_types.iter().map(|t| t.uri()).collect();
    store.write_uris(PROP_FILE_TYPE, &uris)?;
    Ok(())
}

/// Find a file node by name and SHA-1
///
/// Only the first node carrying `fileName = name` (in graph insertion order)
/// is considered. Its SHA-1 is looked up among all of its checksums, not
/// only the first checksum triple, so a node listing another algorithm
/// first still matches. The value is compared case-insensitively.
/// Returns `None` for an empty `sha1`.
#[must_use]
pub fn find_file_node(container: &ModelContainer, name: &str, sha1: &str) -> Option<NodeId> {
    if sha1.is_empty() {
        return None;
    }
    let candidate = container
        .graph()
        .subjects(&PROP_FILE_NAME.uri(), &Term::Literal(name.to_string()))
        .into_iter()
        .next()?;
    let checksums: Vec<Checksum> = read_values(&container.store(candidate), PROP_FILE_CHECKSUM);
    let matched = sha1_of(&checksums).is_some_and(|found| found.eq_ignore_ascii_case(sha1));
    tracing::debug!(%candidate, name, matched, "checked duplicate candidate");
    matched.then_some(candidate)
}

/// Atomic, strict construction of a [`File`]
///
/// Tag strings given through [`FileBuilder::file_type_tag`] are parsed in
/// reject mode; the first invalid one fails [`FileBuilder::build`].
#[derive(Debug)]
#[must_use]
pub struct FileBuilder {
    name: String,
    identifier: Option<String>,
    comment: Option<String>,
    annotations: Vec<Annotation>,
    relationships: Vec<Relationship>,
    license_concluded: LicenseExpression,
    license_info_in_file: Vec<LicenseExpression>,
    copyright_text: Option<String>,
    license_comment: Option<String>,
    file_types: Vec<FileType>,
    file_type_tags: Vec<String>,
    checksums: Vec<Checksum>,
    contributors: Vec<String>,
    notice_text: Option<String>,
    artifact_of: Vec<ProjectReference>,
    dependencies: Vec<FileId>,
}

impl FileBuilder {
    /// Builder for a file named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: None,
            comment: None,
            annotations: Vec::new(),
            relationships: Vec::new(),
            license_concluded: LicenseExpression::NoAssertion,
            license_info_in_file: Vec::new(),
            copyright_text: None,
            license_comment: None,
            file_types: Vec::new(),
            file_type_tags: Vec::new(),
            checksums: Vec::new(),
            contributors: Vec::new(),
            notice_text: None,
            artifact_of: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Element identifier
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Comment
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Add an annotation
    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add a relationship
    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Concluded license
    pub fn license_concluded(mut self, license: LicenseExpression) -> Self {
        self.license_concluded = license;
        self
    }

    /// Add a license seen in the file
    pub fn license_info_in_file(mut self, license: LicenseExpression) -> Self {
        self.license_info_in_file.push(license);
        self
    }

    /// Copyright notice
    pub fn copyright_text(mut self, text: impl Into<String>) -> Self {
        self.copyright_text = Some(text.into());
        self
    }

    /// License comment
    pub fn license_comment(mut self, comment: impl Into<String>) -> Self {
        self.license_comment = Some(comment.into());
        self
    }

    /// Add a file type
    pub fn file_type(mut self, file_type: FileType) -> Self {
        self.file_types.push(file_type);
        self
    }

    /// File type by tag, IRI or prefixed local name; validated by `build`
    pub fn file_type_tag(mut self, tag: impl Into<String>) -> Self {
        self.file_type_tags.push(tag.into());
        self
    }

    /// Add a checksum
    pub fn checksum(mut self, checksum: Checksum) -> Self {
        self.checksums.push(checksum);
        self
    }

    /// Add a contributor
    pub fn contributor(mut self, contributor: impl Into<String>) -> Self {
        self.contributors.push(contributor.into());
        self
    }

    /// Notice text; an empty string is kept as present
    pub fn notice_text(mut self, notice: impl Into<String>) -> Self {
        self.notice_text = Some(notice.into());
        self
    }

    /// Add a project this file is an artifact of
    pub fn artifact_of(mut self, project: ProjectReference) -> Self {
        self.artifact_of.push(project);
        self
    }

    /// File this one depends on
    pub fn dependency(mut self, file: FileId) -> Self {
        self.dependencies.push(file);
        self
    }

    /// Build the file
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidTag`](crate::ModelError::InvalidTag) for
    /// an unrecognized file type tag and
    /// [`ModelError::InvalidArgument`](crate::ModelError::InvalidArgument) for
    /// an empty identifier.
    pub fn build(self) -> ModelResult<File> {
        let mut file_types = self.file_types;
        for tag in &self.file_type_tags {
            match parse_tag::<FileType>(tag, TagParse::Reject)? {
                Some(file_type) => file_types.push(file_type),
                None => {
                    return Err(crate::ModelError::InvalidTag {
                        kind: FileType::KIND,
                        value: tag.clone(),
                    })
                }
            }
        }
        if self.identifier.as_deref() == Some("") {
            return Err(crate::ModelError::InvalidArgument {
                field: "identifier",
                reason: "must not be empty".to_string(),
            });
        }

        let mut entity = Entity::new(&FILE_VOCAB, self.name);
        entity.identifier = self.identifier;
        entity.comment = self.comment;
        entity.annotations = self.annotations;
        entity.relationships = self.relationships;
        entity.license_concluded = self.license_concluded;
        entity.license_info_in_file = self.license_info_in_file;
        entity.copyright_text = self.copyright_text;
        entity.license_comment = self.license_comment;

        Ok(File {
            entity,
            file_types,
            checksums: self.checksums,
            contributors: self.contributors,
            notice_text: self.notice_text,
            artifact_of: self.artifact_of,
            dependencies: self.dependencies,
        })
    }
}
