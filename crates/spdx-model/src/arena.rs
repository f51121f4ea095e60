//! File arena
//!
//! Files reference each other (dependencies, relationships) and those
//! references may form cycles. The arena owns every [`File`] and hands out
//! [`FileId`] handles; graph loading, materialization, equivalence, cloning
//! and verification all walk the handle graph with visited sets.

use crate::config::SyncConfig;
use crate::error::{ModelError, ModelResult};
use crate::file::File;
use crate::relationship::{RelatedElement, Relationship, UnresolvedRelationship};
use crate::sync::Resource;
use serde::{Deserialize, Serialize};
use spdx_graph::vocab::{CLASS_FILE, PROP_FILE_DEPENDENCY, PROP_RELATIONSHIP};
use spdx_graph::{ContainerId, ModelContainer, NodeId};
use std::collections::HashMap;
use std::fmt;

/// Handle to a [`File`] in a [`FileArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(usize);

impl FileId {
    /// Position in the arena
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

/// Owner of a set of files that may reference each other
#[derive(Debug, Default)]
pub struct FileArena {
    files: Vec<File>,
    by_node: HashMap<(ContainerId, NodeId), FileId>,
}

impl FileArena {
    /// Create empty arena
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if the arena holds no files
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Add a file and return its handle
    pub fn insert(&mut self, file: File) -> FileId {
        let id = FileId(self.files.len());
        if let Some(resource) = file.resource() {
            self.by_node
                .insert((resource.container().id(), resource.node()), id);
        }
        self.files.push(file);
        id
    }

    /// File for a handle, if owned by this arena
    #[inline]
    #[must_use]
    pub fn get(&self, id: FileId) -> Option<&File> {
        self.files.get(id.0)
    }

    /// Mutable file for a handle, if owned by this arena
    #[inline]
    pub fn get_mut(&mut self, id: FileId) -> Option<&mut File> {
        self.files.get_mut(id.0)
    }

    /// File for a handle
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownFile`] for a foreign handle.
    pub fn file(&self, id: FileId) -> ModelResult<&File> {
        self.get(id).ok_or(ModelError::UnknownFile(id))
    }

    /// Mutable file for a handle
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownFile`] for a foreign handle.
    pub fn file_mut(&mut self, id: FileId) -> ModelResult<&mut File> {
        self.files.get_mut(id.0).ok_or(ModelError::UnknownFile(id))
    }

    /// Every handle, in insertion order
    pub fn ids(&self) -> impl Iterator<Item = FileId> + '_ {
        (0..self.files.len()).map(FileId)
    }

    /// Handle of the file bound to a node, if loaded
    #[must_use]
    pub fn id_for_node(&self, container: &ModelContainer, node: NodeId) -> Option<FileId> {
        self.by_node.get(&(container.id(), node)).copied()
    }

    /// Handles ordered by cached file name
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<FileId> {
        let mut ids: Vec<FileId> = self.ids().collect();
        ids.sort_by(|a, b| self.files[a.0].cmp_by_name(&self.files[b.0]));
        ids
    }

    /// Load the file at `node`, and every file it references
    ///
    /// Loading the same node twice returns the same handle.
    ///
    /// # Errors
    /// Returns [`ModelError::TypeMismatch`] if `node` is not typed as a File.
    pub fn load(&mut self, container: &ModelContainer, node: NodeId) -> ModelResult<FileId> {
        self.resolve(container, node)?
            .ok_or_else(|| ModelError::TypeMismatch {
                expected: CLASS_FILE.uri(),
                found: node.to_string(),
            })
    }

    /// Handle for a node if it is a File, loading it on first sight
    fn resolve(&mut self, container: &ModelContainer, node: NodeId) -> ModelResult<Option<FileId>> {
        if let Some(id) = self.id_for_node(container, node) {
            return Ok(Some(id));
        }
        if !container.graph().contains_node(node) {
            return Err(spdx_graph::GraphError::UnknownNode(node).into());
        }
        if !container.has_type(node, CLASS_FILE) {
            return Ok(None);
        }
        // Registered before following references so cycles terminate
        let id = self.insert(File::read_from(container, node));
        tracing::debug!(file = %id, %node, "loaded file");

        let relationships = self.read_relationships(container, node)?;
        let dependencies = self.read_dependencies(container, node)?;
        let file = &mut self.files[id.0];
        file.entity.relationships = relationships;
        file.dependencies = dependencies;
        Ok(Some(id))
    }

    fn read_relationships(
        &mut self,
        container: &ModelContainer,
        node: NodeId,
    ) -> ModelResult<Vec<Relationship>> {
        let terms = container.store(node).read_terms(PROP_RELATIONSHIP);
        let mut relationships = Vec::with_capacity(terms.len());
        for term in &terms {
            let raw = match UnresolvedRelationship::read(container, term) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(subject = %node, error = %e, "skipping malformed relationship");
                    continue;
                }
            };
            let related = match self.resolve(container, raw.related)? {
                Some(file) => RelatedElement::File(file),
                None => match container.graph().node_uri(raw.related) {
                    Some(uri) => RelatedElement::External(uri.to_string()),
                    None => {
                        tracing::warn!(subject = %node, "skipping relationship to anonymous element");
                        continue;
                    }
                },
            };
            relationships.push(raw.resolve(related));
        }
        Ok(relationships)
    }

    fn read_dependencies(
        &mut self,
        container: &ModelContainer,
        node: NodeId,
    ) -> ModelResult<Vec<FileId>> {
        let nodes = container.store(node).read_nodes(PROP_FILE_DEPENDENCY);
        let mut dependencies = Vec::with_capacity(nodes.len());
        for dep in nodes {
            match self.resolve(container, dep)? {
                Some(id) => dependencies.push(id),
                None => tracing::debug!(subject = %node, %dep, "ignoring non-file dependency"),
            }
        }
        Ok(dependencies)
    }

    /// Relationships of a file, refreshed per `config`
    ///
    /// # Errors
    /// Returns error for a foreign handle or a failed graph read.
    pub fn relationships(&mut self, id: FileId, config: &SyncConfig) -> ModelResult<&[Relationship]> {
        if let Some(resource) = self.refresh_target(id, config)? {
            let fresh = self.read_relationships(resource.container(), resource.node())?;
            let cached = &mut self.file_mut(id)?.entity.relationships;
            if *cached != fresh {
                *cached = fresh;
            }
        }
        Ok(&self.file(id)?.entity.relationships)
    }

    /// Replace the relationships of a file
    ///
    /// # Errors
    /// Returns error for a foreign handle or a failed write-through.
    pub fn set_relationships(&mut self, id: FileId, relationships: Vec<Relationship>) -> ModelResult<()> {
        self.file_mut(id)?.entity.relationships = relationships;
        if let Some(resource) = self.file(id)?.resource().cloned() {
            self.write_relationships(id, resource.container(), resource.node())?;
        }
        Ok(())
    }

    /// Append one relationship
    ///
    /// # Errors
    /// See [`FileArena::set_relationships`].
    pub fn add_relationship(&mut self, id: FileId, relationship: Relationship) -> ModelResult<()> {
        let mut relationships = self.file(id)?.entity.relationships.clone();
        relationships.push(relationship);
        self.set_relationships(id, relationships)
    }

    /// Files a file depends on, refreshed per `config`
    ///
    /// # Errors
    /// Returns error for a foreign handle or a failed graph read.
    #[deprecated(note = "use relationships of type StaticLink or DynamicLink")]
    pub fn file_dependencies(&mut self, id: FileId, config: &SyncConfig) -> ModelResult<&[FileId]> {
        if let Some(resource) = self.refresh_target(id, config)? {
            let fresh = self.read_dependencies(resource.container(), resource.node())?;
            let cached = &mut self.file_mut(id)?.dependencies;
            if *cached != fresh {
                *cached = fresh;
            }
        }
        Ok(&self.file(id)?.dependencies)
    }

    /// Replace the files a file depends on
    ///
    /// Dependencies without an identifier get one when written.
    ///
    /// # Errors
    /// Returns error for a foreign handle or a failed write-through.
    #[deprecated(note = "use relationships of type StaticLink or DynamicLink")]
    pub fn set_file_dependencies(&mut self, id: FileId, dependencies: Vec<FileId>) -> ModelResult<()> {
        for dep in &dependencies {
            self.file(*dep)?;
        }
        self.file_mut(id)?.dependencies = dependencies;
        if let Some(resource) = self.file(id)?.resource().cloned() {
            self.write_dependencies(id, resource.container(), resource.node())?;
        }
        Ok(())
    }

    /// Re-read every property of an attached file
    ///
    /// # Errors
    /// Returns error for a foreign handle or a failed graph read.
    pub fn refresh(&mut self, id: FileId) -> ModelResult<()> {
        let config = SyncConfig::new();
        let Some(resource) = self.refresh_target(id, &config)? else {
            return Ok(());
        };
        self.file_mut(id)?.refresh();
        let relationships = self.read_relationships(resource.container(), resource.node())?;
        let dependencies = self.read_dependencies(resource.container(), resource.node())?;
        let file = self.file_mut(id)?;
        if file.entity.relationships != relationships {
            file.entity.relationships = relationships;
        }
        if file.dependencies != dependencies {
            file.dependencies = dependencies;
        }
        Ok(())
    }

    fn refresh_target(&self, id: FileId, config: &SyncConfig) -> ModelResult<Option<Resource>> {
        let file = self.file(id)?;
        Ok(if config.refresh_on_get {
            file.resource().cloned()
        } else {
            None
        })
    }

    /// Attach a file (and every file it references) to `container`
    ///
    /// With `dedup_on_materialize`, a file whose name and SHA-1 match an
    /// existing node is bound to that node instead of a new one. Files
    /// without an identifier get a fresh one.
    ///
    /// # Errors
    /// Returns [`ModelError::ForeignContainer`] if a reached file is already
    /// attached elsewhere, or a graph error if a write fails.
    pub fn materialize(
        &mut self,
        id: FileId,
        container: &ModelContainer,
        config: &SyncConfig,
    ) -> ModelResult<NodeId> {
        if let Some(resource) = self.file(id)?.resource() {
            if resource.container().same_as(container) {
                return Ok(resource.node());
            }
            return Err(ModelError::ForeignContainer(id));
        }

        let node = self.bind(id, container, config)?;
        self.file(id)?.write_to(&container.store(node))?;

        let targets: Vec<FileId> = {
            let file = self.file(id)?;
            file.dependencies
                .iter()
                .copied()
                .chain(file.entity.relationships.iter().filter_map(|r| match r.related() {
                    RelatedElement::File(target) => Some(*target),
                    RelatedElement::External(_) => None,
                }))
                .collect()
        };
        for target in targets {
            self.materialize(target, container, config)?;
        }

        self.write_relationships(id, container, node)?;
        self.write_dependencies(id, container, node)?;
        Ok(node)
    }

    /// Choose the node for a detached file and record the attachment
    fn bind(&mut self, id: FileId, container: &ModelContainer, config: &SyncConfig) -> ModelResult<NodeId> {
        let duplicate = if config.dedup_on_materialize {
            self.file(id)?.find_duplicate(container)
        } else {
            None
        };
        let (node, identifier) = match duplicate {
            Some(node) => {
                tracing::debug!(file = %id, %node, "reusing existing file node");
                let identifier = container.identifier_of(node);
                (node, identifier)
            }
            None => {
                let identifier = match self.file(id)?.identifier() {
                    Some(existing) => existing.to_string(),
                    None => container.allocate_identifier(),
                };
                (container.element_node(&identifier)?, Some(identifier))
            }
        };

        let file = self.file_mut(id)?;
        if identifier.is_some() {
            file.entity.identifier = identifier;
        }
        file.entity.resource = Some(Resource::new(container.clone(), node));
        self.by_node.insert((container.id(), node), id);
        Ok(node)
    }

    fn write_relationships(&mut self, id: FileId, container: &ModelContainer, node: NodeId) -> ModelResult<()> {
        let relationships = self.file(id)?.entity.relationships.clone();
        let mut rel_nodes = Vec::with_capacity(relationships.len());
        for relationship in &relationships {
            let target = match relationship.related() {
                RelatedElement::File(file) => self.node_in(*file, container)?,
                RelatedElement::External(uri) => container.graph_mut().named_node(uri),
            };
            rel_nodes.push(relationship.write(container, target)?);
        }
        container.store(node).write_nodes(PROP_RELATIONSHIP, &rel_nodes)?;
        Ok(())
    }

    fn write_dependencies(&mut self, id: FileId, container: &ModelContainer, node: NodeId) -> ModelResult<()> {
        let dependencies = self.file(id)?.dependencies.clone();
        let mut dep_nodes = Vec::with_capacity(dependencies.len());
        for dep in dependencies {
            dep_nodes.push(self.node_in(dep, container)?);
        }
        container.store(node).write_nodes(PROP_FILE_DEPENDENCY, &dep_nodes)?;
        Ok(())
    }

    /// Node of a referenced file in `container`, attaching it if needed
    fn node_in(&mut self, id: FileId, container: &ModelContainer) -> ModelResult<NodeId> {
        match self.file(id)?.resource() {
            Some(resource) if resource.container().same_as(container) => Ok(resource.node()),
            Some(_) => Err(ModelError::ForeignContainer(id)),
            None => self.materialize(id, container, &SyncConfig::new()),
        }
    }
}
