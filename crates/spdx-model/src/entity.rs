//! Properties shared by every SPDX element
//!
//! [`Entity`] holds the cached base properties and the optional graph
//! attachment. Getters take a [`SyncConfig`]; when the entity is attached
//! and `refresh_on_get` is set they re-read the graph first. Setters update
//! the cache and write through when attached.

use crate::annotation::Annotation;
use crate::config::SyncConfig;
use crate::error::ModelResult;
use crate::license::LicenseExpression;
use crate::relationship::Relationship;
use crate::sync::{
    all_equivalent, merge_if_changed, read_value, read_values, refreshing, write_values,
    Equivalent, Resource,
};
use spdx_graph::vocab::{
    PROP_ANNOTATION, PROP_COPYRIGHT_TEXT, PROP_LICENSE_COMMENT, PROP_LICENSE_CONCLUDED, RDFS_COMMENT,
};
use spdx_graph::{Iri, ModelContainer, NodeId, PropertyStore};

/// Predicates that differ between element kinds
#[derive(Debug)]
pub struct ElementVocab {
    /// Class asserted on the element node
    pub class: Iri,
    /// Predicate holding the element name
    pub name: Iri,
    /// Predicate holding licenses seen in the element
    pub license_info: Iri,
    /// Kind used in verification messages
    pub kind: &'static str,
}

/// Base element state
#[derive(Debug)]
pub struct Entity {
    pub(crate) vocab: &'static ElementVocab,
    pub(crate) identifier: Option<String>,
    pub(crate) resource: Option<Resource>,
    pub(crate) name: String,
    pub(crate) comment: Option<String>,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) relationships: Vec<Relationship>,
    pub(crate) license_concluded: LicenseExpression,
    pub(crate) license_info_in_file: Vec<LicenseExpression>,
    pub(crate) copyright_text: Option<String>,
    pub(crate) license_comment: Option<String>,
}

impl Entity {
    pub(crate) fn new(vocab: &'static ElementVocab, name: String) -> Self {
        Self {
            vocab,
            identifier: None,
            resource: None,
            name,
            comment: None,
            annotations: Vec::new(),
            relationships: Vec::new(),
            license_concluded: LicenseExpression::NoAssertion,
            license_info_in_file: Vec::new(),
            copyright_text: None,
            license_comment: None,
        }
    }

    /// Element identifier, e.g. `SPDXRef-7`
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Graph attachment, if any
    #[inline]
    #[must_use]
    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    /// True if bound to a graph node
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.resource.is_some()
    }

    /// Element name; empty when absent from the graph
    pub fn name(&mut self, config: &SyncConfig) -> &str {
        if let Some(store) = refreshing(&self.resource, config) {
            self.name = store.read_single(self.vocab.name).unwrap_or_default();
        }
        &self.name
    }

    /// Set the element name
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_name(&mut self, name: impl Into<String>) -> ModelResult<()> {
        self.name = name.into();
        self.write_single(self.vocab.name, Some(&self.name))
    }

    /// Free-form comment
    pub fn comment(&mut self, config: &SyncConfig) -> Option<&str> {
        if let Some(store) = refreshing(&self.resource, config) {
            self.comment = store.read_single(RDFS_COMMENT);
        }
        self.comment.as_deref()
    }

    /// Set or clear the comment
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_comment(&mut self, comment: Option<String>) -> ModelResult<()> {
        self.comment = comment;
        self.write_single(RDFS_COMMENT, self.comment.as_deref())
    }

    /// Copyright notice
    pub fn copyright_text(&mut self, config: &SyncConfig) -> Option<&str> {
        if let Some(store) = refreshing(&self.resource, config) {
            self.copyright_text = store.read_single(PROP_COPYRIGHT_TEXT);
        }
        self.copyright_text.as_deref()
    }

    /// Set or clear the copyright text
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_copyright_text(&mut self, text: Option<String>) -> ModelResult<()> {
        self.copyright_text = text;
        self.write_single(PROP_COPYRIGHT_TEXT, self.copyright_text.as_deref())
    }

    /// Comment on how the licenses were concluded
    pub fn license_comment(&mut self, config: &SyncConfig) -> Option<&str> {
        if let Some(store) = refreshing(&self.resource, config) {
            self.license_comment = store.read_single(PROP_LICENSE_COMMENT);
        }
        self.license_comment.as_deref()
    }

    /// Set or clear the license comment
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_license_comment(&mut self, comment: Option<String>) -> ModelResult<()> {
        self.license_comment = comment;
        self.write_single(PROP_LICENSE_COMMENT, self.license_comment.as_deref())
    }

    /// Concluded license; `NOASSERTION` when the graph has none
    pub fn license_concluded(&mut self, config: &SyncConfig) -> &LicenseExpression {
        if let Some(store) = refreshing(&self.resource, config) {
            let fresh = read_concluded(&store);
            if !fresh.equivalent(&self.license_concluded) {
                self.license_concluded = fresh;
            }
        }
        &self.license_concluded
    }

    /// Set the concluded license
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_license_concluded(&mut self, license: LicenseExpression) -> ModelResult<()> {
        self.license_concluded = license;
        if let Some(resource) = &self.resource {
            write_values(
                &resource.store(),
                PROP_LICENSE_CONCLUDED,
                std::slice::from_ref(&self.license_concluded),
            )?;
        }
        Ok(())
    }

    /// Licenses found in the element's content
    pub fn license_info_in_file(&mut self, config: &SyncConfig) -> &[LicenseExpression] {
        if let Some(store) = refreshing(&self.resource, config) {
            let fresh = read_values(&store, self.vocab.license_info);
            merge_if_changed(&mut self.license_info_in_file, fresh);
        }
        &self.license_info_in_file
    }

    /// Replace the seen licenses
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_license_info_in_file(&mut self, licenses: Vec<LicenseExpression>) -> ModelResult<()> {
        self.license_info_in_file = licenses;
        if let Some(resource) = &self.resource {
            write_values(&resource.store(), self.vocab.license_info, &self.license_info_in_file)?;
        }
        Ok(())
    }

    /// Annotations, in graph order
    pub fn annotations(&mut self, config: &SyncConfig) -> &[Annotation] {
        if let Some(store) = refreshing(&self.resource, config) {
            let fresh = read_values(&store, PROP_ANNOTATION);
            merge_if_changed(&mut self.annotations, fresh);
        }
        &self.annotations
    }

    /// Replace the annotations
    ///
    /// # Errors
    /// Returns error if the write-through fails.
    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) -> ModelResult<()> {
        self.annotations = annotations;
        if let Some(resource) = &self.resource {
            write_values(&resource.store(), PROP_ANNOTATION, &self.annotations)?;
        }
        Ok(())
    }

    fn write_single(&self, property: Iri, value: Option<&str>) -> ModelResult<()> {
        if let Some(resource) = &self.resource {
            resource.store().write_single(property, value)?;
        }
        Ok(())
    }

    /// Base properties of a node, relationships excluded
    pub(crate) fn read_from(
        vocab: &'static ElementVocab,
        container: &ModelContainer,
        node: NodeId,
    ) -> Self {
        let store = container.store(node);
        let mut entity = Self::new(vocab, store.read_single(vocab.name).unwrap_or_default());
        entity.identifier = container.identifier_of(node);
        entity.resource = Some(Resource::new(container.clone(), node));
        entity.refresh_from(&store);
        entity
    }

    /// Re-read every base property, relationships excluded
    pub(crate) fn refresh(&mut self) {
        if let Some(resource) = self.resource.clone() {
            self.refresh_from(&resource.store());
        }
    }

    fn refresh_from(&mut self, store: &PropertyStore<'_>) {
        self.name = store.read_single(self.vocab.name).unwrap_or_default();
        self.comment = store.read_single(RDFS_COMMENT);
        self.copyright_text = store.read_single(PROP_COPYRIGHT_TEXT);
        self.license_comment = store.read_single(PROP_LICENSE_COMMENT);
        let concluded = read_concluded(store);
        if !concluded.equivalent(&self.license_concluded) {
            self.license_concluded = concluded;
        }
        merge_if_changed(
            &mut self.license_info_in_file,
            read_values(store, self.vocab.license_info),
        );
        merge_if_changed(&mut self.annotations, read_values(store, PROP_ANNOTATION));
    }

    /// Write every base property, relationships excluded
    pub(crate) fn write_to(&self, store: &PropertyStore<'_>) -> ModelResult<()> {
        store.write_type(self.vocab.class)?;
        store.write_single(self.vocab.name, Some(&self.name))?;
        store.write_single(RDFS_COMMENT, self.comment.as_deref())?;
        store.write_single(PROP_COPYRIGHT_TEXT, self.copyright_text.as_deref())?;
        store.write_single(PROP_LICENSE_COMMENT, self.license_comment.as_deref())?;
        write_values(
            store,
            PROP_LICENSE_CONCLUDED,
            std::slice::from_ref(&self.license_concluded),
        )?;
        write_values(store, self.vocab.license_info, &self.license_info_in_file)?;
        write_values(store, PROP_ANNOTATION, &self.annotations)?;
        Ok(())
    }

    /// Unattached copy without identifier or relationships
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            vocab: self.vocab,
            identifier: None,
            resource: None,
            name: self.name.clone(),
            comment: self.comment.clone(),
            annotations: self.annotations.clone(),
            relationships: Vec::new(),
            license_concluded: self.license_concluded.clone(),
            license_info_in_file: self.license_info_in_file.clone(),
            copyright_text: self.copyright_text.clone(),
            license_comment: self.license_comment.clone(),
        }
    }

    /// Base properties equivalent, relationships excluded
    pub(crate) fn equivalent_base(&self, other: &Self) -> bool {
        self.name == other.name
            && self.comment == other.comment
            && self.copyright_text == other.copyright_text
            && self.license_comment == other.license_comment
            && self.license_concluded.equivalent(&other.license_concluded)
            && all_equivalent(&self.license_info_in_file, &other.license_info_in_file)
            && all_equivalent(&self.annotations, &other.annotations)
    }

    /// Base validity problems, relationships excluded
    pub(crate) fn verify_base(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.name.is_empty() {
            problems.push(format!("Missing required name for {}", self.vocab.kind));
        }
        problems.extend(self.license_concluded.verify());
        for license in &self.license_info_in_file {
            problems.extend(license.verify());
        }
        for annotation in &self.annotations {
            problems.extend(annotation.verify());
        }
        problems
    }
}

fn read_concluded(store: &PropertyStore<'_>) -> LicenseExpression {
    read_value(store, PROP_LICENSE_CONCLUDED).unwrap_or_else(|| {
        tracing::debug!(subject = %store.subject(), "no concluded license, assuming NOASSERTION");
        LicenseExpression::NoAssertion
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationType;
    use pretty_assertions::assert_eq;
    use spdx_graph::vocab::{CLASS_FILE, PROP_FILE_NAME, PROP_FILE_SEEN_LICENSE};

    static VOCAB: ElementVocab = ElementVocab {
        class: CLASS_FILE,
        name: PROP_FILE_NAME,
        license_info: PROP_FILE_SEEN_LICENSE,
        kind: "file",
    };

    fn attached(name: &str) -> (ModelContainer, Entity) {
        let container = ModelContainer::new("http://example.org/doc").unwrap();
        let node = container.element_node("SPDXRef-1").unwrap();
        let mut entity = Entity::new(&VOCAB, name.to_string());
        entity.write_to(&container.store(node)).unwrap();
        entity.resource = Some(Resource::new(container.clone(), node));
        (container, entity)
    }

    #[test]
    fn detached_setters_only_touch_cache() {
        let mut entity = Entity::new(&VOCAB, "a.c".to_string());
        entity.set_comment(Some("c".to_string())).unwrap();
        assert_eq!(entity.comment(&SyncConfig::new()), Some("c"));
        assert!(!entity.is_attached());
    }

    #[test]
    fn getters_see_external_graph_edits() {
        let (container, mut entity) = attached("a.c");
        let node = entity.resource().unwrap().node();
        container
            .store(node)
            .write_single(PROP_COPYRIGHT_TEXT, Some("(c) 2024"))
            .unwrap();

        assert_eq!(entity.copyright_text(&SyncConfig::cached()), None);
        assert_eq!(entity.copyright_text(&SyncConfig::new()), Some("(c) 2024"));
    }

    #[test]
    fn setters_write_through() {
        let (container, mut entity) = attached("a.c");
        let node = entity.resource().unwrap().node();
        entity.set_name("b.c").unwrap();
        entity.set_license_comment(Some("seen in header".to_string())).unwrap();

        let store = container.store(node);
        assert_eq!(store.read_single(PROP_FILE_NAME).as_deref(), Some("b.c"));
        assert_eq!(store.read_single(PROP_LICENSE_COMMENT).as_deref(), Some("seen in header"));
    }

    #[test]
    fn missing_concluded_license_reads_as_noassertion() {
        let (container, mut entity) = attached("a.c");
        let node = entity.resource().unwrap().node();
        entity
            .set_license_concluded(LicenseExpression::simple("MIT").unwrap())
            .unwrap();
        container.graph_mut().remove_property(node, &PROP_LICENSE_CONCLUDED.uri());

        assert_eq!(
            entity.license_concluded(&SyncConfig::new()),
            &LicenseExpression::NoAssertion
        );
    }

    #[test]
    fn equivalent_cache_is_kept_on_refresh() {
        let (_container, mut entity) = attached("a.c");
        let annotation = Annotation::new("Tool: x", AnnotationType::Other, "2024-01-01T00:00:00Z", "ok");
        entity.set_annotations(vec![annotation.clone()]).unwrap();
        let before = entity.annotations.as_ptr();
        assert_eq!(entity.annotations(&SyncConfig::new()), &[annotation]);
        assert_eq!(entity.annotations.as_ptr(), before);
    }

    #[test]
    fn verify_base_requires_name() {
        let entity = Entity::new(&VOCAB, String::new());
        assert_eq!(entity.verify_base(), vec!["Missing required name for file".to_string()]);
    }
}
