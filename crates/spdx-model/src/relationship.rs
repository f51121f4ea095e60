//! Typed links between elements
//!
//! A relationship may point at another [`File`](crate::File) of the same
//! arena or at any other element by IRI. Resolving the target node needs the
//! arena, so this module only handles the relationship node itself.

use crate::arena::FileId;
use crate::error::{ModelError, ModelResult};
use crate::sync::{expect_node, new_sub_entity};
use crate::tag::{parse_tag, uri_tags, TagParse, UriTag};
use serde::{Deserialize, Serialize};
use spdx_graph::vocab::{
    CLASS_RELATIONSHIP, PROP_RELATED_ELEMENT, PROP_RELATIONSHIP_TYPE, RDFS_COMMENT,
};
use spdx_graph::{ModelContainer, NodeId, Term};

uri_tags! {
    /// Kind of relationship
    pub enum RelationshipType ("relationshipType_", "relationship type") {
        Describes => "describes",
        DescribedBy => "describedBy",
        Contains => "contains",
        ContainedBy => "containedBy",
        Generates => "generates",
        GeneratedFrom => "generatedFrom",
        AncestorOf => "ancestorOf",
        DescendantOf => "descendantOf",
        VariantOf => "variantOf",
        DistributionArtifact => "distributionArtifact",
        PatchFor => "patchFor",
        PatchApplied => "patchApplied",
        CopyOf => "copyOf",
        FileAdded => "fileAdded",
        FileDeleted => "fileDeleted",
        FileModified => "fileModified",
        ExpandedFromArchive => "expandedFromArchive",
        DynamicLink => "dynamicLink",
        StaticLink => "staticLink",
        DataFile => "dataFile",
        Other => "other",
    }
}

/// Target of a relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelatedElement {
    /// File in the same arena
    File(FileId),
    /// Any other element, by IRI
    External(String),
}

/// Relationship from the owning element to `related`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    relationship_type: RelationshipType,
    related: RelatedElement,
    comment: Option<String>,
}

impl Relationship {
    /// Relationship without comment
    pub fn new(relationship_type: RelationshipType, related: RelatedElement) -> Self {
        Self {
            relationship_type,
            related,
            comment: None,
        }
    }

    /// Relationship to another file
    #[inline]
    #[must_use]
    pub fn to_file(relationship_type: RelationshipType, file: FileId) -> Self {
        Self::new(relationship_type, RelatedElement::File(file))
    }

    /// With comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Kind of relationship
    #[inline]
    #[must_use]
    pub fn relationship_type(&self) -> RelationshipType {
        self.relationship_type
    }

    /// Target element
    #[inline]
    #[must_use]
    pub fn related(&self) -> &RelatedElement {
        &self.related
    }

    /// Free-form comment
    #[inline]
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Same relationship pointing at a different target
    pub(crate) fn retarget(&self, related: RelatedElement) -> Self {
        Self {
            relationship_type: self.relationship_type,
            related,
            comment: self.comment.clone(),
        }
    }

    /// Create the relationship node given the already resolved target
    pub(crate) fn write(&self, container: &ModelContainer, related: NodeId) -> ModelResult<NodeId> {
        let node = new_sub_entity(container, CLASS_RELATIONSHIP)?;
        let store = container.store(node);
        store.write_uris(PROP_RELATIONSHIP_TYPE, &[self.relationship_type.uri()])?;
        store.write_nodes(PROP_RELATED_ELEMENT, &[related])?;
        store.write_single(RDFS_COMMENT, self.comment.as_deref())?;
        Ok(node)
    }
}

/// Relationship node whose target has not been resolved yet
#[derive(Debug)]
pub(crate) struct UnresolvedRelationship {
    pub(crate) relationship_type: RelationshipType,
    pub(crate) related: NodeId,
    pub(crate) comment: Option<String>,
}

impl UnresolvedRelationship {
    pub(crate) fn read(container: &ModelContainer, term: &Term) -> ModelResult<Self> {
        let node = expect_node(container, term, CLASS_RELATIONSHIP)?;
        let store = container.store(node);
        let type_uri = store
            .read_uris(PROP_RELATIONSHIP_TYPE)
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::MissingProperty {
                property: PROP_RELATIONSHIP_TYPE.uri(),
                node,
            })?;
        let relationship_type = parse_tag::<RelationshipType>(&type_uri, TagParse::Reject)?
            .ok_or_else(|| ModelError::InvalidTag {
                kind: RelationshipType::KIND,
                value: type_uri.clone(),
            })?;
        let related = store
            .read_nodes(PROP_RELATED_ELEMENT)
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::MissingProperty {
                property: PROP_RELATED_ELEMENT.uri(),
                node,
            })?;
        Ok(Self {
            relationship_type,
            related,
            comment: store.read_single(RDFS_COMMENT),
        })
    }

    pub(crate) fn resolve(self, related: RelatedElement) -> Relationship {
        Relationship {
            relationship_type: self.relationship_type,
            related,
            comment: self.comment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn camel_case_tags() {
        assert_eq!(
            RelationshipType::ExpandedFromArchive.uri(),
            "http://spdx.org/rdf/terms#relationshipType_expandedFromArchive"
        );
        assert_eq!("staticLink".parse::<RelationshipType>().unwrap(), RelationshipType::StaticLink);
    }

    #[test]
    fn write_then_read_node() {
        let container = ModelContainer::new("http://example.org/doc").unwrap();
        let target = container.element_node("SPDXRef-2").unwrap();
        let rel = Relationship::new(
            RelationshipType::DescendantOf,
            RelatedElement::External(String::new()),
        )
        .with_comment("fork");
        let node = rel.write(&container, target).unwrap();

        let read = UnresolvedRelationship::read(&container, &Term::Node(node)).unwrap();
        assert_eq!(read.relationship_type, RelationshipType::DescendantOf);
        assert_eq!(read.related, target);
        assert_eq!(read.comment.as_deref(), Some("fork"));
    }

    #[test]
    fn missing_target_is_malformed() {
        let container = ModelContainer::new("http://example.org/doc").unwrap();
        let node = new_sub_entity(&container, CLASS_RELATIONSHIP).unwrap();
        container
            .store(node)
            .write_uris(PROP_RELATIONSHIP_TYPE, &[RelationshipType::Other.uri()])
            .unwrap();
        assert!(UnresolvedRelationship::read(&container, &Term::Node(node)).is_err());
    }

    #[test]
    fn retarget_keeps_type_and_comment() {
        let rel = Relationship::to_file(RelationshipType::Contains, FileId::from_raw(0))
            .with_comment("c");
        let moved = rel.retarget(RelatedElement::File(FileId::from_raw(3)));
        assert_eq!(moved.relationship_type(), RelationshipType::Contains);
        assert_eq!(moved.comment(), Some("c"));
        assert_eq!(moved.related(), &RelatedElement::File(FileId::from_raw(3)));
    }
}
