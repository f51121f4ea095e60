//! Review annotations

use crate::error::{ModelError, ModelResult};
use crate::sync::{expect_node, new_sub_entity, Equivalent, GraphValue};
use crate::tag::{parse_tag, uri_tags, TagParse, UriTag};
use serde::{Deserialize, Serialize};
use spdx_graph::vocab::{
    CLASS_ANNOTATION, PROP_ANNOTATION_DATE, PROP_ANNOTATION_TYPE, PROP_ANNOTATOR, RDFS_COMMENT,
};
use spdx_graph::{ModelContainer, Term};

uri_tags! {
    /// Kind of annotation
    pub enum AnnotationType ("annotationType_", "annotation type") {
        Review => "review",
        Other => "other",
    }
}

/// Comment made on an element by a person or tool
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    annotator: String,
    annotation_type: AnnotationType,
    date: String,
    comment: String,
}

impl Annotation {
    /// Create annotation
    pub fn new(
        annotator: impl Into<String>,
        annotation_type: AnnotationType,
        date: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            annotator: annotator.into(),
            annotation_type,
            date: date.into(),
            comment: comment.into(),
        }
    }

    /// Person or tool, e.g. `Person: Jane Doe`
    #[inline]
    #[must_use]
    pub fn annotator(&self) -> &str {
        &self.annotator
    }

    /// Kind of annotation
    #[inline]
    #[must_use]
    pub fn annotation_type(&self) -> AnnotationType {
        self.annotation_type
    }

    /// Date as written, usually `YYYY-MM-DDThh:mm:ssZ`
    #[inline]
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Annotation text
    #[inline]
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Validity problems
    #[must_use]
    pub fn verify(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.annotator.is_empty() {
            problems.push("Missing required annotator".to_string());
        }
        if self.date.is_empty() {
            problems.push(format!("Missing required date for annotation by {}", self.annotator));
        }
        if self.comment.is_empty() {
            problems.push(format!("Missing required comment for annotation by {}", self.annotator));
        }
        problems
    }
}

impl Equivalent for Annotation {
    fn equivalent(&self, other: &Self) -> bool {
        self == other
    }
}

impl GraphValue for Annotation {
    const KIND: &'static str = "annotation";

    fn from_term(container: &ModelContainer, term: &Term) -> ModelResult<Self> {
        let node = expect_node(container, term, CLASS_ANNOTATION)?;
        let store = container.store(node);
        let type_uri = store
            .read_uris(PROP_ANNOTATION_TYPE)
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::MissingProperty {
                property: PROP_ANNOTATION_TYPE.uri(),
                node,
            })?;
        let annotation_type = parse_tag::<AnnotationType>(&type_uri, TagParse::Reject)?
            .ok_or_else(|| ModelError::InvalidTag {
                kind: AnnotationType::KIND,
                value: type_uri.clone(),
            })?;
        Ok(Self {
            annotator: store.read_single(PROP_ANNOTATOR).unwrap_or_default(),
            annotation_type,
            date: store.read_single(PROP_ANNOTATION_DATE).unwrap_or_default(),
            comment: store.read_single(RDFS_COMMENT).unwrap_or_default(),
        })
    }

    fn to_term(&self, container: &ModelContainer) -> ModelResult<Term> {
        let node = new_sub_entity(container, CLASS_ANNOTATION)?;
        let store = container.store(node);
        store.write_single(PROP_ANNOTATOR, Some(&self.annotator))?;
        store.write_uris(PROP_ANNOTATION_TYPE, &[self.annotation_type.uri()])?;
        store.write_single(PROP_ANNOTATION_DATE, Some(&self.date))?;
        store.write_single(RDFS_COMMENT, Some(&self.comment))?;
        Ok(Term::Node(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn review() -> Annotation {
        Annotation::new(
            "Person: Jane Doe",
            AnnotationType::Review,
            "2011-01-29T18:30:22Z",
            "Checked the license headers",
        )
    }

    #[test]
    fn graph_round_trip() {
        let container = ModelContainer::new("http://example.org/doc").unwrap();
        let annotation = review();
        let term = annotation.to_term(&container).unwrap();
        assert_eq!(Annotation::from_term(&container, &term).unwrap(), annotation);
    }

    #[test]
    fn verify_reports_missing_fields() {
        assert!(review().verify().is_empty());
        let empty = Annotation::new("", AnnotationType::Other, "", "");
        assert_eq!(empty.verify().len(), 3);
    }

    #[test]
    fn missing_type_is_malformed() {
        let container = ModelContainer::new("http://example.org/doc").unwrap();
        let node = new_sub_entity(&container, CLASS_ANNOTATION).unwrap();
        container.store(node).write_single(PROP_ANNOTATOR, Some("x")).unwrap();
        assert!(matches!(
            Annotation::from_term(&container, &Term::Node(node)),
            Err(ModelError::MissingProperty { .. })
        ));
    }
}
