//! Vocabulary constants
//!
//! Properties and classes are addressed as `(namespace, local name)` pairs.
//! The full IRI is the plain concatenation of the two.

use std::fmt::{self, Display, Formatter};

/// SPDX terms namespace
pub const SPDX_NAMESPACE: &str = "http://spdx.org/rdf/terms#";

/// DOAP namespace (artifact-of projects)
pub const DOAP_NAMESPACE: &str = "http://usefulinc.com/ns/doap#";

/// RDF syntax namespace
pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// RDF schema namespace
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// A namespaced IRI, used both for predicates and for classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri {
    namespace: &'static str,
    name: &'static str,
}

impl Iri {
    /// Create a new IRI from namespace and local name
    #[inline]
    #[must_use]
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Self { namespace, name }
    }

    /// Namespace part
    #[inline]
    #[must_use]
    pub const fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Local name part
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Full IRI string
    #[must_use]
    pub fn uri(&self) -> String {
        format!("{}{}", self.namespace, self.name)
    }

    /// True if `uri` is this IRI
    #[must_use]
    pub fn matches(&self, uri: &str) -> bool {
        uri.strip_prefix(self.namespace)
            .is_some_and(|local| local == self.name)
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace, self.name)
    }
}

// Generic
/// `rdf:type`
pub const RDF_TYPE: Iri = Iri::new(RDF_NAMESPACE, "type");
/// `rdfs:comment`
pub const RDFS_COMMENT: Iri = Iri::new(RDFS_NAMESPACE, "comment");

// Element / item
/// `spdx:name`
pub const PROP_NAME: Iri = Iri::new(SPDX_NAMESPACE, "name");
/// `spdx:annotation`
pub const PROP_ANNOTATION: Iri = Iri::new(SPDX_NAMESPACE, "annotation");
/// `spdx:relationship`
pub const PROP_RELATIONSHIP: Iri = Iri::new(SPDX_NAMESPACE, "relationship");
/// `spdx:licenseConcluded`
pub const PROP_LICENSE_CONCLUDED: Iri = Iri::new(SPDX_NAMESPACE, "licenseConcluded");
/// `spdx:copyrightText`
pub const PROP_COPYRIGHT_TEXT: Iri = Iri::new(SPDX_NAMESPACE, "copyrightText");
/// `spdx:licenseComments`
pub const PROP_LICENSE_COMMENT: Iri = Iri::new(SPDX_NAMESPACE, "licenseComments");

// File
/// `spdx:fileName`
pub const PROP_FILE_NAME: Iri = Iri::new(SPDX_NAMESPACE, "fileName");
/// `spdx:fileType`
pub const PROP_FILE_TYPE: Iri = Iri::new(SPDX_NAMESPACE, "fileType");
/// `spdx:checksum`
pub const PROP_FILE_CHECKSUM: Iri = Iri::new(SPDX_NAMESPACE, "checksum");
/// `spdx:fileContributor`
pub const PROP_FILE_CONTRIBUTOR: Iri = Iri::new(SPDX_NAMESPACE, "fileContributor");
/// `spdx:noticeText`
pub const PROP_FILE_NOTICE: Iri = Iri::new(SPDX_NAMESPACE, "noticeText");
/// `spdx:artifactOf`
pub const PROP_FILE_ARTIFACT_OF: Iri = Iri::new(SPDX_NAMESPACE, "artifactOf");
/// `spdx:fileDependency`
pub const PROP_FILE_DEPENDENCY: Iri = Iri::new(SPDX_NAMESPACE, "fileDependency");
/// `spdx:licenseInfoInFile`
pub const PROP_FILE_SEEN_LICENSE: Iri = Iri::new(SPDX_NAMESPACE, "licenseInfoInFile");

// Checksum
/// `spdx:algorithm`
pub const PROP_CHECKSUM_ALGORITHM: Iri = Iri::new(SPDX_NAMESPACE, "algorithm");
/// `spdx:checksumValue`
pub const PROP_CHECKSUM_VALUE: Iri = Iri::new(SPDX_NAMESPACE, "checksumValue");

// Annotation
/// `spdx:annotator`
pub const PROP_ANNOTATOR: Iri = Iri::new(SPDX_NAMESPACE, "annotator");
/// `spdx:annotationType`
pub const PROP_ANNOTATION_TYPE: Iri = Iri::new(SPDX_NAMESPACE, "annotationType");
/// `spdx:annotationDate`
pub const PROP_ANNOTATION_DATE: Iri = Iri::new(SPDX_NAMESPACE, "annotationDate");

// Relationship
/// `spdx:relationshipType`
pub const PROP_RELATIONSHIP_TYPE: Iri = Iri::new(SPDX_NAMESPACE, "relationshipType");
/// `spdx:relatedSpdxElement`
pub const PROP_RELATED_ELEMENT: Iri = Iri::new(SPDX_NAMESPACE, "relatedSpdxElement");

// Licensing
/// `spdx:licenseId`
pub const PROP_LICENSE_ID: Iri = Iri::new(SPDX_NAMESPACE, "licenseId");
/// `spdx:member`
pub const PROP_LICENSE_SET_MEMBER: Iri = Iri::new(SPDX_NAMESPACE, "member");
/// `spdx:licenseException`
pub const PROP_LICENSE_EXCEPTION: Iri = Iri::new(SPDX_NAMESPACE, "licenseException");

// DOAP
/// `doap:name`
pub const PROP_PROJECT_NAME: Iri = Iri::new(DOAP_NAMESPACE, "name");
/// `doap:homepage`
pub const PROP_PROJECT_HOMEPAGE: Iri = Iri::new(DOAP_NAMESPACE, "homepage");

// Classes
/// `spdx:File`
pub const CLASS_FILE: Iri = Iri::new(SPDX_NAMESPACE, "File");
/// `spdx:Checksum`
pub const CLASS_CHECKSUM: Iri = Iri::new(SPDX_NAMESPACE, "Checksum");
/// `spdx:Annotation`
pub const CLASS_ANNOTATION: Iri = Iri::new(SPDX_NAMESPACE, "Annotation");
/// `spdx:Relationship`
pub const CLASS_RELATIONSHIP: Iri = Iri::new(SPDX_NAMESPACE, "Relationship");
/// `spdx:License`
pub const CLASS_SIMPLE_LICENSE: Iri = Iri::new(SPDX_NAMESPACE, "License");
/// `spdx:ConjunctiveLicenseSet`
pub const CLASS_CONJUNCTIVE_LICENSE_SET: Iri = Iri::new(SPDX_NAMESPACE, "ConjunctiveLicenseSet");
/// `spdx:DisjunctiveLicenseSet`
pub const CLASS_DISJUNCTIVE_LICENSE_SET: Iri = Iri::new(SPDX_NAMESPACE, "DisjunctiveLicenseSet");
/// `spdx:WithExceptionOperator`
pub const CLASS_WITH_EXCEPTION: Iri = Iri::new(SPDX_NAMESPACE, "WithExceptionOperator");
/// `doap:Project`
pub const CLASS_DOAP_PROJECT: Iri = Iri::new(DOAP_NAMESPACE, "Project");

// Individuals
/// `spdx:none`
pub const URI_NONE: Iri = Iri::new(SPDX_NAMESPACE, "none");
/// `spdx:noassertion`
pub const URI_NOASSERTION: Iri = Iri::new(SPDX_NAMESPACE, "noassertion");
