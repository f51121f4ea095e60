//! Projects a file was produced by (`artifactOf`)

use crate::error::{ModelError, ModelResult};
use crate::sync::{expect_node, new_sub_entity, Equivalent, GraphValue};
use serde::{Deserialize, Serialize};
use spdx_graph::vocab::{CLASS_DOAP_PROJECT, PROP_PROJECT_HOMEPAGE, PROP_PROJECT_NAME};
use spdx_graph::{ModelContainer, Term};

/// DOAP project reference
///
/// A project with a `uri` is stored as a named node so references from
/// several files share it; otherwise it is a blank node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectReference {
    name: String,
    homepage: Option<String>,
    uri: Option<String>,
}

impl ProjectReference {
    /// Create a project reference
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidArgument`] if the name is empty.
    pub fn new(name: impl Into<String>) -> ModelResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::InvalidArgument {
                field: "project name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(Self {
            name,
            homepage: None,
            uri: None,
        })
    }

    /// With homepage
    #[must_use]
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    /// With project IRI
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Project name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project homepage
    #[inline]
    #[must_use]
    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    /// Project IRI, when the project is a named node
    #[inline]
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Validity problems
    #[must_use]
    pub fn verify(&self) -> Vec<String> {
        if self.name.is_empty() {
            vec!["Missing required name for project".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Name and homepage only; the IRI is where the project lives, not what it is
impl Equivalent for ProjectReference {
    fn equivalent(&self, other: &Self) -> bool {
        self.name == other.name && self.homepage == other.homepage
    }
}

impl GraphValue for ProjectReference {
    const KIND: &'static str = "project";

    fn from_term(container: &ModelContainer, term: &Term) -> ModelResult<Self> {
        let node = expect_node(container, term, CLASS_DOAP_PROJECT)?;
        let store = container.store(node);
        let name = store
            .read_single(PROP_PROJECT_NAME)
            .ok_or_else(|| ModelError::MissingProperty {
                property: PROP_PROJECT_NAME.uri(),
                node,
            })?;
        let homepage = store.read_single(PROP_PROJECT_HOMEPAGE);
        let uri = container.graph().node_uri(node).map(str::to_string);
        Ok(Self { name, homepage, uri })
    }

    fn to_term(&self, container: &ModelContainer) -> ModelResult<Term> {
        let node = match &self.uri {
            Some(uri) => {
                let node = container.graph_mut().named_node(uri);
                container.store(node).write_type(CLASS_DOAP_PROJECT)?;
                node
            }
            None => new_sub_entity(container, CLASS_DOAP_PROJECT)?,
        };
        let store = container.store(node);
        store.write_single(PROP_PROJECT_NAME, Some(&self.name))?;
        store.write_single(PROP_PROJECT_HOMEPAGE, self.homepage.as_deref())?;
        Ok(Term::Node(node))
    }
}
