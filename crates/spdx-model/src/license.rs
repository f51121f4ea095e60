//! License expressions
//!
//! `NONE` and `NOASSERTION` are stored as well-known IRIs; every other form
//! is a typed blank node (`licenseId`, `member`, `licenseException`).

use crate::error::{ModelError, ModelResult};
use crate::sync::{all_equivalent, new_sub_entity, Equivalent, GraphValue};
use serde::{Deserialize, Serialize};
use spdx_graph::vocab::{
    CLASS_CONJUNCTIVE_LICENSE_SET, CLASS_DISJUNCTIVE_LICENSE_SET, CLASS_SIMPLE_LICENSE,
    CLASS_WITH_EXCEPTION, PROP_LICENSE_EXCEPTION, PROP_LICENSE_ID, PROP_LICENSE_SET_MEMBER,
    URI_NOASSERTION, URI_NONE,
};
use spdx_graph::{Iri, ModelContainer, NodeId, Term};
use std::fmt;

/// Nesting limit when reading expressions back from a graph
const MAX_DEPTH: usize = 64;

/// License expression attached to a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseExpression {
    /// Explicitly no license
    None,
    /// No determination was made
    #[default]
    NoAssertion,
    /// Single license identifier
    Simple(String),
    /// All members apply
    Conjunction(Vec<LicenseExpression>),
    /// Any one member applies
    Disjunction(Vec<LicenseExpression>),
    /// License with an exception
    WithException {
        /// Licensed under
        license: Box<LicenseExpression>,
        /// Exception identifier
        exception: String,
    },
}

impl LicenseExpression {
    /// Single license identifier
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidLicense`] for empty or whitespace ids.
    pub fn simple(id: impl Into<String>) -> ModelResult<Self> {
        let id = id.into();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidLicense(format!("invalid license id {id:?}")));
        }
        Ok(Self::Simple(id))
    }

    /// Conjunctive set
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidLicense`] with fewer than two members.
    pub fn all_of(members: Vec<Self>) -> ModelResult<Self> {
        Self::check_set(&members)?;
        Ok(Self::Conjunction(members))
    }

    /// Disjunctive set
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidLicense`] with fewer than two members.
    pub fn any_of(members: Vec<Self>) -> ModelResult<Self> {
        Self::check_set(&members)?;
        Ok(Self::Disjunction(members))
    }

    /// License with an exception
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidLicense`] if `license` is not a simple
    /// license or the exception is empty.
    pub fn with_exception(license: Self, exception: impl Into<String>) -> ModelResult<Self> {
        let exception = exception.into();
        if !matches!(license, Self::Simple(_)) {
            return Err(ModelError::InvalidLicense(format!(
                "exception {exception} must apply to a single license, not {license}"
            )));
        }
        if exception.is_empty() {
            return Err(ModelError::InvalidLicense("empty exception id".to_string()));
        }
        Ok(Self::WithException {
            license: Box::new(license),
            exception,
        })
    }

    fn check_set(members: &[Self]) -> ModelResult<()> {
        if members.len() < 2 {
            return Err(ModelError::InvalidLicense(format!(
                "license set needs at least two members, got {}",
                members.len()
            )));
        }
        Ok(())
    }

    /// True for `NONE` and `NOASSERTION`
    #[inline]
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::None | Self::NoAssertion)
    }

    /// Validity problems
    #[must_use]
    pub fn verify(&self) -> Vec<String> {
        let mut problems = Vec::new();
        self.verify_into(&mut problems);
        problems
    }

    fn verify_into(&self, problems: &mut Vec<String>) {
        match self {
            Self::None | Self::NoAssertion => {}
            Self::Simple(id) => {
                if id.is_empty() {
                    problems.push("Missing required license ID".to_string());
                }
            }
            Self::Conjunction(members) | Self::Disjunction(members) => {
                if members.len() < 2 {
                    problems.push(format!("License set {self} has fewer than two members"));
                }
                for member in members {
                    member.verify_into(problems);
                }
            }
            Self::WithException { license, exception } => {
                if exception.is_empty() {
                    problems.push(format!("Missing required exception for {license}"));
                }
                license.verify_into(problems);
            }
        }
    }

    fn from_term_at(container: &ModelContainer, term: &Term, depth: usize) -> ModelResult<Self> {
        if depth > MAX_DEPTH {
            return Err(ModelError::InvalidLicense(
                "license expression nested too deeply".to_string(),
            ));
        }
        let (node, uri) = match term {
            Term::Uri(uri) => (None, Some(uri.clone())),
            Term::Node(node) => (Some(*node), container.graph().node_uri(*node).map(str::to_string)),
            Term::Literal(text) => {
                return Err(ModelError::InvalidLicense(format!("literal {text:?} is not a license")))
            }
        };
        if let Some(uri) = &uri {
            if URI_NONE.matches(uri) {
                return Ok(Self::None);
            }
            if URI_NOASSERTION.matches(uri) {
                return Ok(Self::NoAssertion);
            }
        }
        let Some(node) = node else {
            // Bare IRI of a listed license
            return uri
                .as_deref()
                .and_then(|u| u.rsplit(['/', '#']).next())
                .filter(|id| !id.is_empty())
                .map(|id| Self::Simple(id.to_string()))
                .ok_or_else(|| ModelError::InvalidLicense(term.to_string()));
        };

        if container.has_type(node, CLASS_SIMPLE_LICENSE) {
            Self::read_id(container, node, PROP_LICENSE_ID).map(Self::Simple)
        } else if container.has_type(node, CLASS_CONJUNCTIVE_LICENSE_SET) {
            Ok(Self::Conjunction(Self::read_members(container, node, depth)?))
        } else if container.has_type(node, CLASS_DISJUNCTIVE_LICENSE_SET) {
            Ok(Self::Disjunction(Self::read_members(container, node, depth)?))
        } else if container.has_type(node, CLASS_WITH_EXCEPTION) {
            let member = container
                .store(node)
                .read_terms(PROP_LICENSE_SET_MEMBER)
                .into_iter()
                .next()
                .ok_or_else(|| ModelError::MissingProperty {
                    property: PROP_LICENSE_SET_MEMBER.uri(),
                    node,
                })?;
            let license = Self::from_term_at(container, &member, depth + 1)?;
            let exception = Self::read_id(container, node, PROP_LICENSE_EXCEPTION)?;
            Ok(Self::WithException {
                license: Box::new(license),
                exception,
            })
        } else if let Some(uri) = uri {
            // Named node without a class: treat like a bare IRI
            Self::from_term_at(container, &Term::Uri(uri), depth + 1)
        } else {
            Err(ModelError::TypeMismatch {
                expected: CLASS_SIMPLE_LICENSE.uri(),
                found: term.to_string(),
            })
        }
    }

    fn read_id(container: &ModelContainer, node: NodeId, property: Iri) -> ModelResult<String> {
        container
            .store(node)
            .read_single(property)
            .ok_or_else(|| ModelError::MissingProperty {
                property: property.uri(),
                node,
            })
    }

    fn read_members(container: &ModelContainer, node: NodeId, depth: usize) -> ModelResult<Vec<Self>> {
        container
            .store(node)
            .read_terms(PROP_LICENSE_SET_MEMBER)
            .iter()
            .map(|term| Self::from_term_at(container, term, depth + 1))
            .collect()
    }

    fn write_members(container: &ModelContainer, class: Iri, members: &[Self]) -> ModelResult<Term> {
        let node = new_sub_entity(container, class)?;
        let terms = members
            .iter()
            .map(|member| member.to_term(container))
            .collect::<ModelResult<Vec<_>>>()?;
        container.store(node).write_terms(PROP_LICENSE_SET_MEMBER, terms)?;
        Ok(Term::Node(node))
    }
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("NONE"),
            Self::NoAssertion => f.write_str("NOASSERTION"),
            Self::Simple(id) => f.write_str(id),
            Self::Conjunction(members) => write_set(f, members, "AND"),
            Self::Disjunction(members) => write_set(f, members, "OR"),
            Self::WithException { license, exception } => write!(f, "{license} WITH {exception}"),
        }
    }
}

fn write_set(f: &mut fmt::Formatter<'_>, members: &[LicenseExpression], op: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            write!(f, " {op} ")?;
        }
        write!(f, "{member}")?;
    }
    f.write_str(")")
}

/// Ids compare case-insensitively; set membership ignores order
impl Equivalent for LicenseExpression {
    fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) | (Self::NoAssertion, Self::NoAssertion) => true,
            (Self::Simple(a), Self::Simple(b)) => a.eq_ignore_ascii_case(b),
            (Self::Conjunction(a), Self::Conjunction(b))
            | (Self::Disjunction(a), Self::Disjunction(b)) => all_equivalent(a, b),
            (
                Self::WithException { license: la, exception: ea },
                Self::WithException { license: lb, exception: eb },
            ) => la.equivalent(lb) && ea.eq_ignore_ascii_case(eb),
            _ => false,
        }
    }
}

impl GraphValue for LicenseExpression {
    const KIND: &'static str = "license";

    fn from_term(container: &ModelContainer, term: &Term) -> ModelResult<Self> {
        Self::from_term_at(container, term, 0)
    }

    fn to_term(&self, container: &ModelContainer) -> ModelResult<Term> {
        match self {
            Self::None => Ok(Term::Uri(URI_NONE.uri())),
            Self::NoAssertion => Ok(Term::Uri(URI_NOASSERTION.uri())),
            Self::Simple(id) => {
                let node = new_sub_entity(container, CLASS_SIMPLE_LICENSE)?;
                container.store(node).write_single(PROP_LICENSE_ID, Some(id))?;
                Ok(Term::Node(node))
            }
            Self::Conjunction(members) => {
                Self::write_members(container, CLASS_CONJUNCTIVE_LICENSE_SET, members)
            }
            Self::Disjunction(members) => {
                Self::write_members(container, CLASS_DISJUNCTIVE_LICENSE_SET, members)
            }
            Self::WithException { license, exception } => {
                let node = new_sub_entity(container, CLASS_WITH_EXCEPTION)?;
                let member = license.to_term(container)?;
                let store = container.store(node);
                store.write_terms(PROP_LICENSE_SET_MEMBER, vec![member])?;
                store.write_single(PROP_LICENSE_EXCEPTION, Some(exception))?;
                Ok(Term::Node(node))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mit() -> LicenseExpression {
        LicenseExpression::simple("MIT").unwrap()
    }

    fn apache() -> LicenseExpression {
        LicenseExpression::simple("Apache-2.0").unwrap()
    }

    #[test]
    fn constructors_reject_bad_input() {
        assert!(LicenseExpression::simple("").is_err());
        assert!(LicenseExpression::simple("MIT OR GPL").is_err());
        assert!(LicenseExpression::all_of(vec![mit()]).is_err());
        assert!(LicenseExpression::with_exception(LicenseExpression::NoAssertion, "x").is_err());
        assert!(LicenseExpression::with_exception(mit(), "").is_err());
    }

    #[test]
    fn display_renders_expression() {
        let expr = LicenseExpression::any_of(vec![
            LicenseExpression::all_of(vec![mit(), apache()]).unwrap(),
            LicenseExpression::with_exception(
                LicenseExpression::simple("GPL-2.0").unwrap(),
                "Classpath-exception-2.0",
            )
            .unwrap(),
        ])
        .unwrap();
        assert_eq!(
            expr.to_string(),
            "((MIT AND Apache-2.0) OR GPL-2.0 WITH Classpath-exception-2.0)"
        );
        assert_eq!(LicenseExpression::default().to_string(), "NOASSERTION");
    }

    #[test]
    fn equivalence_ignores_member_order_and_case() {
        let a = LicenseExpression::all_of(vec![mit(), apache()]).unwrap();
        let b = LicenseExpression::all_of(vec![apache(), LicenseExpression::simple("mit").unwrap()]).unwrap();
        let c = LicenseExpression::any_of(vec![mit(), apache()]).unwrap();
        assert!(a.equivalent(&b));
        assert!(!a.equivalent(&c));
        assert!(!LicenseExpression::None.equivalent(&LicenseExpression::NoAssertion));
    }

    #[test]
    fn graph_round_trip() {
        let container = ModelContainer::new("http://example.org/doc").unwrap();
        let exprs = vec![
            LicenseExpression::None,
            LicenseExpression::NoAssertion,
            mit(),
            LicenseExpression::all_of(vec![mit(), apache()]).unwrap(),
            LicenseExpression::with_exception(mit(), "LLVM-exception").unwrap(),
        ];
        for expr in exprs {
            let term = expr.to_term(&container).unwrap();
            assert_eq!(LicenseExpression::from_term(&container, &term).unwrap(), expr);
        }
    }

    #[test]
    fn placeholders_are_iris() {
        let container = ModelContainer::new("http://example.org/doc").unwrap();
        assert_eq!(
            LicenseExpression::None.to_term(&container).unwrap(),
            Term::Uri("http://spdx.org/rdf/terms#none".to_string())
        );
        assert!(container.graph().is_empty());
    }

    #[test]
    fn listed_license_iri_reads_as_simple() {
        let container = ModelContainer::new("http://example.org/doc").unwrap();
        let term = Term::Uri("http://spdx.org/licenses/BSD-3-Clause".to_string());
        assert_eq!(
            LicenseExpression::from_term(&container, &term).unwrap(),
            LicenseExpression::Simple("BSD-3-Clause".to_string())
        );
    }

    #[test]
    fn self_referencing_set_is_rejected() {
        let container = ModelContainer::new("http://example.org/doc").unwrap();
        let node = new_sub_entity(&container, CLASS_CONJUNCTIVE_LICENSE_SET).unwrap();
        container
            .store(node)
            .write_nodes(PROP_LICENSE_SET_MEMBER, &[node])
            .unwrap();
        assert!(LicenseExpression::from_term(&container, &Term::Node(node)).is_err());
    }

    #[test]
    fn verify_reports_short_sets() {
        assert!(mit().verify().is_empty());
        let bad = LicenseExpression::Conjunction(vec![mit()]);
        assert_eq!(bad.verify().len(), 1);
    }
}
