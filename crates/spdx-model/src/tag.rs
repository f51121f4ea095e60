//! IRI-backed enumerations
//!
//! Closed enumerations (file types, checksum algorithms, annotation and
//! relationship types) are stored in the graph as IRIs of the form
//! `SPDX_NAMESPACE + PREFIX + tag`. Parsing runs in one of two modes:
//! reads from the graph drop unknown values with a warning, construction
//! from caller input rejects them.

use crate::error::{ModelError, ModelResult};
use spdx_graph::vocab::SPDX_NAMESPACE;

/// How unrecognized tags are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagParse {
    /// Log and skip the value
    Drop,
    /// Fail with [`ModelError::InvalidTag`]
    Reject,
}

/// Enumeration whose members map one-to-one onto IRIs
pub trait UriTag: Sized + Copy + 'static {
    /// Local-name prefix shared by every member
    const PREFIX: &'static str;
    /// Human-readable kind, used in errors and logs
    const KIND: &'static str;

    /// Every member, in declaration order
    fn all() -> &'static [Self];

    /// Short tag, e.g. `source`
    fn tag(self) -> &'static str;

    /// Full IRI of the member
    fn uri(self) -> String {
        format!("{SPDX_NAMESPACE}{}{}", Self::PREFIX, self.tag())
    }

    /// Member for a short tag
    fn from_tag(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|member| member.tag() == tag)
    }
}

/// Parse a full IRI, a prefixed local name, or a bare tag
///
/// Empty input yields `Ok(None)` in both modes.
///
/// # Errors
/// Returns [`ModelError::InvalidTag`] in [`TagParse::Reject`] mode when the
/// value maps to no member.
pub fn parse_tag<T: UriTag>(value: &str, mode: TagParse) -> ModelResult<Option<T>> {
    if value.is_empty() {
        return Ok(None);
    }
    let local = value.strip_prefix(SPDX_NAMESPACE).unwrap_or(value);
    let short = local.strip_prefix(T::PREFIX).unwrap_or(local);
    match T::from_tag(short) {
        Some(member) => Ok(Some(member)),
        None => match mode {
            TagParse::Drop => {
                tracing::warn!(kind = T::KIND, value, "dropping unrecognized value");
                Ok(None)
            }
            TagParse::Reject => Err(ModelError::InvalidTag {
                kind: T::KIND,
                value: value.to_string(),
            }),
        },
    }
}

/// Parse a sequence, preserving order
///
/// # Errors
/// Returns the first rejection in [`TagParse::Reject`] mode.
pub fn parse_tags<T, S>(values: &[S], mode: TagParse) -> ModelResult<Vec<T>>
where
    T: UriTag,
    S: AsRef<str>,
{
    let mut parsed = Vec::with_capacity(values.len());
    for value in values {
        if let Some(member) = parse_tag(value.as_ref(), mode)? {
            parsed.push(member);
        }
    }
    Ok(parsed)
}

/// Lenient parse used by graph reads
pub(crate) fn read_tags<T: UriTag>(uris: &[String]) -> Vec<T> {
    uris.iter()
        .filter_map(|uri| parse_tag(uri, TagParse::Drop).ok().flatten())
        .collect()
}

/// Declare an enumeration implementing [`UriTag`]
macro_rules! uri_tags {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($prefix:literal, $kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[doc = concat!("`", $prefix, $tag, "`")]
                $(#[$vmeta])*
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl $crate::tag::UriTag for $name {
            const PREFIX: &'static str = $prefix;
            const KIND: &'static str = $kind;

            fn all() -> &'static [Self] {
                &[ $( Self::$variant ),+ ]
            }

            fn tag(self) -> &'static str {
                match self {
                    $( Self::$variant => $tag ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::tag::UriTag::tag(*self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::tag::parse_tag(s, $crate::tag::TagParse::Reject)?.ok_or_else(|| {
                    $crate::error::ModelError::InvalidTag {
                        kind: $kind,
                        value: s.to_string(),
                    }
                })
            }
        }
    };
}

pub(crate) use uri_tags;

uri_tags! {
    /// Classification of a file's content
    pub enum FileType ("fileType_", "file type") {
        Source => "source",
        Binary => "binary",
        Archive => "archive",
        Application => "application",
        Audio => "audio",
        Image => "image",
        Text => "text",
        Video => "video",
        Documentation => "documentation",
        Spdx => "spdx",
        Other => "other",
    }
}
