//! Content codings as they come out of negotiation.
//!
//! A resolved candidate is a [`Coding`]: the identity coding, a named coding, or the wildcard
//! together with the [`Exclusions`] it must not stand in for.
//!
//! Handlers that work on plain strings can keep doing so: `Coding` formats to the textual form
//! used on the wire by earlier versions of this negotiation, where identity is the empty string
//! and the wildcard is `*` followed by `;<name>` for every excluded coding (`*;br;bzip`).
//! [`is_wildcard`] and [`is_disallowed_in_wildcard`] query that form, and
//! [`Coding::from`] parses it back.

use std::fmt;

/// The wildcard coding, matching any coding not otherwise listed
pub const WILDCARD: &str = "*";

/// The identity coding, "no transformation"
pub const IDENTITY: &str = "identity";

/// Separator of the excluded names in the textual wildcard form
const EXCLUSION_DELIM: char = ';';

/// Prefix of a textual wildcard carrying at least one exclusion
const WILDCARD_PREFIX: &str = "*;";

/// A coding the caller may produce a response in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Coding {
    /// No encoding. Formats as the empty string.
    Identity,
    /// A named content coding such as `gzip` or `br`.
    Named(String),
    /// `*`, standing in for any coding except the excluded ones.
    Wildcard(Exclusions),
}

impl Coding {
    /// The name used to detect duplicate entries: `""` for identity, `*` for the wildcard.
    pub fn name(&self) -> &str {
        match self {
            Coding::Identity => "",
            Coding::Named(name) => name,
            Coding::Wildcard(_) => WILDCARD,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Coding::Identity)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Coding::Wildcard(_))
    }

    /// Returns the exclusions when this is the wildcard.
    pub fn exclusions(&self) -> Option<&Exclusions> {
        match self {
            Coding::Wildcard(exclusions) => Some(exclusions),
            _ => None,
        }
    }

    /// Returns whether a response in the coding `name` satisfies this candidate.
    ///
    /// `name` uses the same convention as the candidates: `""` is identity.
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Coding::Identity => name.is_empty(),
            Coding::Named(coding) => coding == name,
            Coding::Wildcard(exclusions) => !exclusions.contains(name),
        }
    }
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coding::Identity => Ok(()),
            Coding::Named(name) => f.write_str(name),
            Coding::Wildcard(exclusions) => {
                f.write_str(WILDCARD)?;
                for name in exclusions.iter() {
                    write!(f, "{EXCLUSION_DELIM}{name}")?;
                }
                Ok(())
            }
        }
    }
}

/// Parses the textual form produced by [`Display`](fmt::Display).
impl From<&str> for Coding {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Coding::Identity
        } else if value == WILDCARD {
            Coding::Wildcard(Exclusions::default())
        } else if let Some(excluded) = value.strip_prefix(WILDCARD_PREFIX) {
            Coding::Wildcard(excluded.split(EXCLUSION_DELIM).collect())
        } else {
            Coding::Named(value.to_owned())
        }
    }
}

/// Codings a wildcard must not stand in for, in the order they were excluded.
///
/// The identity coding is stored as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Exclusions {
    names: Vec<String>,
}

impl Exclusions {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|excluded| excluded == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub(crate) fn push(&mut self, name: &str) {
        self.names.push(name.to_owned());
    }
}

impl<'a> FromIterator<&'a str> for Exclusions {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self { names: iter.into_iter().map(str::to_owned).collect() }
    }
}

/// Returns true when `accept` is the textual form of a wildcard candidate.
pub fn is_wildcard(accept: &str) -> bool {
    accept == WILDCARD || accept.starts_with(WILDCARD_PREFIX)
}

/// Returns true when the textual wildcard `accept` excludes `coding`.
///
/// `coding` is `""` for identity. A bare `*`, or anything that is not a wildcard, excludes
/// nothing.
pub fn is_disallowed_in_wildcard(accept: &str, coding: &str) -> bool {
    match accept.strip_prefix(WILDCARD_PREFIX) {
        Some(excluded) => excluded.split(EXCLUSION_DELIM).any(|name| name == coding),
        None => false,
    }
}
