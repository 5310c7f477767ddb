use std::fmt;
use std::slice;

use crate::codec::Quality;
use crate::protocol::Coding;

/// One resolved `Accept-Encoding` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    coding: Coding,
    quality: Quality,
}

impl Preference {
    pub fn new(coding: Coding, quality: Quality) -> Self {
        Self { coding, quality }
    }

    pub fn coding(&self) -> &Coding {
        &self.coding
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Entries with `q=0` are kept for accounting but never offered to a handler.
    pub fn is_acceptable(&self) -> bool {
        !self.quality.is_zero()
    }

    pub(crate) fn coding_mut(&mut self) -> &mut Coding {
        &mut self.coding
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};q={}", self.coding, self.quality)
    }
}

/// The resolved candidate list, ordered by descending quality.
///
/// Entries of equal quality keep the order they had in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    inner: Vec<Preference>,
}

impl Preferences {
    pub(crate) fn new(inner: Vec<Preference>) -> Self {
        Self { inner }
    }

    pub fn iter(&self) -> slice::Iter<'_, Preference> {
        self.inner.iter()
    }

    /// The candidates a handler will be offered, in order.
    pub fn acceptable(&self) -> impl Iterator<Item = &Coding> {
        self.inner.iter().filter(|preference| preference.is_acceptable()).map(Preference::coding)
    }
}

impl<'a> IntoIterator for &'a Preferences {
    type Item = &'a Preference;
    type IntoIter = slice::Iter<'a, Preference>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Preferences {
    type Item = Preference;
    type IntoIter = std::vec::IntoIter<Preference>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Formats the list for logging, e.g. `gzip;q=1, *;br;q=0.5, br;q=0, ;q=0.001`.
impl fmt::Display for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, preference) in self.inner.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{preference}")?;
        }
        Ok(())
    }
}
