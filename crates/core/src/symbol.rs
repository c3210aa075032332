//! Symbol tables for enumerated parameters.
//!
//! An enumerated parameter is stored in memory as an ordinal and serialized
//! as a stable internal name. The table is the ordered mapping between the
//! two: ordinals are contiguous indices into the table, so position *is*
//! identity.
//!
//! ## Case sensitivity
//!
//! Name lookup is case-sensitive: "RMS" != "rms". Serialized forms are
//! written by this crate in the first place, so there is no user input to
//! normalize here; a forgiving grammar belongs to whatever edits the
//! serialized map.

use serde::{Deserialize, Serialize};

/// Ordered internal names for one enumerated parameter.
///
/// Immutable after construction. Display-name localization is out of scope;
/// only internal names live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    symbols: Vec<String>,
}

impl SymbolTable {
    /// Build a table from internal names, in ordinal order.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of symbols (one past the largest valid ordinal).
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Internal name for an ordinal, or `None` if out of range.
    pub fn name(&self, ordinal: usize) -> Option<&str> {
        self.symbols.get(ordinal).map(String::as_str)
    }

    /// Ordinal for an internal name (case-sensitive), or `None` if unknown.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == name)
    }

    /// Iterate `(ordinal, internal-name)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.symbols.iter().enumerate().map(|(i, s)| (i, s.as_str()))
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
