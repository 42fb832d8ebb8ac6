//! Comma-separated token sets
//!
//! Skills and certifications are stored in the sheet as `"Thermal, Night"`.
//! They are split once on `", "` when a record is parsed; matching is exact
//! and case-sensitive.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Separator used by the roster sheets between tokens
pub const TOKEN_SEPARATOR: &str = ", ";

/// Set of exact-match tokens parsed from a comma-space separated cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet(BTreeSet<String>);

impl TokenSet {
    /// Parse a cell value. An empty cell yields the single empty token, the
    /// same way the sheet encoding splits.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(TOKEN_SEPARATOR).map(str::to_string).collect())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn is_subset(&self, other: &TokenSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Number of tokens present in both sets
    pub fn overlap(&self, other: &TokenSet) -> usize {
        self.0.intersection(&other.0).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
