//! Tabular records
//!
//! A [`Record`] is one row of a sheet keyed by its column header. Column
//! order is preserved so records serialize back in sheet order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// One row of tabular data, column header to cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, String>);

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Fetch a required column, failing with [`DomainError::MissingField`].
    pub fn field(&self, entity: &'static str, column: &str) -> Result<&str> {
        self.get(column).ok_or_else(|| DomainError::MissingField {
            entity,
            field: column.to_string(),
        })
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
