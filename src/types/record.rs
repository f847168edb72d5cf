use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::Value;

/// Ordered column name → value mapping for one row of one family
pub type Fields = IndexMap<String, Value>;

/// Write time in whole seconds since the Unix epoch
pub type Timestamp = u64;

/// Current wall-clock time as a [`Timestamp`].
///
/// A clock set before the epoch reads as 0.
pub fn now_timestamp() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Build [`Fields`] from `(column, value)` pairs, keeping their order
pub fn fields<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// One row of a column family: its columns plus the time it was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Fields,
    timestamp: Timestamp,
}

impl Record {
    pub fn new(fields: Fields, timestamp: Timestamp) -> Self {
        Record { fields, timestamp }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Column names in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy out the requested columns that this row has, in request order.
    /// Requested columns the row lacks are left out.
    pub fn project<S: AsRef<str>>(&self, columns: &[S]) -> Fields {
        columns
            .iter()
            .filter_map(|c| {
                let (name, value) = self.fields.get_key_value(c.as_ref())?;
                Some((name.clone(), value.clone()))
            })
            .collect()
    }
}
