use std::collections::BTreeMap;

use indexmap::IndexSet;

use crate::{column_family::ColumnFamilyHandle, types::Record};

/// A named table from primary key to one [`Record`].
///
/// Rows are kept in key order so listings are deterministic. A key maps to
/// at most one record; writing an existing key replaces its record whole,
/// with no merge of the old columns and no version history.
///
/// # Ownership
///
/// Families live inside a `ColumnFamilyStore`, which serializes writes
/// across all of its families. A standalone family has no locking of its own.
#[derive(Debug, Clone)]
pub struct ColumnFamily {
    /// Column family ID (position in the owning store)
    id: u32,

    /// Column family name
    name: String,

    /// Primary key → latest record
    rows: BTreeMap<String, Record>,
}

impl ColumnFamily {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        ColumnFamily {
            id,
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a handle naming this family
    pub fn handle(&self) -> ColumnFamilyHandle {
        ColumnFamilyHandle::new(self.id, self.name.clone())
    }

    /// Look up the record stored under `key`
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.rows.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Store `record` under `key`, replacing any previous record.
    ///
    /// Returns the replaced record, if there was one.
    pub fn put(&mut self, key: impl Into<String>, record: Record) -> Option<Record> {
        self.rows.insert(key.into(), record)
    }

    /// All primary keys, sorted
    pub fn all_keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// All `(key, record)` rows, sorted by key
    pub fn all_records(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.rows.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of the column names of every row, in first-seen order.
    ///
    /// Rows are visited in key order and each row's columns in their own
    /// order, so the result is stable for a given family content.
    pub fn columns(&self) -> Vec<String> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for record in self.rows.values() {
            seen.extend(record.columns());
        }
        seen.into_iter().map(str::to_string).collect()
    }

    /// True if at least one row has `column`
    pub fn has_column(&self, column: &str) -> bool {
        self.rows.values().any(|r| r.contains_column(column))
    }
}
