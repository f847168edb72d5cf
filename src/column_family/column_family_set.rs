use std::collections::HashMap;

use crate::{
    column_family::{ColumnFamily, ColumnFamilyHandle},
    util::{Result, Status},
};

/// The fixed set of Column Families owned by one store
///
/// ColumnFamilySet maintains:
/// - Families in construction order (ID = position)
/// - Map of CF name → CF ID for quick lookup
///
/// # Thread Safety
///
/// The set itself has no locks. `ColumnFamilyStore` wraps the whole set in
/// one `RwLock` so that a write touching several families is applied as a
/// single step.
///
/// # Lifecycle
///
/// ```text
/// Store open → ColumnFamilySet::open(names) → one empty CF per name
///            ↓
/// Inserts mutate rows inside the CFs, never the set of CFs
///            ↓
/// Store dropped → all CFs dropped with it
/// ```
#[derive(Debug, Clone)]
pub struct ColumnFamilySet {
    /// CFs indexed by ID
    column_families: Vec<ColumnFamily>,

    /// Map of CF name → CF ID
    name_to_id: HashMap<String, u32>,
}

impl ColumnFamilySet {
    /// Open a set with one empty CF per name.
    ///
    /// Names must be non-empty and unique, and at least one is required.
    pub fn open<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.is_empty() {
            return Err(Status::invalid_argument(
                "At least one column family must be specified",
            ));
        }

        let mut column_families = Vec::with_capacity(names.len());
        let mut name_to_id = HashMap::with_capacity(names.len());

        for (id, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if name.is_empty() {
                return Err(Status::invalid_argument(
                    "Column family name must not be empty",
                ));
            }

            let id = id as u32;
            if name_to_id.insert(name.to_string(), id).is_some() {
                return Err(Status::invalid_argument(format!(
                    "Column family '{}' specified more than once",
                    name
                )));
            }
            column_families.push(ColumnFamily::new(id, name));
        }

        Ok(ColumnFamilySet {
            column_families,
            name_to_id,
        })
    }

    /// Resolve a name to its CF ID
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.name_to_id.get(name).copied()
    }

    /// Get column family by name
    pub fn get_cf_by_name(&self, name: &str) -> Option<&ColumnFamily> {
        let id = self.id_of(name)?;
        self.column_families.get(id as usize)
    }

    /// Get column family by handle
    pub fn get_cf(&self, handle: &ColumnFamilyHandle) -> Option<&ColumnFamily> {
        self.column_families
            .get(handle.id() as usize)
            .filter(|cf| cf.name() == handle.name())
    }

    pub(crate) fn get_cf_mut(&mut self, id: u32) -> Option<&mut ColumnFamily> {
        self.column_families.get_mut(id as usize)
    }

    /// Names in construction order
    pub fn names(&self) -> Vec<String> {
        self.column_families
            .iter()
            .map(|cf| cf.name().to_string())
            .collect()
    }

    /// List all column family handles in construction order
    pub fn list_column_families(&self) -> Vec<ColumnFamilyHandle> {
        self.column_families.iter().map(|cf| cf.handle()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnFamily> {
        self.column_families.iter()
    }

    /// Get number of column families
    pub fn count(&self) -> usize {
        self.column_families.len()
    }
}
