use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use tracing::debug;

use crate::{
    column_family::{ColumnFamily, ColumnFamilyHandle, ColumnFamilySet},
    mutation::RowMutation,
    statistics::Statistics,
    store::StoreOptions,
    types::{Fields, Record, Timestamp, now_timestamp},
    util::{Result, Status},
};

/// Read guard over one family of a store.
///
/// Writers are blocked while it is alive, so everything read through it
/// belongs to one consistent state of the store. The holder may keep
/// reading the store (queries, `get`, more guards) without waiting on
/// queued writers.
pub type FamilyRef<'a> = MappedRwLockReadGuard<'a, ColumnFamily>;

/// A fixed set of column families sharing one primary-key space.
///
/// # Concurrency
///
/// All families sit behind a single `RwLock`. A write takes it exclusively
/// for the whole row mutation, so a reader sees either none or all of the
/// families touched by an insert. Reads share the lock and run in parallel.
///
/// Every shared acquisition is recursive, so a thread already holding a
/// [`FamilyRef`] never queues behind a pending writer that is itself
/// waiting on that guard.
///
/// # Example
///
/// ```ignore
/// use widecol::{ColumnFamilyStore, fields};
///
/// let store = ColumnFamilyStore::new(&["user", "geo", "metrics"])?;
/// store.insert("u1", [
///     ("user", fields([("nombre", "Ana")])),
///     ("geo", fields([("ciudad", "Lima")])),
/// ])?;
/// assert_eq!(store.family_names(), vec!["user", "geo", "metrics"]);
/// ```
pub struct ColumnFamilyStore {
    /// Every family, guarded together
    column_families: RwLock<ColumnFamilySet>,
    /// Store options
    options: StoreOptions,
    /// Store-wide statistics
    statistics: Arc<Statistics>,
}

impl ColumnFamilyStore {
    /// Create a store with one empty family per name and default options
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        Self::open(names, StoreOptions::default())
    }

    pub fn open<S: AsRef<str>>(names: &[S], options: StoreOptions) -> Result<Self> {
        let cf_set = ColumnFamilySet::open(names)?;
        debug!(families = ?cf_set.names(), "opened column family store");

        Ok(ColumnFamilyStore {
            column_families: RwLock::new(cf_set),
            options,
            statistics: Arc::new(Statistics::new()),
        })
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn statistics(&self) -> &Arc<Statistics> {
        &self.statistics
    }

    /// Family names in construction order
    pub fn family_names(&self) -> Vec<String> {
        self.column_families.read_recursive().names()
    }

    /// Handles for every family in construction order
    pub fn list_column_families(&self) -> Vec<ColumnFamilyHandle> {
        self.column_families.read_recursive().list_column_families()
    }

    pub fn handle(&self, name: &str) -> Result<ColumnFamilyHandle> {
        self.column_families
            .read_recursive()
            .get_cf_by_name(name)
            .map(ColumnFamily::handle)
            .ok_or_else(|| Status::unknown_family(name))
    }

    /// Borrow one family for reading.
    ///
    /// Fails with `InvalidArgument` if the store has no family called `name`.
    pub fn family(&self, name: &str) -> Result<FamilyRef<'_>> {
        RwLockReadGuard::try_map(self.column_families.read_recursive(), |set| {
            set.get_cf_by_name(name)
        })
        .map_err(|_| Status::unknown_family(name))
    }

    /// Borrow one family through a handle issued by this store
    pub fn family_cf(&self, handle: &ColumnFamilyHandle) -> Result<FamilyRef<'_>> {
        RwLockReadGuard::try_map(self.column_families.read_recursive(), |set| set.get_cf(handle))
        .map_err(|_| Status::unknown_family(handle.name()))
    }

    /// Copy of the record stored under `key` in `family`
    pub fn get(&self, family: &str, key: &str) -> Result<Option<Record>> {
        Ok(self.family(family)?.get(key).cloned())
    }

    /// Number of rows in `family`
    pub fn len(&self, family: &str) -> Result<usize> {
        Ok(self.family(family)?.len())
    }

    /// Clone every family under one read lock.
    ///
    /// The copy is consistent across families and is not affected by later
    /// writes.
    pub fn snapshot(&self) -> ColumnFamilySet {
        self.column_families.read_recursive().clone()
    }

    /// Shared read access to all families at once
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, ColumnFamilySet> {
        self.column_families.read_recursive()
    }

    /// Insert one logical record split across families.
    ///
    /// Every family named in `per_family` gets a new record built from its
    /// fields under `key`, replacing whatever was stored there. All records
    /// written by one call share the returned timestamp.
    pub fn insert<I, F>(&self, key: &str, per_family: I) -> Result<Timestamp>
    where
        I: IntoIterator<Item = (F, Fields)>,
        F: Into<String>,
    {
        let mut mutation = RowMutation::new(key);
        for (family, fields) in per_family {
            mutation.put_mut(family, fields);
        }
        self.write(mutation)
    }

    /// Insert from a JSON document, see [`RowMutation::from_json`]
    pub fn insert_json(&self, key: &str, doc: &serde_json::Value) -> Result<Timestamp> {
        match RowMutation::from_json(key, doc) {
            Ok(mutation) => self.write(mutation),
            Err(e) => Err(self.reject(key, e)),
        }
    }

    /// Parse `json` and insert it, see [`RowMutation::from_json`]
    pub fn insert_json_str(&self, key: &str, json: &str) -> Result<Timestamp> {
        match serde_json::from_str::<serde_json::Value>(json) {
            Ok(doc) => self.insert_json(key, &doc),
            Err(e) => Err(self.reject(key, e.into())),
        }
    }

    /// Apply a row mutation atomically.
    ///
    /// The key and every family are validated before anything is written;
    /// a rejected mutation leaves the store untouched.
    pub fn write(&self, mutation: RowMutation) -> Result<Timestamp> {
        let timestamp = now_timestamp();

        if mutation.key().is_empty() {
            return Err(self.reject(mutation.key(), Status::missing_primary_key()));
        }
        if mutation.key().len() > self.options.max_key_size {
            let status = Status::invalid_argument(format!(
                "primary key is {} bytes, limit is {}",
                mutation.key().len(),
                self.options.max_key_size
            ));
            return Err(self.reject(mutation.key(), status));
        }

        let cells = mutation.cell_count() as u64;
        let (key, ops) = mutation.into_parts();

        let mut cf_set = self.column_families.write();

        let mut resolved = Vec::with_capacity(ops.len());
        for (family, fields) in ops {
            match cf_set.id_of(&family) {
                Some(id) => resolved.push((id, fields)),
                None => {
                    drop(cf_set);
                    return Err(self.reject(&key, Status::unknown_family(&family)));
                },
            }
        }

        let records = resolved.len() as u64;
        for (id, fields) in resolved {
            if let Some(cf) = cf_set.get_cf_mut(id) {
                cf.put(key.as_str(), Record::new(fields, timestamp));
            }
        }
        drop(cf_set);

        if self.options.collect_statistics {
            self.statistics.record_insert(records, cells);
        }
        debug!(key = %key, records, timestamp, "applied row mutation");

        Ok(timestamp)
    }

    fn reject(&self, key: &str, status: Status) -> Status {
        if self.options.collect_statistics {
            self.statistics.record_rejected_write();
        }
        debug!(key = %key, error = %status, "rejected row mutation");
        status
    }
}
