/// Options for a `ColumnFamilyStore`
///
/// # Example
///
/// ```ignore
/// use widecol::{ColumnFamilyStore, StoreOptions};
///
/// let options = StoreOptions {
///     collect_statistics: false,
///     ..Default::default()
/// };
/// let store = ColumnFamilyStore::open(&["user", "geo"], options)?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Update the store's `Statistics` on every operation
    /// Default: true
    pub collect_statistics: bool,

    /// Longest primary key accepted, in bytes
    /// Default: 65535 (the Cassandra partition key limit)
    pub max_key_size: usize,

    /// Projections over families with at least this many rows filter rows
    /// on the rayon thread pool
    /// Default: 4096
    pub parallel_scan_threshold: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            collect_statistics: true,
            max_key_size: 65_535,
            parallel_scan_threshold: 4096,
        }
    }
}
