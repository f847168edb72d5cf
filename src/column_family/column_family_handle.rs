/// Handle to a Column Family
///
/// A lightweight, owned reference to a family of a `ColumnFamilyStore`.
/// The set of families in a store never changes, so a handle stays valid
/// for as long as the store that issued it.
///
/// # Example
///
/// ```ignore
/// use widecol::ColumnFamilyStore;
///
/// let store = ColumnFamilyStore::new(&["user", "geo"])?;
/// let geo = store.handle("geo")?;
/// assert_eq!(geo.id(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnFamilyHandle {
    /// Position of the family in the store
    pub(crate) id: u32,

    /// Name of the column family
    pub(crate) name: String,
}

impl ColumnFamilyHandle {
    pub(crate) fn new(id: u32, name: String) -> Self {
        ColumnFamilyHandle { id, name }
    }

    /// Get the column family ID
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the column family name
    pub fn name(&self) -> &str {
        &self.name
    }
}
