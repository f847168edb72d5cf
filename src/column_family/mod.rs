/// Column Family module
///
/// A column family is a named key → record table. All families of a store
/// share one primary-key space: the fields of one logical entity are split
/// across families and stored under the same key in each.
///
/// # Architecture
///
/// ```text
/// ColumnFamilyStore
///  └─→ RwLock<ColumnFamilySet>
///       ├─→ ColumnFamily("user")     key → {nombre, email}
///       ├─→ ColumnFamily("geo")      key → {pais, ciudad}
///       └─→ ColumnFamily("metrics")  key → {visitas, gasto_total, ...}
/// ```
///
/// # Usage
///
/// ```ignore
/// use widecol::{ColumnFamilyStore, fields};
///
/// let store = ColumnFamilyStore::new(&["user", "geo"])?;
/// store.insert("u1", [
///     ("user", fields([("nombre", "Ana")])),
///     ("geo", fields([("ciudad", "Lima")])),
/// ])?;
///
/// let user = store.family("user")?;
/// assert!(user.get("u1").is_some());
/// ```
#[allow(clippy::module_inception)]
mod column_family;
pub mod column_family_handle;
mod column_family_set;

pub use column_family::ColumnFamily;
pub use column_family_handle::ColumnFamilyHandle;
pub use column_family_set::ColumnFamilySet;
