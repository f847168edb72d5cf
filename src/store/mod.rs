mod options;
#[allow(clippy::module_inception)]
mod store;

pub use options::StoreOptions;
pub use store::{ColumnFamilyStore, FamilyRef};
