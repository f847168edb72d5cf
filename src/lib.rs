//! In-memory wide-column store.
//!
//! Several column families share one primary-key space. A row mutation
//! writes one key into many families at once, projections read a subset of
//! one family's columns, and the aggregation analytic sums a column of one
//! family grouped by a column of another.

pub mod column_family;
pub mod mutation;
pub mod query;
pub mod statistics;
pub mod store;
pub mod types;
pub mod util;

pub use column_family::{ColumnFamily, ColumnFamilyHandle, ColumnFamilySet};
pub use mutation::RowMutation;
pub use query::{
    AggregationAnalytic, AggregationResult, ProjectedRow, Projection, ProjectionMetrics,
    ProjectionQuery, ProjectionResult, UnavailableReason,
};
pub use statistics::Statistics;
pub use store::{ColumnFamilyStore, FamilyRef, StoreOptions};
pub use types::{Fields, Record, Timestamp, Value, fields, now_timestamp};
pub use util::{Code, Result, Status};
