//! Read-only queries over a `ColumnFamilyStore`.
//!
//! - [`ProjectionQuery`]: column-pruned scan of one family
//! - [`AggregationAnalytic`]: group-by-and-sum joining two families on the key
mod aggregation;
mod projection;

pub use aggregation::{AggregationAnalytic, AggregationResult, UnavailableReason};
pub use projection::{ProjectedRow, Projection, ProjectionMetrics, ProjectionQuery, ProjectionResult};
