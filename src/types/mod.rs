//! Cell and row types shared by every column family.
mod record;
mod value;

pub use record::{Fields, Record, Timestamp, fields, now_timestamp};
pub use value::Value;
