//! SQLite storage layer.
//!
//! Sorted-set store backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod ordered;
pub mod pool;
