//! Ordered store port.
//!
//! The conversation log sits on a generic sorted-collection store: members are
//! opaque byte strings, each kept under a key with an integer score, and read
//! back by rank window. The infrastructure layer (chatlog-infra) implements
//! this trait for SQLite and for an in-memory map.

pub mod box_store;

#[cfg(test)]
pub(crate) mod testing;

use chatlog_types::error::StoreError;

/// Direction of a rank window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOrder {
    /// Rank 0 is the lowest score.
    Asc,
    /// Rank 0 is the highest score.
    Desc,
}

impl RangeOrder {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse { RangeOrder::Desc } else { RangeOrder::Asc }
    }
}

/// Sorted-collection store keyed by string.
///
/// Ordering within a key is by score, then by member bytes. A member is unique
/// per key: adding a byte-identical member again only updates its score.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait OrderedStore: Send + Sync {
    /// Insert `member` under `key` with `score`, creating the collection on
    /// first use.
    fn add(
        &self,
        key: &str,
        score: i64,
        member: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Return the members at ranks `start..=stop` in `order`.
    ///
    /// Ranks past the end are clamped. An unknown key or `start > stop`
    /// yields an empty list.
    fn range(
        &self,
        key: &str,
        start: u64,
        stop: u64,
        order: RangeOrder,
    ) -> impl std::future::Future<Output = Result<Vec<Vec<u8>>, StoreError>> + Send;

    /// Check that the store is reachable.
    fn ping(&self) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
