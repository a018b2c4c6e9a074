//! Test doubles for the ordered store port.

use std::collections::HashMap;
use std::sync::Mutex;

use chatlog_types::error::StoreError;

use super::{OrderedStore, RangeOrder};

/// Minimal sorted-set store: `(score, member)` pairs kept sorted per key.
#[derive(Default)]
pub(crate) struct MemoryStore {
    sets: Mutex<HashMap<String, Vec<(i64, Vec<u8>)>>>,
}

impl MemoryStore {
    /// Insert a raw member, bypassing any encoding done by callers.
    pub(crate) fn insert_raw(&self, key: &str, score: i64, member: &[u8]) {
        let mut sets = self.sets.lock().unwrap();
        let set = sets.entry(key.to_string()).or_default();
        set.retain(|(_, m)| m != member);
        set.push((score, member.to_vec()));
        set.sort();
    }
}

impl OrderedStore for MemoryStore {
    async fn add(&self, key: &str, score: i64, member: Vec<u8>) -> Result<(), StoreError> {
        self.insert_raw(key, score, &member);
        Ok(())
    }

    async fn range(
        &self,
        key: &str,
        start: u64,
        stop: u64,
        order: RangeOrder,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        let sets = self.sets.lock().unwrap();
        let Some(set) = sets.get(key) else {
            return Ok(Vec::new());
        };
        if start > stop {
            return Ok(Vec::new());
        }
        let take = (stop - start).saturating_add(1) as usize;
        let members: Vec<Vec<u8>> = match order {
            RangeOrder::Asc => set
                .iter()
                .skip(start as usize)
                .take(take)
                .map(|(_, m)| m.clone())
                .collect(),
            RangeOrder::Desc => set
                .iter()
                .rev()
                .skip(start as usize)
                .take(take)
                .map(|(_, m)| m.clone())
                .collect(),
        };
        Ok(members)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store whose every call fails as if the backend were down.
pub(crate) struct DownStore;

impl OrderedStore for DownStore {
    async fn add(&self, _key: &str, _score: i64, _member: Vec<u8>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn range(
        &self,
        _key: &str,
        _start: u64,
        _stop: u64,
        _order: RangeOrder,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
