//! In-memory sorted-set store.
//!
//! Implements `OrderedStore` on a `DashMap` of per-key sorted sets. Nothing is
//! persisted; the store lives as long as the process. Used for local runs
//! (`backend = "memory"`) and tests.

use std::collections::{BTreeSet, HashMap};

use chatlog_core::store::{OrderedStore, RangeOrder};
use chatlog_types::error::StoreError;
use dashmap::DashMap;

#[derive(Default)]
struct SortedSet {
    /// Members in rank order: by score, then by member bytes.
    ranked: BTreeSet<(i64, Vec<u8>)>,
    /// Current score of each member, for re-scoring on repeated adds.
    scores: HashMap<Vec<u8>, i64>,
}

impl SortedSet {
    fn insert(&mut self, score: i64, member: Vec<u8>) {
        if let Some(old) = self.scores.insert(member.clone(), score) {
            self.ranked.remove(&(old, member.clone()));
        }
        self.ranked.insert((score, member));
    }

    fn window(&self, start: u64, stop: u64, order: RangeOrder) -> Vec<Vec<u8>> {
        let Ok(skip) = usize::try_from(start) else {
            return Vec::new();
        };
        let take = usize::try_from(stop - start)
            .unwrap_or(usize::MAX)
            .saturating_add(1);

        match order {
            RangeOrder::Asc => self
                .ranked
                .iter()
                .skip(skip)
                .take(take)
                .map(|(_, m)| m.clone())
                .collect(),
            RangeOrder::Desc => self
                .ranked
                .iter()
                .rev()
                .skip(skip)
                .take(take)
                .map(|(_, m)| m.clone())
                .collect(),
        }
    }
}

/// Process-local implementation of `OrderedStore`.
///
/// Concurrent adds to different keys proceed in parallel; adds to the same key
/// are serialized by the map's shard lock.
#[derive(Default)]
pub struct InMemoryOrderedStore {
    sets: DashMap<String, SortedSet>,
}

impl InMemoryOrderedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members stored under `key`.
    pub fn len(&self, key: &str) -> usize {
        self.sets.get(key).map(|s| s.ranked.len()).unwrap_or(0)
    }
}

impl OrderedStore for InMemoryOrderedStore {
    async fn add(&self, key: &str, score: i64, member: Vec<u8>) -> Result<(), StoreError> {
        self.sets
            .entry(key.to_string())
            .or_default()
            .insert(score, member);
        Ok(())
    }

    async fn range(
        &self,
        key: &str,
        start: u64,
        stop: u64,
        order: RangeOrder,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        if start > stop {
            return Ok(Vec::new());
        }
        Ok(self
            .sets
            .get(key)
            .map(|set| set.window(start, stop, order))
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
