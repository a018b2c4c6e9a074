//! BoxOrderedStore -- object-safe dynamic dispatch wrapper for OrderedStore.
//!
//! Same blanket-impl pattern as the other type-erased ports:
//! 1. Define an object-safe `OrderedStoreDyn` trait with boxed futures
//! 2. Blanket-impl `OrderedStoreDyn` for all `T: OrderedStore`
//! 3. `BoxOrderedStore` wraps `Box<dyn OrderedStoreDyn>` and implements `OrderedStore`

use std::future::Future;
use std::pin::Pin;

use chatlog_types::error::StoreError;

use super::{OrderedStore, RangeOrder};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`OrderedStore`] with boxed futures.
pub trait OrderedStoreDyn: Send + Sync {
    fn add_boxed<'a>(
        &'a self,
        key: &'a str,
        score: i64,
        member: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), StoreError>>;

    fn range_boxed<'a>(
        &'a self,
        key: &'a str,
        start: u64,
        stop: u64,
        order: RangeOrder,
    ) -> BoxFuture<'a, Result<Vec<Vec<u8>>, StoreError>>;

    fn ping_boxed(&self) -> BoxFuture<'_, Result<(), StoreError>>;
}

impl<T: OrderedStore> OrderedStoreDyn for T {
    fn add_boxed<'a>(
        &'a self,
        key: &'a str,
        score: i64,
        member: Vec<u8>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.add(key, score, member))
    }

    fn range_boxed<'a>(
        &'a self,
        key: &'a str,
        start: u64,
        stop: u64,
        order: RangeOrder,
    ) -> BoxFuture<'a, Result<Vec<Vec<u8>>, StoreError>> {
        Box::pin(self.range(key, start, stop, order))
    }

    fn ping_boxed(&self) -> BoxFuture<'_, Result<(), StoreError>> {
        Box::pin(self.ping())
    }
}

/// Type-erased ordered store for runtime backend selection.
///
/// Since `OrderedStore` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxOrderedStore` implements `OrderedStore` itself by delegating
/// to the inner trait object, so services can be pinned to one concrete type
/// while the backend is picked from configuration.
pub struct BoxOrderedStore {
    name: &'static str,
    inner: Box<dyn OrderedStoreDyn>,
}

impl BoxOrderedStore {
    /// Wrap a concrete `OrderedStore` under a human-readable backend name.
    pub fn new<T: OrderedStore + 'static>(name: &'static str, store: T) -> Self {
        Self {
            name,
            inner: Box::new(store),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl OrderedStore for BoxOrderedStore {
    async fn add(&self, key: &str, score: i64, member: Vec<u8>) -> Result<(), StoreError> {
        self.inner.add_boxed(key, score, member).await
    }

    async fn range(
        &self,
        key: &str,
        start: u64,
        stop: u64,
        order: RangeOrder,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        self.inner.range_boxed(key, start, stop, order).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping_boxed().await
    }
}
