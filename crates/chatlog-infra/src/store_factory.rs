//! Backend selection for the ordered store.

use std::path::Path;

use chatlog_core::store::OrderedStore;
use chatlog_core::store::box_store::BoxOrderedStore;
use chatlog_types::config::{StoreBackend, StoreConfig};
use chatlog_types::error::StoreError;

use crate::memory::InMemoryOrderedStore;
use crate::sqlite::ordered::SqliteOrderedStore;
use crate::sqlite::pool::{DatabasePool, database_url_for};

pub struct OrderedStoreFactory;

impl OrderedStoreFactory {
    /// Open the configured backend and verify it answers a ping.
    ///
    /// Returns an error instead of panicking when the store cannot be opened,
    /// so the caller decides how to report startup failure.
    pub async fn connect(
        config: &StoreConfig,
        data_dir: &Path,
    ) -> Result<BoxOrderedStore, StoreError> {
        let store = match config.backend {
            StoreBackend::Sqlite => {
                let url = match &config.database_url {
                    Some(url) => url.clone(),
                    None => {
                        tokio::fs::create_dir_all(data_dir).await.map_err(|e| {
                            StoreError::Unavailable(format!(
                                "cannot create data dir {}: {e}",
                                data_dir.display()
                            ))
                        })?;
                        database_url_for(data_dir)
                    }
                };
                let pool = DatabasePool::new(&url, config)
                    .await
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                BoxOrderedStore::new("sqlite", SqliteOrderedStore::new(pool))
            }
            StoreBackend::Memory => BoxOrderedStore::new("memory", InMemoryOrderedStore::new()),
        };

        store.ping().await?;
        tracing::info!(backend = store.name(), "ordered store connected");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlog_core::store::RangeOrder;

    #[tokio::test]
    async fn test_connect_memory_backend() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            ..StoreConfig::default()
        };

        let store = OrderedStoreFactory::connect(&config, tmp.path()).await.unwrap();
        assert_eq!(store.name(), "memory");
    }

    #[tokio::test]
    async fn test_connect_sqlite_creates_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().join("nested").join("data");

        let store = OrderedStoreFactory::connect(&StoreConfig::default(), &data_dir)
            .await
            .unwrap();
        assert_eq!(store.name(), "sqlite");
        assert!(data_dir.join("chatlog.db").exists());

        store.add("a:b", 1, b"m".to_vec()).await.unwrap();
        let members = store.range("a:b", 0, 0, RangeOrder::Asc).await.unwrap();
        assert_eq!(members, vec![b"m".to_vec()]);
    }

    #[tokio::test]
    async fn test_connect_unreachable_sqlite_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            database_url: Some("sqlite:///nonexistent-dir/for/sure/chatlog.db".to_string()),
            ..StoreConfig::default()
        };

        let result = OrderedStoreFactory::connect(&config, tmp.path()).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
