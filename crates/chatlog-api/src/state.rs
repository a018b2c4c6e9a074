//! Application state wiring the conversation service to its store.
//!
//! AppState holds the concrete service instance used by both CLI commands and
//! HTTP handlers. The service is generic over the store port; AppState pins it
//! to the type-erased store so the backend can come from configuration.

use std::path::PathBuf;
use std::sync::Arc;

use chatlog_core::service::{ConversationService, PullPolicy};
use chatlog_core::store::box_store::BoxOrderedStore;
use chatlog_infra::store_factory::OrderedStoreFactory;
use chatlog_types::config::ServiceConfig;

/// Conversation service pinned to the runtime-selected store.
pub type ConcreteConversationService = ConversationService<BoxOrderedStore>;

/// Shared application state.
///
/// Cloning is cheap: the service and config sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub conversation_service: Arc<ConcreteConversationService>,
    pub config: Arc<ServiceConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Connect to the configured store and wire the service.
    ///
    /// Fails (rather than aborting) when the store cannot be reached.
    pub async fn init(config: ServiceConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        let store = OrderedStoreFactory::connect(&config.store, &data_dir)
            .await
            .map_err(|e| anyhow::anyhow!("failed to open {} store: {e}", config.store.backend))?;

        Ok(Self::with_store(store, config, data_dir))
    }

    /// Wire the service around an already-opened store.
    pub fn with_store(store: BoxOrderedStore, config: ServiceConfig, data_dir: PathBuf) -> Self {
        let service = ConversationService::new(store, PullPolicy::from(&config.pull));
        Self {
            conversation_service: Arc::new(service),
            config: Arc::new(config),
            data_dir,
        }
    }
}
