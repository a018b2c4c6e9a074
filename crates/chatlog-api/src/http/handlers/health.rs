//! GET /health - Liveness plus store connectivity (no auth required).

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::state::AppState;

/// Returns 200 when the store answers a ping, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let backend = state.conversation_service.store().name();

    match state.conversation_service.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "store": backend,
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(err) => {
            tracing::warn!(store = backend, error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "store": backend,
                    "error": err.to_string(),
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlog_core::store::box_store::BoxOrderedStore;
    use chatlog_infra::memory::InMemoryOrderedStore;
    use chatlog_infra::sqlite::ordered::SqliteOrderedStore;
    use chatlog_infra::sqlite::pool::{DatabasePool, database_url_for};
    use chatlog_types::config::{ServiceConfig, StoreConfig};

    #[tokio::test]
    async fn test_health_ok_with_memory_store() {
        let store = BoxOrderedStore::new("memory", InMemoryOrderedStore::new());
        let state = AppState::with_store(store, ServiceConfig::default(), std::env::temp_dir());

        let (status, Json(body)) = health_check(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "memory");
    }

    #[tokio::test]
    async fn test_health_reports_closed_store_as_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&database_url_for(tmp.path()), &StoreConfig::default())
            .await
            .unwrap();
        pool.reader.close().await;

        let store = BoxOrderedStore::new("sqlite", SqliteOrderedStore::new(pool));
        let state = AppState::with_store(store, ServiceConfig::default(), tmp.path().to_path_buf());

        let (status, Json(body)) = health_check(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unavailable");
        assert_eq!(body["store"], "sqlite");
    }
}
