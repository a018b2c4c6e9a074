//! Application error type mapping to HTTP status codes and the `{code, msg}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatlog_types::error::{ConversationError, ResponseCode, StoreError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Failure reported by the conversation service.
    Conversation(ConversationError),
}

impl From<ConversationError> for AppError {
    fn from(e: ConversationError) -> Self {
        AppError::Conversation(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Conversation(ConversationError::InvalidArgument(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Conversation(ConversationError::Store(StoreError::Unavailable(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Conversation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ResponseCode {
        match self {
            AppError::Conversation(e) => ResponseCode::from(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let AppError::Conversation(err) = &self;

        if status.is_server_error() {
            tracing::error!(code = code.as_i32(), error = %err, "request failed");
        } else {
            tracing::debug!(code = code.as_i32(), error = %err, "request rejected");
        }

        let body = json!({
            "code": code.as_i32(),
            "msg": err.to_string(),
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_is_bad_request() {
        let err = AppError::from(ConversationError::InvalidArgument("limit".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), ResponseCode::InvalidArgument);
    }

    #[test]
    fn test_unavailable_store_is_service_unavailable() {
        let err = AppError::from(ConversationError::Store(StoreError::Unavailable(
            "refused".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), ResponseCode::StoreUnavailable);
    }

    #[test]
    fn test_other_store_errors_are_internal() {
        let err = AppError::from(ConversationError::Store(StoreError::Deserialization(
            "bad json".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code().as_i32(), 3);
    }

    #[tokio::test]
    async fn test_response_body_carries_code_and_msg() {
        let response =
            AppError::from(ConversationError::InvalidArgument("empty chat".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 1);
        assert_eq!(body["msg"], "invalid argument: empty chat");
    }
}
