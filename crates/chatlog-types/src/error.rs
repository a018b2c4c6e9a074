use thiserror::Error;

/// Errors from the ordered store and the message log built on it
/// (used by trait definitions in chatlog-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("store operation failed: {0}")]
    Operation(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the conversation service to its callers.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stable numeric codes carried in the `code` field of responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ResponseCode {
    Success = 0,
    InvalidArgument = 1,
    Serialization = 2,
    Deserialization = 3,
    StoreOperation = 4,
    StoreUnavailable = 5,
}

impl ResponseCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<&ConversationError> for ResponseCode {
    fn from(err: &ConversationError) -> Self {
        match err {
            ConversationError::InvalidArgument(_) => ResponseCode::InvalidArgument,
            ConversationError::Store(StoreError::Serialization(_)) => ResponseCode::Serialization,
            ConversationError::Store(StoreError::Deserialization(_)) => {
                ResponseCode::Deserialization
            }
            ConversationError::Store(StoreError::Operation(_)) => ResponseCode::StoreOperation,
            ConversationError::Store(StoreError::Unavailable(_)) => ResponseCode::StoreUnavailable,
        }
    }
}
