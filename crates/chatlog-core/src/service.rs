//! Conversation service (use cases).
//!
//! The two operations the transport layer invokes: `send` appends one message,
//! `pull` reads one page. Arguments are validated here, before anything
//! reaches the log. The service holds no per-conversation state; the store
//! handle is the only thing shared between calls.

use chatlog_types::chat::{Message, Page, PullRequest, SendRequest};
use chatlog_types::config::PullConfig;
use chatlog_types::error::ConversationError;

use crate::chat_key::normalize;
use crate::log::MessageLog;
use crate::pagination::paginate;
use crate::store::OrderedStore;

/// Boundary limits for `pull`.
#[derive(Debug, Clone, Copy)]
pub struct PullPolicy {
    pub max_limit: i32,
}

impl Default for PullPolicy {
    fn default() -> Self {
        Self::from(&PullConfig::default())
    }
}

impl From<&PullConfig> for PullPolicy {
    fn from(config: &PullConfig) -> Self {
        Self {
            max_limit: config.max_limit,
        }
    }
}

/// Send/pull façade over the conversation log.
///
/// Generic over the store port so tests can run against an in-memory store
/// and the binary can pin it to a configured backend.
pub struct ConversationService<S: OrderedStore> {
    log: MessageLog<S>,
    policy: PullPolicy,
}

impl<S: OrderedStore> ConversationService<S> {
    pub fn new(store: S, policy: PullPolicy) -> Self {
        Self {
            log: MessageLog::new(store),
            policy,
        }
    }

    pub fn store(&self) -> &S {
        self.log.store()
    }

    /// Append a message and return it as stored.
    ///
    /// A `send_time` of 0 is replaced with the current epoch time in seconds.
    /// No retry is attempted if the append fails.
    pub async fn send(&self, request: SendRequest) -> Result<Message, ConversationError> {
        if request.send_time < 0 {
            return Err(ConversationError::InvalidArgument(format!(
                "send_time must be non-negative, got {}",
                request.send_time
            )));
        }

        let key = normalize(&request.chat)?;
        let send_time = if request.send_time == 0 {
            chrono::Utc::now().timestamp()
        } else {
            request.send_time
        };

        let message = Message {
            chat_key: key.to_string(),
            sender: request.sender,
            content: request.content,
            send_time,
        };

        self.log.append(&key, &message).await?;

        tracing::info!(chat_key = %key, sender = %message.sender, send_time, "message sent");
        Ok(message)
    }

    /// Read one page of a conversation.
    pub async fn pull(&self, request: PullRequest) -> Result<Page, ConversationError> {
        let (cursor, limit) = self.validate_window(request.cursor, request.limit)?;
        let key = normalize(&request.chat)?;

        let page = paginate(&self.log, &key, cursor, limit, request.reverse).await?;

        tracing::debug!(
            chat_key = %key,
            cursor,
            limit,
            reverse = request.reverse,
            returned = page.messages.len(),
            has_more = page.has_more,
            "page pulled"
        );
        Ok(page)
    }

    /// Check that the backing store is reachable.
    pub async fn health(&self) -> Result<(), ConversationError> {
        self.log.store().ping().await?;
        Ok(())
    }

    fn validate_window(&self, cursor: i64, limit: i32) -> Result<(u64, u32), ConversationError> {
        if cursor < 0 {
            return Err(ConversationError::InvalidArgument(format!(
                "cursor must be non-negative, got {cursor}"
            )));
        }
        if limit < 0 {
            return Err(ConversationError::InvalidArgument(format!(
                "limit must be non-negative, got {limit}"
            )));
        }
        if limit > self.policy.max_limit {
            return Err(ConversationError::InvalidArgument(format!(
                "limit {limit} exceeds maximum of {}",
                self.policy.max_limit
            )));
        }
        if cursor.checked_add(i64::from(limit)).is_none() {
            return Err(ConversationError::InvalidArgument(
                "cursor + limit overflows".to_string(),
            ));
        }

        Ok((cursor as u64, limit as u32))
    }
}
