//! Ordered message log.
//!
//! Stores each message as a JSON member of the conversation's sorted
//! collection, scored by `send_time`. The log is append-only; rank-based
//! cursors handed out by the pagination engine stay valid only because no
//! entry is ever removed or rescored out of place.

use chatlog_types::chat::Message;
use chatlog_types::error::StoreError;

use crate::chat_key::ChatKey;
use crate::store::{OrderedStore, RangeOrder};

/// Per-conversation message log over an [`OrderedStore`].
pub struct MessageLog<S: OrderedStore> {
    store: S,
}

impl<S: OrderedStore> MessageLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append `message` to the conversation at `key`.
    ///
    /// The conversation is created implicitly by its first append.
    pub async fn append(&self, key: &ChatKey, message: &Message) -> Result<(), StoreError> {
        let member = serde_json::to_vec(message)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.store
            .add(key.as_str(), message.send_time, member)
            .await?;

        tracing::debug!(chat_key = %key, send_time = message.send_time, "message appended");
        Ok(())
    }

    /// Read ranks `start..=stop`, oldest-first unless `reverse`.
    ///
    /// An unknown conversation is an empty result. If any stored member fails
    /// to decode, the whole read fails.
    pub async fn range(
        &self,
        key: &ChatKey,
        start: u64,
        stop: u64,
        reverse: bool,
    ) -> Result<Vec<Message>, StoreError> {
        let members = self
            .store
            .range(key.as_str(), start, stop, RangeOrder::from_reverse(reverse))
            .await?;

        members
            .iter()
            .map(|member| {
                serde_json::from_slice::<Message>(member)
                    .map_err(|e| StoreError::Deserialization(e.to_string()))
            })
            .collect()
    }
}
