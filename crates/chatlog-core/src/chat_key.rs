//! Canonical conversation keys.
//!
//! A raw chat id is a delimiter-separated list of participants in whatever
//! order the caller listed them. Sorting the participants gives one stable key
//! per conversation, so `"bob:alice"` and `"alice:bob"` address the same log.

use std::fmt;

use chatlog_types::chat::PARTICIPANT_DELIMITER;
use chatlog_types::error::ConversationError;

/// Canonical, order-independent conversation key.
///
/// Only constructed through [`normalize`], so every `ChatKey` is already in
/// canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatKey(String);

impl ChatKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Participant identifiers in canonical (sorted) order.
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.0.split(PARTICIPANT_DELIMITER)
    }
}

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn a raw chat id into its canonical key.
///
/// Participants are sorted lexicographically and rejoined with the same
/// delimiter. Duplicate participants are kept as given. An empty id or an
/// empty participant (`"alice:"`, `"a::b"`) is rejected.
pub fn normalize(raw: &str) -> Result<ChatKey, ConversationError> {
    if raw.is_empty() {
        return Err(ConversationError::InvalidArgument(
            "chat id must name at least one participant".to_string(),
        ));
    }

    let mut participants: Vec<&str> = raw.split(PARTICIPANT_DELIMITER).collect();
    if participants.iter().any(|p| p.is_empty()) {
        return Err(ConversationError::InvalidArgument(format!(
            "chat id '{raw}' contains an empty participant"
        )));
    }

    participants.sort_unstable();

    let mut key = String::with_capacity(raw.len());
    for (i, participant) in participants.iter().enumerate() {
        if i > 0 {
            key.push(PARTICIPANT_DELIMITER);
        }
        key.push_str(participant);
    }

    Ok(ChatKey(key))
}
