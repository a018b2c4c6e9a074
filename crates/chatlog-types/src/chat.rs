//! Conversation message types for Chatlog.
//!
//! A `Message` is the immutable unit stored in a conversation's ordered log.
//! The request/response types mirror the two operations the service exposes:
//! `send` (append one message) and `pull` (read one page).

use serde::{Deserialize, Serialize};

/// Separator between participant identifiers in a raw chat id (`"alice:bob"`).
pub const PARTICIPANT_DELIMITER: char = ':';

/// Message text carried by every successful response.
pub const SUCCESS_MSG: &str = "success";

/// A single chat message.
///
/// Messages are ordered within a conversation by `send_time` (epoch seconds).
/// `chat_key` always holds the canonical conversation key, never the raw id
/// the caller submitted. Serialized as `{chat, sender, content, send_time}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "chat")]
    pub chat_key: String,
    pub sender: String,
    pub content: String,
    pub send_time: i64,
}

/// Request to append a message to a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest {
    /// Raw chat id: delimiter-separated participants in any order.
    pub chat: String,
    pub sender: String,
    pub content: String,
    /// Epoch seconds. `0` (the default) means "stamp with the current time".
    #[serde(default)]
    pub send_time: i64,
}

/// Request for one page of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Raw chat id: delimiter-separated participants in any order.
    pub chat: String,
    /// Rank to start reading from (zero-based).
    #[serde(default)]
    pub cursor: i64,
    /// Maximum number of messages in the page.
    pub limit: i32,
    /// Read newest-first instead of oldest-first.
    #[serde(default)]
    pub reverse: bool,
}

/// One page of a conversation, as produced by the pagination engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub messages: Vec<Message>,
    /// True iff more entries exist past this page.
    pub has_more: bool,
    /// The rank to request next (`cursor + limit`), regardless of page size.
    pub next_cursor: i64,
}

/// Acknowledgement for a `send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    pub code: i32,
    pub msg: String,
}

impl SendResponse {
    pub fn success() -> Self {
        Self {
            code: 0,
            msg: SUCCESS_MSG.to_string(),
        }
    }
}

/// Response for a `pull`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullResponse {
    pub code: i32,
    pub msg: String,
    pub messages: Vec<Message>,
    pub has_more: bool,
    pub next_cursor: i64,
}

impl PullResponse {
    pub fn success(page: Page) -> Self {
        Self {
            code: 0,
            msg: SUCCESS_MSG.to_string(),
            messages: page.messages,
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        }
    }
}
