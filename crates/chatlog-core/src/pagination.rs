//! Stateless rank-cursor pagination.
//!
//! A page is read as `limit + 1` ranks starting at `cursor`: the extra entry
//! only signals that more exist and is dropped from the page. The next cursor
//! is always `cursor + limit`, whether or not the page was full.

use chatlog_types::chat::Page;
use chatlog_types::error::StoreError;

use crate::chat_key::ChatKey;
use crate::log::MessageLog;
use crate::store::OrderedStore;

/// Read one page of the conversation at `key`.
///
/// `limit = 0` is an existence probe: the page is always empty and
/// `has_more` reports whether any entry sits at `cursor`.
pub async fn paginate<S: OrderedStore>(
    log: &MessageLog<S>,
    key: &ChatKey,
    cursor: u64,
    limit: u32,
    reverse: bool,
) -> Result<Page, StoreError> {
    let stop = cursor.saturating_add(u64::from(limit));
    let mut messages = log.range(key, cursor, stop, reverse).await?;

    let has_more = messages.len() == limit as usize + 1;
    if has_more {
        messages.pop();
    }

    Ok(Page {
        messages,
        has_more,
        next_cursor: i64::try_from(stop).unwrap_or(i64::MAX),
    })
}
