//! CLI send, pull and check commands.
//!
//! These run against the configured store in-process; no server is needed.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use chatlog_types::chat::{Message, PullRequest, PullResponse, SendRequest};

use crate::state::AppState;

/// Append one message and print what was stored.
pub async fn send_message(
    state: &AppState,
    request: SendRequest,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let message = state
        .conversation_service
        .send(request)
        .await
        .context("send failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else if !quiet {
        println!(
            "  {} Sent to {} at {}",
            style("✓").green().bold(),
            style(&message.chat_key).cyan(),
            style(format_time(message.send_time)).dim()
        );
    }

    Ok(())
}

/// Read one page and print it as a table (or JSON).
pub async fn pull_messages(
    state: &AppState,
    chat: String,
    cursor: i64,
    limit: Option<i32>,
    reverse: bool,
    json: bool,
) -> Result<()> {
    let request = PullRequest {
        chat,
        cursor,
        limit: limit.unwrap_or(state.config.pull.default_limit),
        reverse,
    };
    let page = state
        .conversation_service
        .pull(request)
        .await
        .context("pull failed")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&PullResponse::success(page))?
        );
        return Ok(());
    }

    if page.messages.is_empty() {
        println!();
        println!("  {}", style("No messages.").dim());
        println!();
        return Ok(());
    }

    println!("{}", message_table(&page.messages));
    if page.has_more {
        println!(
            "  {} more available: {}",
            style("…").dim(),
            style(format!("--cursor {}", page.next_cursor)).cyan()
        );
    }

    Ok(())
}

/// Ping the configured store and report the result.
///
/// Returns an error when the store is unreachable so the process exits non-zero.
pub async fn check(state: &AppState, json: bool) -> Result<()> {
    let backend = state.conversation_service.store().name();
    let result = state.conversation_service.health().await;

    if json {
        let check = serde_json::json!({
            "store": backend,
            "data_dir": state.data_dir.display().to_string(),
            "healthy": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else {
        println!();
        match &result {
            Ok(()) => println!(
                "  {} {} store reachable",
                style("✓").green(),
                style(backend).cyan()
            ),
            Err(e) => println!(
                "  {} {} store unreachable: {e}",
                style("✗").red(),
                style(backend).cyan()
            ),
        }
        println!(
            "  {} {}",
            style("Data dir:").dim(),
            state.data_dir.display()
        );
        println!();
    }

    result.context("store health check failed")
}

fn message_table(messages: &[Message]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Time").fg(Color::White),
        Cell::new("Sender").fg(Color::White),
        Cell::new("Content").fg(Color::White),
    ]);

    for message in messages {
        table.add_row(vec![
            Cell::new(format_time(message.send_time)).fg(Color::DarkGrey),
            Cell::new(&message.sender).fg(Color::Cyan),
            Cell::new(&message.content),
        ]);
    }

    table
}

/// Render epoch seconds as UTC, falling back to the raw number.
fn format_time(send_time: i64) -> String {
    DateTime::<Utc>::from_timestamp(send_time, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| send_time.to_string())
}
