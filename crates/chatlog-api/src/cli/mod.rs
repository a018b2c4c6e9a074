//! CLI command definitions for the `chatlog` binary.
//!
//! Uses clap derive macros for argument parsing. `send`, `pull` and `check`
//! talk to the configured store directly; `serve` runs the HTTP service.

pub mod conversation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Store and page through conversations.
#[derive(Parser)]
#[command(name = "chatlog", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file to load instead of `{data_dir}/config.toml`.
    #[arg(long, global = true, env = "CHATLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Address to bind (defaults to `server.host` from config).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to `server.port` from config).
        #[arg(long)]
        port: Option<u16>,
    },

    /// Append a message to a conversation.
    Send {
        /// Chat id: participants separated by ':' in any order.
        chat: String,

        /// Who sent the message.
        sender: String,

        /// Message text.
        content: String,

        /// Epoch seconds; 0 stamps the current time.
        #[arg(long, default_value_t = 0)]
        send_time: i64,
    },

    /// Read one page of a conversation.
    Pull {
        /// Chat id: participants separated by ':' in any order.
        chat: String,

        /// Rank to start reading from.
        #[arg(long, default_value_t = 0)]
        cursor: i64,

        /// Page size (defaults to `pull.default_limit` from config).
        #[arg(long)]
        limit: Option<i32>,

        /// Newest messages first.
        #[arg(long)]
        reverse: bool,
    },

    /// Check that the configured store is reachable.
    Check,
}

/// Default tracing filter for the given verbosity flags.
pub fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,chatlog=debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_about_covers_group_conversations() {
        let about = Cli::command().get_about().map(|a| a.to_string()).unwrap_or_default();
        assert!(about.starts_with("Store and page through conversations"));
    }

    #[test]
    fn test_parse_pull_with_flags() {
        let cli = Cli::parse_from([
            "chatlog", "--json", "pull", "bob:alice", "--cursor", "4", "--limit", "2", "--reverse",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Pull {
                chat,
                cursor,
                limit,
                reverse,
            } => {
                assert_eq!(chat, "bob:alice");
                assert_eq!(cursor, 4);
                assert_eq!(limit, Some(2));
                assert!(reverse);
            }
            _ => panic!("expected pull"),
        }
    }

    #[test]
    fn test_parse_send_defaults_send_time() {
        let cli = Cli::parse_from(["chatlog", "send", "a:b", "a", "hello there"]);
        match cli.command {
            Commands::Send {
                content, send_time, ..
            } => {
                assert_eq!(content, "hello there");
                assert_eq!(send_time, 0);
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_default_filter_by_verbosity() {
        assert_eq!(default_filter(0, true), "error");
        assert_eq!(default_filter(0, false), "warn");
        assert_eq!(default_filter(1, false), "info,chatlog=debug");
        assert_eq!(default_filter(3, false), "trace");
    }
}
