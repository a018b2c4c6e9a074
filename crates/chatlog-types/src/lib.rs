//! Shared domain types for Chatlog.
//!
//! This crate contains the core domain types used across the Chatlog service:
//! chat messages, send/pull request and response shapes, configuration, and
//! the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
