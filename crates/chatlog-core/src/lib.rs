//! Conversation log core for Chatlog.
//!
//! This crate defines the ordered store port that the infrastructure layer
//! implements, plus everything built on it: canonical chat keys, the ordered
//! message log, rank-cursor pagination, and the send/pull service. It depends
//! only on `chatlog-types` -- never on `chatlog-infra` or any database crate.

pub mod chat_key;
pub mod log;
pub mod pagination;
pub mod service;
pub mod store;
