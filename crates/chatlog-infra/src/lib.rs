//! Infrastructure layer for Chatlog.
//!
//! Contains implementations of the `OrderedStore` port defined in
//! `chatlog-core` (SQLite and in-memory), backend selection, and
//! configuration loading.

pub mod config;
pub mod memory;
pub mod sqlite;
pub mod store_factory;
