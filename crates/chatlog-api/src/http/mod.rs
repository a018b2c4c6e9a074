//! HTTP transport for Chatlog.
//!
//! Axum-based API at `/api/v1/` exposing `send` and `pull`, plus an
//! unauthenticated `/health` probe. Responses carry `{code, msg, ...}`.

pub mod error;
pub mod handlers;
pub mod router;
