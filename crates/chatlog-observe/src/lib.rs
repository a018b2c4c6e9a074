//! Observability setup for Chatlog: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
