//! Chatlog CLI and HTTP API entry point.
//!
//! Binary name: `chatlog`
//!
//! Parses CLI arguments, loads configuration, opens the configured store,
//! then dispatches to a command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;

use chatlog_infra::config::{load_service_config, resolve_data_dir};
use chatlog_observe::tracing_setup::{init_tracing, shutdown_tracing};
use chatlog_types::chat::SendRequest;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir();
    let loaded = load_service_config(cli.config.as_deref(), &data_dir).await;

    init_tracing(
        cli::default_filter(cli.verbose, cli.quiet),
        loaded.config.observability.otel,
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Config is read before the subscriber exists; report its problems now.
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }

    let result = run(cli, loaded.config, data_dir).await;

    shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    config: chatlog_types::config::ServiceConfig,
    data_dir: std::path::PathBuf,
) -> anyhow::Result<()> {
    let state = AppState::init(config, data_dir).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            serve(state, &host, port, cli.quiet).await?;
        }

        Commands::Send {
            chat,
            sender,
            content,
            send_time,
        } => {
            let request = SendRequest {
                chat,
                sender,
                content,
                send_time,
            };
            cli::conversation::send_message(&state, request, cli.json, cli.quiet).await?;
        }

        Commands::Pull {
            chat,
            cursor,
            limit,
            reverse,
        } => {
            cli::conversation::pull_messages(&state, chat, cursor, limit, reverse, cli.json)
                .await?;
        }

        Commands::Check => {
            cli::conversation::check(&state, cli.json).await?;
        }
    }

    Ok(())
}

async fn serve(state: AppState, host: &str, port: u16, quiet: bool) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let backend = state.conversation_service.store().name();
    tracing::info!(%addr, store = backend, "chatlog api listening");
    if !quiet {
        println!(
            "  {} Chatlog API listening on {} ({} store)",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan(),
            backend
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
