mod cli;
mod server;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;

use blockrelay_core::rpc::{BlockchainRpc, HttpRpcClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let client = HttpRpcClient::with_timeout(
        args.rpc_url.as_deref(),
        Duration::from_secs(args.rpc_timeout_secs),
    )
    .context("configure RPC client")?;
    let endpoint = client.endpoint().to_owned();
    let rpc: Arc<dyn BlockchainRpc> = Arc::new(client);

    // Probe the node once so a bad endpoint shows up in the logs at startup.
    // The server still starts: the node may simply not be up yet.
    match rpc.get_block_number().await {
        Ok(latest) => tracing::info!(%endpoint, latest_block = latest, "connected to node"),
        Err(err) => tracing::warn!(
            "{}",
            format_rpc_connect_error(&endpoint, &error_chain(&err))
        ),
    }

    let router = server::build_router(server::AppState { rpc });

    let bind_addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("bind TCP listener")?;

    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("run HTTP server")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

/// Render an error with every source not already part of its message.
/// reqwest keeps the useful detail (DNS, TLS, timeout) in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

fn format_rpc_connect_error(endpoint: &str, source_error: &str) -> String {
    let mut lines = vec![
        format!("could not reach RPC endpoint `{endpoint}`"),
        format!("RPC error: {source_error}"),
    ];

    if source_error.contains("dns error") || source_error.contains("failed to lookup address") {
        lines.push(
            "hint: hostname resolution failed; verify the endpoint hostname and your DNS/network"
                .into(),
        );
    } else if source_error.contains("certificate") || source_error.contains("tls") {
        lines.push(
            "hint: TLS handshake failed; verify certificate trust and that the endpoint uses HTTPS"
                .into(),
        );
    } else if source_error.contains("returned HTTP 401")
        || source_error.contains("returned HTTP 403")
    {
        lines.push("hint: the node rejected the request; check the API key in RPC_URL".into());
    } else if source_error.contains("returned HTTP 404") {
        lines.push("hint: endpoint path is invalid; verify the full RPC URL".into());
    } else if source_error.contains("timed out") {
        lines.push(
            "hint: the node did not answer in time; raise --rpc-timeout-secs or check node load"
                .into(),
        );
    }

    lines.join("\n")
}
