//! Postboard API server binary.
//!
//! Bootstraps the schema, then serves the HTTP API until SIGINT/SIGTERM.

use std::time::Duration;

use clap::Parser;
use postboard_api::config::{ApiConfig, DEFAULT_HOST, DEFAULT_PORT};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};

/// CLI arguments. Anything not given falls back to `ApiConfig::from_env`.
#[derive(Parser, Debug)]
#[command(name = "postboard_api_server", about = "Postboard API server")]
struct Args {
    /// Host to listen on.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, env = "DB_MAX_CONNECTIONS")]
    max_connections: Option<u32>,
}

/// Split `host:port`, falling back to the defaults for a missing or
/// unparsable half.
fn split_bind_addr(addr: &str) -> (&str, u16) {
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => (host, port.parse().unwrap_or(DEFAULT_PORT)),
        _ => (DEFAULT_HOST, DEFAULT_PORT),
    }
}

/// Apply CLI overrides on top of the environment configuration.
///
/// `--host` and `--port` each replace only their half of the bind address.
fn apply_overrides(config: &mut ApiConfig, args: Args) {
    if args.host.is_some() || args.port.is_some() {
        let (host, port) = split_bind_addr(&config.bind_addr);
        config.bind_addr = format!(
            "{}:{}",
            args.host.as_deref().unwrap_or(host),
            args.port.unwrap_or(port)
        );
    }
    if let Some(url) = args.database_url {
        config.pg_connection_url = url;
    }
    if let Some(max) = args.max_connections {
        config.max_connections = max;
    }
}

/// Completes on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to register SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,postboard_api=debug,postboard_core=debug,tower_http=info",
                )
            }),
        )
        .init();

    let args = Args::parse();
    let mut config = ApiConfig::from_env();
    apply_overrides(&mut config, args);

    info!(
        bind_addr = %config.bind_addr,
        max_connections = config.max_connections,
        "starting postboard_api_server"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.pg_connection_url)
        .await?;

    // The listener is not bound until the schema exists.
    info!("running database migrations");
    if let Err(e) = postboard_api::migrate(&pool).await {
        error!("schema bootstrap failed: {e}");
        pool.close().await;
        return Err(e.into());
    }

    let state = postboard_api::AppState {
        pool: pool.clone(),
        config: config.clone(),
    };
    let app = postboard_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    info!("closing database pool");
    pool.close().await;

    served?;
    info!("shutdown complete");
    Ok(())
}
