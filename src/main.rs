// src/main.rs

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use grocery_list::api::create_router;
use grocery_list::config::{GroceryConfig, LogFormat, LoggingConfig};
use grocery_list::db::{create_pool, run_migrations};
use grocery_list::state::AppState;

#[derive(Parser)]
#[command(name = "grocery-list", version, about = "GraphQL backend for a shared grocery list")]
struct Cli {
    /// Override GROCERY_HOST
    #[arg(long)]
    host: Option<String>,

    /// Override GROCERY_PORT
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the GraphQL server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
}

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received, draining connections...");
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = GroceryConfig::from_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);

    info!("Starting grocery list backend");

    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;

    if matches!(cli.command, Some(Command::Migrate)) {
        info!("Migrations applied, exiting");
        return Ok(());
    }

    let bind_address = config.bind_address();
    let app_state = AppState::new(pool.clone(), config);
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Server ready at http://{}/graphql", bind_address);
    info!("Health endpoints: /health, /live");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Shutdown complete");

    Ok(())
}
