//! Stampcard server binary.
//!
//! Boots tracing, loads configuration from the environment, opens the record
//! store and serves the HTTP API.

use tracing::info;
use tracing_subscriber::EnvFilter;

use stampcard_db::{Database, DbConfig};
use stampcard_server::config::ServerConfig;
use stampcard_server::qr::QrService;
use stampcard_server::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Defaults to info level for our crates if RUST_LOG is not set.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stampcard_server=info,stampcard_db=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::load()?;
    info!(port = config.port, db = %config.database_path, "Starting stampcard server");

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    let qr = QrService::from_config(&config)?;
    let state = AppState::new(db, qr);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
