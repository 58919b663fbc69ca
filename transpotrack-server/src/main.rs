use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use transpotrack_core::{init_tracing, shutdown_signal, validate_section, AppConfig};
use transpotrack_data::{
    DataAccess, DatabaseConfig, MySqlCredentialVerifier, MySqlDataAccess, PoolManager,
};
use transpotrack_server::{build_router, AppState, ServerConfig};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "TranspoTrack stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BoxError> {
    let config = AppConfig::load("dev")?;
    validate_section::<DatabaseConfig>(&config)?;
    validate_section::<ServerConfig>(&config)?;
    let database: DatabaseConfig = config.section()?;
    let server: ServerConfig = config.section()?;
    info!(profile = config.profile(), ?database, "configuration loaded");

    let pool = Arc::new(PoolManager::new(database.clone()));
    pool.initialize().await?;

    let db = Arc::new(MySqlDataAccess::new(pool.clone()));
    let schema = db.ping().await?;
    info!(database = %schema, "database connection confirmed");

    let state = AppState::new(db, Arc::new(MySqlCredentialVerifier::new(database)));
    let app = build_router(state, server.request_timeout);

    let listener = tokio::net::TcpListener::bind(server.addr()).await?;
    info!(addr = %server.addr(), "TranspoTrack listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("connection pool closed");
    Ok(())
}
