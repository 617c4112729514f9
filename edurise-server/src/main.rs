use edurise_server::{AppState, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use edurise_auth::{TokenCodec, TokenConfig};
use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = edurise_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = edurise_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = edurise_db::connect(&database_path).await?;
    info!("Database connection established");

    info!("Running database migrations...");
    edurise_db::run_migrations(&pool).await?;
    info!("Migrations complete");

    // Build the token codec from validated auth config
    let Some(secret) = config.auth.jwt_secret.clone() else {
        unreachable!("validate() ensures auth.jwt_secret is set")
    };
    let codec = TokenCodec::new(&TokenConfig {
        secret,
        access_ttl_secs: config.auth.access_token_ttl_secs,
        refresh_ttl_secs: config.auth.refresh_token_ttl_secs,
        password_reset_ttl_secs: config.auth.password_reset_ttl_secs,
        leeway_secs: config.auth.leeway_secs,
    });
    info!("JWT: HS256 token codec initialized");

    // Build application state
    let app_state = AppState {
        pool,
        codec: Arc::new(codec),
        tenancy: Arc::new(config.tenancy.clone()),
        min_password_length: config.auth.min_password_length,
    };

    // Periodic cleanup of revocation records past their token's expiry
    let purge_pool = app_state.pool.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            let repo = edurise_db::RevokedTokenRepository::new(purge_pool.clone());
            match repo.purge_expired(chrono::Utc::now().timestamp()).await {
                Ok(0) => {}
                Ok(n) => info!("Purged {n} expired revocation records"),
                Err(e) => error!("Revocation purge failed: {e}"),
            }
        }
    });

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
