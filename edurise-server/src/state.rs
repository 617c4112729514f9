use std::sync::Arc;

use edurise_auth::TokenCodec;
use edurise_config::TenancyConfig;
use sqlx::SqlitePool;

/// Shared state handed to every handler and middleware layer.
///
/// The codec is read-only after startup; the pool is the only durable
/// store. No other cross-request mutable state exists.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub codec: Arc<TokenCodec>,
    pub tenancy: Arc<TenancyConfig>,
    pub min_password_length: usize,
}
