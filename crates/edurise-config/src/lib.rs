mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;
mod tenancy_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use tenancy_config::TenancyConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_DATABASE_FILENAME: &str = "edurise.db";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 900;
const DEFAULT_REFRESH_TOKEN_TTL_SECS: u64 = 604_800;
const DEFAULT_PASSWORD_RESET_TTL_SECS: u64 = 900;
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;
const MIN_JWT_SECRET_CHARS: usize = 32;

/// Subdomain labels that never resolve to a tenant
const DEFAULT_RESERVED_SUBDOMAINS: &[&str] =
    &["www", "api", "admin", "mail", "ftp", "cdn", "static"];

#[cfg(test)]
mod tests;
