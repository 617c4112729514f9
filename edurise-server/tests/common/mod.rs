#![allow(dead_code)]

//! Test infrastructure for edurise-server API tests

use std::sync::Arc;

use edurise_auth::{Claims, TokenCodec, TokenConfig, password};
use edurise_config::TenancyConfig;
use edurise_core::{Membership, MembershipRole, Tenant, User};
use edurise_db::{MembershipRepository, TenantRepository, UserRepository};
use edurise_server::AppState;

use axum::body::Body;
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-32-bytes!!";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    edurise_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn create_test_codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(&TokenConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_ttl_secs: 900,
        refresh_ttl_secs: 3600,
        password_reset_ttl_secs: 300,
        leeway_secs: 0,
    }))
}

/// Create AppState for testing
pub async fn create_test_state() -> AppState {
    AppState {
        pool: create_test_pool().await,
        codec: create_test_codec(),
        tenancy: Arc::new(TenancyConfig::default()),
        min_password_length: 8,
    }
}

/// Insert an active tenant with the given subdomain
pub async fn seed_tenant(pool: &SqlitePool, subdomain: &str) -> Tenant {
    let tenant = Tenant::new(format!("{subdomain} Academy"), subdomain);
    TenantRepository::new(pool.clone())
        .create(&tenant)
        .await
        .expect("Failed to seed tenant");
    tenant
}

/// Insert an active user with a real Argon2id hash for `password`
pub async fn seed_user(pool: &SqlitePool, email: &str, password_plain: &str) -> User {
    let hash = password::hash_password(password_plain).expect("Failed to hash test password");
    let user = User::new(email, hash);
    UserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("Failed to seed user");
    user
}

/// Insert a superuser with a real Argon2id hash for `password`
pub async fn seed_superuser(pool: &SqlitePool, email: &str, password_plain: &str) -> User {
    let hash = password::hash_password(password_plain).expect("Failed to hash test password");
    let mut user = User::new(email, hash);
    user.is_superuser = true;
    UserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("Failed to seed superuser");
    user
}

/// Link a user into a tenant with the given role
pub async fn seed_membership(
    pool: &SqlitePool,
    user: &User,
    tenant: &Tenant,
    role: MembershipRole,
) -> Membership {
    MembershipRepository::new(pool.clone())
        .get_or_create(&Membership::new(user.id, tenant.id, role))
        .await
        .expect("Failed to seed membership")
}

/// Decode a token issued by the test codec
pub fn decode_claims(token: &str) -> Claims {
    create_test_codec()
        .decode(token)
        .expect("Failed to decode test token")
}

/// Collect a response body into JSON
pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
