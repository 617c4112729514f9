use crate::auth::service::{AuthService, RegisterInput};
use crate::state::AppState;

use std::sync::Arc;

use edurise_auth::{TokenCodec, TokenConfig, TokenType};
use edurise_config::TenancyConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

async fn test_state() -> AppState {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");
    edurise_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    AppState {
        pool,
        codec: Arc::new(TokenCodec::new(&TokenConfig {
            secret: "unit-test-secret-at-least-32-bytes!".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 3600,
            password_reset_ttl_secs: 300,
            leeway_secs: 0,
        })),
        tenancy: Arc::new(TenancyConfig::default()),
        min_password_length: 8,
    }
}

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        email: email.to_string(),
        password: "pw123456".to_string(),
        is_teacher: false,
        timezone: None,
        language: None,
        bio: None,
    }
}

#[tokio::test]
async fn given_registered_user_when_authenticated_then_returned() {
    let state = test_state().await;
    let service = AuthService::new(&state);
    service
        .register(register_input("e@x.com"), None)
        .await
        .unwrap();

    let authenticated = service.authenticate("e@x.com", "pw123456").await.unwrap();
    assert!(authenticated.is_some());

    let rejected = service.authenticate("e@x.com", "wrong-password").await.unwrap();
    assert!(rejected.is_none());
}

#[tokio::test]
async fn given_issued_access_token_when_probed_then_claims_returned() {
    let state = test_state().await;
    let service = AuthService::new(&state);
    let (user, _) = service
        .register(register_input("e@x.com"), None)
        .await
        .unwrap();

    let tokens = service.issue_tokens(&user, None).await.unwrap();
    assert_eq!(tokens.expires_in, 900);

    // The probe swallows decode failures into None
    let claims = service.verify_token(&tokens.access);
    assert!(claims.is_some());
    assert_eq!(claims.unwrap().email, "e@x.com");

    assert!(service.verify_token("not-a-token").is_none());
}

#[tokio::test]
async fn given_password_reset_token_then_single_purpose_and_tenantless() {
    let state = test_state().await;
    let service = AuthService::new(&state);
    let (user, _) = service
        .register(register_input("e@x.com"), None)
        .await
        .unwrap();

    let token = service.issue_password_reset_token(&user).unwrap();
    let claims = state.codec.decode(&token).unwrap();

    assert_eq!(claims.token_type, TokenType::PasswordReset);
    assert!(claims.tenant_id.is_none());

    // A reset token must not authenticate requests or refresh sessions
    assert!(
        state
            .codec
            .decode_expecting(&token, TokenType::Access)
            .is_err()
    );
}

#[tokio::test]
async fn given_revocation_inputs_then_boolean_outcomes() {
    let state = test_state().await;
    let service = AuthService::new(&state);
    let (user, _) = service
        .register(register_input("e@x.com"), None)
        .await
        .unwrap();
    let tokens = service.issue_tokens(&user, None).await.unwrap();

    // Malformed and non-refresh tokens: false, not an error
    assert!(!service.revoke_refresh_token("garbage").await.unwrap());
    assert!(!service.revoke_refresh_token(&tokens.access).await.unwrap());

    // A real refresh token revokes, idempotently
    assert!(service.revoke_refresh_token(&tokens.refresh).await.unwrap());
    assert!(service.revoke_refresh_token(&tokens.refresh).await.unwrap());

    // And can no longer mint access tokens
    let refreshed = service.refresh_access_token(&tokens.refresh).await;
    assert!(refreshed.is_err());
}
