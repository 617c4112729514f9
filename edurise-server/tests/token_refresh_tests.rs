//! Integration tests for token refresh, logout and deactivation

mod common;

use crate::common::{create_test_state, decode_claims, response_json};

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use edurise_auth::TokenType;
use edurise_db::UserRepository;
use edurise_server::build_router;
use tower::ServiceExt;
use uuid::Uuid;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Host", "localhost")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Register a user and return (access, refresh)
async fn register(app: &axum::Router, email: &str) -> (String, String) {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            serde_json::json!({"email": email, "password": "pw123456"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = response_json(response).await;
    (
        json["tokens"]["access"].as_str().unwrap().to_string(),
        json["tokens"]["refresh"].as_str().unwrap().to_string(),
    )
}

/// WHAT: A live refresh token yields a fresh access token
#[tokio::test]
async fn given_live_refresh_token_when_refreshed_then_new_access_token() {
    let state = create_test_state().await;
    let app = build_router(state.clone());
    let (_access, refresh) = register(&app, "e@x.com").await;

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/refresh",
            serde_json::json!({"refresh": refresh}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    let claims = decode_claims(json["access"].as_str().unwrap());
    assert_eq!(claims.token_type, TokenType::Access);
    assert_eq!(claims.email, "e@x.com");
}

/// WHAT: A revoked refresh token can never mint a new access token
/// WHY: Logout must actually terminate the session
#[tokio::test]
async fn given_revoked_refresh_token_when_refreshed_then_unauthorized() {
    let state = create_test_state().await;
    let app = build_router(state.clone());
    let (_access, refresh) = register(&app, "e@x.com").await;

    // Given: The refresh token has been revoked via logout
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/logout",
            serde_json::json!({"refresh": refresh.clone()}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"], true);

    // When: Attempting to refresh with that same token
    let response = app
        .oneshot(post_json(
            "/api/v1/auth/refresh",
            serde_json::json!({"refresh": refresh}),
        ))
        .await
        .unwrap();

    // Then: Uniform credential failure, no new token issued
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIAL");
}

/// WHAT: An access token is not accepted by the refresh endpoint
/// WHY: The type discriminator keeps the two credentials apart
#[tokio::test]
async fn given_access_token_when_refreshed_then_unauthorized() {
    let state = create_test_state().await;
    let app = build_router(state.clone());
    let (access, _refresh) = register(&app, "e@x.com").await;

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/refresh",
            serde_json::json!({"refresh": access}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// WHAT: Logging out with garbage reports failure in the body, not an
/// error status
/// WHY: Callers distinguish "already invalid" from "revoked" via the
/// boolean
#[tokio::test]
async fn given_malformed_token_when_logged_out_then_success_false() {
    let state = create_test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/logout",
            serde_json::json!({"refresh": "not-a-token"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"], false);
}

/// WHAT: Logging out twice succeeds both times
/// WHY: Revocation insert is idempotent
#[tokio::test]
async fn given_double_logout_then_both_succeed() {
    let state = create_test_state().await;
    let app = build_router(state.clone());
    let (_access, refresh) = register(&app, "e@x.com").await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/logout",
                serde_json::json!({"refresh": refresh.clone()}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["success"], true);
    }
}

/// WHAT: Deactivating an account invalidates its still-unexpired
/// access token immediately
/// WHY: Account deactivation must not wait for token expiry or
/// revocation bookkeeping
#[tokio::test]
async fn given_deactivated_user_when_using_live_token_then_unauthorized() {
    let state = create_test_state().await;
    let app = build_router(state.clone());
    let (access, _refresh) = register(&app, "e@x.com").await;

    // Given: The account is deactivated after issuance
    let user_id = Uuid::parse_str(&decode_claims(&access).sub).unwrap();
    UserRepository::new(state.pool.clone())
        .set_active(user_id, false)
        .await
        .unwrap();

    // When: Presenting the still-unexpired token
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/auth/me")
        .header("Host", "localhost")
        .header("Authorization", format!("Bearer {access}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // Then: Authentication fails
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// WHAT: Deactivation also blocks the refresh path
#[tokio::test]
async fn given_deactivated_user_when_refreshed_then_unauthorized() {
    let state = create_test_state().await;
    let app = build_router(state.clone());
    let (access, refresh) = register(&app, "e@x.com").await;

    let user_id = Uuid::parse_str(&decode_claims(&access).sub).unwrap();
    UserRepository::new(state.pool.clone())
        .set_active(user_id, false)
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/refresh",
            serde_json::json!({"refresh": refresh}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// WHAT: A password-reset request is acknowledged whether or not the
/// account exists
/// WHY: The response must not reveal which emails are registered
#[tokio::test]
async fn given_any_email_when_requesting_password_reset_then_accepted() {
    let state = create_test_state().await;
    let app = build_router(state.clone());
    register(&app, "e@x.com").await;

    for email in ["e@x.com", "ghost@x.com"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/password-reset",
                serde_json::json!({"email": email}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let json = response_json(response).await;
        assert_eq!(json["success"], true);
    }
}
