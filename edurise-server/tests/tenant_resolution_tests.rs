//! Integration tests for per-request tenant resolution.
//!
//! Resolution runs on every route; its outcome is observable through
//! the mirrored X-Tenant-* response headers on a plain /health probe.

mod common;

use crate::common::{create_test_state, seed_tenant};

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use edurise_core::Tenant;
use edurise_db::TenantRepository;
use edurise_server::build_router;
use tower::ServiceExt;

fn health_with_host(host: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/health")
        .header("Host", host)
        .body(Body::empty())
        .unwrap()
}

/// WHAT: A tenant host resolves and is mirrored onto response headers
#[tokio::test]
async fn given_tenant_host_when_resolved_then_headers_mirrored() {
    let state = create_test_state().await;
    let tenant = seed_tenant(&state.pool, "acme").await;
    let app = build_router(state);

    let response = app.oneshot(health_with_host("acme.edurise.com")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get("X-Tenant-ID").unwrap().to_str().unwrap(),
        tenant.id.to_string()
    );
    assert_eq!(
        headers.get("X-Tenant-Subdomain").unwrap().to_str().unwrap(),
        "acme"
    );
    assert_eq!(
        headers.get("X-Tenant-Name").unwrap().to_str().unwrap(),
        "acme Academy"
    );
}

/// WHAT: Hosts that cannot carry a tenant label resolve to no tenant
/// WHY: localhost, bare IPs, bare domains and reserved labels must
/// short-circuit without a directory lookup
#[tokio::test]
async fn given_non_tenant_hosts_when_resolved_then_no_tenant() {
    let state = create_test_state().await;
    seed_tenant(&state.pool, "acme").await;
    seed_tenant(&state.pool, "www").await; // reserved even if provisioned
    let app = build_router(state);

    for host in [
        "localhost",
        "localhost:8000",
        "127.0.0.1",
        "127.0.0.1:8000",
        "edurise.com",
        "www.edurise.com",
    ] {
        let response = app.clone().oneshot(health_with_host(host)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers().get("X-Tenant-ID").is_none(),
            "host {host} unexpectedly resolved a tenant"
        );
    }
}

/// WHAT: An unknown subdomain resolves to no tenant, not an error
#[tokio::test]
async fn given_unknown_subdomain_when_resolved_then_no_tenant() {
    let state = create_test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(health_with_host("ghost.edurise.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("X-Tenant-ID").is_none());
}

/// WHAT: A suspended tenant resolves identically to a missing one
#[tokio::test]
async fn given_suspended_tenant_when_resolved_then_no_tenant() {
    let state = create_test_state().await;
    let tenant = seed_tenant(&state.pool, "acme").await;
    TenantRepository::new(state.pool.clone())
        .set_active(tenant.id, false)
        .await
        .unwrap();
    let app = build_router(state);

    let response = app.oneshot(health_with_host("acme.edurise.com")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("X-Tenant-ID").is_none());
}

/// WHAT: The X-Tenant-ID header hint wins over the host
#[tokio::test]
async fn given_tenant_id_header_when_resolved_then_header_wins() {
    let state = create_test_state().await;
    let acme = seed_tenant(&state.pool, "acme").await;
    seed_tenant(&state.pool, "globex").await;
    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("Host", "globex.edurise.com")
        .header("X-Tenant-ID", acme.id.to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("X-Tenant-Subdomain")
            .unwrap()
            .to_str()
            .unwrap(),
        "acme"
    );
}

/// WHAT: An unusable header hint falls through to host resolution
/// WHY: A bad hint must not fail the request
#[tokio::test]
async fn given_bogus_tenant_id_header_when_resolved_then_host_fallback() {
    let state = create_test_state().await;
    seed_tenant(&state.pool, "acme").await;
    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("Host", "acme.edurise.com")
        .header("X-Tenant-ID", "not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("X-Tenant-Subdomain")
            .unwrap()
            .to_str()
            .unwrap(),
        "acme"
    );
}

/// WHAT: Branding headers are mirrored when the tenant carries them
#[tokio::test]
async fn given_branded_tenant_when_resolved_then_color_header_present() {
    let state = create_test_state().await;
    let mut tenant = Tenant::new("Branded Academy", "branded");
    tenant.primary_color = Some("#aa00ff".to_string());
    TenantRepository::new(state.pool.clone())
        .create(&tenant)
        .await
        .unwrap();
    let app = build_router(state);

    let response = app
        .oneshot(health_with_host("branded.edurise.com"))
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("X-Tenant-Primary-Color")
            .unwrap()
            .to_str()
            .unwrap(),
        "#aa00ff"
    );
}

/// WHAT: The public tenant lookup serves branding for active tenants
/// and a 404 otherwise
#[tokio::test]
async fn given_subdomain_lookup_when_queried_then_branding_or_not_found() {
    let state = create_test_state().await;
    let tenant = seed_tenant(&state.pool, "acme").await;
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/tenants/by-subdomain/acme")
                .header("Host", "localhost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::response_json(response).await;
    assert_eq!(json["tenant"]["id"], tenant.id.to_string());
    assert_eq!(json["tenant"]["subdomain"], "acme");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/tenants/by-subdomain/ghost")
                .header("Host", "localhost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
