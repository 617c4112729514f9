//! Auth endpoint handlers: register, login, refresh, logout,
//! password-reset request and the current-session view.

use crate::api::auth::login_request::LoginRequest;
use crate::api::auth::logout_request::LogoutRequest;
use crate::api::auth::logout_response::LogoutResponse;
use crate::api::auth::me_response::MeResponse;
use crate::api::auth::password_reset_request::PasswordResetRequest;
use crate::api::auth::password_reset_response::PasswordResetResponse;
use crate::api::auth::refresh_request::RefreshRequest;
use crate::api::auth::refresh_response::RefreshResponse;
use crate::api::auth::register_request::RegisterRequest;
use crate::api::auth::session_response::SessionResponse;
use crate::api::auth::user_dto::UserDto;
use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::extractors::current_user::CurrentUser;
use crate::api::tenants::tenant_dto::TenantDto;
use crate::auth::service::AuthService;
use crate::state::AppState;
use crate::tenancy::resolver::ResolvedTenant;

use std::panic::Location;

use axum::{Extension, Json, extract::State, http::StatusCode};
use edurise_db::UserRepository;
use error_location::ErrorLocation;

/// POST /api/v1/auth/register
///
/// Create an account. When the request resolved a tenant (host or
/// header), the account is enrolled there in the same transaction and
/// the issued tokens are scoped to it.
pub async fn register(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let service = AuthService::new(&state);
    let tenant = resolved.0;

    let (user, _membership) = service.register(request.into(), tenant.as_ref()).await?;
    let tokens = service.issue_tokens(&user, tenant.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::new(&user, tenant.as_ref(), tokens)),
    ))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and issue a token pair scoped to the request's
/// resolved tenant, if any.
pub async fn login(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedTenant>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let service = AuthService::new(&state);
    let tenant = resolved.0;

    let user = service
        .authenticate(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::InvalidCredential {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let tokens = service.issue_tokens(&user, tenant.as_ref()).await?;

    Ok(Json(SessionResponse::new(&user, tenant.as_ref(), tokens)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a new access token. Revoked,
/// expired or otherwise invalid refresh tokens are a 401.
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let access = AuthService::new(&state)
        .refresh_access_token(&request.refresh)
        .await?;

    Ok(Json(RefreshResponse { access }))
}

/// POST /api/v1/auth/logout
///
/// Blacklist the supplied refresh token. Invalid input is reported in
/// the body, never as an error status.
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<LogoutRequest>,
) -> ApiResult<Json<LogoutResponse>> {
    let success = AuthService::new(&state)
        .revoke_refresh_token(&request.refresh)
        .await?;

    Ok(Json(LogoutResponse { success }))
}

/// POST /api/v1/auth/password-reset
///
/// Issue a password-reset token when the account exists. Always
/// acknowledged with 202 so the response does not reveal whether the
/// email is registered; delivery belongs to the notification
/// collaborator.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> ApiResult<(StatusCode, Json<PasswordResetResponse>)> {
    let user = UserRepository::new(state.pool.clone())
        .find_by_email(&request.email)
        .await?;

    if let Some(user) = user.filter(|u| u.is_active) {
        let _token = AuthService::new(&state).issue_password_reset_token(&user)?;
        log::info!("Password reset token issued for user {}", user.id);
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(PasswordResetResponse { success: true }),
    ))
}

/// GET /api/v1/auth/me
///
/// The authenticated session: user, token tenant scope and role.
pub async fn me(current: CurrentUser) -> ApiResult<Json<MeResponse>> {
    Ok(Json(MeResponse {
        user: UserDto::from(&current.user),
        tenant: current.tenant.as_ref().map(TenantDto::from),
        role: current.claims.role.clone(),
    }))
}
