pub mod api;
pub mod auth;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;
pub mod tenancy;

#[cfg(test)]
mod tests;

pub use api::error::{ApiError, Result as ApiResult};
pub use api::extractors::current_user::CurrentUser;
pub use auth::authenticator::RequestIdentity;
pub use auth::service::{AuthService, IssuedTokens, RegisterInput};
pub use routes::build_router;
pub use state::AppState;
pub use tenancy::resolver::ResolvedTenant;
pub use tenancy::subdomain::candidate_subdomain;
