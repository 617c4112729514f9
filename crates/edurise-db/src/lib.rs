pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{connect, run_migrations};
pub use error::{DbError, Result};
pub use repositories::membership_repository::MembershipRepository;
pub use repositories::registration::RegistrationRepository;
pub use repositories::revoked_token_repository::RevokedTokenRepository;
pub use repositories::tenant_repository::TenantRepository;
pub use repositories::user_repository::UserRepository;
