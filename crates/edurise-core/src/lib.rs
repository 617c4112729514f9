pub mod error;
pub mod models;

pub use error::{CoreError, ErrorLocation, Result};
pub use models::membership::Membership;
pub use models::membership_role::MembershipRole;
pub use models::subscription_plan::SubscriptionPlan;
pub use models::tenant::Tenant;
pub use models::user::User;

#[cfg(test)]
mod tests;
