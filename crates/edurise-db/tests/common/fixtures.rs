use edurise_core::{Membership, MembershipRole, Tenant, User};
use uuid::Uuid;

/// Creates a test tenant with the given subdomain
pub fn create_test_tenant(subdomain: &str) -> Tenant {
    Tenant::new(format!("{subdomain} Academy"), subdomain)
}

/// Creates a test user. The hash is a syntactic placeholder - database
/// tests never verify passwords.
pub fn create_test_user(email: &str) -> User {
    User::new(email, "$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder")
}

/// Creates a student membership linking the given user and tenant
pub fn create_test_membership(user_id: Uuid, tenant_id: Uuid) -> Membership {
    Membership::new(user_id, tenant_id, MembershipRole::Student)
}
