use crate::{MembershipRole, User};

#[test]
fn test_new_user_is_active_and_unprivileged() {
    let user = User::new("a@example.com", "$argon2id$stub");

    assert!(user.is_active);
    assert!(!user.is_staff);
    assert!(!user.is_superuser);
    assert!(!user.is_teacher);
    assert!(!user.is_approved_teacher);
}

#[test]
fn test_default_role_follows_teacher_flag() {
    let mut user = User::new("a@example.com", "$argon2id$stub");
    assert_eq!(user.default_role(), MembershipRole::Student);

    user.is_teacher = true;
    assert_eq!(user.default_role(), MembershipRole::Teacher);
}

#[test]
fn test_password_hash_is_not_serialized() {
    let user = User::new("a@example.com", "$argon2id$stub");
    let json = serde_json::to_value(&user).unwrap();

    assert!(json.get("password_hash").is_none());
    assert_eq!(json["email"], "a@example.com");
}
