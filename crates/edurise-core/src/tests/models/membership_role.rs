use crate::MembershipRole;

use std::str::FromStr;

#[test]
fn test_membership_role_as_str() {
    assert_eq!(MembershipRole::Student.as_str(), "student");
    assert_eq!(MembershipRole::Teacher.as_str(), "teacher");
    assert_eq!(MembershipRole::Admin.as_str(), "admin");
}

#[test]
fn test_membership_role_from_str() {
    assert_eq!(
        MembershipRole::from_str("student").unwrap(),
        MembershipRole::Student
    );
    assert_eq!(
        MembershipRole::from_str("admin").unwrap(),
        MembershipRole::Admin
    );
    assert!(MembershipRole::from_str("owner").is_err());
}

#[test]
fn test_membership_role_default() {
    assert_eq!(MembershipRole::default(), MembershipRole::Student);
}
