use crate::SubscriptionPlan;

use std::str::FromStr;

#[test]
fn test_subscription_plan_as_str() {
    assert_eq!(SubscriptionPlan::Basic.as_str(), "basic");
    assert_eq!(SubscriptionPlan::Pro.as_str(), "pro");
    assert_eq!(SubscriptionPlan::Enterprise.as_str(), "enterprise");
}

#[test]
fn test_subscription_plan_from_str() {
    assert_eq!(
        SubscriptionPlan::from_str("basic").unwrap(),
        SubscriptionPlan::Basic
    );
    assert_eq!(
        SubscriptionPlan::from_str("enterprise").unwrap(),
        SubscriptionPlan::Enterprise
    );
    assert!(SubscriptionPlan::from_str("platinum").is_err());
}

#[test]
fn test_subscription_plan_default() {
    assert_eq!(SubscriptionPlan::default(), SubscriptionPlan::Basic);
}
