mod membership_role;
mod subscription_plan;
mod user;
