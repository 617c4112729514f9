use edurise_core::User;
use serde::Serialize;
use uuid::Uuid;

/// Client-facing view of an account. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_teacher: bool,
    pub is_approved_teacher: bool,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            is_teacher: user.is_teacher,
            is_approved_teacher: user.is_approved_teacher,
        }
    }
}
