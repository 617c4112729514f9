use crate::auth::service::RegisterInput;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_teacher: bool,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub bio: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            is_teacher: request.is_teacher,
            timezone: request.timezone,
            language: request.language,
            bio: request.bio,
        }
    }
}
