use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}
