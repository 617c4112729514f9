use serde::Serialize;

/// Always acknowledges the request, whether or not the email exists
#[derive(Debug, Serialize)]
pub struct PasswordResetResponse {
    pub success: bool,
}
