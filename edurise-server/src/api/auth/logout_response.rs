use serde::Serialize;

/// `success` mirrors the revocation outcome: false means the supplied
/// token was already invalid and nothing was recorded.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}
