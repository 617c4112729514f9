use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub refresh: String,
}
