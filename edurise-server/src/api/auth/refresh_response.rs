use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}
