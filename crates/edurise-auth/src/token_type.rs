use serde::{Deserialize, Serialize};

/// Discriminates the three token kinds the platform issues.
///
/// Only access tokens authenticate requests; refresh tokens are
/// exchanged for new access tokens; password-reset tokens are
/// single-purpose and short-lived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
    PasswordReset,
}

impl TokenType {
    /// Wire string used in the `type` claim
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
