pub mod claims;
pub mod error;
pub mod password;
pub mod token_codec;
pub mod token_type;

pub use claims::{Claims, IdentityClaims, TenantClaims};
pub use error::{AuthError, Result};
pub use token_codec::{TokenCodec, TokenConfig};
pub use token_type::TokenType;

#[cfg(test)]
mod tests;
