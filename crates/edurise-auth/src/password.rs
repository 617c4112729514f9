//! Password hashing and verification using Argon2id.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;
use std::sync::OnceLock;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use error_location::ErrorLocation;

/// Hash a plaintext password into an Argon2id PHC-format string with a
/// fresh random salt.
#[track_caller]
pub fn hash_password(password: &str) -> AuthErrorResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto {
            message: format!("password hash failed: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed. The
/// underlying comparison is constant-time.
#[track_caller]
pub fn verify_password(password: &str, hash: &str) -> AuthErrorResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| AuthError::Crypto {
        message: format!("invalid hash format: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto {
            message: format!("verify error: {e}"),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Burn the same work factor as a real verification.
///
/// Called when no account matches a login email, so a lookup miss is
/// not observable through response timing.
pub fn verify_dummy(password: &str) {
    let hash = DUMMY_HASH
        .get_or_init(|| hash_password("edurise-timing-equalizer").unwrap_or_default());
    let _ = verify_password(password, hash);
}
