use std::result::Result as StdResult;

use thiserror::Error;

pub use error_location::ErrorLocation;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid subscription plan: {value} {location}")]
    InvalidSubscriptionPlan {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid membership role: {value} {location}")]
    InvalidMembershipRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("UUID parse error: {source} {location}")]
    Uuid {
        source: uuid::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
