pub mod membership_repository;
pub mod registration;
pub mod revoked_token_repository;
pub mod tenant_repository;
pub mod user_repository;

use crate::{DbError, Result};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use uuid::Uuid;

/// Parse a UUID column, naming the table/column on failure
#[track_caller]
pub(crate) fn parse_uuid(table: &'static str, column: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| DbError::CorruptRow {
        table,
        message: format!("invalid UUID in {column}: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Convert a Unix-seconds column to a UTC timestamp
#[track_caller]
pub(crate) fn parse_timestamp(table: &'static str, column: &str, secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::CorruptRow {
        table,
        message: format!("invalid timestamp in {column}: {secs}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
