//! Shared route helpers.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::models::session::{FIRST_EVENT_DAY, LAST_EVENT_DAY};

/// Parse a path segment naming a closed enum variant.
pub(crate) fn parse_segment<T>(raw: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e: T::Err| AppError::BadRequest(e.to_string()))
}

/// Parse an event day, rejecting days outside the event.
pub(crate) fn parse_day(raw: &str) -> AppResult<u8> {
    match raw.trim().parse::<u8>() {
        Ok(day) if (FIRST_EVENT_DAY..=LAST_EVENT_DAY).contains(&day) => Ok(day),
        _ => Err(AppError::BadRequest(format!(
            "event day must be between {FIRST_EVENT_DAY} and {LAST_EVENT_DAY}, got {raw:?}"
        ))),
    }
}
