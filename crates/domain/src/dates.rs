// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// The wire format for calendar dates (`2025-09-19`).
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns `DomainError::DateParse` if the string is not a valid date.
pub fn parse_date(input: &str) -> Result<Date, DomainError> {
    Date::parse(input, DATE_FORMAT).map_err(|err| DomainError::DateParse {
        input: input.to_owned(),
        message: err.to_string(),
    })
}

/// Formats a date in the wire format.
#[must_use]
pub fn format_date(date: Date) -> String {
    // The format has no elastic components, so formatting cannot fail.
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// Serde adapter storing `time::Date` as a `YYYY-MM-DD` string.
pub mod date_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns a serializer error if the date cannot be formatted.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Deserializes a `YYYY-MM-DD` string into a date.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error if the string is not a valid date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
