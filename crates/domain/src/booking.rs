// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::date_string;
use crate::error::DomainError;
use crate::ids::EntityId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// The confirmation status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting confirmation. Not yet on the calendar.
    #[default]
    Pending,
    /// Confirmed. Drives calendar-event derivation.
    Confirmed,
    /// Cancelled. Removed from the calendar on the next derivation.
    Cancelled,
}

impl BookingStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidToken {
                field: "status",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of engagement a booking represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    /// A paid show.
    #[default]
    Performance,
    /// Travel between engagements (flights, transfers).
    Travel,
}

impl BookingType {
    /// Returns the string representation of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Travel => "travel",
        }
    }
}

impl FromStr for BookingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "performance" => Ok(Self::Performance),
            "travel" => Ok(Self::Travel),
            _ => Err(DomainError::InvalidToken {
                field: "type",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for BookingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked engagement for an artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Opaque identifier.
    pub id: EntityId,
    /// The artist this booking belongs to. Must resolve to an existing
    /// artist; cascade-deleted with it.
    pub artist_id: EntityId,
    /// Cached copy of the artist's display name. Rewritten when the
    /// artist is renamed.
    #[serde(default)]
    pub artist_name: String,
    /// Venue or, for travel, the route description.
    pub venue: String,
    /// Calendar date of the engagement.
    #[serde(with = "date_string")]
    pub date: Date,
    /// Display time (`"20:00"`).
    #[serde(default)]
    pub time: String,
    /// Fee for the engagement.
    #[serde(default)]
    pub fee: Money,
    /// Confirmation status.
    #[serde(default)]
    pub status: BookingStatus,
    /// Engagement kind.
    #[serde(default, rename = "type")]
    pub kind: BookingType,
    /// Free-text details (confirmation codes, set times).
    #[serde(default)]
    pub details: String,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Last-update timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}
