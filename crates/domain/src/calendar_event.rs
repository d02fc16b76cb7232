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

/// What a calendar entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A confirmed performance booking.
    Booking,
    /// A task reminder.
    Task,
    /// Travel between engagements.
    Travel,
    /// A plain calendar appointment.
    #[default]
    Calendar,
    /// An opportunity deadline.
    Opportunity,
}

impl EventKind {
    /// Returns the string representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Task => "task",
            Self::Travel => "travel",
            Self::Calendar => "calendar",
            Self::Opportunity => "opportunity",
        }
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking" => Ok(Self::Booking),
            "task" => Ok(Self::Task),
            "travel" => Ok(Self::Travel),
            "calendar" => Ok(Self::Calendar),
            "opportunity" => Ok(Self::Opportunity),
            _ => Err(DomainError::InvalidToken {
                field: "type",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a calendar entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Derived from a confirmed booking. Fully owned by the derivation
    /// pass: cleared and rebuilt on every sync, never edited directly.
    Booking,
    /// Created by hand.
    #[default]
    Manual,
    /// Imported from a connected integration.
    Integration,
}

impl EventSource {
    /// Returns the string representation of this source.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Manual => "manual",
            Self::Integration => "integration",
        }
    }
}

impl std::fmt::Display for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dated calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Opaque identifier. Derived entries use `cal-<booking-id>`.
    pub id: EntityId,
    /// Display title.
    pub title: String,
    /// Calendar date.
    #[serde(with = "date_string")]
    pub date: Date,
    /// Display time (`"20:00"`), empty when all-day.
    #[serde(default)]
    pub time: String,
    /// What the entry represents.
    #[serde(default, rename = "type")]
    pub kind: EventKind,
    /// Where the entry came from.
    #[serde(default)]
    pub source: EventSource,
    /// Free-text details.
    #[serde(default)]
    pub details: String,
    /// Fee carried over from a derived booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Money>,
    /// Artist display name carried over from a derived booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Creation timestamp. Absent on derived entries.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}
