// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::EntityId;
use crate::money::{Money, Progress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::OffsetDateTime;

/// The roster status of an artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArtistStatus {
    /// Early-career artist still being developed.
    #[default]
    Developing,
    /// Established artist with a steady booking pipeline.
    Established,
    /// Artist no longer actively managed.
    Inactive,
}

impl ArtistStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Developing => "developing",
            Self::Established => "established",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for ArtistStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "developing" => Ok(Self::Developing),
            "established" => Ok(Self::Established),
            "inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidToken {
                field: "status",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for ArtistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A managed artist.
///
/// Artists own their bookings, tasks, and opportunities via weak id
/// references; deleting an artist cascades those collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Opaque identifier.
    pub id: EntityId,
    /// Display name. Also cached on bookings as `artist_name`.
    pub name: String,
    /// Free-text genre description.
    #[serde(default)]
    pub genre: String,
    /// Roster status.
    #[serde(default)]
    pub status: ArtistStatus,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Monthly revenue attributed to this artist.
    #[serde(default)]
    pub monthly_revenue: Money,
    /// Current milestone description.
    #[serde(default)]
    pub milestone: String,
    /// Milestone completion percentage.
    #[serde(default)]
    pub progress: Progress,
    /// Free-text upcoming goals.
    #[serde(default)]
    pub next_goals: String,
    /// Social media handles keyed by platform name.
    #[serde(default)]
    pub social_media: BTreeMap<String, String>,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Last-update timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}
