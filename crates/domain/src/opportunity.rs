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

/// The category of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityType {
    /// A festival slot.
    Festival,
    /// A collaboration with another artist.
    Collaboration,
    /// A brand sponsorship.
    Sponsorship,
    /// Press, radio, or playlist placement.
    Media,
    /// Anything else.
    #[default]
    Other,
}

impl OpportunityType {
    /// Returns the string representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Festival => "festival",
            Self::Collaboration => "collaboration",
            Self::Sponsorship => "sponsorship",
            Self::Media => "media",
            Self::Other => "other",
        }
    }
}

impl FromStr for OpportunityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "festival" => Ok(Self::Festival),
            "collaboration" => Ok(Self::Collaboration),
            "sponsorship" => Ok(Self::Sponsorship),
            "media" => Ok(Self::Media),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidToken {
                field: "type",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for OpportunityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The pursuit status of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityStatus {
    /// Open and counted on the dashboard.
    #[default]
    Open,
    /// Actively being pursued.
    Pursuing,
    /// Won.
    Won,
    /// Lost or expired.
    Lost,
}

impl OpportunityStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pursuing => "pursuing",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

impl FromStr for OpportunityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "pursuing" => Ok(Self::Pursuing),
            "won" => Ok(Self::Won),
            "lost" => Ok(Self::Lost),
            _ => Err(DomainError::InvalidToken {
                field: "status",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for OpportunityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prospective engagement or deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    /// Opaque identifier.
    pub id: EntityId,
    /// Short description of the opportunity.
    pub title: String,
    /// Optional artist this opportunity is for. Cascade-deleted with
    /// the artist when set.
    #[serde(default)]
    pub artist_id: Option<EntityId>,
    /// Category.
    #[serde(default, rename = "type")]
    pub kind: OpportunityType,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
    /// Decision deadline.
    #[serde(with = "date_string")]
    pub deadline: Date,
    /// Estimated value.
    #[serde(default)]
    pub value: Money,
    /// Pursuit status.
    #[serde(default)]
    pub status: OpportunityStatus,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Last-update timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}
