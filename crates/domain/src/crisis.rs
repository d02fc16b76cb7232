// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::EntityId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// How bad a crisis is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrisisSeverity {
    /// Minor issue.
    Low,
    /// Needs monitoring.
    #[default]
    Medium,
    /// Actively damaging.
    High,
    /// Drop everything.
    Critical,
}

impl CrisisSeverity {
    /// Returns the string representation of this severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for CrisisSeverity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(DomainError::InvalidToken {
                field: "severity",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for CrisisSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The handling status of a crisis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrisisStatus {
    /// Ongoing.
    #[default]
    Active,
    /// Contained but being watched.
    Monitoring,
    /// Over.
    Resolved,
}

impl CrisisStatus {
    /// Returns the string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Monitoring => "monitoring",
            Self::Resolved => "resolved",
        }
    }
}

impl FromStr for CrisisStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "monitoring" => Ok(Self::Monitoring),
            "resolved" => Ok(Self::Resolved),
            _ => Err(DomainError::InvalidToken {
                field: "status",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for CrisisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reputational or operational incident.
///
/// Crises are NOT cascade-deleted when their artist is removed: an
/// incident record often outlives the roster entry that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crisis {
    /// Opaque identifier.
    pub id: EntityId,
    /// Short description of the incident.
    pub title: String,
    /// Optional artist involved. The reference may dangle after the
    /// artist is deleted.
    #[serde(default)]
    pub artist_id: Option<EntityId>,
    /// Severity.
    #[serde(default)]
    pub severity: CrisisSeverity,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
    /// Mitigation actions taken so far.
    #[serde(default)]
    pub actions: String,
    /// Handling status.
    #[serde(default)]
    pub status: CrisisStatus,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Last-update timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}
