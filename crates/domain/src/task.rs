// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::date_string;
use crate::error::DomainError;
use crate::ids::EntityId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// No deadline pressure.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Needs attention before anything else.
    High,
}

impl TaskPriority {
    /// Returns the string representation of this priority.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(DomainError::InvalidToken {
                field: "priority",
                value: s.to_owned(),
            }),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A to-do item, optionally scoped to an artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier.
    pub id: EntityId,
    /// Short description of the work.
    pub title: String,
    /// Optional artist this task relates to. Cascade-deleted with the
    /// artist when set.
    #[serde(default)]
    pub artist_id: Option<EntityId>,
    /// Due date.
    #[serde(with = "date_string")]
    pub due_date: Date,
    /// Urgency.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// When the task was completed. Stamped exactly once on the
    /// false→true transition and never cleared.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    /// Creation timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// Last-update timestamp.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}
