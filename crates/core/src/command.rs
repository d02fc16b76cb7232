// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use encore_domain::{
    ArtistStatus, BookingStatus, BookingType, CrisisSeverity, CrisisStatus, EntityId, EventKind,
    Money, OpportunityStatus, OpportunityType, Progress,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// The caller-supplied fields of an artist.
///
/// Drafts carry everything a create or update needs except the id and
/// timestamps, which the transition layer owns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDraft {
    /// Display name. Required.
    pub name: String,
    /// Musical genres, comma separated.
    #[serde(default)]
    pub genre: String,
    /// Career stage.
    #[serde(default)]
    pub status: ArtistStatus,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Average monthly revenue.
    #[serde(default)]
    pub monthly_revenue: Money,
    /// The milestone currently being worked toward.
    #[serde(default)]
    pub milestone: String,
    /// Progress toward the milestone.
    #[serde(default)]
    pub progress: Progress,
    /// Free-text next goals.
    #[serde(default)]
    pub next_goals: String,
    /// Social handles keyed by platform.
    #[serde(default)]
    pub social_media: BTreeMap<String, String>,
}

/// The caller-supplied fields of a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// The artist being booked. Must resolve to an existing artist.
    pub artist_id: EntityId,
    /// Venue or engagement name. Required.
    pub venue: String,
    /// Engagement date.
    #[serde(with = "encore_domain::date_string")]
    pub date: Date,
    /// Display time.
    #[serde(default)]
    pub time: String,
    /// Agreed fee.
    #[serde(default)]
    pub fee: Money,
    /// Confirmation status.
    #[serde(default)]
    pub status: BookingStatus,
    /// Performance or travel.
    #[serde(default, rename = "type")]
    pub kind: BookingType,
    /// Free-text details.
    #[serde(default)]
    pub details: String,
}

/// The caller-supplied fields of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Short description. Required.
    pub title: String,
    /// Optional artist the task is for.
    #[serde(default)]
    pub artist_id: Option<EntityId>,
    /// Due date.
    #[serde(with = "encore_domain::date_string")]
    pub due_date: Date,
    /// Priority.
    #[serde(default)]
    pub priority: encore_domain::TaskPriority,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
}

/// The caller-supplied fields of an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityDraft {
    /// Short description. Required.
    pub title: String,
    /// Optional artist the opportunity is for.
    #[serde(default)]
    pub artist_id: Option<EntityId>,
    /// Category.
    #[serde(default, rename = "type")]
    pub kind: OpportunityType,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
    /// Decision deadline.
    #[serde(with = "encore_domain::date_string")]
    pub deadline: Date,
    /// Estimated value.
    #[serde(default)]
    pub value: Money,
    /// Pursuit status.
    #[serde(default)]
    pub status: OpportunityStatus,
}

/// The caller-supplied fields of a crisis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisDraft {
    /// Short description. Required.
    pub title: String,
    /// Optional artist involved.
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
}

/// The caller-supplied fields of a manual calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Display title. Required.
    pub title: String,
    /// Calendar date.
    #[serde(with = "encore_domain::date_string")]
    pub date: Date,
    /// Display time, empty when all-day.
    #[serde(default)]
    pub time: String,
    /// What the entry represents.
    #[serde(default, rename = "type")]
    pub kind: EventKind,
    /// Free-text details.
    #[serde(default)]
    pub details: String,
}

/// A requested transition of the domain graph.
///
/// Commands are plain data; all behavior lives in `apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Adds an artist to the roster.
    CreateArtist(ArtistDraft),
    /// Replaces an artist's caller-supplied fields.
    UpdateArtist(EntityId, ArtistDraft),
    /// Removes an artist and every booking, task, and opportunity
    /// scoped to them. Crises are kept.
    DeleteArtist(EntityId),
    /// Adds a booking.
    CreateBooking(BookingDraft),
    /// Replaces a booking's caller-supplied fields.
    UpdateBooking(EntityId, BookingDraft),
    /// Removes a booking.
    DeleteBooking(EntityId),
    /// Adds a task.
    CreateTask(TaskDraft),
    /// Replaces a task's caller-supplied fields.
    UpdateTask(EntityId, TaskDraft),
    /// Marks a task done. Completing an already-completed task is a
    /// no-op; completion is never undone by this command.
    CompleteTask(EntityId),
    /// Removes a task.
    DeleteTask(EntityId),
    /// Adds an opportunity.
    CreateOpportunity(OpportunityDraft),
    /// Replaces an opportunity's caller-supplied fields.
    UpdateOpportunity(EntityId, OpportunityDraft),
    /// Removes an opportunity.
    DeleteOpportunity(EntityId),
    /// Adds a crisis record.
    CreateCrisis(CrisisDraft),
    /// Replaces a crisis's caller-supplied fields.
    UpdateCrisis(EntityId, CrisisDraft),
    /// Removes a crisis record.
    DeleteCrisis(EntityId),
    /// Adds a manual calendar event.
    CreateCalendarEvent(EventDraft),
    /// Removes a manual or integration calendar event. Booking-derived
    /// entries are rejected.
    DeleteCalendarEvent(EntityId),
    /// Rebuilds the booking-derived calendar entries from scratch.
    SyncCalendar,
}
