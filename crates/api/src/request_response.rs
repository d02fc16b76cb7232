// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry dates and status tokens as raw strings; parsing and
//! token validation happen at the boundary so bad input becomes a
//! `ValidationFailed` instead of a deserialization failure.

use encore_domain::{Money, Progress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// API request to create or update an artist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRequest {
    /// Display name.
    pub name: String,
    /// Musical genres, comma separated.
    #[serde(default)]
    pub genre: String,
    /// Career stage token; empty means the default.
    #[serde(default)]
    pub status: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Average monthly revenue. Accepts a number or a numeric string.
    #[serde(default)]
    pub monthly_revenue: Money,
    /// The milestone currently being worked toward.
    #[serde(default)]
    pub milestone: String,
    /// Progress toward the milestone, 0 through 100.
    #[serde(default)]
    pub progress: Progress,
    /// Free-text next goals.
    #[serde(default)]
    pub next_goals: String,
    /// Social handles keyed by platform.
    #[serde(default)]
    pub social_media: BTreeMap<String, String>,
}

/// API request to create or update a booking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// The artist being booked.
    pub artist_id: String,
    /// Venue or engagement name.
    pub venue: String,
    /// Engagement date as `YYYY-MM-DD`.
    pub date: String,
    /// Display time.
    #[serde(default)]
    pub time: String,
    /// Agreed fee.
    #[serde(default)]
    pub fee: Money,
    /// Confirmation status token; empty means the default.
    #[serde(default)]
    pub status: String,
    /// Booking type token; empty means the default.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Free-text details.
    #[serde(default)]
    pub details: String,
}

/// API request to create or update a task.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    /// Short description.
    pub title: String,
    /// Optional artist the task is for.
    #[serde(default)]
    pub artist_id: Option<String>,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: String,
    /// Priority token; empty means the default.
    #[serde(default)]
    pub priority: String,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
}

/// API request to create or update an opportunity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityRequest {
    /// Short description.
    pub title: String,
    /// Optional artist the opportunity is for.
    #[serde(default)]
    pub artist_id: Option<String>,
    /// Category token; empty means the default.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
    /// Decision deadline as `YYYY-MM-DD`.
    pub deadline: String,
    /// Estimated value.
    #[serde(default)]
    pub value: Money,
    /// Pursuit status token; empty means the default.
    #[serde(default)]
    pub status: String,
}

/// API request to create or update a crisis record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisRequest {
    /// Short description.
    pub title: String,
    /// Optional artist involved.
    #[serde(default)]
    pub artist_id: Option<String>,
    /// Severity token; empty means the default.
    #[serde(default)]
    pub severity: String,
    /// Free-text details.
    #[serde(default)]
    pub description: String,
    /// Mitigation actions taken so far.
    #[serde(default)]
    pub actions: String,
    /// Handling status token; empty means the default.
    #[serde(default)]
    pub status: String,
}

/// API request to create a manual calendar event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    /// Display title.
    pub title: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    /// Display time, empty when all-day.
    #[serde(default)]
    pub time: String,
    /// Event kind token; empty means the default.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Free-text details.
    #[serde(default)]
    pub details: String,
}

/// API request to test a Notion integration token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotionTestRequest {
    /// The Notion integration token.
    pub token: String,
}

/// API request for an OAuth authorization URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OauthUrlRequest {
    /// The provider key (`dropbox`, `googleCalendar`, ...).
    pub provider: String,
    /// The caller's OAuth client id or app key.
    pub client_id: String,
    /// The redirect URI registered with the provider.
    pub redirect_uri: String,
}

/// API response carrying an OAuth authorization URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OauthUrlResponse {
    /// The provider key.
    pub provider: String,
    /// The URL the user must visit to authorize.
    pub url: String,
}

/// API request completing an OAuth connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OauthCallbackRequest {
    /// The provider key carried back in the `state` parameter.
    pub provider: String,
    /// The authorization code returned by the provider.
    pub code: String,
}

/// One provider's connection summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationInfo {
    /// The provider key.
    pub provider: String,
    /// The human-readable service name.
    pub name: String,
    /// Whether the provider is connected.
    pub connected: bool,
    /// The scopes requested when connecting.
    pub scopes: Vec<String>,
}

/// API response for a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    /// The id of the deleted record.
    pub id: String,
    /// A success message.
    pub message: String,
}

/// API response for a calendar sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCalendarResponse {
    /// Number of calendar entries after the sync.
    pub event_count: usize,
    /// A success message.
    pub message: String,
}

/// API response for a completed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    /// Number of artists in the imported graph.
    pub artist_count: usize,
    /// Number of bookings in the imported graph.
    pub booking_count: usize,
    /// A success message.
    pub message: String,
}
