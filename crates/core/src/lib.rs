// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod calendar;
mod command;
mod error;
mod graph;
mod views;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use calendar::derive_calendar_events;
pub use command::{
    ArtistDraft, BookingDraft, Command, CrisisDraft, EventDraft, OpportunityDraft, TaskDraft,
};
pub use error::CoreError;
pub use graph::{Collection, DomainGraph, TransitionResult};
pub use views::{
    ArtistDetail, CalendarCell, DashboardSummary, MonthGrid, UpcomingItem, UpcomingOrigin,
    artist_detail, dashboard_summary, month_grid, upcoming,
};
