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

mod artist;
mod booking;
mod calendar_event;
mod crisis;
mod dates;
mod error;
mod ids;
mod money;
mod opportunity;
mod settings;
mod task;
mod validation;

#[cfg(test)]
mod tests;

pub use artist::{Artist, ArtistStatus};
pub use booking::{Booking, BookingStatus, BookingType};
pub use calendar_event::{CalendarEvent, EventKind, EventSource};
pub use crisis::{Crisis, CrisisSeverity, CrisisStatus};
pub use dates::{date_string, format_date, parse_date};
pub use error::DomainError;
pub use ids::EntityId;
pub use money::{Money, Progress};
pub use opportunity::{Opportunity, OpportunityStatus, OpportunityType};
pub use settings::Settings;
pub use task::{Task, TaskPriority};
pub use validation::{
    validate_artist_fields, validate_booking_fields, validate_calendar_event_fields,
    validate_crisis_fields, validate_opportunity_fields, validate_task_fields,
};
