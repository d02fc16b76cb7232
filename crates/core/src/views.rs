// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::graph::DomainGraph;
use encore_domain::{
    Artist, Booking, BookingStatus, BookingType, CalendarEvent, DomainError, EntityId, EventSource,
    Money, Opportunity, OpportunityStatus, Task, date_string,
};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

/// Headline counters for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Number of artists on the roster.
    pub artist_count: usize,
    /// Number of confirmed performance bookings.
    pub confirmed_show_count: usize,
    /// Number of opportunities still open.
    pub open_opportunity_count: usize,
    /// Total monthly revenue across the roster.
    pub monthly_revenue: Money,
}

/// Computes the dashboard counters.
#[must_use]
pub fn dashboard_summary(graph: &DomainGraph) -> DashboardSummary {
    DashboardSummary {
        artist_count: graph.artists.len(),
        confirmed_show_count: graph
            .bookings
            .iter()
            .filter(|booking| {
                booking.status == BookingStatus::Confirmed
                    && booking.kind == BookingType::Performance
            })
            .count(),
        open_opportunity_count: graph
            .opportunities
            .iter()
            .filter(|opportunity| opportunity.status == OpportunityStatus::Open)
            .count(),
        monthly_revenue: graph
            .artists
            .iter()
            .map(|artist| artist.monthly_revenue)
            .sum(),
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    /// The cell's date.
    #[serde(with = "date_string")]
    pub date: Date,
    /// Whether the date falls inside the requested month. Leading and
    /// trailing cells from adjoining months are placeholders.
    pub in_month: bool,
    /// Whether the date is the caller's today.
    pub today: bool,
    /// Events dated on this cell.
    pub events: Vec<CalendarEvent>,
}

/// A calendar month rendered as a fixed grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    /// The requested year.
    pub year: i32,
    /// The requested month, 1 through 12.
    pub month: u8,
    /// Exactly 42 cells, Sunday-first, covering six weeks.
    pub cells: Vec<CalendarCell>,
}

/// Builds the 42-cell grid for a month.
///
/// The grid starts on the Sunday on or before the 1st and always spans
/// six full weeks, so every month renders at the same height.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the month is not 1 through
/// 12 or the year is outside the supported range.
pub fn month_grid(
    graph: &DomainGraph,
    year: i32,
    month: u8,
    today: Date,
) -> Result<MonthGrid, CoreError> {
    let parsed_month: Month = Month::try_from(month).map_err(|err| {
        CoreError::DomainViolation(DomainError::DateParse {
            input: format!("{year}-{month:02}"),
            message: err.to_string(),
        })
    })?;
    let first: Date = Date::from_calendar_date(year, parsed_month, 1).map_err(|err| {
        CoreError::DomainViolation(DomainError::DateParse {
            input: format!("{year}-{month:02}"),
            message: err.to_string(),
        })
    })?;

    let lead_days: i64 = i64::from(first.weekday().number_days_from_sunday());
    let start: Date = first.saturating_sub(Duration::days(lead_days));

    let cells: Vec<CalendarCell> = (0..42_i64)
        .map(|offset| {
            let date: Date = start.saturating_add(Duration::days(offset));
            CalendarCell {
                date,
                in_month: date.month() == parsed_month && date.year() == year,
                today: date == today,
                events: graph
                    .calendar_events
                    .iter()
                    .filter(|event| event.date == date)
                    .cloned()
                    .collect(),
            }
        })
        .collect();

    Ok(MonthGrid { year, month, cells })
}

/// What kind of record an upcoming entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpcomingOrigin {
    /// An incomplete task's due date.
    Task,
    /// A non-cancelled booking.
    Booking,
    /// An opportunity deadline.
    Opportunity,
    /// A manual or integration calendar event.
    Event,
}

/// One entry in the upcoming list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingItem {
    /// The source record's id.
    pub id: EntityId,
    /// Display title.
    pub title: String,
    /// The relevant date: due date, booking date, or deadline.
    #[serde(with = "date_string")]
    pub date: Date,
    /// Display time, empty when none applies.
    pub time: String,
    /// Which collection the entry came from.
    pub origin: UpcomingOrigin,
}

/// Merges everything due soon into one chronological list.
///
/// The window is `[today, today + upcoming_window_days]`, boundary day
/// included. Booking-sourced calendar events are skipped because the
/// bookings themselves are already merged; listing both would show
/// every show twice.
#[must_use]
pub fn upcoming(graph: &DomainGraph, today: Date) -> Vec<UpcomingItem> {
    let window_end: Date =
        today.saturating_add(Duration::days(i64::from(graph.settings.upcoming_window_days)));
    let in_window = |date: Date| date >= today && date <= window_end;

    let mut items: Vec<UpcomingItem> = Vec::new();

    for task in &graph.tasks {
        if !task.completed && in_window(task.due_date) {
            items.push(UpcomingItem {
                id: task.id.clone(),
                title: task.title.clone(),
                date: task.due_date,
                time: String::new(),
                origin: UpcomingOrigin::Task,
            });
        }
    }
    for booking in &graph.bookings {
        if booking.status != BookingStatus::Cancelled && in_window(booking.date) {
            items.push(UpcomingItem {
                id: booking.id.clone(),
                title: format!("{} - {}", booking.artist_name, booking.venue),
                date: booking.date,
                time: booking.time.clone(),
                origin: UpcomingOrigin::Booking,
            });
        }
    }
    for opportunity in &graph.opportunities {
        if in_window(opportunity.deadline) {
            items.push(UpcomingItem {
                id: opportunity.id.clone(),
                title: opportunity.title.clone(),
                date: opportunity.deadline,
                time: String::new(),
                origin: UpcomingOrigin::Opportunity,
            });
        }
    }
    for event in &graph.calendar_events {
        if event.source != EventSource::Booking && in_window(event.date) {
            items.push(UpcomingItem {
                id: event.id.clone(),
                title: event.title.clone(),
                date: event.date,
                time: event.time.clone(),
                origin: UpcomingOrigin::Event,
            });
        }
    }

    items.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
    items.truncate(graph.settings.upcoming_limit);
    items
}

/// An artist together with everything scoped to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDetail {
    /// The artist record.
    pub artist: Artist,
    /// Bookings for this artist.
    pub bookings: Vec<Booking>,
    /// Tasks assigned to this artist.
    pub tasks: Vec<Task>,
    /// Opportunities for this artist.
    pub opportunities: Vec<Opportunity>,
    /// Number of performance bookings, any status.
    pub performance_count: usize,
    /// Number of confirmed performance bookings.
    pub confirmed_show_count: usize,
}

/// Collects the per-artist subset of the graph.
///
/// Returns `None` when no artist has the given id.
#[must_use]
pub fn artist_detail(graph: &DomainGraph, id: &EntityId) -> Option<ArtistDetail> {
    let artist: Artist = graph.artist(id)?.clone();
    let bookings: Vec<Booking> = graph
        .bookings
        .iter()
        .filter(|booking| &booking.artist_id == id)
        .cloned()
        .collect();
    let performance_count: usize = bookings
        .iter()
        .filter(|booking| booking.kind == BookingType::Performance)
        .count();
    let confirmed_show_count: usize = bookings
        .iter()
        .filter(|booking| {
            booking.kind == BookingType::Performance && booking.status == BookingStatus::Confirmed
        })
        .count();

    Some(ArtistDetail {
        artist,
        bookings,
        tasks: graph
            .tasks
            .iter()
            .filter(|task| task.artist_id.as_ref() == Some(id))
            .cloned()
            .collect(),
        opportunities: graph
            .opportunities
            .iter()
            .filter(|opportunity| opportunity.artist_id.as_ref() == Some(id))
            .cloned()
            .collect(),
        performance_count,
        confirmed_show_count,
    })
}
