// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::graph::DomainGraph;
use encore_domain::{
    BookingStatus, BookingType, CalendarEvent, EntityId, EventKind, EventSource,
};

/// Rebuilds the calendar from the bookings collection.
///
/// Every booking-sourced entry is discarded and one fresh entry is
/// derived per confirmed booking, so the pass is deterministic and
/// idempotent: running it twice on the same graph yields the same
/// calendar. Manual and integration entries pass through untouched, in
/// their original order.
#[must_use]
pub fn derive_calendar_events(graph: &DomainGraph) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = graph
        .calendar_events
        .iter()
        .filter(|event| event.source != EventSource::Booking)
        .cloned()
        .collect();

    for booking in &graph.bookings {
        if booking.status != BookingStatus::Confirmed {
            continue;
        }
        let kind: EventKind = match booking.kind {
            BookingType::Performance => EventKind::Booking,
            BookingType::Travel => EventKind::Travel,
        };
        events.push(CalendarEvent {
            id: EntityId::new(&format!("cal-{}", booking.id)),
            title: format!("{} - {}", booking.artist_name, booking.venue),
            date: booking.date,
            time: booking.time.clone(),
            kind,
            source: EventSource::Booking,
            details: booking.details.clone(),
            fee: Some(booking.fee),
            artist: Some(booking.artist_name.clone()),
            created_at: None,
        });
    }

    events
}
