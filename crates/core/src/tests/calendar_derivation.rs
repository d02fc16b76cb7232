// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{day, seeded};
use crate::{DomainGraph, derive_calendar_events};
use encore_domain::{
    BookingStatus, CalendarEvent, EntityId, EventKind, EventSource, Money,
};

#[test]
fn seeded_graph_derives_one_event_per_confirmed_booking() {
    let (graph, _) = seeded();
    assert_eq!(graph.calendar_events.len(), 5);

    let ids: Vec<&str> = graph
        .calendar_events
        .iter()
        .map(|event| event.id.value())
        .collect();
    assert!(ids.contains(&"cal-booking1"));
    assert!(ids.contains(&"cal-booking5"));
    assert!(
        graph
            .calendar_events
            .iter()
            .all(|event| event.source == EventSource::Booking)
    );
}

#[test]
fn performance_bookings_become_booking_events_and_travel_stays_travel() {
    let (graph, _) = seeded();

    let show: &CalendarEvent = graph
        .calendar_events
        .iter()
        .find(|event| event.id.value() == "cal-booking5")
        .unwrap();
    assert_eq!(show.kind, EventKind::Booking);
    assert_eq!(show.title, "Adam Sellouk - Ibiza Show");
    assert_eq!(show.date, day("2025-09-19"));
    assert_eq!(show.time, "20:00");
    assert_eq!(show.fee, Some(Money::new(5000.0)));
    assert_eq!(show.artist.as_deref(), Some("Adam Sellouk"));

    let flight: &CalendarEvent = graph
        .calendar_events
        .iter()
        .find(|event| event.id.value() == "cal-booking1")
        .unwrap();
    assert_eq!(flight.kind, EventKind::Travel);
}

#[test]
fn derivation_is_idempotent() {
    let (mut graph, _) = seeded();
    let first: Vec<CalendarEvent> = derive_calendar_events(&graph);
    graph.calendar_events = first.clone();
    let second: Vec<CalendarEvent> = derive_calendar_events(&graph);
    assert_eq!(first, second);
}

#[test]
fn unconfirmed_bookings_are_not_derived() {
    let (mut graph, _) = seeded();
    for booking in &mut graph.bookings {
        if booking.id.value() == "booking5" {
            booking.status = BookingStatus::Pending;
        }
    }
    let events: Vec<CalendarEvent> = derive_calendar_events(&graph);
    assert_eq!(events.len(), 4);
    assert!(!events.iter().any(|event| event.id.value() == "cal-booking5"));
}

#[test]
fn manual_events_survive_rederivation() {
    let (mut graph, _) = seeded();
    graph.calendar_events.push(CalendarEvent {
        id: EntityId::new("studio-day"),
        title: String::from("Studio day"),
        date: day("2025-09-22"),
        time: String::new(),
        kind: EventKind::Calendar,
        source: EventSource::Manual,
        details: String::new(),
        fee: None,
        artist: None,
        created_at: None,
    });

    let events: Vec<CalendarEvent> = derive_calendar_events(&graph);
    assert_eq!(events.len(), 6);
    assert!(events.iter().any(|event| event.id.value() == "studio-day"));
}

#[test]
fn empty_graph_derives_nothing() {
    let graph: DomainGraph = DomainGraph::default();
    assert!(derive_calendar_events(&graph).is_empty());
}
