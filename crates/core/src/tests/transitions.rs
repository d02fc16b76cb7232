// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{day, seeded, test_now};
use crate::{
    ArtistDraft, BookingDraft, Collection, Command, CoreError, CrisisDraft, DomainGraph,
    EventDraft, TaskDraft, TransitionResult, apply,
};
use encore_domain::{
    BookingStatus, BookingType, DomainError, EntityId, EventKind, Money, TaskPriority,
};

fn task_draft(title: &str, artist_id: Option<EntityId>) -> TaskDraft {
    TaskDraft {
        title: String::from(title),
        artist_id,
        due_date: day("2025-09-10"),
        priority: TaskPriority::Medium,
        description: String::new(),
    }
}

#[test]
fn create_artist_assigns_an_id_and_stamps_creation() {
    let graph: DomainGraph = DomainGraph::default();
    let draft: ArtistDraft = ArtistDraft {
        name: String::from("Nova Reine"),
        ..ArtistDraft::default()
    };

    let result: TransitionResult = apply(&graph, Command::CreateArtist(draft), test_now()).unwrap();
    assert_eq!(result.changed, vec![Collection::Artists]);
    let id: EntityId = result.created_id.unwrap();
    let created = result.new_graph.artist(&id).unwrap();
    assert_eq!(created.name, "Nova Reine");
    assert_eq!(created.created_at, Some(test_now()));
    // The input graph is untouched.
    assert!(graph.artists.is_empty());
}

#[test]
fn create_artist_rejects_a_blank_name() {
    let graph: DomainGraph = DomainGraph::default();
    let draft: ArtistDraft = ArtistDraft {
        name: String::from("   "),
        ..ArtistDraft::default()
    };

    let err: CoreError = apply(&graph, Command::CreateArtist(draft), test_now()).unwrap_err();
    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::EmptyField {
            entity: "Artist",
            field: "name"
        })
    );
}

#[test]
fn create_booking_rejects_a_dangling_artist_reference() {
    let graph: DomainGraph = DomainGraph::default();
    let draft: BookingDraft = BookingDraft {
        artist_id: EntityId::new("ghost"),
        venue: String::from("Somewhere"),
        date: day("2025-09-10"),
        time: String::new(),
        fee: Money::zero(),
        status: BookingStatus::Pending,
        kind: BookingType::Performance,
        details: String::new(),
    };

    let err: CoreError = apply(&graph, Command::CreateBooking(draft), test_now()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::DanglingArtistReference { entity: "Booking", .. })
    ));
}

#[test]
fn create_booking_caches_the_artist_name_and_rederives_the_calendar() {
    let (graph, artist_id) = seeded();
    let draft: BookingDraft = BookingDraft {
        artist_id,
        venue: String::from("Berlin Warehouse"),
        date: day("2025-10-04"),
        time: String::from("23:00"),
        fee: Money::new(8000.0),
        status: BookingStatus::Confirmed,
        kind: BookingType::Performance,
        details: String::new(),
    };

    let result: TransitionResult =
        apply(&graph, Command::CreateBooking(draft), test_now()).unwrap();
    assert_eq!(
        result.changed,
        vec![Collection::Bookings, Collection::Calendar]
    );

    let id: EntityId = result.created_id.unwrap();
    let booking = result.new_graph.booking(&id).unwrap();
    assert_eq!(booking.artist_name, "Adam Sellouk");

    let derived_id: String = format!("cal-{id}");
    assert!(
        result
            .new_graph
            .calendar_events
            .iter()
            .any(|event| event.id.value() == derived_id
                && event.title == "Adam Sellouk - Berlin Warehouse")
    );
}

#[test]
fn renaming_an_artist_rewrites_cached_names_and_calendar_titles() {
    let (graph, artist_id) = seeded();
    let existing = graph.artist(&artist_id).unwrap();
    let draft: ArtistDraft = ArtistDraft {
        name: String::from("Adam S."),
        genre: existing.genre.clone(),
        status: existing.status,
        email: existing.email.clone(),
        phone: existing.phone.clone(),
        monthly_revenue: existing.monthly_revenue,
        milestone: existing.milestone.clone(),
        progress: existing.progress,
        next_goals: existing.next_goals.clone(),
        social_media: existing.social_media.clone(),
    };

    let result: TransitionResult = apply(
        &graph,
        Command::UpdateArtist(artist_id.clone(), draft),
        test_now(),
    )
    .unwrap();
    assert_eq!(
        result.changed,
        vec![Collection::Artists, Collection::Bookings, Collection::Calendar]
    );
    assert!(
        result
            .new_graph
            .bookings
            .iter()
            .all(|booking| booking.artist_name == "Adam S.")
    );
    assert!(
        result
            .new_graph
            .calendar_events
            .iter()
            .all(|event| event.title.starts_with("Adam S. - "))
    );
}

#[test]
fn deleting_an_artist_cascades_but_keeps_crises() {
    let (graph, artist_id) = seeded();
    let with_task: DomainGraph = apply(
        &graph,
        Command::CreateTask(task_draft("Send rider", Some(artist_id.clone()))),
        test_now(),
    )
    .unwrap()
    .new_graph;
    let with_crisis: DomainGraph = apply(
        &with_task,
        Command::CreateCrisis(CrisisDraft {
            title: String::from("Visa problem"),
            artist_id: Some(artist_id.clone()),
            ..CrisisDraft::default()
        }),
        test_now(),
    )
    .unwrap()
    .new_graph;

    let result: TransitionResult = apply(
        &with_crisis,
        Command::DeleteArtist(artist_id),
        test_now(),
    )
    .unwrap();
    let next: &DomainGraph = &result.new_graph;
    assert!(next.artists.is_empty());
    assert!(next.bookings.is_empty());
    assert!(next.tasks.is_empty());
    assert!(next.calendar_events.is_empty());
    assert_eq!(next.crises.len(), 1);
}

#[test]
fn deleting_a_missing_artist_fails_cleanly() {
    let (graph, _) = seeded();
    let err: CoreError = apply(
        &graph,
        Command::DeleteArtist(EntityId::new("ghost")),
        test_now(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::ArtistNotFound(String::from("ghost")))
    );
}

#[test]
fn cancelling_a_booking_removes_its_derived_event() {
    let (graph, _) = seeded();
    let existing = graph.booking(&EntityId::new("booking5")).unwrap().clone();
    let draft: BookingDraft = BookingDraft {
        artist_id: existing.artist_id,
        venue: existing.venue,
        date: existing.date,
        time: existing.time,
        fee: existing.fee,
        status: BookingStatus::Cancelled,
        kind: existing.kind,
        details: existing.details,
    };

    let result: TransitionResult = apply(
        &graph,
        Command::UpdateBooking(EntityId::new("booking5"), draft),
        test_now(),
    )
    .unwrap();
    assert_eq!(result.new_graph.calendar_events.len(), 4);
    assert!(
        !result
            .new_graph
            .calendar_events
            .iter()
            .any(|event| event.id.value() == "cal-booking5")
    );
}

#[test]
fn completing_a_task_stamps_once_and_is_idempotent() {
    let graph: DomainGraph = DomainGraph::default();
    let created: TransitionResult = apply(
        &graph,
        Command::CreateTask(task_draft("Send contract", None)),
        test_now(),
    )
    .unwrap();
    let id: EntityId = created.created_id.unwrap();

    let completed: TransitionResult = apply(
        &created.new_graph,
        Command::CompleteTask(id.clone()),
        test_now(),
    )
    .unwrap();
    assert_eq!(completed.changed, vec![Collection::Tasks]);
    let task = completed.new_graph.task(&id).unwrap();
    assert!(task.completed);
    assert_eq!(task.completed_at, Some(test_now()));

    // Second completion changes nothing.
    let later: time::OffsetDateTime = test_now() + time::Duration::hours(1);
    let again: TransitionResult =
        apply(&completed.new_graph, Command::CompleteTask(id.clone()), later).unwrap();
    assert!(again.changed.is_empty());
    assert_eq!(
        again.new_graph.task(&id).unwrap().completed_at,
        Some(test_now())
    );
}

#[test]
fn editing_a_completed_task_keeps_it_completed() {
    let graph: DomainGraph = DomainGraph::default();
    let created: TransitionResult = apply(
        &graph,
        Command::CreateTask(task_draft("Send contract", None)),
        test_now(),
    )
    .unwrap();
    let id: EntityId = created.created_id.unwrap();
    let completed: DomainGraph = apply(
        &created.new_graph,
        Command::CompleteTask(id.clone()),
        test_now(),
    )
    .unwrap()
    .new_graph;

    let edited: TransitionResult = apply(
        &completed,
        Command::UpdateTask(id.clone(), task_draft("Send signed contract", None)),
        test_now(),
    )
    .unwrap();
    let task = edited.new_graph.task(&id).unwrap();
    assert_eq!(task.title, "Send signed contract");
    assert!(task.completed);
    assert_eq!(task.completed_at, Some(test_now()));
}

#[test]
fn manual_events_can_be_created_and_deleted() {
    let graph: DomainGraph = DomainGraph::default();
    let created: TransitionResult = apply(
        &graph,
        Command::CreateCalendarEvent(EventDraft {
            title: String::from("Press interview"),
            date: day("2025-09-25"),
            time: String::from("14:00"),
            kind: EventKind::Calendar,
            details: String::new(),
        }),
        test_now(),
    )
    .unwrap();
    let id: EntityId = created.created_id.unwrap();
    assert_eq!(created.changed, vec![Collection::Calendar]);

    let deleted: TransitionResult =
        apply(&created.new_graph, Command::DeleteCalendarEvent(id), test_now()).unwrap();
    assert!(deleted.new_graph.calendar_events.is_empty());
}

#[test]
fn booking_derived_events_cannot_be_deleted_directly() {
    let (graph, _) = seeded();
    let err: CoreError = apply(
        &graph,
        Command::DeleteCalendarEvent(EntityId::new("cal-booking5")),
        test_now(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::DerivedEventImmutable(String::from(
            "cal-booking5"
        )))
    );
}

#[test]
fn sync_calendar_restores_a_tampered_calendar() {
    let (mut graph, _) = seeded();
    let pristine = graph.calendar_events.clone();
    graph.calendar_events.clear();

    let result: TransitionResult = apply(&graph, Command::SyncCalendar, test_now()).unwrap();
    assert_eq!(result.changed, vec![Collection::Calendar]);
    assert_eq!(result.new_graph.calendar_events, pristine);
}

#[test]
fn failed_commands_leave_no_trace() {
    let (graph, artist_id) = seeded();
    let before: DomainGraph = graph.clone();

    let draft: BookingDraft = BookingDraft {
        artist_id,
        venue: String::new(),
        date: day("2025-09-10"),
        time: String::new(),
        fee: Money::zero(),
        status: BookingStatus::Pending,
        kind: BookingType::Performance,
        details: String::new(),
    };
    assert!(apply(&graph, Command::CreateBooking(draft), test_now()).is_err());
    assert_eq!(graph, before);
}
