// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::derive_calendar_events;
use crate::command::{
    ArtistDraft, BookingDraft, Command, CrisisDraft, EventDraft, OpportunityDraft, TaskDraft,
};
use crate::error::CoreError;
use crate::graph::{Collection, DomainGraph, TransitionResult};
use encore_domain::{
    Artist, Booking, CalendarEvent, Crisis, DomainError, EntityId, EventSource, Opportunity, Task,
    validate_artist_fields, validate_booking_fields, validate_calendar_event_fields,
    validate_crisis_fields, validate_opportunity_fields, validate_task_fields,
};
use time::OffsetDateTime;

/// Applies a command to the graph, producing the next graph.
///
/// Pure transition: the input graph is never mutated, and on error no
/// partial state escapes. `now` is threaded in by the caller so the
/// transition itself stays deterministic.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` when the command fails
/// validation, targets a record that does not exist, or references an
/// artist that does not exist.
pub fn apply(
    graph: &DomainGraph,
    command: Command,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateArtist(draft) => create_artist(graph, draft, now),
        Command::UpdateArtist(id, draft) => update_artist(graph, &id, draft, now),
        Command::DeleteArtist(id) => delete_artist(graph, &id),
        Command::CreateBooking(draft) => create_booking(graph, draft, now),
        Command::UpdateBooking(id, draft) => update_booking(graph, &id, draft, now),
        Command::DeleteBooking(id) => delete_booking(graph, &id),
        Command::CreateTask(draft) => create_task(graph, draft, now),
        Command::UpdateTask(id, draft) => update_task(graph, &id, draft, now),
        Command::CompleteTask(id) => complete_task(graph, &id, now),
        Command::DeleteTask(id) => delete_task(graph, &id),
        Command::CreateOpportunity(draft) => create_opportunity(graph, draft, now),
        Command::UpdateOpportunity(id, draft) => update_opportunity(graph, &id, draft, now),
        Command::DeleteOpportunity(id) => delete_opportunity(graph, &id),
        Command::CreateCrisis(draft) => create_crisis(graph, draft, now),
        Command::UpdateCrisis(id, draft) => update_crisis(graph, &id, draft, now),
        Command::DeleteCrisis(id) => delete_crisis(graph, &id),
        Command::CreateCalendarEvent(draft) => create_calendar_event(graph, draft, now),
        Command::DeleteCalendarEvent(id) => delete_calendar_event(graph, &id),
        Command::SyncCalendar => Ok(sync_calendar(graph)),
    }
}

/// Resolves an optional artist reference, rejecting dangling ones.
fn check_artist_reference(
    graph: &DomainGraph,
    entity: &'static str,
    artist_id: Option<&EntityId>,
) -> Result<(), CoreError> {
    match artist_id {
        Some(id) if !graph.has_artist(id) => Err(CoreError::DomainViolation(
            DomainError::DanglingArtistReference {
                entity,
                artist_id: id.to_string(),
            },
        )),
        _ => Ok(()),
    }
}

fn artist_from_draft(id: EntityId, draft: ArtistDraft) -> Artist {
    Artist {
        id,
        name: draft.name,
        genre: draft.genre,
        status: draft.status,
        email: draft.email,
        phone: draft.phone,
        monthly_revenue: draft.monthly_revenue,
        milestone: draft.milestone,
        progress: draft.progress,
        next_goals: draft.next_goals,
        social_media: draft.social_media,
        created_at: None,
        updated_at: None,
    }
}

fn create_artist(
    graph: &DomainGraph,
    draft: ArtistDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let id: EntityId = EntityId::generate();
    let mut artist: Artist = artist_from_draft(id.clone(), draft);
    artist.created_at = Some(now);
    validate_artist_fields(&artist)?;

    let mut next: DomainGraph = graph.clone();
    next.artists.push(artist);
    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Artists],
        created_id: Some(id),
    })
}

fn update_artist(
    graph: &DomainGraph,
    id: &EntityId,
    draft: ArtistDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let existing: &Artist = graph
        .artist(id)
        .ok_or_else(|| CoreError::DomainViolation(DomainError::ArtistNotFound(id.to_string())))?;

    let mut updated: Artist = artist_from_draft(id.clone(), draft);
    updated.created_at = existing.created_at;
    updated.updated_at = Some(now);
    validate_artist_fields(&updated)?;

    // A rename invalidates the artist_name cached on bookings, which in
    // turn feeds the derived calendar titles.
    let renamed: bool = updated.name != existing.name;

    let mut next: DomainGraph = graph.clone();
    for artist in &mut next.artists {
        if &artist.id == id {
            *artist = updated.clone();
        }
    }
    let mut changed: Vec<Collection> = vec![Collection::Artists];
    if renamed {
        for booking in &mut next.bookings {
            if &booking.artist_id == id {
                booking.artist_name.clone_from(&updated.name);
            }
        }
        next.calendar_events = derive_calendar_events(&next);
        changed.push(Collection::Bookings);
        changed.push(Collection::Calendar);
    }

    Ok(TransitionResult {
        new_graph: next,
        changed,
        created_id: None,
    })
}

fn delete_artist(graph: &DomainGraph, id: &EntityId) -> Result<TransitionResult, CoreError> {
    if !graph.has_artist(id) {
        return Err(CoreError::DomainViolation(DomainError::ArtistNotFound(
            id.to_string(),
        )));
    }

    let mut next: DomainGraph = graph.clone();
    next.artists.retain(|artist| &artist.id != id);
    next.bookings.retain(|booking| &booking.artist_id != id);
    next.tasks.retain(|task| task.artist_id.as_ref() != Some(id));
    next.opportunities
        .retain(|opportunity| opportunity.artist_id.as_ref() != Some(id));
    // Crises are deliberately kept; the incident record outlives the
    // roster entry.
    next.calendar_events = derive_calendar_events(&next);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![
            Collection::Artists,
            Collection::Bookings,
            Collection::Tasks,
            Collection::Opportunities,
            Collection::Calendar,
        ],
        created_id: None,
    })
}

fn booking_from_draft(graph: &DomainGraph, id: EntityId, draft: BookingDraft) -> Booking {
    let artist_name: String = graph
        .artist(&draft.artist_id)
        .map(|artist| artist.name.clone())
        .unwrap_or_default();
    Booking {
        id,
        artist_id: draft.artist_id,
        artist_name,
        venue: draft.venue,
        date: draft.date,
        time: draft.time,
        fee: draft.fee,
        status: draft.status,
        kind: draft.kind,
        details: draft.details,
        created_at: None,
        updated_at: None,
    }
}

fn create_booking(
    graph: &DomainGraph,
    draft: BookingDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    check_artist_reference(graph, "Booking", Some(&draft.artist_id))?;

    let id: EntityId = EntityId::generate();
    let mut booking: Booking = booking_from_draft(graph, id.clone(), draft);
    booking.created_at = Some(now);
    validate_booking_fields(&booking)?;

    let mut next: DomainGraph = graph.clone();
    next.bookings.push(booking);
    next.calendar_events = derive_calendar_events(&next);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Bookings, Collection::Calendar],
        created_id: Some(id),
    })
}

fn update_booking(
    graph: &DomainGraph,
    id: &EntityId,
    draft: BookingDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let existing: &Booking = graph
        .booking(id)
        .ok_or_else(|| CoreError::DomainViolation(DomainError::BookingNotFound(id.to_string())))?;
    check_artist_reference(graph, "Booking", Some(&draft.artist_id))?;

    let mut updated: Booking = booking_from_draft(graph, id.clone(), draft);
    updated.created_at = existing.created_at;
    updated.updated_at = Some(now);
    validate_booking_fields(&updated)?;

    let mut next: DomainGraph = graph.clone();
    for booking in &mut next.bookings {
        if &booking.id == id {
            *booking = updated.clone();
        }
    }
    next.calendar_events = derive_calendar_events(&next);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Bookings, Collection::Calendar],
        created_id: None,
    })
}

fn delete_booking(graph: &DomainGraph, id: &EntityId) -> Result<TransitionResult, CoreError> {
    if graph.booking(id).is_none() {
        return Err(CoreError::DomainViolation(DomainError::BookingNotFound(
            id.to_string(),
        )));
    }

    let mut next: DomainGraph = graph.clone();
    next.bookings.retain(|booking| &booking.id != id);
    next.calendar_events = derive_calendar_events(&next);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Bookings, Collection::Calendar],
        created_id: None,
    })
}

fn task_from_draft(id: EntityId, draft: TaskDraft) -> Task {
    Task {
        id,
        title: draft.title,
        artist_id: draft.artist_id,
        due_date: draft.due_date,
        priority: draft.priority,
        description: draft.description,
        completed: false,
        completed_at: None,
        created_at: None,
        updated_at: None,
    }
}

fn create_task(
    graph: &DomainGraph,
    draft: TaskDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    check_artist_reference(graph, "Task", draft.artist_id.as_ref())?;

    let id: EntityId = EntityId::generate();
    let mut task: Task = task_from_draft(id.clone(), draft);
    task.created_at = Some(now);
    validate_task_fields(&task)?;

    let mut next: DomainGraph = graph.clone();
    next.tasks.push(task);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Tasks],
        created_id: Some(id),
    })
}

fn update_task(
    graph: &DomainGraph,
    id: &EntityId,
    draft: TaskDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let existing: &Task = graph
        .task(id)
        .ok_or_else(|| CoreError::DomainViolation(DomainError::TaskNotFound(id.to_string())))?;
    check_artist_reference(graph, "Task", draft.artist_id.as_ref())?;

    let mut updated: Task = task_from_draft(id.clone(), draft);
    // Completion state survives field edits; only CompleteTask moves it.
    updated.completed = existing.completed;
    updated.completed_at = existing.completed_at;
    updated.created_at = existing.created_at;
    updated.updated_at = Some(now);
    validate_task_fields(&updated)?;

    let mut next: DomainGraph = graph.clone();
    for task in &mut next.tasks {
        if &task.id == id {
            *task = updated.clone();
        }
    }

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Tasks],
        created_id: None,
    })
}

fn complete_task(
    graph: &DomainGraph,
    id: &EntityId,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let existing: &Task = graph
        .task(id)
        .ok_or_else(|| CoreError::DomainViolation(DomainError::TaskNotFound(id.to_string())))?;

    // Completing twice is a no-op; the original completion timestamp
    // is kept.
    if existing.completed {
        return Ok(TransitionResult {
            new_graph: graph.clone(),
            changed: Vec::new(),
            created_id: None,
        });
    }

    let mut next: DomainGraph = graph.clone();
    for task in &mut next.tasks {
        if &task.id == id {
            task.completed = true;
            task.completed_at = Some(now);
            task.updated_at = Some(now);
        }
    }

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Tasks],
        created_id: None,
    })
}

fn delete_task(graph: &DomainGraph, id: &EntityId) -> Result<TransitionResult, CoreError> {
    if graph.task(id).is_none() {
        return Err(CoreError::DomainViolation(DomainError::TaskNotFound(
            id.to_string(),
        )));
    }

    let mut next: DomainGraph = graph.clone();
    next.tasks.retain(|task| &task.id != id);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Tasks],
        created_id: None,
    })
}

fn opportunity_from_draft(id: EntityId, draft: OpportunityDraft) -> Opportunity {
    Opportunity {
        id,
        title: draft.title,
        artist_id: draft.artist_id,
        kind: draft.kind,
        description: draft.description,
        deadline: draft.deadline,
        value: draft.value,
        status: draft.status,
        created_at: None,
        updated_at: None,
    }
}

fn create_opportunity(
    graph: &DomainGraph,
    draft: OpportunityDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    check_artist_reference(graph, "Opportunity", draft.artist_id.as_ref())?;

    let id: EntityId = EntityId::generate();
    let mut opportunity: Opportunity = opportunity_from_draft(id.clone(), draft);
    opportunity.created_at = Some(now);
    validate_opportunity_fields(&opportunity)?;

    let mut next: DomainGraph = graph.clone();
    next.opportunities.push(opportunity);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Opportunities],
        created_id: Some(id),
    })
}

fn update_opportunity(
    graph: &DomainGraph,
    id: &EntityId,
    draft: OpportunityDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let existing: &Opportunity = graph
        .opportunities
        .iter()
        .find(|opportunity| &opportunity.id == id)
        .ok_or_else(|| {
            CoreError::DomainViolation(DomainError::OpportunityNotFound(id.to_string()))
        })?;
    check_artist_reference(graph, "Opportunity", draft.artist_id.as_ref())?;

    let mut updated: Opportunity = opportunity_from_draft(id.clone(), draft);
    updated.created_at = existing.created_at;
    updated.updated_at = Some(now);
    validate_opportunity_fields(&updated)?;

    let mut next: DomainGraph = graph.clone();
    for opportunity in &mut next.opportunities {
        if &opportunity.id == id {
            *opportunity = updated.clone();
        }
    }

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Opportunities],
        created_id: None,
    })
}

fn delete_opportunity(graph: &DomainGraph, id: &EntityId) -> Result<TransitionResult, CoreError> {
    if !graph
        .opportunities
        .iter()
        .any(|opportunity| &opportunity.id == id)
    {
        return Err(CoreError::DomainViolation(
            DomainError::OpportunityNotFound(id.to_string()),
        ));
    }

    let mut next: DomainGraph = graph.clone();
    next.opportunities
        .retain(|opportunity| &opportunity.id != id);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Opportunities],
        created_id: None,
    })
}

fn crisis_from_draft(id: EntityId, draft: CrisisDraft) -> Crisis {
    Crisis {
        id,
        title: draft.title,
        artist_id: draft.artist_id,
        severity: draft.severity,
        description: draft.description,
        actions: draft.actions,
        status: draft.status,
        created_at: None,
        updated_at: None,
    }
}

fn create_crisis(
    graph: &DomainGraph,
    draft: CrisisDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    check_artist_reference(graph, "Crisis", draft.artist_id.as_ref())?;

    let id: EntityId = EntityId::generate();
    let mut crisis: Crisis = crisis_from_draft(id.clone(), draft);
    crisis.created_at = Some(now);
    validate_crisis_fields(&crisis)?;

    let mut next: DomainGraph = graph.clone();
    next.crises.push(crisis);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Crises],
        created_id: Some(id),
    })
}

fn update_crisis(
    graph: &DomainGraph,
    id: &EntityId,
    draft: CrisisDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let existing: &Crisis = graph
        .crises
        .iter()
        .find(|crisis| &crisis.id == id)
        .ok_or_else(|| CoreError::DomainViolation(DomainError::CrisisNotFound(id.to_string())))?;
    // An update may keep a reference that started dangling after its
    // artist was deleted; only a changed reference must resolve.
    if draft.artist_id != existing.artist_id {
        check_artist_reference(graph, "Crisis", draft.artist_id.as_ref())?;
    }

    let mut updated: Crisis = crisis_from_draft(id.clone(), draft);
    updated.created_at = existing.created_at;
    updated.updated_at = Some(now);
    validate_crisis_fields(&updated)?;

    let mut next: DomainGraph = graph.clone();
    for crisis in &mut next.crises {
        if &crisis.id == id {
            *crisis = updated.clone();
        }
    }

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Crises],
        created_id: None,
    })
}

fn delete_crisis(graph: &DomainGraph, id: &EntityId) -> Result<TransitionResult, CoreError> {
    if !graph.crises.iter().any(|crisis| &crisis.id == id) {
        return Err(CoreError::DomainViolation(DomainError::CrisisNotFound(
            id.to_string(),
        )));
    }

    let mut next: DomainGraph = graph.clone();
    next.crises.retain(|crisis| &crisis.id != id);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Crises],
        created_id: None,
    })
}

fn create_calendar_event(
    graph: &DomainGraph,
    draft: EventDraft,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let id: EntityId = EntityId::generate();
    let event: CalendarEvent = CalendarEvent {
        id: id.clone(),
        title: draft.title,
        date: draft.date,
        time: draft.time,
        kind: draft.kind,
        source: EventSource::Manual,
        details: draft.details,
        fee: None,
        artist: None,
        created_at: Some(now),
    };
    validate_calendar_event_fields(&event)?;

    let mut next: DomainGraph = graph.clone();
    next.calendar_events.push(event);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Calendar],
        created_id: Some(id),
    })
}

fn delete_calendar_event(
    graph: &DomainGraph,
    id: &EntityId,
) -> Result<TransitionResult, CoreError> {
    let existing: &CalendarEvent = graph
        .calendar_events
        .iter()
        .find(|event| &event.id == id)
        .ok_or_else(|| {
            CoreError::DomainViolation(DomainError::CalendarEventNotFound(id.to_string()))
        })?;
    if existing.source == EventSource::Booking {
        return Err(CoreError::DomainViolation(
            DomainError::DerivedEventImmutable(id.to_string()),
        ));
    }

    let mut next: DomainGraph = graph.clone();
    next.calendar_events.retain(|event| &event.id != id);

    Ok(TransitionResult {
        new_graph: next,
        changed: vec![Collection::Calendar],
        created_id: None,
    })
}

fn sync_calendar(graph: &DomainGraph) -> TransitionResult {
    let mut next: DomainGraph = graph.clone();
    next.calendar_events = derive_calendar_events(&next);

    TransitionResult {
        new_graph: next,
        changed: vec![Collection::Calendar],
        created_id: None,
    }
}
