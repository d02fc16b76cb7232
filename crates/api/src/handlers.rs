// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use std::str::FromStr;
use time::{Date, OffsetDateTime};

use encore::{
    ArtistDetail, ArtistDraft, BookingDraft, Collection, Command, CrisisDraft, DashboardSummary,
    DomainGraph, EventDraft, MonthGrid, OpportunityDraft, TaskDraft, TransitionResult,
    UpcomingItem, apply, artist_detail, dashboard_summary, month_grid, upcoming,
};
use encore_domain::{
    Artist, ArtistStatus, Booking, BookingStatus, BookingType, CalendarEvent, Crisis,
    CrisisSeverity, CrisisStatus, DomainError, EntityId, EventKind, Opportunity,
    OpportunityStatus, OpportunityType, Task, TaskPriority, parse_date,
};
use encore_gateway::{IntegrationStates, Provider};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ArtistRequest, BookingRequest, CrisisRequest, DeleteResponse, EventRequest, ImportResponse,
    IntegrationInfo, OpportunityRequest, SyncCalendarResponse, TaskRequest,
};

/// The result of a state-changing API operation.
///
/// The caller owns committing `new_graph`; until then the mutation has
/// not happened anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome<T> {
    /// The API response.
    pub response: T,
    /// The graph after the operation.
    pub new_graph: DomainGraph,
    /// The collections the operation touched.
    pub changed: Vec<Collection>,
}

fn parse_date_field(field: &str, raw: &str) -> Result<Date, ApiError> {
    parse_date(raw).map_err(|err| match err {
        DomainError::DateParse { input, message } => ApiError::ValidationFailed {
            field: field.to_owned(),
            message: format!("Failed to parse date '{input}': {message}"),
        },
        other => translate_domain_error(other),
    })
}

/// Parses a status/type/priority token, treating the empty string as
/// the type's default.
fn parse_token<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError> + Default,
{
    if raw.is_empty() {
        Ok(T::default())
    } else {
        T::from_str(raw).map_err(translate_domain_error)
    }
}

fn artist_draft(request: ArtistRequest) -> Result<ArtistDraft, ApiError> {
    Ok(ArtistDraft {
        name: request.name,
        genre: request.genre,
        status: parse_token::<ArtistStatus>(&request.status)?,
        email: request.email,
        phone: request.phone,
        monthly_revenue: request.monthly_revenue,
        milestone: request.milestone,
        progress: request.progress,
        next_goals: request.next_goals,
        social_media: request.social_media,
    })
}

fn booking_draft(request: BookingRequest) -> Result<BookingDraft, ApiError> {
    Ok(BookingDraft {
        artist_id: EntityId::new(&request.artist_id),
        venue: request.venue,
        date: parse_date_field("date", &request.date)?,
        time: request.time,
        fee: request.fee,
        status: parse_token::<BookingStatus>(&request.status)?,
        kind: parse_token::<BookingType>(&request.kind)?,
        details: request.details,
    })
}

fn task_draft(request: TaskRequest) -> Result<TaskDraft, ApiError> {
    Ok(TaskDraft {
        title: request.title,
        artist_id: request.artist_id.map(|id| EntityId::new(&id)),
        due_date: parse_date_field("dueDate", &request.due_date)?,
        priority: parse_token::<TaskPriority>(&request.priority)?,
        description: request.description,
    })
}

fn opportunity_draft(request: OpportunityRequest) -> Result<OpportunityDraft, ApiError> {
    Ok(OpportunityDraft {
        title: request.title,
        artist_id: request.artist_id.map(|id| EntityId::new(&id)),
        kind: parse_token::<OpportunityType>(&request.kind)?,
        description: request.description,
        deadline: parse_date_field("deadline", &request.deadline)?,
        value: request.value,
        status: parse_token::<OpportunityStatus>(&request.status)?,
    })
}

fn crisis_draft(request: CrisisRequest) -> Result<CrisisDraft, ApiError> {
    Ok(CrisisDraft {
        title: request.title,
        artist_id: request.artist_id.map(|id| EntityId::new(&id)),
        severity: parse_token::<CrisisSeverity>(&request.severity)?,
        description: request.description,
        actions: request.actions,
        status: parse_token::<CrisisStatus>(&request.status)?,
    })
}

fn event_draft(request: EventRequest) -> Result<EventDraft, ApiError> {
    Ok(EventDraft {
        title: request.title,
        date: parse_date_field("date", &request.date)?,
        time: request.time,
        kind: parse_token::<EventKind>(&request.kind)?,
        details: request.details,
    })
}

fn run_command(
    graph: &DomainGraph,
    command: Command,
    now: OffsetDateTime,
) -> Result<TransitionResult, ApiError> {
    apply(graph, command, now).map_err(translate_core_error)
}

fn created_id(result: &TransitionResult) -> Result<EntityId, ApiError> {
    result.created_id.clone().ok_or_else(|| ApiError::Internal {
        message: String::from("Create operation reported no id"),
    })
}

fn deleted(result: TransitionResult, id: &EntityId, what: &str) -> MutationOutcome<DeleteResponse> {
    MutationOutcome {
        response: DeleteResponse {
            id: id.to_string(),
            message: format!("{what} deleted"),
        },
        new_graph: result.new_graph,
        changed: result.changed,
    }
}

/// Creates an artist.
///
/// # Errors
///
/// Returns `ApiError` if the request fails validation.
pub fn create_artist(
    graph: &DomainGraph,
    request: ArtistRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Artist>, ApiError> {
    let result: TransitionResult =
        run_command(graph, Command::CreateArtist(artist_draft(request)?), now)?;
    let id: EntityId = created_id(&result)?;
    let response: Artist = result
        .new_graph
        .artist(&id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Created artist is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Updates an artist.
///
/// # Errors
///
/// Returns `ApiError` if the artist does not exist or the request
/// fails validation.
pub fn update_artist(
    graph: &DomainGraph,
    id: &str,
    request: ArtistRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Artist>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(
        graph,
        Command::UpdateArtist(id.clone(), artist_draft(request)?),
        now,
    )?;
    let response: Artist = result
        .new_graph
        .artist(&id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Updated artist is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Deletes an artist and everything scoped to them except crises.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the artist does not exist.
pub fn delete_artist(
    graph: &DomainGraph,
    id: &str,
    now: OffsetDateTime,
) -> Result<MutationOutcome<DeleteResponse>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(graph, Command::DeleteArtist(id.clone()), now)?;
    Ok(deleted(result, &id, "Artist"))
}

/// Creates a booking.
///
/// # Errors
///
/// Returns `ApiError` if the request fails validation or references a
/// missing artist.
pub fn create_booking(
    graph: &DomainGraph,
    request: BookingRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Booking>, ApiError> {
    let result: TransitionResult =
        run_command(graph, Command::CreateBooking(booking_draft(request)?), now)?;
    let id: EntityId = created_id(&result)?;
    let response: Booking = result
        .new_graph
        .booking(&id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Created booking is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Updates a booking.
///
/// # Errors
///
/// Returns `ApiError` if the booking does not exist or the request
/// fails validation.
pub fn update_booking(
    graph: &DomainGraph,
    id: &str,
    request: BookingRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Booking>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(
        graph,
        Command::UpdateBooking(id.clone(), booking_draft(request)?),
        now,
    )?;
    let response: Booking = result
        .new_graph
        .booking(&id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Updated booking is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Deletes a booking and its derived calendar entry.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the booking does not exist.
pub fn delete_booking(
    graph: &DomainGraph,
    id: &str,
    now: OffsetDateTime,
) -> Result<MutationOutcome<DeleteResponse>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(graph, Command::DeleteBooking(id.clone()), now)?;
    Ok(deleted(result, &id, "Booking"))
}

/// Creates a task.
///
/// # Errors
///
/// Returns `ApiError` if the request fails validation or references a
/// missing artist.
pub fn create_task(
    graph: &DomainGraph,
    request: TaskRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Task>, ApiError> {
    let result: TransitionResult =
        run_command(graph, Command::CreateTask(task_draft(request)?), now)?;
    let id: EntityId = created_id(&result)?;
    let response: Task = result
        .new_graph
        .task(&id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Created task is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Updates a task's fields, leaving its completion state alone.
///
/// # Errors
///
/// Returns `ApiError` if the task does not exist or the request fails
/// validation.
pub fn update_task(
    graph: &DomainGraph,
    id: &str,
    request: TaskRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Task>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(
        graph,
        Command::UpdateTask(id.clone(), task_draft(request)?),
        now,
    )?;
    let response: Task = result
        .new_graph
        .task(&id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Updated task is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Marks a task complete. Completing twice is a no-op.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the task does not exist.
pub fn complete_task(
    graph: &DomainGraph,
    id: &str,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Task>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(graph, Command::CompleteTask(id.clone()), now)?;
    let response: Task = result
        .new_graph
        .task(&id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Completed task is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Deletes a task.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the task does not exist.
pub fn delete_task(
    graph: &DomainGraph,
    id: &str,
    now: OffsetDateTime,
) -> Result<MutationOutcome<DeleteResponse>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(graph, Command::DeleteTask(id.clone()), now)?;
    Ok(deleted(result, &id, "Task"))
}

/// Creates an opportunity.
///
/// # Errors
///
/// Returns `ApiError` if the request fails validation or references a
/// missing artist.
pub fn create_opportunity(
    graph: &DomainGraph,
    request: OpportunityRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Opportunity>, ApiError> {
    let result: TransitionResult = run_command(
        graph,
        Command::CreateOpportunity(opportunity_draft(request)?),
        now,
    )?;
    let id: EntityId = created_id(&result)?;
    let response: Opportunity = result
        .new_graph
        .opportunities
        .iter()
        .find(|opportunity| opportunity.id == id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Created opportunity is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Updates an opportunity.
///
/// # Errors
///
/// Returns `ApiError` if the opportunity does not exist or the request
/// fails validation.
pub fn update_opportunity(
    graph: &DomainGraph,
    id: &str,
    request: OpportunityRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Opportunity>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(
        graph,
        Command::UpdateOpportunity(id.clone(), opportunity_draft(request)?),
        now,
    )?;
    let response: Opportunity = result
        .new_graph
        .opportunities
        .iter()
        .find(|opportunity| opportunity.id == id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Updated opportunity is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Deletes an opportunity.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the opportunity does not
/// exist.
pub fn delete_opportunity(
    graph: &DomainGraph,
    id: &str,
    now: OffsetDateTime,
) -> Result<MutationOutcome<DeleteResponse>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult =
        run_command(graph, Command::DeleteOpportunity(id.clone()), now)?;
    Ok(deleted(result, &id, "Opportunity"))
}

/// Creates a crisis record.
///
/// # Errors
///
/// Returns `ApiError` if the request fails validation or references a
/// missing artist.
pub fn create_crisis(
    graph: &DomainGraph,
    request: CrisisRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Crisis>, ApiError> {
    let result: TransitionResult =
        run_command(graph, Command::CreateCrisis(crisis_draft(request)?), now)?;
    let id: EntityId = created_id(&result)?;
    let response: Crisis = result
        .new_graph
        .crises
        .iter()
        .find(|crisis| crisis.id == id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Created crisis is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Updates a crisis record.
///
/// # Errors
///
/// Returns `ApiError` if the crisis does not exist or the request
/// fails validation.
pub fn update_crisis(
    graph: &DomainGraph,
    id: &str,
    request: CrisisRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<Crisis>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(
        graph,
        Command::UpdateCrisis(id.clone(), crisis_draft(request)?),
        now,
    )?;
    let response: Crisis = result
        .new_graph
        .crises
        .iter()
        .find(|crisis| crisis.id == id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Updated crisis is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Deletes a crisis record.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the crisis does not exist.
pub fn delete_crisis(
    graph: &DomainGraph,
    id: &str,
    now: OffsetDateTime,
) -> Result<MutationOutcome<DeleteResponse>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult = run_command(graph, Command::DeleteCrisis(id.clone()), now)?;
    Ok(deleted(result, &id, "Crisis"))
}

/// Creates a manual calendar event.
///
/// # Errors
///
/// Returns `ApiError` if the request fails validation.
pub fn create_calendar_event(
    graph: &DomainGraph,
    request: EventRequest,
    now: OffsetDateTime,
) -> Result<MutationOutcome<CalendarEvent>, ApiError> {
    let result: TransitionResult = run_command(
        graph,
        Command::CreateCalendarEvent(event_draft(request)?),
        now,
    )?;
    let id: EntityId = created_id(&result)?;
    let response: CalendarEvent = result
        .new_graph
        .calendar_events
        .iter()
        .find(|event| event.id == id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Created event is missing from the new graph"),
        })?;
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Deletes a manual or integration calendar event.
///
/// # Errors
///
/// Returns `ApiError` if the event does not exist or is derived from a
/// booking.
pub fn delete_calendar_event(
    graph: &DomainGraph,
    id: &str,
    now: OffsetDateTime,
) -> Result<MutationOutcome<DeleteResponse>, ApiError> {
    let id: EntityId = EntityId::new(id);
    let result: TransitionResult =
        run_command(graph, Command::DeleteCalendarEvent(id.clone()), now)?;
    Ok(deleted(result, &id, "Calendar event"))
}

/// Rebuilds the booking-derived calendar entries.
///
/// # Errors
///
/// Returns `ApiError::Internal` only on an internal transition fault.
pub fn sync_calendar(
    graph: &DomainGraph,
    now: OffsetDateTime,
) -> Result<MutationOutcome<SyncCalendarResponse>, ApiError> {
    let result: TransitionResult = run_command(graph, Command::SyncCalendar, now)?;
    let response: SyncCalendarResponse = SyncCalendarResponse {
        event_count: result.new_graph.calendar_events.len(),
        message: String::from("Calendar synced from bookings"),
    };
    Ok(MutationOutcome {
        response,
        new_graph: result.new_graph,
        changed: result.changed,
    })
}

/// Computes the dashboard counters.
#[must_use]
pub fn dashboard(graph: &DomainGraph) -> DashboardSummary {
    dashboard_summary(graph)
}

/// Lists all artists.
#[must_use]
pub fn list_artists(graph: &DomainGraph) -> Vec<Artist> {
    graph.artists.clone()
}

/// Lists all bookings.
#[must_use]
pub fn list_bookings(graph: &DomainGraph) -> Vec<Booking> {
    graph.bookings.clone()
}

/// Lists all tasks.
#[must_use]
pub fn list_tasks(graph: &DomainGraph) -> Vec<Task> {
    graph.tasks.clone()
}

/// Lists all opportunities.
#[must_use]
pub fn list_opportunities(graph: &DomainGraph) -> Vec<Opportunity> {
    graph.opportunities.clone()
}

/// Lists all crisis records.
#[must_use]
pub fn list_crises(graph: &DomainGraph) -> Vec<Crisis> {
    graph.crises.clone()
}

/// Returns one artist with everything scoped to them.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the artist does not exist.
pub fn get_artist_detail(graph: &DomainGraph, id: &str) -> Result<ArtistDetail, ApiError> {
    artist_detail(graph, &EntityId::new(id)).ok_or_else(|| ApiError::ResourceNotFound {
        resource_type: String::from("Artist"),
        message: format!("Artist '{id}' does not exist"),
    })
}

/// Builds the 42-cell calendar grid for a month.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` if the year/month pair is
/// invalid.
pub fn get_month_grid(
    graph: &DomainGraph,
    year: i32,
    month: u8,
    today: Date,
) -> Result<MonthGrid, ApiError> {
    month_grid(graph, year, month, today).map_err(translate_core_error)
}

/// Builds the upcoming list.
#[must_use]
pub fn get_upcoming(graph: &DomainGraph, today: Date) -> Vec<UpcomingItem> {
    upcoming(graph, today)
}

/// Serializes the graph as a downloadable blob.
///
/// # Errors
///
/// Returns `ApiError::Internal` if serialization fails.
pub fn export_data(graph: &DomainGraph) -> Result<String, ApiError> {
    encore_persistence::export_graph(graph).map_err(|err| ApiError::Internal {
        message: err.to_string(),
    })
}

/// Replaces the entire graph with an imported blob.
///
/// All-or-nothing: malformed input fails with no partial state change,
/// and the derived calendar entries are rebuilt from the imported
/// bookings.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` on malformed JSON.
pub fn import_data(raw: &str) -> Result<MutationOutcome<ImportResponse>, ApiError> {
    let new_graph: DomainGraph =
        encore_persistence::import_graph(raw).map_err(|err| ApiError::ValidationFailed {
            field: String::from("body"),
            message: err.to_string(),
        })?;
    let response: ImportResponse = ImportResponse {
        artist_count: new_graph.artists.len(),
        booking_count: new_graph.bookings.len(),
        message: String::from("Data imported"),
    };
    Ok(MutationOutcome {
        response,
        new_graph,
        changed: vec![
            Collection::Artists,
            Collection::Bookings,
            Collection::Tasks,
            Collection::Opportunities,
            Collection::Crises,
            Collection::Calendar,
        ],
    })
}

/// Summarizes every provider's connection state.
#[must_use]
pub fn list_integrations(states: &IntegrationStates) -> Vec<IntegrationInfo> {
    Provider::ALL
        .iter()
        .map(|provider| IntegrationInfo {
            provider: provider.as_str().to_owned(),
            name: provider.display_name().to_owned(),
            connected: states.state(*provider).connected,
            scopes: provider
                .scopes()
                .iter()
                .map(|scope| (*scope).to_owned())
                .collect(),
        })
        .collect()
}
