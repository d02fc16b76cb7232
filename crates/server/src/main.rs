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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path as AxumPath, Query, State as AxumState},
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use encore::{
    ArtistDetail, Collection, DashboardSummary, DomainGraph, MonthGrid, UpcomingItem,
};
use encore_api::{
    ArtistRequest, BookingRequest, CrisisRequest, DeleteResponse, EventRequest, ImportResponse,
    IntegrationInfo, MutationOutcome, NotionTestRequest, OauthCallbackRequest, OauthUrlRequest,
    OauthUrlResponse, OpportunityRequest, SyncCalendarResponse, TaskRequest, complete_task,
    create_artist, create_booking, create_calendar_event, create_crisis, create_opportunity,
    create_task, dashboard, delete_artist, delete_booking, delete_calendar_event, delete_crisis,
    delete_opportunity, delete_task, export_data, get_artist_detail, get_month_grid,
    get_upcoming, import_data, list_artists, list_bookings, list_crises, list_integrations,
    list_opportunities, list_tasks, sync_calendar, translate_gateway_error, update_artist,
    update_booking, update_crisis, update_opportunity, update_task,
};
use encore_api::ApiError;
use encore_domain::{Artist, Booking, CalendarEvent, Crisis, EntityId, Opportunity, Task};
use encore_gateway::{
    IntegrationStates, NotionClient, NotionUser, Provider, SyncAck, authorization_url,
    complete_oauth, connect_notion, scan_gmail_for_bookings, sync_with_notion,
    update_google_sheet, upload_to_dropbox,
};
use encore_gateway::create_calendar_event as gateway_create_calendar_event;
use encore_persistence::JsonStore;

/// Encore Server - HTTP server for the Encore artist-management hub
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory for the persisted JSON blobs
    #[arg(short, long, default_value = "./data")]
    data_dir: String,

    /// Directory with the SPA assets to serve. If not provided, a
    /// built-in minimal shell is served instead.
    #[arg(short, long)]
    static_dir: Option<String>,
}

/// Application state shared across handlers.
///
/// The domain graph sits behind one mutex, so mutations and their
/// dependent re-derivations are serialized.
#[derive(Clone)]
struct AppState {
    /// The in-memory domain graph.
    graph: Arc<Mutex<DomainGraph>>,
    /// The integration connection states.
    integrations: Arc<Mutex<IntegrationStates>>,
    /// The JSON-blob store.
    store: Arc<JsonStore>,
    /// Client for the Notion identity endpoint.
    notion: NotionClient,
    /// Directory with the SPA assets, if any.
    static_dir: Option<PathBuf>,
}

/// Served when no static directory is configured and no asset matches.
const DEFAULT_SHELL: &str = "<!DOCTYPE html>\n<html>\n<head><title>Encore</title></head>\n<body><h1>Encore</h1><p>Artist management hub API is running. See /api/dashboard.</p></body>\n</html>\n";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Service status indicator.
    status: String,
    /// Human-readable status message.
    message: String,
    /// Current server time, RFC 3339.
    timestamp: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// Response for a verified Notion token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NotionTestResponse {
    /// Whether the token was accepted.
    success: bool,
    /// The identity Notion reported.
    user: NotionUser,
}

/// Generic acknowledgment response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OkResponse {
    /// Whether the operation succeeded.
    success: bool,
    /// Human-readable outcome.
    message: String,
}

/// Envelope for state-changing responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MutationEnvelope<T> {
    /// The operation's payload.
    data: T,
    /// The collections the operation touched.
    changed: Vec<Collection>,
    /// Present when the in-memory change could not be persisted; the
    /// state is still committed in memory and will be saved later.
    #[serde(skip_serializing_if = "Option::is_none")]
    storage_warning: Option<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ValidationFailed { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::UpstreamRejected { status, .. } => Self {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: err.to_string(),
            },
            ApiError::Internal { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

/// Commits a mutation under the held graph lock and saves.
///
/// Save failures are downgraded to a warning on the response; the
/// in-memory graph stays authoritative.
fn commit<T>(
    state: &AppState,
    graph: &mut DomainGraph,
    outcome: MutationOutcome<T>,
) -> MutationEnvelope<T> {
    *graph = outcome.new_graph;
    let storage_warning: Option<String> = match state.store.save_graph(graph) {
        Ok(()) => None,
        Err(err) => {
            error!("Failed to persist graph: {err}");
            Some(err.to_string())
        }
    };
    MutationEnvelope {
        data: outcome.response,
        changed: outcome.changed,
        storage_warning,
    }
}

fn save_integrations(state: &AppState, integrations: &IntegrationStates) {
    if let Err(err) = state.store.save_integrations(integrations) {
        error!("Failed to persist integration states: {err}");
    }
}

fn parse_provider(raw: &str) -> Result<Provider, HttpError> {
    Provider::from_str(raw).map_err(|_| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Unknown provider '{raw}'"),
    })
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        message: String::from("Encore artist-management hub is running"),
        timestamp: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
    })
}

async fn handle_notion_test(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<NotionTestRequest>,
) -> Result<Json<NotionTestResponse>, HttpError> {
    info!("Testing Notion token");
    let user: NotionUser = state
        .notion
        .verify_token(&req.token)
        .await
        .map_err(|err| HttpError::from(translate_gateway_error(err)))?;
    Ok(Json(NotionTestResponse {
        success: true,
        user,
    }))
}

async fn handle_dashboard(AxumState(state): AxumState<AppState>) -> Json<DashboardSummary> {
    let graph = state.graph.lock().await;
    Json(dashboard(&graph))
}

async fn handle_list_artists(AxumState(state): AxumState<AppState>) -> Json<Vec<Artist>> {
    let graph = state.graph.lock().await;
    Json(list_artists(&graph))
}

async fn handle_create_artist(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ArtistRequest>,
) -> Result<Json<MutationEnvelope<Artist>>, HttpError> {
    info!("Creating artist");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Artist> =
        create_artist(&graph, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_artist_detail(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<ArtistDetail>, HttpError> {
    let graph = state.graph.lock().await;
    Ok(Json(get_artist_detail(&graph, &id)?))
}

async fn handle_update_artist(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<ArtistRequest>,
) -> Result<Json<MutationEnvelope<Artist>>, HttpError> {
    info!("Updating artist {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Artist> =
        update_artist(&graph, &id, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_delete_artist(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MutationEnvelope<DeleteResponse>>, HttpError> {
    info!("Deleting artist {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<DeleteResponse> =
        delete_artist(&graph, &id, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_list_bookings(AxumState(state): AxumState<AppState>) -> Json<Vec<Booking>> {
    let graph = state.graph.lock().await;
    Json(list_bookings(&graph))
}

async fn handle_create_booking(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<MutationEnvelope<Booking>>, HttpError> {
    info!("Creating booking");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Booking> =
        create_booking(&graph, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_get_booking(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Booking>, HttpError> {
    let graph = state.graph.lock().await;
    graph
        .booking(&EntityId::new(&id))
        .cloned()
        .map(Json)
        .ok_or_else(|| HttpError {
            status: StatusCode::NOT_FOUND,
            message: format!("Booking '{id}' does not exist"),
        })
}

async fn handle_update_booking(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<MutationEnvelope<Booking>>, HttpError> {
    info!("Updating booking {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Booking> =
        update_booking(&graph, &id, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_delete_booking(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MutationEnvelope<DeleteResponse>>, HttpError> {
    info!("Deleting booking {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<DeleteResponse> =
        delete_booking(&graph, &id, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_list_tasks(AxumState(state): AxumState<AppState>) -> Json<Vec<Task>> {
    let graph = state.graph.lock().await;
    Json(list_tasks(&graph))
}

async fn handle_create_task(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<TaskRequest>,
) -> Result<Json<MutationEnvelope<Task>>, HttpError> {
    info!("Creating task");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Task> = create_task(&graph, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_get_task(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Task>, HttpError> {
    let graph = state.graph.lock().await;
    graph
        .task(&EntityId::new(&id))
        .cloned()
        .map(Json)
        .ok_or_else(|| HttpError {
            status: StatusCode::NOT_FOUND,
            message: format!("Task '{id}' does not exist"),
        })
}

async fn handle_update_task(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<TaskRequest>,
) -> Result<Json<MutationEnvelope<Task>>, HttpError> {
    info!("Updating task {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Task> =
        update_task(&graph, &id, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_complete_task(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MutationEnvelope<Task>>, HttpError> {
    info!("Completing task {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Task> =
        complete_task(&graph, &id, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_delete_task(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MutationEnvelope<DeleteResponse>>, HttpError> {
    info!("Deleting task {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<DeleteResponse> =
        delete_task(&graph, &id, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_list_opportunities(
    AxumState(state): AxumState<AppState>,
) -> Json<Vec<Opportunity>> {
    let graph = state.graph.lock().await;
    Json(list_opportunities(&graph))
}

async fn handle_create_opportunity(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<OpportunityRequest>,
) -> Result<Json<MutationEnvelope<Opportunity>>, HttpError> {
    info!("Creating opportunity");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Opportunity> =
        create_opportunity(&graph, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_get_opportunity(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Opportunity>, HttpError> {
    let graph = state.graph.lock().await;
    graph
        .opportunities
        .iter()
        .find(|opportunity| opportunity.id.value() == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| HttpError {
            status: StatusCode::NOT_FOUND,
            message: format!("Opportunity '{id}' does not exist"),
        })
}

async fn handle_update_opportunity(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<OpportunityRequest>,
) -> Result<Json<MutationEnvelope<Opportunity>>, HttpError> {
    info!("Updating opportunity {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Opportunity> =
        update_opportunity(&graph, &id, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_delete_opportunity(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MutationEnvelope<DeleteResponse>>, HttpError> {
    info!("Deleting opportunity {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<DeleteResponse> =
        delete_opportunity(&graph, &id, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_list_crises(AxumState(state): AxumState<AppState>) -> Json<Vec<Crisis>> {
    let graph = state.graph.lock().await;
    Json(list_crises(&graph))
}

async fn handle_create_crisis(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CrisisRequest>,
) -> Result<Json<MutationEnvelope<Crisis>>, HttpError> {
    info!("Creating crisis record");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Crisis> =
        create_crisis(&graph, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_get_crisis(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Crisis>, HttpError> {
    let graph = state.graph.lock().await;
    graph
        .crises
        .iter()
        .find(|crisis| crisis.id.value() == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| HttpError {
            status: StatusCode::NOT_FOUND,
            message: format!("Crisis '{id}' does not exist"),
        })
}

async fn handle_update_crisis(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<CrisisRequest>,
) -> Result<Json<MutationEnvelope<Crisis>>, HttpError> {
    info!("Updating crisis {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<Crisis> =
        update_crisis(&graph, &id, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_delete_crisis(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MutationEnvelope<DeleteResponse>>, HttpError> {
    info!("Deleting crisis {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<DeleteResponse> =
        delete_crisis(&graph, &id, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

/// Query parameters for the month grid.
#[derive(Debug, Clone, Copy, Deserialize)]
struct CalendarQuery {
    /// The requested year.
    year: i32,
    /// The requested month, 1 through 12.
    month: u8,
}

async fn handle_month_grid(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthGrid>, HttpError> {
    let graph = state.graph.lock().await;
    let today: time::Date = OffsetDateTime::now_utc().date();
    Ok(Json(get_month_grid(
        &graph,
        query.year,
        query.month,
        today,
    )?))
}

async fn handle_upcoming(AxumState(state): AxumState<AppState>) -> Json<Vec<UpcomingItem>> {
    let graph = state.graph.lock().await;
    Json(get_upcoming(&graph, OffsetDateTime::now_utc().date()))
}

async fn handle_sync_calendar(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<MutationEnvelope<SyncCalendarResponse>>, HttpError> {
    info!("Syncing calendar from bookings");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<SyncCalendarResponse> =
        sync_calendar(&graph, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_create_event(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<EventRequest>,
) -> Result<Json<MutationEnvelope<CalendarEvent>>, HttpError> {
    info!("Creating calendar event");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<CalendarEvent> =
        create_calendar_event(&graph, req, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_delete_event(
    AxumState(state): AxumState<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<MutationEnvelope<DeleteResponse>>, HttpError> {
    info!("Deleting calendar event {id}");
    let mut graph = state.graph.lock().await;
    let outcome: MutationOutcome<DeleteResponse> =
        delete_calendar_event(&graph, &id, OffsetDateTime::now_utc())?;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_export(AxumState(state): AxumState<AppState>) -> Result<Response, HttpError> {
    info!("Exporting data");
    let graph = state.graph.lock().await;
    let blob: String = export_data(&graph)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"artist-management-data.json\"",
            ),
        ],
        blob,
    )
        .into_response())
}

async fn handle_import(
    AxumState(state): AxumState<AppState>,
    body: String,
) -> Result<Json<MutationEnvelope<ImportResponse>>, HttpError> {
    info!("Importing data");
    let outcome: MutationOutcome<ImportResponse> = import_data(&body)?;
    let mut graph = state.graph.lock().await;
    Ok(Json(commit(&state, &mut graph, outcome)))
}

async fn handle_list_integrations(
    AxumState(state): AxumState<AppState>,
) -> Json<Vec<IntegrationInfo>> {
    let integrations = state.integrations.lock().await;
    Json(list_integrations(&integrations))
}

async fn handle_notion_connect(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<NotionTestRequest>,
) -> Result<Json<NotionTestResponse>, HttpError> {
    info!("Connecting Notion");
    let user: NotionUser = state
        .notion
        .verify_token(&req.token)
        .await
        .map_err(|err| HttpError::from(translate_gateway_error(err)))?;
    let mut integrations = state.integrations.lock().await;
    connect_notion(&mut integrations, &req.token, &user);
    save_integrations(&state, &integrations);
    Ok(Json(NotionTestResponse {
        success: true,
        user,
    }))
}

async fn handle_disconnect(
    AxumState(state): AxumState<AppState>,
    AxumPath(provider): AxumPath<String>,
) -> Result<Json<OkResponse>, HttpError> {
    info!("Disconnecting {provider}");
    let provider: Provider = parse_provider(&provider)?;
    let mut integrations = state.integrations.lock().await;
    integrations.disconnect(provider);
    save_integrations(&state, &integrations);
    Ok(Json(OkResponse {
        success: true,
        message: format!("{} disconnected", provider.display_name()),
    }))
}

async fn handle_oauth_url(
    AxumState(_state): AxumState<AppState>,
    Json(req): Json<OauthUrlRequest>,
) -> Result<Json<OauthUrlResponse>, HttpError> {
    let provider: Provider = parse_provider(&req.provider)?;
    let url = authorization_url(provider, &req.client_id, &req.redirect_uri)
        .map_err(|err| HttpError::from(translate_gateway_error(err)))?;
    Ok(Json(OauthUrlResponse {
        provider: provider.as_str().to_owned(),
        url: url.to_string(),
    }))
}

async fn handle_oauth_callback(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<OauthCallbackRequest>,
) -> Result<Json<OkResponse>, HttpError> {
    let provider: Provider = parse_provider(&req.provider)?;
    let mut integrations = state.integrations.lock().await;
    complete_oauth(&mut integrations, provider, &req.code)
        .map_err(|err| HttpError::from(translate_gateway_error(err)))?;
    save_integrations(&state, &integrations);
    Ok(Json(OkResponse {
        success: true,
        message: format!("{} connected", provider.display_name()),
    }))
}

async fn handle_integration_test(
    AxumState(state): AxumState<AppState>,
    AxumPath(provider): AxumPath<String>,
) -> Result<Json<SyncAck>, HttpError> {
    info!("Testing {provider} integration");
    let provider: Provider = parse_provider(&provider)?;
    let integrations = state.integrations.lock().await;
    let ack: SyncAck = match provider {
        Provider::Notion => sync_with_notion(&integrations),
        Provider::Dropbox => upload_to_dropbox(&integrations, "/encore-export.json"),
        Provider::GoogleCalendar => {
            gateway_create_calendar_event(&integrations, "Connectivity check")
        }
        Provider::GoogleSheets => update_google_sheet(&integrations, "primary"),
        Provider::Gmail => scan_gmail_for_bookings(&integrations),
    }
    .map_err(|err| HttpError::from(translate_gateway_error(err)))?;
    Ok(Json(ack))
}

/// Rejects path traversal: only plain named components are allowed.
fn is_safe_asset_path(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Serves static assets with an SPA fallback, matching the original
/// deployment: unknown paths get the shell so client routing works.
async fn handle_fallback(AxumState(state): AxumState<AppState>, uri: Uri) -> Response {
    let requested: &str = uri.path().trim_start_matches('/');
    if let Some(dir) = &state.static_dir {
        if is_safe_asset_path(requested) {
            let full: PathBuf = dir.join(requested);
            if let Ok(bytes) = tokio::fs::read(&full).await {
                return (
                    [(header::CONTENT_TYPE, content_type_for(&full))],
                    bytes,
                )
                    .into_response();
            }
        }
        if let Ok(shell) = tokio::fs::read_to_string(dir.join("index.html")).await {
            return Html(shell).into_response();
        }
        warn!("Static directory has no index.html, serving the built-in shell");
    }
    Html(String::from(DEFAULT_SHELL)).into_response()
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/notion/test", post(handle_notion_test))
        .route("/api/dashboard", get(handle_dashboard))
        .route(
            "/api/artists",
            get(handle_list_artists).post(handle_create_artist),
        )
        .route(
            "/api/artists/{id}",
            get(handle_artist_detail)
                .put(handle_update_artist)
                .delete(handle_delete_artist),
        )
        .route(
            "/api/bookings",
            get(handle_list_bookings).post(handle_create_booking),
        )
        .route(
            "/api/bookings/{id}",
            get(handle_get_booking)
                .put(handle_update_booking)
                .delete(handle_delete_booking),
        )
        .route("/api/tasks", get(handle_list_tasks).post(handle_create_task))
        .route(
            "/api/tasks/{id}",
            get(handle_get_task)
                .put(handle_update_task)
                .delete(handle_delete_task),
        )
        .route("/api/tasks/{id}/complete", post(handle_complete_task))
        .route(
            "/api/opportunities",
            get(handle_list_opportunities).post(handle_create_opportunity),
        )
        .route(
            "/api/opportunities/{id}",
            get(handle_get_opportunity)
                .put(handle_update_opportunity)
                .delete(handle_delete_opportunity),
        )
        .route(
            "/api/crises",
            get(handle_list_crises).post(handle_create_crisis),
        )
        .route(
            "/api/crises/{id}",
            get(handle_get_crisis)
                .put(handle_update_crisis)
                .delete(handle_delete_crisis),
        )
        .route("/api/calendar", get(handle_month_grid))
        .route("/api/calendar/upcoming", get(handle_upcoming))
        .route("/api/calendar/sync", post(handle_sync_calendar))
        .route("/api/calendar/events", post(handle_create_event))
        .route("/api/calendar/events/{id}", delete(handle_delete_event))
        .route("/api/export", get(handle_export))
        .route("/api/import", post(handle_import))
        .route("/api/integrations", get(handle_list_integrations))
        .route(
            "/api/integrations/notion/connect",
            post(handle_notion_connect),
        )
        .route("/api/integrations/oauth/url", post(handle_oauth_url))
        .route(
            "/api/integrations/oauth/callback",
            post(handle_oauth_callback),
        )
        .route(
            "/api/integrations/{provider}/disconnect",
            post(handle_disconnect),
        )
        .route(
            "/api/integrations/{provider}/test",
            post(handle_integration_test),
        )
        .fallback(handle_fallback)
        .with_state(app_state)
}

/// Periodic background save of the graph and integration states.
async fn autosave_loop(state: AppState) {
    let interval_secs: u64 = {
        let graph = state.graph.lock().await;
        graph.settings.autosave_interval_secs.max(1)
    };
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.tick().await; // first tick fires immediately
    loop {
        ticker.tick().await;
        let graph = state.graph.lock().await;
        if let Err(err) = state.store.save_graph(&graph) {
            error!("Autosave failed for graph: {err}");
        }
        drop(graph);
        let integrations = state.integrations.lock().await;
        save_integrations(&state, &integrations);
    }
}

/// Waits for ctrl-c, then saves once before shutdown.
async fn shutdown_signal(state: AppState) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to install ctrl-c handler: {err}");
        return;
    }
    info!("Shutting down, saving state");
    let graph = state.graph.lock().await;
    if let Err(err) = state.store.save_graph(&graph) {
        error!("Final save failed for graph: {err}");
    }
    drop(graph);
    let integrations = state.integrations.lock().await;
    save_integrations(&state, &integrations);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Encore server");

    let store: JsonStore = JsonStore::new(Path::new(&args.data_dir))?;
    let graph: DomainGraph = store.load_graph().unwrap_or_else(|| {
        info!("No stored graph, starting from the seeded roster");
        DomainGraph::seeded()
    });
    let integrations: IntegrationStates = store.load_integrations().unwrap_or_default();

    let app_state: AppState = AppState {
        graph: Arc::new(Mutex::new(graph)),
        integrations: Arc::new(Mutex::new(integrations)),
        store: Arc::new(store),
        notion: NotionClient::new(),
        static_dir: args.static_dir.map(PathBuf::from),
    };

    tokio::spawn(autosave_loop(app_state.clone()));

    let app: Router = build_router(app_state.clone());

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(app_state))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    /// Helper to create test app state backed by a temp directory.
    fn create_test_app_state(graph: DomainGraph) -> (tempfile::TempDir, AppState) {
        let dir: tempfile::TempDir = tempfile::TempDir::new().unwrap();
        let store: JsonStore = JsonStore::new(dir.path()).unwrap();
        let state: AppState = AppState {
            graph: Arc::new(Mutex::new(graph)),
            integrations: Arc::new(Mutex::new(IntegrationStates::default())),
            store: Arc::new(store),
            notion: NotionClient::with_base_url("http://127.0.0.1:1"),
            static_dir: None,
        };
        (dir, state)
    }

    fn json_request(method: &str, path: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let health: HealthResponse = read_json(response).await;
        assert_eq!(health.status, "ok");
    }

    #[tokio::test]
    async fn test_create_then_list_artists() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/artists",
                serde_json::json!({"name": "Nova Reine", "genre": "House"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let list_response = app
            .oneshot(
                Request::builder()
                    .uri("/api/artists")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let artists: Vec<Artist> = read_json(list_response).await;
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].name, "Nova Reine");
    }

    #[tokio::test]
    async fn test_create_artist_with_blank_name_is_rejected() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/artists",
                serde_json::json!({"name": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert!(error.error);
    }

    #[tokio::test]
    async fn test_booking_with_bad_date_is_rejected() {
        let (_dir, state) = create_test_app_state(DomainGraph::seeded());
        let app: Router = build_router(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/bookings",
                serde_json::json!({
                    "artistId": "adam-sellouk",
                    "venue": "Berlin Warehouse",
                    "date": "19/09/2025"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_complete_task_via_the_api() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state);

        let create_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/tasks",
                serde_json::json!({"title": "Send contract", "dueDate": "2025-09-10"}),
            ))
            .await
            .unwrap();
        assert_eq!(create_response.status(), HttpStatusCode::OK);
        let envelope: serde_json::Value = read_json(create_response).await;
        let id: &str = envelope["data"]["id"].as_str().unwrap();

        let complete_response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/tasks/{id}/complete"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(complete_response.status(), HttpStatusCode::OK);
        let completed: serde_json::Value = read_json(complete_response).await;
        assert_eq!(completed["data"]["completed"], true);
        assert!(completed["data"]["completedAt"].is_string());
    }

    #[tokio::test]
    async fn test_derived_calendar_events_cannot_be_deleted() {
        let (_dir, state) = create_test_app_state(DomainGraph::seeded());
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/calendar/events/cal-booking5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_month_grid_query() {
        let (_dir, state) = create_test_app_state(DomainGraph::seeded());
        let app: Router = build_router(state);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/calendar?year=2025&month=9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let grid: MonthGrid = read_json(response).await;
        assert_eq!(grid.cells.len(), 42);

        let bad_response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar?year=2025&month=13")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(bad_response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_is_a_download_and_import_restores_it() {
        let (_dir, state) = create_test_app_state(DomainGraph::seeded());
        let app: Router = build_router(state);

        let export_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(export_response.status(), HttpStatusCode::OK);
        assert!(
            export_response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .is_some()
        );
        let blob = axum::body::to_bytes(export_response.into_body(), usize::MAX)
            .await
            .unwrap();

        let import_response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/import")
                    .body(Body::from(blob))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(import_response.status(), HttpStatusCode::OK);
        let envelope: serde_json::Value = read_json(import_response).await;
        assert_eq!(envelope["data"]["artistCount"], 1);
        assert_eq!(envelope["data"]["bookingCount"], 5);
    }

    #[tokio::test]
    async fn test_import_rejects_malformed_payloads() {
        let (_dir, state) = create_test_app_state(DomainGraph::seeded());
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/import")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_notion_test_rejects_bad_token_format_offline() {
        // The test client points at an unroutable address; a 400 here
        // proves the format check fires before any network call.
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/notion/test",
                serde_json::json!({"token": "sk-wrong-prefix"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oauth_url_for_dropbox() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/integrations/oauth/url",
                serde_json::json!({
                    "provider": "dropbox",
                    "clientId": "app-key",
                    "redirectUri": "http://localhost:3000"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let url_response: OauthUrlResponse = read_json(response).await;
        assert!(url_response.url.starts_with("https://www.dropbox.com/oauth2/authorize"));
        assert!(url_response.url.contains("state=dropbox"));
    }

    #[tokio::test]
    async fn test_unknown_provider_is_rejected() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/integrations/myspace/disconnect")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_integration_test_requires_connection() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/integrations/gmail/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_oauth_callback_connects_the_provider() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/integrations/oauth/callback",
                serde_json::json!({"provider": "googleCalendar", "code": "4/abc"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let integrations = state.integrations.lock().await;
        assert!(integrations.google_calendar.connected);
    }

    #[tokio::test]
    async fn test_unknown_paths_fall_back_to_the_shell() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/some/client/route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body_bytes).contains("Encore"));
    }

    #[tokio::test]
    async fn test_mutations_persist_to_the_store() {
        let (_dir, state) = create_test_app_state(DomainGraph::default());
        let store = Arc::clone(&state.store);
        let app: Router = build_router(state);

        app.oneshot(json_request(
            "POST",
            "/api/artists",
            serde_json::json!({"name": "Nova Reine"}),
        ))
        .await
        .unwrap();

        let reloaded: DomainGraph = store.load_graph().unwrap();
        assert_eq!(reloaded.artists.len(), 1);
    }

    #[test]
    fn test_asset_paths_reject_traversal() {
        assert!(is_safe_asset_path("index.html"));
        assert!(is_safe_asset_path("assets/app.js"));
        assert!(!is_safe_asset_path("../secrets.txt"));
        assert!(!is_safe_asset_path("assets/../../etc/passwd"));
        assert!(!is_safe_asset_path("/etc/passwd"));
        assert!(!is_safe_asset_path(""));
    }
}
