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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error, translate_gateway_error};
pub use handlers::{
    MutationOutcome, complete_task, create_artist, create_booking, create_calendar_event,
    create_crisis, create_opportunity, create_task, dashboard, delete_artist, delete_booking,
    delete_calendar_event, delete_crisis, delete_opportunity, delete_task, export_data,
    get_artist_detail, get_month_grid, get_upcoming, import_data, list_artists, list_bookings,
    list_crises, list_integrations, list_opportunities, list_tasks, sync_calendar, update_artist,
    update_booking, update_crisis, update_opportunity, update_task,
};
pub use request_response::{
    ArtistRequest, BookingRequest, CrisisRequest, DeleteResponse, EventRequest, ImportResponse,
    IntegrationInfo, NotionTestRequest, OauthCallbackRequest, OauthUrlRequest, OauthUrlResponse,
    OpportunityRequest, SyncCalendarResponse, TaskRequest,
};
