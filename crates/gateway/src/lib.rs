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

mod error;
mod notion;
mod oauth;
mod provider;
mod sync;

#[cfg(test)]
mod tests;

pub use error::GatewayError;
pub use notion::{NOTION_VERSION, NotionClient, NotionUser, connect_notion, token_format_is_valid};
pub use oauth::{authorization_url, complete_oauth};
pub use provider::{ConnectionState, IntegrationStates, Provider};
pub use sync::{
    SyncAck, create_calendar_event, scan_gmail_for_bookings, sync_with_notion,
    update_google_sheet, upload_to_dropbox,
};
