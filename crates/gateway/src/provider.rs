// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A third-party service the hub can connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provider {
    /// Notion workspace, connected by integration token.
    Notion,
    /// Dropbox file storage, connected over OAuth.
    Dropbox,
    /// Google Calendar, connected over OAuth.
    GoogleCalendar,
    /// Google Sheets, connected over OAuth.
    GoogleSheets,
    /// Gmail, connected over OAuth.
    Gmail,
}

impl Provider {
    /// Every provider, in display order.
    pub const ALL: [Self; 5] = [
        Self::Notion,
        Self::Dropbox,
        Self::GoogleCalendar,
        Self::GoogleSheets,
        Self::Gmail,
    ];

    /// Returns the wire key of this provider.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Notion => "notion",
            Self::Dropbox => "dropbox",
            Self::GoogleCalendar => "googleCalendar",
            Self::GoogleSheets => "googleSheets",
            Self::Gmail => "gmail",
        }
    }

    /// Returns the human-readable service name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Notion => "Notion",
            Self::Dropbox => "Dropbox",
            Self::GoogleCalendar => "Google Calendar",
            Self::GoogleSheets => "Google Sheets",
            Self::Gmail => "Gmail",
        }
    }

    /// The authorization scopes requested when connecting.
    #[must_use]
    pub const fn scopes(&self) -> &'static [&'static str] {
        match self {
            Self::Notion => &["read_content", "insert_content", "update_content"],
            Self::Dropbox => &["files.content.read", "files.content.write"],
            Self::GoogleCalendar => &["https://www.googleapis.com/auth/calendar"],
            Self::GoogleSheets => &["https://www.googleapis.com/auth/spreadsheets"],
            Self::Gmail => &["https://www.googleapis.com/auth/gmail.readonly"],
        }
    }

    /// Whether this provider connects through the OAuth redirect flow.
    #[must_use]
    pub const fn uses_oauth(&self) -> bool {
        !matches!(self, Self::Notion)
    }
}

impl FromStr for Provider {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notion" => Ok(Self::Notion),
            "dropbox" => Ok(Self::Dropbox),
            "googleCalendar" => Ok(Self::GoogleCalendar),
            "googleSheets" => Ok(Self::GoogleSheets),
            "gmail" => Ok(Self::Gmail),
            _ => Err(GatewayError::InvalidToken(format!(
                "unknown provider '{s}'"
            ))),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The stored connection state of one provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    /// Whether the provider is currently connected.
    #[serde(default)]
    pub connected: bool,
    /// Opaque provider configuration: tokens, auth codes, identity.
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// The connection state of every provider, persisted as one blob.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationStates {
    /// Notion connection state.
    #[serde(default)]
    pub notion: ConnectionState,
    /// Dropbox connection state.
    #[serde(default)]
    pub dropbox: ConnectionState,
    /// Google Calendar connection state.
    #[serde(default)]
    pub google_calendar: ConnectionState,
    /// Google Sheets connection state.
    #[serde(default)]
    pub google_sheets: ConnectionState,
    /// Gmail connection state.
    #[serde(default)]
    pub gmail: ConnectionState,
}

impl IntegrationStates {
    /// Returns the state of one provider.
    #[must_use]
    pub const fn state(&self, provider: Provider) -> &ConnectionState {
        match provider {
            Provider::Notion => &self.notion,
            Provider::Dropbox => &self.dropbox,
            Provider::GoogleCalendar => &self.google_calendar,
            Provider::GoogleSheets => &self.google_sheets,
            Provider::Gmail => &self.gmail,
        }
    }

    /// Returns the mutable state of one provider.
    pub const fn state_mut(&mut self, provider: Provider) -> &mut ConnectionState {
        match provider {
            Provider::Notion => &mut self.notion,
            Provider::Dropbox => &mut self.dropbox,
            Provider::GoogleCalendar => &mut self.google_calendar,
            Provider::GoogleSheets => &mut self.google_sheets,
            Provider::Gmail => &mut self.gmail,
        }
    }

    /// Disconnects a provider, dropping its stored configuration.
    pub fn disconnect(&mut self, provider: Provider) {
        let state: &mut ConnectionState = self.state_mut(provider);
        state.connected = false;
        state.config.clear();
    }
}
