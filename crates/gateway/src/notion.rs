// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::GatewayError;
use crate::provider::{IntegrationStates, Provider};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// The Notion API version header value this gateway speaks.
pub const NOTION_VERSION: &str = "2022-06-28";

const NOTION_API_BASE: &str = "https://api.notion.com";

/// Checks whether a string looks like a Notion integration token.
///
/// Both the legacy `secret_` prefix and the current `ntn_` prefix are
/// accepted. This check runs before any network call so obviously bad
/// input fails fast.
#[must_use]
pub fn token_format_is_valid(token: &str) -> bool {
    token.starts_with("secret_") || token.starts_with("ntn_")
}

/// The identity Notion reports for an integration token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotionUser {
    /// Notion user id.
    pub id: String,
    /// Display name of the bot or user.
    #[serde(default)]
    pub name: String,
}

/// A thin client for the Notion identity endpoint.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for NotionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NotionClient {
    /// Creates a client pointed at the public Notion API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: String::from(NOTION_API_BASE),
        }
    }

    /// Creates a client pointed at an alternate base URL.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Verifies a token against `GET /v1/users/me`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidToken` without touching the
    /// network if the token prefix is wrong, `GatewayError::Upstream`
    /// if Notion rejects the token, and `GatewayError::Transport` if
    /// the request never completes.
    pub async fn verify_token(&self, token: &str) -> Result<NotionUser, GatewayError> {
        if !token_format_is_valid(token) {
            return Err(GatewayError::InvalidToken(String::from(
                "Token should start with \"secret_\" or \"ntn_\"",
            )));
        }

        let url: String = format!("{}/v1/users/me", self.base_url);
        let response: reqwest::Response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await?;

        let status: u16 = response.status().as_u16();
        if status == 200 {
            let user: NotionUser = response.json().await?;
            info!("Notion token verified for user {}", user.id);
            Ok(user)
        } else {
            let message: String = response.text().await.unwrap_or_default();
            warn!("Notion rejected token verification with status {status}");
            Err(GatewayError::Upstream { status, message })
        }
    }
}

/// Marks Notion connected, storing the token and verified identity.
///
/// Call after `NotionClient::verify_token` succeeds; on verification
/// failure the stored state must stay untouched.
pub fn connect_notion(states: &mut IntegrationStates, token: &str, user: &NotionUser) {
    let state = states.state_mut(Provider::Notion);
    state.connected = true;
    state.config.clear();
    state
        .config
        .insert(String::from("token"), token.to_owned());
    state
        .config
        .insert(String::from("user_id"), user.id.clone());
    state
        .config
        .insert(String::from("user_name"), user.name.clone());
}
