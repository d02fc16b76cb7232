// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::provider::Provider;

/// Errors that can occur in the integration gateway.
#[derive(Debug)]
pub enum GatewayError {
    /// The supplied token does not match the provider's format.
    InvalidToken(String),
    /// An operation requires a provider that is not connected.
    NotConnected(Provider),
    /// The provider does not use the OAuth authorization flow.
    OauthUnsupported(Provider),
    /// The upstream service rejected the request.
    Upstream {
        /// The upstream HTTP status code.
        status: u16,
        /// The upstream error body, or a summary of it.
        message: String,
    },
    /// The request never reached the upstream service.
    Transport(String),
    /// A URL could not be constructed.
    UrlConstruction(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidToken(message) => write!(f, "Invalid token format: {message}"),
            Self::NotConnected(provider) => {
                write!(f, "{} not connected", provider.display_name())
            }
            Self::OauthUnsupported(provider) => {
                write!(f, "{} does not use OAuth authorization", provider.display_name())
            }
            Self::Upstream { status, message } => {
                write!(f, "Upstream request failed with status {status}: {message}")
            }
            Self::Transport(message) => write!(f, "Upstream request failed: {message}"),
            Self::UrlConstruction(message) => {
                write!(f, "Failed to build authorization URL: {message}")
            }
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
