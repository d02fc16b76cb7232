// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::GatewayError;
use crate::provider::{IntegrationStates, Provider};
use tracing::info;
use url::Url;

const DROPBOX_AUTHORIZE: &str = "https://www.dropbox.com/oauth2/authorize";
const GOOGLE_AUTHORIZE: &str = "https://accounts.google.com/oauth2/authorize";

/// Builds the authorization URL a user must visit to connect an OAuth
/// provider.
///
/// The `state` query parameter carries the provider key so the
/// callback can tell which service is completing. The redirect itself
/// and the code-for-token exchange happen outside this process.
///
/// # Errors
///
/// Returns `GatewayError::OauthUnsupported` for Notion, which connects
/// by integration token instead.
pub fn authorization_url(
    provider: Provider,
    client_id: &str,
    redirect_uri: &str,
) -> Result<Url, GatewayError> {
    if !provider.uses_oauth() {
        return Err(GatewayError::OauthUnsupported(provider));
    }

    let base: &str = match provider {
        Provider::Dropbox => DROPBOX_AUTHORIZE,
        _ => GOOGLE_AUTHORIZE,
    };
    let mut url: Url =
        Url::parse(base).map_err(|err| GatewayError::UrlConstruction(err.to_string()))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("client_id", client_id);
        pairs.append_pair("redirect_uri", redirect_uri);
        if provider != Provider::Dropbox {
            pairs.append_pair("scope", &provider.scopes().join(" "));
        }
        pairs.append_pair("response_type", "code");
        pairs.append_pair("state", provider.as_str());
    }

    Ok(url)
}

/// Completes an OAuth connection with the code returned to the
/// callback.
///
/// The code is stored as opaque configuration; exchanging it for an
/// access token is a followup performed outside this process.
///
/// # Errors
///
/// Returns `GatewayError::OauthUnsupported` for Notion.
pub fn complete_oauth(
    states: &mut IntegrationStates,
    provider: Provider,
    code: &str,
) -> Result<(), GatewayError> {
    if !provider.uses_oauth() {
        return Err(GatewayError::OauthUnsupported(provider));
    }

    let state = states.state_mut(provider);
    state.connected = true;
    state.config.clear();
    state
        .config
        .insert(String::from("auth_code"), code.to_owned());
    info!("{} connected via OAuth", provider.display_name());
    Ok(())
}
