// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    GatewayError, IntegrationStates, NotionClient, NotionUser, Provider, connect_notion,
    scan_gmail_for_bookings, sync_with_notion, token_format_is_valid, upload_to_dropbox,
};

#[test]
fn token_prefixes_are_checked() {
    assert!(token_format_is_valid("secret_abc123"));
    assert!(token_format_is_valid("ntn_abc123"));
    assert!(!token_format_is_valid("sk-abc123"));
    assert!(!token_format_is_valid(""));
}

#[tokio::test]
async fn malformed_tokens_fail_before_any_network_call() {
    // The base URL is unroutable; a network attempt would surface as a
    // Transport error instead of InvalidToken.
    let client: NotionClient = NotionClient::with_base_url("http://127.0.0.1:1");
    let err: GatewayError = client.verify_token("bogus").await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidToken(_)));
}

#[test]
fn connecting_notion_stores_token_and_identity() {
    let mut states: IntegrationStates = IntegrationStates::default();
    let user: NotionUser = NotionUser {
        id: String::from("bot-1"),
        name: String::from("Encore Bot"),
    };
    connect_notion(&mut states, "secret_abc", &user);

    let state = states.state(Provider::Notion);
    assert!(state.connected);
    assert_eq!(state.config.get("token").map(String::as_str), Some("secret_abc"));
    assert_eq!(
        state.config.get("user_name").map(String::as_str),
        Some("Encore Bot")
    );
}

#[test]
fn disconnect_clears_state_unconditionally() {
    let mut states: IntegrationStates = IntegrationStates::default();
    connect_notion(
        &mut states,
        "secret_abc",
        &NotionUser {
            id: String::from("bot-1"),
            name: String::new(),
        },
    );
    states.disconnect(Provider::Notion);

    let state = states.state(Provider::Notion);
    assert!(!state.connected);
    assert!(state.config.is_empty());

    // Disconnecting something never connected is fine too.
    states.disconnect(Provider::Gmail);
    assert!(!states.gmail.connected);
}

#[test]
fn sync_operations_require_a_connection() {
    let states: IntegrationStates = IntegrationStates::default();
    assert!(matches!(
        sync_with_notion(&states).unwrap_err(),
        GatewayError::NotConnected(Provider::Notion)
    ));
    assert!(matches!(
        upload_to_dropbox(&states, "/export.json").unwrap_err(),
        GatewayError::NotConnected(Provider::Dropbox)
    ));
    assert!(matches!(
        scan_gmail_for_bookings(&states).unwrap_err(),
        GatewayError::NotConnected(Provider::Gmail)
    ));
}

#[test]
fn sync_operations_acknowledge_when_connected() {
    let mut states: IntegrationStates = IntegrationStates::default();
    states.state_mut(Provider::Dropbox).connected = true;

    let ack = upload_to_dropbox(&states, "/export.json").unwrap();
    assert_eq!(ack.provider, Provider::Dropbox);
    assert_eq!(ack.message, "File uploaded to Dropbox");
}

#[test]
fn stored_states_use_the_camel_case_provider_keys() {
    let states: IntegrationStates = IntegrationStates::default();
    let value: serde_json::Value = serde_json::to_value(&states).unwrap();
    assert!(value.get("googleCalendar").is_some());
    assert!(value.get("googleSheets").is_some());

    // Old blobs missing a provider still parse; the provider comes
    // back with defaults.
    let partial: IntegrationStates =
        serde_json::from_str(r#"{"notion": {"connected": true}}"#).unwrap();
    assert!(partial.notion.connected);
    assert!(!partial.gmail.connected);
}
