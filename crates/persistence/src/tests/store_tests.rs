// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{GRAPH_FILE, INTEGRATIONS_FILE, JsonStore, export_graph, import_graph};
use encore::DomainGraph;
use encore_domain::EventSource;
use encore_gateway::{IntegrationStates, Provider};
use std::fs;
use tempfile::TempDir;

fn store() -> (TempDir, JsonStore) {
    let dir: TempDir = TempDir::new().unwrap();
    let store: JsonStore = JsonStore::new(dir.path()).unwrap();
    (dir, store)
}

#[test]
fn a_fresh_store_has_nothing() {
    let (_dir, store) = store();
    assert!(store.load_graph().is_none());
    assert!(store.load_integrations().is_none());
}

#[test]
fn graph_round_trips_through_the_store() {
    let (_dir, store) = store();
    let graph: DomainGraph = DomainGraph::seeded();

    store.save_graph(&graph).unwrap();
    let loaded: DomainGraph = store.load_graph().unwrap();
    assert_eq!(loaded, graph);
}

#[test]
fn integration_states_round_trip_through_the_store() {
    let (_dir, store) = store();
    let mut states: IntegrationStates = IntegrationStates::default();
    states.state_mut(Provider::Dropbox).connected = true;

    store.save_integrations(&states).unwrap();
    let loaded: IntegrationStates = store.load_integrations().unwrap();
    assert_eq!(loaded, states);
}

#[test]
fn missing_top_level_fields_fall_back_to_defaults() {
    let (dir, store) = store();
    // A blob from before tasks and settings existed.
    fs::write(
        dir.path().join(GRAPH_FILE),
        r#"{"artists": [], "bookings": []}"#,
    )
    .unwrap();

    let loaded: DomainGraph = store.load_graph().unwrap();
    assert!(loaded.tasks.is_empty());
    assert_eq!(loaded.settings.upcoming_window_days, 30);

    fs::write(
        dir.path().join(INTEGRATIONS_FILE),
        r#"{"notion": {"connected": true}}"#,
    )
    .unwrap();
    let states: IntegrationStates = store.load_integrations().unwrap();
    assert!(states.notion.connected);
    assert!(!states.dropbox.connected);
}

#[test]
fn corrupt_blobs_report_absence_instead_of_failing() {
    let (dir, store) = store();
    fs::write(dir.path().join(GRAPH_FILE), "{not json").unwrap();
    assert!(store.load_graph().is_none());

    fs::write(dir.path().join(GRAPH_FILE), r#"["wrong", "shape"]"#).unwrap();
    assert!(store.load_graph().is_none());
}

#[test]
fn export_then_import_preserves_the_graph() {
    let graph: DomainGraph = DomainGraph::seeded();
    let blob: String = export_graph(&graph).unwrap();
    let imported: DomainGraph = import_graph(&blob).unwrap();
    assert_eq!(imported, graph);
}

#[test]
fn import_rejects_malformed_payloads() {
    assert!(import_graph("{not json").is_err());
    assert!(import_graph("42").is_err());
}

#[test]
fn import_rebuilds_derived_calendar_entries() {
    let graph: DomainGraph = DomainGraph::seeded();
    let mut blob: serde_json::Value = serde_json::to_value(&graph).unwrap();
    // Strip the calendar from the export; derivation restores it.
    blob["calendarEvents"] = serde_json::Value::Array(Vec::new());

    let imported: DomainGraph = import_graph(&blob.to_string()).unwrap();
    assert_eq!(imported.calendar_events.len(), 5);
    assert!(
        imported
            .calendar_events
            .iter()
            .all(|event| event.source == EventSource::Booking)
    );
}
