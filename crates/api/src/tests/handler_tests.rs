// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::test_now;
use crate::{
    ApiError, ArtistRequest, MutationOutcome, TaskRequest, complete_task, create_artist,
    create_task, delete_artist, delete_calendar_event, export_data, get_artist_detail,
    import_data, list_integrations,
};
use encore::{Collection, DomainGraph};
use encore_domain::{Artist, Money, Progress, Task};
use encore_gateway::IntegrationStates;
use std::collections::BTreeMap;

fn artist_request(name: &str) -> ArtistRequest {
    ArtistRequest {
        name: String::from(name),
        genre: String::from("House"),
        status: String::from("developing"),
        email: String::new(),
        phone: String::new(),
        monthly_revenue: Money::new(1000.0),
        milestone: String::new(),
        progress: Progress::new(10),
        next_goals: String::new(),
        social_media: BTreeMap::new(),
    }
}

#[test]
fn creating_an_artist_returns_the_stored_record() {
    let graph: DomainGraph = DomainGraph::default();
    let outcome: MutationOutcome<Artist> =
        create_artist(&graph, artist_request("Nova Reine"), test_now()).unwrap();

    assert_eq!(outcome.response.name, "Nova Reine");
    assert!(!outcome.response.id.is_empty());
    assert_eq!(outcome.changed, vec![Collection::Artists]);
    assert_eq!(outcome.new_graph.artists.len(), 1);
}

#[test]
fn deleting_a_missing_artist_is_not_found() {
    let graph: DomainGraph = DomainGraph::default();
    let err: ApiError = delete_artist(&graph, "ghost", test_now()).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn completing_a_task_twice_reports_no_changes() {
    let graph: DomainGraph = DomainGraph::default();
    let created: MutationOutcome<Task> = create_task(
        &graph,
        TaskRequest {
            title: String::from("Send contract"),
            artist_id: None,
            due_date: String::from("2025-09-10"),
            priority: String::from("high"),
            description: String::new(),
        },
        test_now(),
    )
    .unwrap();
    let id: String = created.response.id.to_string();

    let first: MutationOutcome<Task> =
        complete_task(&created.new_graph, &id, test_now()).unwrap();
    assert!(first.response.completed);
    assert_eq!(first.changed, vec![Collection::Tasks]);

    let second: MutationOutcome<Task> =
        complete_task(&first.new_graph, &id, test_now()).unwrap();
    assert!(second.response.completed);
    assert!(second.changed.is_empty());
}

#[test]
fn derived_calendar_entries_are_protected() {
    let graph: DomainGraph = DomainGraph::seeded();
    let err: ApiError = delete_calendar_event(&graph, "cal-booking5", test_now()).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
}

#[test]
fn artist_detail_is_not_found_for_unknown_ids() {
    let graph: DomainGraph = DomainGraph::seeded();
    assert!(get_artist_detail(&graph, "adam-sellouk").is_ok());
    assert!(matches!(
        get_artist_detail(&graph, "ghost").unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
}

#[test]
fn export_import_replaces_the_whole_graph() {
    let graph: DomainGraph = DomainGraph::seeded();
    let blob: String = export_data(&graph).unwrap();

    let outcome = import_data(&blob).unwrap();
    assert_eq!(outcome.new_graph, graph);
    assert_eq!(outcome.response.artist_count, 1);
    assert_eq!(outcome.response.booking_count, 5);
    // Everything is re-reported after a full replace.
    assert_eq!(outcome.changed.len(), 6);
}

#[test]
fn import_rejects_malformed_payloads() {
    let err: ApiError = import_data("{not json").unwrap_err();
    assert!(matches!(
        err,
        ApiError::ValidationFailed { ref field, .. } if field == "body"
    ));
}

#[test]
fn integrations_list_every_provider() {
    let states: IntegrationStates = IntegrationStates::default();
    let infos = list_integrations(&states);
    assert_eq!(infos.len(), 5);
    assert!(infos.iter().all(|info| !info.connected));
    assert!(infos.iter().any(|info| info.provider == "googleCalendar"));
    let notion = infos.iter().find(|info| info.provider == "notion").unwrap();
    assert_eq!(notion.scopes.len(), 3);
}
