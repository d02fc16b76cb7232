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

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use encore::{DomainGraph, derive_calendar_events};
use encore_gateway::IntegrationStates;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key for the domain graph.
pub const GRAPH_FILE: &str = "artistManagementData.json";

/// Storage key for the integration connection states.
pub const INTEGRATIONS_FILE: &str = "integrationStates.json";

/// A JSON-blob store rooted at a data directory.
///
/// Each storage key is one file holding one serialized structure. Loads
/// soft-fail: a missing, unreadable, or unparsable blob reports absence
/// so the caller can fall back to defaults instead of refusing to
/// start.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Opens a store rooted at `data_dir`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Io` if the directory cannot be
    /// created.
    pub fn new(data_dir: &Path) -> Result<Self, PersistenceError> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// The directory this store reads and writes.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_value(&self, file: &str) -> Option<Value> {
        let path: PathBuf = self.data_dir.join(file);
        let raw: String = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No stored blob at {}", path.display());
                return None;
            }
            Err(err) => {
                warn!("Failed to read {}: {err}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Ignoring unparsable blob at {}: {err}", path.display());
                None
            }
        }
    }

    fn write_value<T: Serialize>(&self, file: &str, value: &T) -> Result<(), PersistenceError> {
        let path: PathBuf = self.data_dir.join(file);
        let raw: String = serde_json::to_string_pretty(value)?;
        fs::write(&path, raw)?;
        Ok(())
    }

    /// Loads the domain graph, or reports absence.
    ///
    /// The stored blob is shallow-merged onto the default graph at the
    /// top level only: a top-level field missing from old data falls
    /// back to its default, but nested structures are taken wholesale
    /// from whichever side supplies them.
    #[must_use]
    pub fn load_graph(&self) -> Option<DomainGraph> {
        let stored: Value = self.read_value(GRAPH_FILE)?;
        let merged: Value = merge_onto_default(&DomainGraph::default(), stored)?;
        match serde_json::from_value(merged) {
            Ok(graph) => Some(graph),
            Err(err) => {
                warn!("Stored graph did not deserialize, starting fresh: {err}");
                None
            }
        }
    }

    /// Writes the domain graph.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` on serialization or write failure.
    /// Callers treat this as transient: the in-memory graph stays
    /// authoritative and the save is retried later.
    pub fn save_graph(&self, graph: &DomainGraph) -> Result<(), PersistenceError> {
        self.write_value(GRAPH_FILE, graph)
    }

    /// Loads the integration states, or reports absence.
    ///
    /// Shallow merge per provider key, so blobs written before a
    /// provider existed gain that provider's defaults.
    #[must_use]
    pub fn load_integrations(&self) -> Option<IntegrationStates> {
        let stored: Value = self.read_value(INTEGRATIONS_FILE)?;
        let merged: Value = merge_onto_default(&IntegrationStates::default(), stored)?;
        match serde_json::from_value(merged) {
            Ok(states) => Some(states),
            Err(err) => {
                warn!("Stored integration states did not deserialize: {err}");
                None
            }
        }
    }

    /// Writes the integration states.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` on serialization or write failure.
    pub fn save_integrations(&self, states: &IntegrationStates) -> Result<(), PersistenceError> {
        self.write_value(INTEGRATIONS_FILE, states)
    }
}

/// Overlays stored top-level keys onto the serialized default.
fn merge_onto_default<T: Serialize>(default: &T, stored: Value) -> Option<Value> {
    let mut base: Value = match serde_json::to_value(default) {
        Ok(value) => value,
        Err(err) => {
            warn!("Failed to serialize defaults for merge: {err}");
            return None;
        }
    };
    match (&mut base, stored) {
        (Value::Object(base_map), Value::Object(stored_map)) => {
            for (key, value) in stored_map {
                base_map.insert(key, value);
            }
            Some(base)
        }
        _ => {
            warn!("Stored blob is not a JSON object, ignoring it");
            None
        }
    }
}

/// Serializes the graph as a downloadable pretty-printed blob.
///
/// # Errors
///
/// Returns `PersistenceError::Serialization` if the graph cannot be
/// serialized.
pub fn export_graph(graph: &DomainGraph) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Parses an exported blob into a full replacement graph.
///
/// Import is all-or-nothing: malformed input aborts with no partial
/// state change. The booking-derived calendar entries are rebuilt so a
/// stale or tampered export cannot smuggle them in.
///
/// # Errors
///
/// Returns `PersistenceError::Serialization` on malformed JSON.
pub fn import_graph(raw: &str) -> Result<DomainGraph, PersistenceError> {
    let mut graph: DomainGraph = serde_json::from_str(raw)?;
    graph.calendar_events = derive_calendar_events(&graph);
    Ok(graph)
}
