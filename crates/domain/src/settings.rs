// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

const fn default_window_days() -> u16 {
    30
}

const fn default_upcoming_limit() -> usize {
    10
}

const fn default_autosave_secs() -> u64 {
    30
}

/// Tunable knobs stored alongside the domain graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Look-ahead window for the upcoming list, in days. The boundary
    /// day is included.
    #[serde(default = "default_window_days")]
    pub upcoming_window_days: u16,
    /// Maximum number of entries in the upcoming list.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
    /// Interval between periodic background saves.
    #[serde(default = "default_autosave_secs")]
    pub autosave_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upcoming_window_days: default_window_days(),
            upcoming_limit: default_upcoming_limit(),
            autosave_interval_secs: default_autosave_secs(),
        }
    }
}
