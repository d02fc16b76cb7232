// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod calendar_derivation;
mod transitions;

use crate::DomainGraph;
use encore_domain::{EntityId, parse_date};
use time::OffsetDateTime;
use time::macros::datetime;

/// A fixed wall clock for deterministic transition tests.
fn test_now() -> OffsetDateTime {
    datetime!(2025-09-01 12:00 UTC)
}

/// The seeded graph, plus convenience ids.
fn seeded() -> (DomainGraph, EntityId) {
    (DomainGraph::seeded(), EntityId::new("adam-sellouk"))
}

fn day(input: &str) -> time::Date {
    parse_date(input).unwrap()
}
