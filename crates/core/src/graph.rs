// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use encore_domain::{
    Artist, ArtistStatus, Booking, BookingStatus, BookingType, CalendarEvent, Crisis, EntityId,
    Money, Opportunity, Progress, Settings, Task,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::macros::date;

/// The complete in-memory domain graph.
///
/// One logical actor reads and writes the graph; transitions go through
/// `apply`, which never mutates in place. The whole graph is serialized
/// as a single JSON blob by the persistence layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainGraph {
    /// Managed artists, in display order.
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Booked engagements.
    #[serde(default)]
    pub bookings: Vec<Booking>,
    /// To-do items.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Prospective deals.
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    /// Incident records.
    #[serde(default)]
    pub crises: Vec<Crisis>,
    /// Calendar entries, derived and user-authored.
    #[serde(default)]
    pub calendar_events: Vec<CalendarEvent>,
    /// Tunable knobs.
    #[serde(default)]
    pub settings: Settings,
}

impl DomainGraph {
    /// Looks up an artist by id.
    #[must_use]
    pub fn artist(&self, id: &EntityId) -> Option<&Artist> {
        self.artists.iter().find(|artist| &artist.id == id)
    }

    /// Checks whether an artist with the given id exists.
    #[must_use]
    pub fn has_artist(&self, id: &EntityId) -> bool {
        self.artist(id).is_some()
    }

    /// Looks up a booking by id.
    #[must_use]
    pub fn booking(&self, id: &EntityId) -> Option<&Booking> {
        self.bookings.iter().find(|booking| &booking.id == id)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: &EntityId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// The first-run graph: one established artist and his confirmed
    /// September run, ready to demonstrate the calendar derivation.
    #[must_use]
    pub fn seeded() -> Self {
        let artist_id: EntityId = EntityId::new("adam-sellouk");
        let artist: Artist = Artist {
            id: artist_id.clone(),
            name: String::from("Adam Sellouk"),
            genre: String::from("Electronic, House, Techno"),
            status: ArtistStatus::Established,
            email: String::from("adam@adamsellouk.com"),
            phone: String::from("+1-555-0123"),
            monthly_revenue: Money::new(35_000.0),
            milestone: String::from("Ultra Europe 2026 main stage"),
            progress: Progress::new(75),
            next_goals: String::from("Major festival circuit expansion"),
            social_media: BTreeMap::from([
                (String::from("instagram"), String::from("@adamsellouk")),
                (String::from("soundcloud"), String::from("adamsellouk")),
                (String::from("spotify"), String::from("Adam Sellouk")),
            ]),
            created_at: None,
            updated_at: None,
        };

        let seed_booking = |id: &str,
                            venue: &str,
                            day: time::Date,
                            hour: &str,
                            fee: f64,
                            kind: BookingType,
                            details: &str| Booking {
            id: EntityId::new(id),
            artist_id: artist_id.clone(),
            artist_name: String::from("Adam Sellouk"),
            venue: String::from(venue),
            date: day,
            time: String::from(hour),
            fee: Money::new(fee),
            status: BookingStatus::Confirmed,
            kind,
            details: String::from(details),
            created_at: None,
            updated_at: None,
        };

        let bookings: Vec<Booking> = vec![
            seed_booking(
                "booking1",
                "Flight TLV-ATH-SAW",
                date!(2025 - 09 - 13),
                "05:00",
                351.0,
                BookingType::Travel,
                "Aegean/Pegasus - Confirmation: XXASFT/16PU8S",
            ),
            seed_booking(
                "booking2",
                "Flight IST-RMO-TLV",
                date!(2025 - 09 - 14),
                "09:30",
                213.0,
                BookingType::Travel,
                "FlyOne - Confirmation: G89DTG",
            ),
            seed_booking(
                "booking3",
                "Flight TLV-MXP",
                date!(2025 - 09 - 19),
                "04:55",
                356.0,
                BookingType::Travel,
                "Neos - Confirmation: 9A8CIE",
            ),
            seed_booking(
                "booking4",
                "Flight MXP-IBZ",
                date!(2025 - 09 - 19),
                "14:20",
                254.0,
                BookingType::Travel,
                "Easy Jet - Confirmation: KB2HZZ4",
            ),
            seed_booking(
                "booking5",
                "Ibiza Show",
                date!(2025 - 09 - 19),
                "20:00",
                5000.0,
                BookingType::Performance,
                "Performance: 20:00-21:30",
            ),
        ];

        let mut graph: Self = Self {
            artists: vec![artist],
            bookings,
            ..Self::default()
        };
        graph.calendar_events = crate::calendar::derive_calendar_events(&graph);
        graph
    }
}

/// A collection within the domain graph, used to report which derived
/// views need recomputation after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    /// The artists collection.
    Artists,
    /// The bookings collection.
    Bookings,
    /// The tasks collection.
    Tasks,
    /// The opportunities collection.
    Opportunities,
    /// The crises collection.
    Crises,
    /// The calendar-events collection.
    Calendar,
}

impl Collection {
    /// Returns the string representation of this collection.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Artists => "artists",
            Self::Bookings => "bookings",
            Self::Tasks => "tasks",
            Self::Opportunities => "opportunities",
            Self::Crises => "crises",
            Self::Calendar => "calendar",
        }
    }
}

/// The result of a successful transition.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The graph after the transition.
    pub new_graph: DomainGraph,
    /// Collections the transition touched. Views sourced from other
    /// collections do not need re-rendering.
    pub changed: Vec<Collection>,
    /// The id assigned by a create operation.
    pub created_id: Option<EntityId>,
}
