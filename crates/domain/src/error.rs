// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty.
    EmptyField {
        /// The entity type the field belongs to.
        entity: &'static str,
        /// The field name.
        field: &'static str,
    },
    /// A status/type/priority token was not recognized.
    InvalidToken {
        /// The field name.
        field: &'static str,
        /// The unrecognized value.
        value: String,
    },
    /// A date string could not be parsed.
    DateParse {
        /// The invalid input.
        input: String,
        /// The parser's message.
        message: String,
    },
    /// An artist-scoped record references an artist that does not exist.
    DanglingArtistReference {
        /// The entity type carrying the reference.
        entity: &'static str,
        /// The unresolved artist id.
        artist_id: String,
    },
    /// No artist with the given id.
    ArtistNotFound(String),
    /// No booking with the given id.
    BookingNotFound(String),
    /// No task with the given id.
    TaskNotFound(String),
    /// No opportunity with the given id.
    OpportunityNotFound(String),
    /// No crisis with the given id.
    CrisisNotFound(String),
    /// No calendar event with the given id.
    CalendarEventNotFound(String),
    /// A booking-derived calendar event cannot be edited or deleted
    /// directly; it is owned by the derivation pass.
    DerivedEventImmutable(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity} {field} cannot be empty")
            }
            Self::InvalidToken { field, value } => {
                write!(f, "Unrecognized {field} value: '{value}'")
            }
            Self::DateParse { input, message } => {
                write!(f, "Failed to parse date '{input}': {message}")
            }
            Self::DanglingArtistReference { entity, artist_id } => {
                write!(f, "{entity} references unknown artist '{artist_id}'")
            }
            Self::ArtistNotFound(id) => write!(f, "Artist '{id}' does not exist"),
            Self::BookingNotFound(id) => write!(f, "Booking '{id}' does not exist"),
            Self::TaskNotFound(id) => write!(f, "Task '{id}' does not exist"),
            Self::OpportunityNotFound(id) => write!(f, "Opportunity '{id}' does not exist"),
            Self::CrisisNotFound(id) => write!(f, "Crisis '{id}' does not exist"),
            Self::CalendarEventNotFound(id) => {
                write!(f, "Calendar event '{id}' does not exist")
            }
            Self::DerivedEventImmutable(id) => {
                write!(
                    f,
                    "Calendar event '{id}' is derived from a booking and cannot be edited directly"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
