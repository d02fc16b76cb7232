// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::artist::Artist;
use crate::booking::Booking;
use crate::calendar_event::CalendarEvent;
use crate::crisis::Crisis;
use crate::error::DomainError;
use crate::opportunity::Opportunity;
use crate::task::Task;

/// Validates an artist's field constraints.
///
/// Checks required fields only; reference integrity requires context
/// and is enforced by the core transition layer.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the name is empty.
pub fn validate_artist_fields(artist: &Artist) -> Result<(), DomainError> {
    if artist.name.trim().is_empty() {
        return Err(DomainError::EmptyField {
            entity: "Artist",
            field: "name",
        });
    }
    Ok(())
}

/// Validates a booking's field constraints.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the venue or artist reference
/// is empty. The date is required by construction.
pub fn validate_booking_fields(booking: &Booking) -> Result<(), DomainError> {
    if booking.venue.trim().is_empty() {
        return Err(DomainError::EmptyField {
            entity: "Booking",
            field: "venue",
        });
    }
    if booking.artist_id.is_empty() {
        return Err(DomainError::EmptyField {
            entity: "Booking",
            field: "artistId",
        });
    }
    Ok(())
}

/// Validates a task's field constraints.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the title is empty. The due
/// date is required by construction.
pub fn validate_task_fields(task: &Task) -> Result<(), DomainError> {
    if task.title.trim().is_empty() {
        return Err(DomainError::EmptyField {
            entity: "Task",
            field: "title",
        });
    }
    Ok(())
}

/// Validates an opportunity's field constraints.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the title is empty. The
/// deadline is required by construction.
pub fn validate_opportunity_fields(opportunity: &Opportunity) -> Result<(), DomainError> {
    if opportunity.title.trim().is_empty() {
        return Err(DomainError::EmptyField {
            entity: "Opportunity",
            field: "title",
        });
    }
    Ok(())
}

/// Validates a crisis's field constraints.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the title is empty.
pub fn validate_crisis_fields(crisis: &Crisis) -> Result<(), DomainError> {
    if crisis.title.trim().is_empty() {
        return Err(DomainError::EmptyField {
            entity: "Crisis",
            field: "title",
        });
    }
    Ok(())
}

/// Validates a manually created calendar event's field constraints.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the title is empty.
pub fn validate_calendar_event_fields(event: &CalendarEvent) -> Result<(), DomainError> {
    if event.title.trim().is_empty() {
        return Err(DomainError::EmptyField {
            entity: "Calendar event",
            field: "title",
        });
    }
    Ok(())
}
