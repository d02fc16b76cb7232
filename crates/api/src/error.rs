// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use encore::CoreError;
use encore_domain::DomainError;
use encore_gateway::GatewayError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    ValidationFailed {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An upstream service rejected the request.
    UpstreamRejected {
        /// The upstream HTTP status code.
        status: u16,
        /// The upstream error message.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::UpstreamRejected { status, message } => {
                write!(f, "Upstream rejected the request with status {status}: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyField { entity, field } => ApiError::ValidationFailed {
            field: String::from(field),
            message: format!("{entity} {field} cannot be empty"),
        },
        DomainError::InvalidToken { field, value } => ApiError::ValidationFailed {
            field: String::from(field),
            message: format!("Unrecognized value '{value}'"),
        },
        DomainError::DateParse { input, message } => ApiError::ValidationFailed {
            field: String::from("date"),
            message: format!("Failed to parse date '{input}': {message}"),
        },
        DomainError::DanglingArtistReference { entity, artist_id } => {
            ApiError::DomainRuleViolation {
                rule: String::from("artist_reference"),
                message: format!("{entity} references unknown artist '{artist_id}'"),
            }
        }
        DomainError::ArtistNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Artist"),
            message: format!("Artist '{id}' does not exist"),
        },
        DomainError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking '{id}' does not exist"),
        },
        DomainError::TaskNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Task"),
            message: format!("Task '{id}' does not exist"),
        },
        DomainError::OpportunityNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Opportunity"),
            message: format!("Opportunity '{id}' does not exist"),
        },
        DomainError::CrisisNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Crisis"),
            message: format!("Crisis '{id}' does not exist"),
        },
        DomainError::CalendarEventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Calendar event"),
            message: format!("Calendar event '{id}' does not exist"),
        },
        DomainError::DerivedEventImmutable(id) => ApiError::DomainRuleViolation {
            rule: String::from("derived_event_immutable"),
            message: format!(
                "Calendar event '{id}' is derived from a booking; edit the booking instead"
            ),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a gateway error into an API error.
#[must_use]
pub fn translate_gateway_error(err: GatewayError) -> ApiError {
    match err {
        GatewayError::InvalidToken(message) => ApiError::ValidationFailed {
            field: String::from("token"),
            message,
        },
        GatewayError::NotConnected(provider) => ApiError::DomainRuleViolation {
            rule: String::from("provider_connected"),
            message: format!("{} not connected", provider.display_name()),
        },
        GatewayError::OauthUnsupported(provider) => ApiError::ValidationFailed {
            field: String::from("provider"),
            message: format!("{} does not use OAuth authorization", provider.display_name()),
        },
        GatewayError::Upstream { status, message } => ApiError::UpstreamRejected { status, message },
        GatewayError::Transport(message) | GatewayError::UrlConstruction(message) => {
            ApiError::Internal { message }
        }
    }
}
