//! Traits describing jurisdiction provider capabilities and the shared error type.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Error as ReqwestError, StatusCode};

use crate::model::{Address, CalendarEvent, JurisdictionMeta, ScheduleCode};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while resolving or computing a pickup.
///
/// All variants bubble unmodified to the caller: the core performs no local
/// recovery, no fallback schedule, and no suppression. The consuming layer
/// decides presentation.
pub enum ScheduleError {
    /// Network layer failed or timed out. The only retryable class.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// An address field violates the jurisdiction's constraints.
    /// Raised before any network call is made.
    #[error("Invalid address field {field}: {reason}")]
    Validation {
        /// Form field the offending value maps to.
        field: &'static str,
        /// What the constraint was and how it was violated.
        reason: String,
    },
    /// The address's state has no registered jurisdiction.
    #[error("Unsupported state: {0}")]
    UnsupportedState(String),
    /// The address's state is known, but the city has no registered jurisdiction.
    #[error("Unsupported city: {0}")]
    UnsupportedCity(String),
    /// The upstream lookup did not yield a recognizable schedule code.
    ///
    /// Covers non-redirect responses, malformed `Location` headers, and codes
    /// outside the known set. Carries the raw response pieces for diagnosis.
    #[error("Unrecognized schedule: status={status} location={location:?} body={body}")]
    Resolution {
        /// HTTP status of the lookup response.
        status: StatusCode,
        /// Raw `Location` header value, or `None` if the header was absent.
        location: Option<String>,
        /// Response body text.
        body: String,
    },
    /// Internal invariant violation. Never reachable through validated inputs;
    /// if it surfaces, it is a defect, not a user-facing condition.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// Maps an address to the opaque schedule code of its pickup route.
///
/// One best-effort remote lookup per call: no retries, no caching. Transient
/// failures propagate as [`ScheduleError::Network`].
pub trait ScheduleResolver: Send + Sync {
    /// Metadata describing the jurisdiction handled by this resolver.
    fn jurisdiction(&self) -> &JurisdictionMeta;

    /// Resolve the schedule code for an address in this jurisdiction.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Validation`] before any network I/O when the
    /// address violates the jurisdiction's field constraints, and
    /// [`ScheduleError::Resolution`] or [`ScheduleError::Network`] when the
    /// remote lookup fails.
    async fn resolve(&self, address: &Address) -> Result<ScheduleCode, ScheduleError>;
}

/// Computes the next pickup occurrence for a schedule code.
///
/// Implementations are pure: identical `(code, reference)` inputs always
/// yield an identical [`CalendarEvent`].
pub trait ScheduleCalculator: Send + Sync {
    /// Metadata describing the jurisdiction handled by this calculator.
    fn jurisdiction(&self) -> &JurisdictionMeta;

    /// Compute the next pickup strictly after the reference date.
    ///
    /// # Errors
    ///
    /// Total over its declared domain; the only error channel is
    /// [`ScheduleError::Internal`], which indicates an invariant violation.
    fn next_event(
        &self,
        code: ScheduleCode,
        reference: NaiveDate,
    ) -> Result<CalendarEvent, ScheduleError>;
}
