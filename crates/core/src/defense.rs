//! Defense session status and scheduling validation.
//!
//! A project has at most one non-cancelled defense session at a time. A
//! session moves `scheduled -> completed` or `scheduled -> cancelled`;
//! both targets are terminal.

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Session is booked and may still be rescheduled or cancelled.
pub const SESSION_SCHEDULED: &str = "scheduled";

/// The defense took place. Terminal.
pub const SESSION_COMPLETED: &str = "completed";

/// The session was called off. Terminal.
pub const SESSION_CANCELLED: &str = "cancelled";

/// All valid defense session status strings.
pub const VALID_SESSION_STATUSES: &[&str] =
    &[SESSION_SCHEDULED, SESSION_COMPLETED, SESSION_CANCELLED];

/// Maximum length for the free-text room designation.
pub const MAX_ROOM_LENGTH: usize = 120;

/// Maximum length for session notes.
pub const MAX_NOTES_LENGTH: usize = 4_000;

// ---------------------------------------------------------------------------
// Status enum
// ---------------------------------------------------------------------------

/// Defense session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SESSION_SCHEDULED => Ok(Self::Scheduled),
            SESSION_COMPLETED => Ok(Self::Completed),
            SESSION_CANCELLED => Ok(Self::Cancelled),
            _ => Err(format!(
                "Invalid session status '{s}'. Must be one of: {}",
                VALID_SESSION_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => SESSION_SCHEDULED,
            Self::Completed => SESSION_COMPLETED,
            Self::Cancelled => SESSION_CANCELLED,
        }
    }

    /// Whether the session still occupies the project's single active slot.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate the inputs of a new or rescheduled session booking.
///
/// `now` is passed in by the caller so the check is deterministic under test.
pub fn validate_booking(
    now: Timestamp,
    scheduled_at: Timestamp,
    room: &str,
    notes: Option<&str>,
) -> Result<(), CoreError> {
    if scheduled_at < now {
        return Err(CoreError::Validation(format!(
            "Defense cannot be scheduled in the past ({scheduled_at})"
        )));
    }
    if room.trim().is_empty() {
        return Err(CoreError::Validation("Room must not be empty".to_string()));
    }
    if room.len() > MAX_ROOM_LENGTH {
        return Err(CoreError::Validation(format!(
            "Room exceeds maximum length of {MAX_ROOM_LENGTH} characters"
        )));
    }
    if let Some(n) = notes {
        if n.len() > MAX_NOTES_LENGTH {
            return Err(CoreError::Validation(format!(
                "Notes exceed maximum length of {MAX_NOTES_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Validate that a session can still be rescheduled.
pub fn validate_reschedulable(status: SessionStatus) -> Result<(), CoreError> {
    match status {
        SessionStatus::Scheduled => Ok(()),
        other => Err(CoreError::InvalidState(format!(
            "Cannot reschedule a session with status '{}'",
            other.as_str()
        ))),
    }
}

/// Validate that a session can be marked completed.
pub fn validate_completable(status: SessionStatus) -> Result<(), CoreError> {
    match status {
        SessionStatus::Scheduled => Ok(()),
        other => Err(CoreError::InvalidState(format!(
            "Cannot complete a session with status '{}'",
            other.as_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    // -- SessionStatus --------------------------------------------------------

    #[test]
    fn session_status_round_trip() {
        for status in &[
            SessionStatus::Scheduled,
            SessionStatus::Completed,
            SessionStatus::Cancelled,
        ] {
            assert_eq!(
                SessionStatus::from_str_value(status.as_str()).unwrap(),
                *status
            );
        }
    }

    #[test]
    fn invalid_session_status_rejected() {
        assert!(SessionStatus::from_str_value("postponed").is_err());
    }

    #[test]
    fn only_cancelled_is_inactive() {
        assert!(SessionStatus::Scheduled.is_active());
        assert!(SessionStatus::Completed.is_active());
        assert!(!SessionStatus::Cancelled.is_active());
    }

    // -- validate_booking -----------------------------------------------------

    #[test]
    fn future_booking_accepted() {
        let result = validate_booking(ts(2026, 3, 1), ts(2026, 6, 15), "B-204", None);
        assert!(result.is_ok());
    }

    #[test]
    fn past_date_rejected() {
        let result = validate_booking(ts(2026, 3, 1), ts(2020, 1, 1), "B-204", None);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn empty_room_rejected() {
        let result = validate_booking(ts(2026, 3, 1), ts(2026, 6, 15), "   ", None);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn oversized_notes_rejected() {
        let notes = "x".repeat(MAX_NOTES_LENGTH + 1);
        let result = validate_booking(ts(2026, 3, 1), ts(2026, 6, 15), "B-204", Some(&notes));
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    // -- reschedule / complete guards -----------------------------------------

    #[test]
    fn scheduled_session_reschedulable() {
        assert!(validate_reschedulable(SessionStatus::Scheduled).is_ok());
    }

    #[test]
    fn completed_session_not_reschedulable() {
        let result = validate_reschedulable(SessionStatus::Completed);
        assert!(matches!(result, Err(CoreError::InvalidState(_))));
    }

    #[test]
    fn cancelled_session_not_completable() {
        let result = validate_completable(SessionStatus::Cancelled);
        assert!(matches!(result, Err(CoreError::InvalidState(_))));
    }

    #[test]
    fn completed_session_not_completable_again() {
        let result = validate_completable(SessionStatus::Completed);
        assert!(matches!(result, Err(CoreError::InvalidState(_))));
    }
}
