//! # Status Module
//!
//! Lifecycle classification for a class session. The backend stores a status
//! string on each slot; the client recomputes most states from punch evidence
//! and the clock, but administrative states always win.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The lifecycle state of a class session at a given instant.
///
/// `Cancelled` and `Absent` are administrative decisions made server-side and
/// are never overridden by punch evidence or the clock. Everything else is
/// derived client-side by [`crate::ClassSession::status_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SessionStatus {
    /// No punch evidence and the slot has not been classified yet.
    #[strum(to_string = "NotStarted", serialize = "Not Started")]
    NotStarted,
    /// Scheduled but its window has not closed and no punch-in exists.
    Upcoming,
    /// Punched in, not yet punched out.
    Ongoing,
    /// Both punches recorded.
    Completed,
    /// Cancelled by the school; terminal.
    Cancelled,
    /// Teacher marked absent by the school; terminal.
    Absent,
    /// Window closed with no punch evidence at all.
    Expired,
}

impl SessionStatus {
    /// True for the server-decided states that punch evidence cannot override.
    pub fn is_administrative(self) -> bool {
        matches!(self, SessionStatus::Cancelled | SessionStatus::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(SessionStatus::from_str("ongoing"), Ok(SessionStatus::Ongoing));
        assert_eq!(SessionStatus::from_str("CANCELLED"), Ok(SessionStatus::Cancelled));
    }

    /// Backends spell the initial state both with and without a space.
    #[test]
    fn test_parse_not_started_variants() {
        assert_eq!(SessionStatus::from_str("NotStarted"), Ok(SessionStatus::NotStarted));
        assert_eq!(SessionStatus::from_str("Not Started"), Ok(SessionStatus::NotStarted));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(SessionStatus::from_str("Rescheduled").is_err());
    }

    #[test]
    fn test_administrative_states() {
        assert!(SessionStatus::Cancelled.is_administrative());
        assert!(SessionStatus::Absent.is_administrative());
        assert!(!SessionStatus::Ongoing.is_administrative());
        assert!(!SessionStatus::Expired.is_administrative());
    }
}
