//! # Punctuality Module
//!
//! Lateness and earliness rules for punch times. Both punch directions get
//! the same grace period; the comparison is strict, so landing exactly on the
//! grace boundary still counts as on time.

use chrono::{Duration, NaiveTime};

/// Grace period applied to both punch directions, in minutes.
pub const GRACE_MINUTES: i64 = 5;

/// How a punch time relates to its scheduled boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuality {
    /// Within the grace period on either side of the boundary.
    OnTime,
    /// Past the boundary by more than the grace period. Carries the full
    /// overshoot, grace included.
    Late(Duration),
    /// Before the boundary by more than the grace period. Carries the full
    /// shortfall as a positive duration.
    Early(Duration),
}

impl Punctuality {
    pub fn is_late(&self) -> bool {
        matches!(self, Punctuality::Late(_))
    }

    pub fn is_early(&self) -> bool {
        matches!(self, Punctuality::Early(_))
    }

    pub fn is_on_time(&self) -> bool {
        matches!(self, Punctuality::OnTime)
    }
}

/// Classifies a punch-in against the scheduled start.
///
/// A punch-in is late when it lands strictly more than [`GRACE_MINUTES`]
/// after the start; punching in exactly on the grace boundary, to the second,
/// is still on time. Punching in before the start is never flagged.
pub fn punch_in_punctuality(scheduled_start: NaiveTime, punched_at: NaiveTime) -> Punctuality {
    let overshoot = punched_at.signed_duration_since(scheduled_start);
    if overshoot > Duration::minutes(GRACE_MINUTES) {
        Punctuality::Late(overshoot)
    } else {
        Punctuality::OnTime
    }
}

/// Classifies a punch-out against the scheduled end.
///
/// Leaving more than [`GRACE_MINUTES`] before the end is early; staying more
/// than [`GRACE_MINUTES`] past it is late. Both comparisons are strict and
/// carry second precision.
pub fn punch_out_punctuality(scheduled_end: NaiveTime, punched_at: NaiveTime) -> Punctuality {
    let offset = punched_at.signed_duration_since(scheduled_end);
    if offset > Duration::minutes(GRACE_MINUTES) {
        Punctuality::Late(offset)
    } else if offset < -Duration::minutes(GRACE_MINUTES) {
        Punctuality::Early(-offset)
    } else {
        Punctuality::OnTime
    }
}
