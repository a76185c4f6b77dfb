//! # Tracker State Module
//!
//! The pure half of the session tracker: active-session detection over a
//! refreshed schedule list, the elapsed-time readout, and the one-shot
//! end-of-class warning latch. Everything here takes the clock as an
//! argument, so the tick task stays a thin shell and the rules are directly
//! unit-testable.

use chrono::{Duration, NaiveDateTime};
use domain::ClassSession;
use domain::clock::{self, ZERO_ELAPSED};

/// Minutes of remaining class time at or under which the end-of-class
/// warning fires.
pub const END_WARNING_LEAD_MINUTES: i64 = 10;

/// Mutable tracker state, shared between the owner and the tick task.
#[derive(Debug)]
pub(crate) struct TrackerState {
    /// The session currently being attended: punch-in recorded, punch-out
    /// absent. At most one.
    pub(crate) active: Option<ClassSession>,
    /// Punch-in time-of-day the elapsed readout is seeded from.
    pub(crate) started_at: Option<chrono::NaiveTime>,
    /// Last formatted `HH:MM:SS` readout.
    pub(crate) elapsed: String,
    /// One-shot latch: the warning fired for the current active session.
    pub(crate) end_warning_fired: bool,
}

/// What a schedule refresh did to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RefreshEffect {
    /// A session with an open log was installed, new or replacing.
    Installed,
    /// The previously active session is still the open one; nothing reset.
    Unchanged,
    /// No open session remains; the tick task must stop.
    Cleared,
    /// Nothing was active before and nothing is now.
    Idle,
}

/// Result of one tick while a session is active.
#[derive(Debug, Clone)]
pub(crate) struct TickOutcome {
    pub(crate) session_id: String,
    pub(crate) elapsed: String,
    pub(crate) end_warning: Option<EndWarning>,
}

/// Display context for the end-of-class warning.
#[derive(Debug, Clone)]
pub(crate) struct EndWarning {
    pub(crate) subject: String,
    pub(crate) class_label: String,
}

impl TrackerState {
    pub(crate) fn new() -> Self {
        Self {
            active: None,
            started_at: None,
            elapsed: ZERO_ELAPSED.to_string(),
            end_warning_fired: false,
        }
    }

    /// Applies a freshly fetched schedule list.
    ///
    /// Scans in list order for the first session with a parseable punch-in
    /// and no punch-out; further simultaneous matches are ignored. Finding
    /// the session already active keeps the readout seed and the warning
    /// latch untouched so the timer does not visibly restart. Finding
    /// nothing clears the tracker back to its idle reading.
    pub(crate) fn apply_refresh(&mut self, sessions: &[ClassSession]) -> RefreshEffect {
        match sessions.iter().find(|s| s.has_open_log()) {
            Some(session) => {
                let same = self.active.as_ref().is_some_and(|a| a.id == session.id);
                if same {
                    // Take the fresh copy; the server may have updated
                    // display fields like is_late.
                    self.active = Some(session.clone());
                    RefreshEffect::Unchanged
                } else {
                    self.started_at = session.punch_in_time();
                    self.active = Some(session.clone());
                    self.elapsed = ZERO_ELAPSED.to_string();
                    self.end_warning_fired = false;
                    RefreshEffect::Installed
                }
            }
            None => {
                let had_active = self.active.take().is_some();
                self.started_at = None;
                self.elapsed = ZERO_ELAPSED.to_string();
                self.end_warning_fired = false;
                if had_active {
                    RefreshEffect::Cleared
                } else {
                    RefreshEffect::Idle
                }
            }
        }
    }

    /// Advances the readout to `now`.
    ///
    /// Recomputes the elapsed display from the punch-in seed and decides
    /// whether the one-shot end-of-class warning fires: remaining time at or
    /// under [`END_WARNING_LEAD_MINUTES`] with a clear latch. Returns `None`
    /// when nothing is active, which tells the tick task to stop.
    pub(crate) fn tick(&mut self, now: NaiveDateTime) -> Option<TickOutcome> {
        let session = self.active.as_ref()?;
        let started = self.started_at?;

        self.elapsed = clock::format_elapsed(now.time().signed_duration_since(started));

        let mut end_warning = None;
        if !self.end_warning_fired {
            if let Some(end) = session.scheduled_end() {
                let date = session.session_date().unwrap_or_else(|| now.date());
                let remaining = date.and_time(end).signed_duration_since(now);
                if remaining <= Duration::minutes(END_WARNING_LEAD_MINUTES) {
                    self.end_warning_fired = true;
                    end_warning = Some(EndWarning {
                        subject: session.subject.name.clone(),
                        class_label: session.class_label(),
                    });
                }
            }
        }

        Some(TickOutcome {
            session_id: session.id.clone(),
            elapsed: self.elapsed.clone(),
            end_warning,
        })
    }
}
