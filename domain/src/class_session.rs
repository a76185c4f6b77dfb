//! # Class Session Module
//!
//! The central schedule type: one teaching period as served by the backend,
//! together with its attendance log. Times stay in wire form (strings) and
//! are parsed lazily through lenient accessors, so a malformed value behaves
//! exactly like an absent one and never fails the surrounding payload.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::punctuality::{self, Punctuality};
use crate::status::SessionStatus;

/// Subject taught in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
}

/// Class group a session is taught to, e.g. grade 10 section A.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub section: String,
}

/// Attendance log attached to a session by punch writes.
///
/// The backend sends empty strings where no punch exists yet, so every field
/// is read through the lenient accessors on [`ClassSession`] rather than
/// directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceLog {
    #[serde(default)]
    pub last_punch_in_time: Option<String>,
    #[serde(default)]
    pub last_punch_out_time: Option<String>,
    #[serde(default)]
    pub late_reason: Option<String>,
    #[serde(default)]
    pub early_reason: Option<String>,
    #[serde(default)]
    pub punch_in_photo: Option<String>,
    #[serde(default)]
    pub punch_out_photo: Option<String>,
    /// Minutes between the punches, computed server-side.
    #[serde(default)]
    pub time_spent: Option<i64>,
}

/// One schedulable teaching period as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: String,
    pub subject: Subject,
    pub class_info: ClassGroup,
    /// Weekday label, e.g. "Monday".
    #[serde(default)]
    pub day: Option<String>,
    /// Calendar date the instance applies to; absent on today's schedule.
    #[serde(default)]
    pub date: Option<String>,
    pub start_time: String,
    pub end_time: String,
    /// Server-assigned status string; parsed case-insensitively.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub logs: Option<AttendanceLog>,
    /// Server-computed display flag: the recorded punch-out was early.
    #[serde(default)]
    pub is_early: bool,
    /// Server-computed display flag: the recorded punch-in was late.
    #[serde(default)]
    pub is_late: bool,
}

impl ClassSession {
    /// Scheduled start of the period, if `start_time` parses.
    pub fn scheduled_start(&self) -> Option<NaiveTime> {
        clock::parse_time_of_day(&self.start_time)
    }

    /// Scheduled end of the period, if `end_time` parses.
    pub fn scheduled_end(&self) -> Option<NaiveTime> {
        clock::parse_time_of_day(&self.end_time)
    }

    /// Calendar date of the instance, if present and well-formed.
    pub fn session_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(clock::parse_date)
    }

    /// Recorded punch-in time, if one exists and parses.
    pub fn punch_in_time(&self) -> Option<NaiveTime> {
        self.logs
            .as_ref()?
            .last_punch_in_time
            .as_deref()
            .and_then(clock::parse_time_of_day)
    }

    /// Recorded punch-out time, if one exists and parses.
    pub fn punch_out_time(&self) -> Option<NaiveTime> {
        self.logs
            .as_ref()?
            .last_punch_out_time
            .as_deref()
            .and_then(clock::parse_time_of_day)
    }

    /// True when a punch-in is recorded but no punch-out yet; the session is
    /// being attended right now.
    pub fn has_open_log(&self) -> bool {
        self.punch_in_time().is_some() && self.punch_out_time().is_none()
    }

    /// The server's own status classification, if it parses.
    pub fn server_status(&self) -> Option<SessionStatus> {
        self.status
            .as_deref()
            .and_then(|s| SessionStatus::from_str(s.trim()).ok())
    }

    /// Class group label shown to the teacher, e.g. "Grade 10A".
    pub fn class_label(&self) -> String {
        format!("{}{}", self.class_info.name, self.class_info.section)
    }

    /// True when `now` falls inside the scheduled window, bounds included.
    ///
    /// Sessions whose window does not parse are never considered in-window.
    pub fn window_contains(&self, now: NaiveDateTime) -> bool {
        let (Some(start), Some(end)) = (self.scheduled_start(), self.scheduled_end()) else {
            return false;
        };
        let date = self.session_date().unwrap_or_else(|| now.date());
        now >= date.and_time(start) && now <= date.and_time(end)
    }

    /// Classifies the session at `now`.
    ///
    /// Priority order:
    /// 1. A server-assigned `Cancelled` or `Absent` always wins.
    /// 2. Both punches recorded: `Completed`.
    /// 3. Punch-in only: `Ongoing`.
    /// 4. No punch evidence and `now` past the scheduled end: `Expired`.
    /// 5. Otherwise `Upcoming`.
    ///
    /// A session whose `end_time` does not parse can never become `Expired`
    /// client-side; it stays `Upcoming` until the server classifies it.
    pub fn status_at(&self, now: NaiveDateTime) -> SessionStatus {
        if let Some(status) = self.server_status() {
            if status.is_administrative() {
                return status;
            }
        }

        match (self.punch_in_time(), self.punch_out_time()) {
            (Some(_), Some(_)) => SessionStatus::Completed,
            (Some(_), None) => SessionStatus::Ongoing,
            _ => {
                let date = self.session_date().unwrap_or_else(|| now.date());
                match self.scheduled_end() {
                    Some(end) if now > date.and_time(end) => SessionStatus::Expired,
                    _ => SessionStatus::Upcoming,
                }
            }
        }
    }

    /// True when punching into this session would be accepted locally: no
    /// punch-in recorded yet and `now` inside the scheduled window.
    ///
    /// The tracker adds the cross-session condition (nothing else active).
    pub fn accepts_punch_in(&self, now: NaiveDateTime) -> bool {
        self.punch_in_time().is_none() && self.window_contains(now)
    }

    /// True when punching out of this session is allowed: punch-in recorded,
    /// punch-out not yet.
    pub fn is_punch_out_allowed(&self) -> bool {
        self.has_open_log()
    }

    /// Classifies a punch-in at `at` against the scheduled start.
    pub fn punch_in_punctuality(&self, at: NaiveTime) -> Option<Punctuality> {
        Some(punctuality::punch_in_punctuality(self.scheduled_start()?, at))
    }

    /// Classifies a punch-out at `at` against the scheduled end.
    pub fn punch_out_punctuality(&self, at: NaiveTime) -> Option<Punctuality> {
        Some(punctuality::punch_out_punctuality(self.scheduled_end()?, at))
    }
}
