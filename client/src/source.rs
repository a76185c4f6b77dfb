//! # Schedule Source Module
//!
//! The read/write collaborator the tracker and UI layer sit on top of:
//! schedule fetches, punch writes, report reads and token acquisition. The
//! trait keeps callers testable against canned data; the HTTP implementation
//! lives in [`crate::http`].

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use strum::{Display, EnumString};

use domain::{AttendanceReport, DaySchedule};

use crate::error::ClientResult;

/// Which attendance boundary a punch records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PunchDirection {
    In,
    Out,
}

/// Reason attached to a retried punch after a structured rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PunchReason {
    Late(String),
    Early(String),
}

/// One punch write.
#[derive(Debug, Clone)]
pub struct PunchRequest {
    pub direction: PunchDirection,
    /// Submitted as `HH:MM`, matching what the backend stores.
    pub time: NaiveTime,
    /// JPEG photo evidence captured at the punch.
    pub photo_path: PathBuf,
    /// Attached only on the retry after a `ReasonRequired` outcome.
    pub reason: Option<PunchReason>,
}

/// Result of a punch write. A rejection asking for a reason is an expected
/// outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchOutcome {
    /// The backend stored the punch.
    Accepted,
    /// The backend wants a reason before storing the punch, with the flags
    /// it reported: a late punch-in and/or an early punch-out.
    ReasonRequired { late: bool, early: bool },
}

/// Reporting window selector, spelled exactly as the backend's query values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReportFilter {
    Today,
    ThisWeek,
    ThisMonth,
    Custom,
}

/// A report request: the window selector plus the explicit range that
/// `Custom` requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub filter: ReportFilter,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportQuery {
    /// A preset window (`today`, `this_week`, `this_month`).
    pub fn preset(filter: ReportFilter) -> Self {
        Self {
            filter,
            start_date: None,
            end_date: None,
        }
    }

    /// An explicit date range.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            filter: ReportFilter::Custom,
            start_date: Some(start),
            end_date: Some(end),
        }
    }
}

/// Read/write access to the attendance backend.
#[async_trait]
pub trait ScheduleSource {
    /// Fetches today's schedule.
    async fn today(&self) -> ClientResult<DaySchedule>;

    /// Fetches the schedule for an arbitrary date. Asking for today's date
    /// routes to [`ScheduleSource::today`].
    async fn for_date(&self, date: NaiveDate) -> ClientResult<DaySchedule>;

    /// Records a punch against a session, retrying is the caller's choice.
    async fn record_punch(
        &self,
        session_id: &str,
        punch: &PunchRequest,
    ) -> ClientResult<PunchOutcome>;

    /// Fetches the attendance report for a window.
    async fn report(&self, query: &ReportQuery) -> ClientResult<AttendanceReport>;

    /// Exchanges credentials for an access token. Token storage is the
    /// caller's concern.
    async fn login(&self, username: &str, password: &str) -> ClientResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    /// The filter values must round-trip the backend's exact spelling.
    #[test]
    fn test_report_filter_wire_spelling() {
        assert_eq!(ReportFilter::Today.to_string(), "today");
        assert_eq!(ReportFilter::ThisWeek.to_string(), "this_week");
        assert_eq!(ReportFilter::ThisMonth.to_string(), "this_month");
        assert_eq!(ReportFilter::Custom.to_string(), "custom");
        assert_eq!(ReportFilter::from_str("THIS_WEEK"), Ok(ReportFilter::ThisWeek));
    }

    #[test]
    fn test_punch_direction_spelling() {
        assert_eq!(PunchDirection::In.to_string(), "in");
        assert_eq!(PunchDirection::Out.to_string(), "out");
        assert_eq!(PunchDirection::from_str("OUT"), Ok(PunchDirection::Out));
    }
}
