//! # Client Library
//!
//! Talks to the school attendance backend: schedule reads, photo-evidenced
//! punch writes with the late/early reason flow, report summaries and login.
//! The [`ScheduleSource`] trait is the seam the UI layer and tests depend
//! on; [`HttpScheduleSource`] is the production implementation.

pub mod error;
pub mod http;
pub mod source;

pub use error::{ClientError, ClientResult};
pub use http::HttpScheduleSource;
pub use source::{
    PunchDirection, PunchOutcome, PunchReason, PunchRequest, ReportFilter, ReportQuery,
    ScheduleSource,
};
