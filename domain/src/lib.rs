//! # Domain Library
//!
//! This crate provides the core data model for the teacher attendance client.
//! It covers the schedule payloads served by the school backend, attendance
//! punch logs, session status classification and the punctuality rules applied
//! to punch times.
//!
//! ## Key Concepts
//! - **ClassSession**: One schedulable teaching period, with its optional
//!   attendance log.
//! - **SessionStatus**: The lifecycle classification of a session at a given
//!   wall-clock instant.
//! - **Punctuality**: Whether a punch is on time, late or early relative to
//!   the scheduled boundary and the grace period.

pub mod class_session;
pub mod clock;
pub mod punctuality;
pub mod report;
pub mod schedule;
pub mod status;

pub use class_session::{AttendanceLog, ClassGroup, ClassSession, Subject};
pub use punctuality::Punctuality;
pub use report::{AttendanceReport, ReportEntry, ReportSlot, ReportSummary};
pub use schedule::{DaySchedule, SchoolInfo, TeacherProfile};
pub use status::SessionStatus;
