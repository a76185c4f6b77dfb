//! # Schedule Module
//!
//! The full day-schedule payload: the session list plus the teacher profile
//! the backend decorates it with.

use serde::{Deserialize, Serialize};

use crate::class_session::ClassSession;

/// School branding attached to the teacher profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub logo: String,
}

/// The signed-in teacher as returned alongside the schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub school: SchoolInfo,
}

impl TeacherProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// One day's schedule payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default)]
    pub data: Vec<ClassSession>,
    #[serde(default)]
    pub teacher: TeacherProfile,
    /// Weekday label on today's payload, `YYYY-MM-DD` on historical ones.
    #[serde(default)]
    pub slot_type: Option<String>,
}

impl DaySchedule {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
