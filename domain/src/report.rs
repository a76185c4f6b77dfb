//! # Report Module
//!
//! Attendance report payloads: per-class entries plus the aggregate summary
//! counters. These are fetch-and-render types; the client does not recompute
//! any of the server's arithmetic.

use serde::{Deserialize, Serialize};

use crate::class_session::{ClassGroup, Subject};

/// Aggregate counters over the reporting window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default)]
    pub total_classes: i64,
    #[serde(default)]
    pub total_overtime_minutes: i64,
    #[serde(default)]
    pub total_short_time_minutes: i64,
    #[serde(default)]
    pub total_time_spent_minutes: i64,
}

/// The scheduled slot a report entry refers back to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSlot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub class_info: Option<ClassGroup>,
}

/// One attended (or missed) class in the report window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub in_time: Option<String>,
    #[serde(default)]
    pub out_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Minutes between the punches, computed server-side.
    #[serde(default)]
    pub time_spent: Option<i64>,
    #[serde(default)]
    pub late_reason: Option<String>,
    #[serde(default)]
    pub early_reason: Option<String>,
    #[serde(default)]
    pub absent_reason: Option<String>,
    #[serde(default)]
    pub punch_in_photo: Option<String>,
    #[serde(default)]
    pub punch_out_photo: Option<String>,
    #[serde(default)]
    pub class_info: Option<ClassGroup>,
    #[serde(default)]
    pub time_slot: Option<ReportSlot>,
}

/// The full report payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    #[serde(default)]
    pub data: Vec<ReportEntry>,
    #[serde(default)]
    pub summary: ReportSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_report_payload() {
        let json = r#"{
            "data": [{
                "date": "2025-03-10",
                "in_time": "09:02",
                "out_time": "09:58",
                "status": "Completed",
                "time_spent": 56,
                "late_reason": "",
                "class_info": { "id": "3", "name": "Grade 12", "section": "B" },
                "time_slot": {
                    "id": "42",
                    "start_time": "09:00:00",
                    "end_time": "10:00:00",
                    "subject": { "id": "7", "name": "Physics" }
                }
            }],
            "summary": {
                "total_classes": 1,
                "total_overtime_minutes": 0,
                "total_short_time_minutes": 4,
                "total_time_spent_minutes": 56
            }
        }"#;
        let parsed: AttendanceReport = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].time_spent, Some(56));
        let slot = parsed.data[0].time_slot.as_ref().unwrap();
        assert_eq!(slot.subject.as_ref().unwrap().name, "Physics");
        assert_eq!(parsed.summary.total_time_spent_minutes, 56);
    }

    /// Summary counters default to zero when the window is empty.
    #[test]
    fn test_empty_report_defaults() {
        let parsed: AttendanceReport = serde_json::from_str(r#"{ "data": [] }"#).unwrap();
        assert_eq!(parsed.summary.total_classes, 0);
        assert!(parsed.data.is_empty());
    }
}
