//! Attendance report fetch and terminal rendering. All arithmetic shown here
//! comes from the backend; the client only formats it.

use anyhow::{Result, bail};
use chrono::NaiveDate;

use client::{HttpScheduleSource, ReportFilter, ReportQuery, ScheduleSource};
use domain::{AttendanceReport, ReportEntry};

pub async fn run(
    filter: ReportFilter,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    let query = if filter == ReportFilter::Custom {
        let (Some(start), Some(end)) = (start, end) else {
            bail!("--filter custom requires --start and --end");
        };
        ReportQuery::custom(start, end)
    } else {
        ReportQuery::preset(filter)
    };

    let source = HttpScheduleSource::from_config()?;
    let report = source.report(&query).await?;
    render(&report);
    Ok(())
}

fn render(report: &AttendanceReport) {
    let summary = &report.summary;
    println!("Classes:          {}", summary.total_classes);
    println!("Time spent (min): {}", summary.total_time_spent_minutes);
    println!("Overtime (min):   {}", summary.total_overtime_minutes);
    println!("Short time (min): {}", summary.total_short_time_minutes);
    println!();

    if report.data.is_empty() {
        println!("No classes in this window.");
        return;
    }

    for entry in &report.data {
        println!("{}", entry_line(entry));
        for reason in entry_reasons(entry) {
            println!("    {reason}");
        }
    }
}

fn entry_line(entry: &ReportEntry) -> String {
    let date = entry.date.as_deref().unwrap_or("----------");
    let subject = entry
        .time_slot
        .as_ref()
        .and_then(|slot| slot.subject.as_ref())
        .map(|subject| subject.name.as_str())
        .unwrap_or("(unknown subject)");
    let label = entry
        .class_info
        .as_ref()
        .map(|group| format!("{}{}", group.name, group.section))
        .unwrap_or_default();
    let status = entry.status.as_deref().unwrap_or("Unknown");

    let mut line = format!(
        "{date}  {subject} {label}  {} - {}",
        display_time(entry.in_time.as_deref()),
        display_time(entry.out_time.as_deref()),
    );
    if let Some(minutes) = entry.time_spent {
        line.push_str(&format!("  ({minutes} min)"));
    }
    line.push_str(&format!("  [{status}]"));
    line
}

fn entry_reasons(entry: &ReportEntry) -> Vec<String> {
    let mut reasons = Vec::new();
    if let Some(reason) = non_empty(&entry.late_reason) {
        reasons.push(format!("late: {reason}"));
    }
    if let Some(reason) = non_empty(&entry.early_reason) {
        reasons.push(format!("early: {reason}"));
    }
    if let Some(reason) = non_empty(&entry.absent_reason) {
        reasons.push(format!("absent: {reason}"));
    }
    reasons
}

/// The backend sends empty strings where a punch never happened.
fn display_time(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "--:--",
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ClassGroup, ReportSlot, Subject};

    fn entry() -> ReportEntry {
        ReportEntry {
            date: Some("2025-03-10".to_string()),
            in_time: Some("09:02".to_string()),
            out_time: Some("09:58".to_string()),
            status: Some("Completed".to_string()),
            time_spent: Some(56),
            class_info: Some(ClassGroup {
                id: "3".to_string(),
                name: "Grade 12".to_string(),
                section: "B".to_string(),
            }),
            time_slot: Some(ReportSlot {
                subject: Some(Subject {
                    id: "7".to_string(),
                    name: "Physics".to_string(),
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_entry_line_formats_attended_class() {
        let line = entry_line(&entry());
        assert_eq!(
            line,
            "2025-03-10  Physics Grade 12B  09:02 - 09:58  (56 min)  [Completed]"
        );
    }

    /// Empty punch strings render as placeholders, not as blanks.
    #[test]
    fn test_entry_line_placeholders_for_missing_punches() {
        let mut e = entry();
        e.in_time = Some(String::new());
        e.out_time = None;
        e.time_spent = None;
        let line = entry_line(&e);
        assert!(line.contains("--:-- - --:--"));
        assert!(!line.contains("min"));
    }

    #[test]
    fn test_entry_reasons_skips_empty_strings() {
        let mut e = entry();
        e.late_reason = Some("traffic".to_string());
        e.early_reason = Some("  ".to_string());
        e.absent_reason = None;
        assert_eq!(entry_reasons(&e), vec!["late: traffic".to_string()]);
    }
}
