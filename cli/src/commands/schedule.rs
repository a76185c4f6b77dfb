//! Day-schedule view: the terminal rendition of the home screen list.

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};

use client::{HttpScheduleSource, ScheduleSource};
use domain::{ClassSession, DaySchedule, Punctuality};
use tracker::SessionTracker;

pub async fn run(date: Option<NaiveDate>) -> Result<()> {
    let source = HttpScheduleSource::from_config()?;
    let day = match date {
        Some(date) => source.for_date(date).await?,
        None => source.today().await?,
    };
    render(&day, Local::now().naive_local());
    Ok(())
}

fn render(day: &DaySchedule, now: NaiveDateTime) {
    let teacher = day.teacher.full_name();
    if !teacher.is_empty() {
        println!("{} - {}", teacher, day.teacher.school.name);
    }
    if let Some(slot) = &day.slot_type {
        println!("Schedule for {slot}");
    }
    if day.is_empty() {
        println!("No classes scheduled.");
        return;
    }

    let (mut tracker, _events) = SessionTracker::new();
    tracker.on_schedule_refreshed(&day.data);
    if let Some(active) = tracker.active_session() {
        println!(
            "Attending {} - {}",
            active.subject.name,
            active.class_label()
        );
    }
    println!();

    for session in &day.data {
        let status = session.status_at(now);
        let mut markers = punch_markers(session);
        if tracker.is_punch_in_allowed(session, now) {
            markers.push("punch-in open".to_string());
        }
        if tracker.is_punch_out_allowed(session) {
            markers.push("punch-out open".to_string());
        }
        let marker_text = if markers.is_empty() {
            String::new()
        } else {
            format!("  ({})", markers.join(", "))
        };
        println!(
            "{} - {}  {} {}  [{}]{}",
            session.start_time,
            session.end_time,
            session.subject.name,
            session.class_label(),
            status,
            marker_text
        );
    }
}

/// Late/early markers for recorded punches, derived from the punch times
/// when they parse and falling back to the server's display flags when they
/// do not.
fn punch_markers(session: &ClassSession) -> Vec<String> {
    let mut markers = Vec::new();
    match session
        .punch_in_time()
        .and_then(|at| session.punch_in_punctuality(at))
    {
        Some(Punctuality::Late(by)) => markers.push(format!("in {} min late", by.num_minutes())),
        None if session.is_late => markers.push("late in".to_string()),
        _ => {}
    }
    match session
        .punch_out_time()
        .and_then(|at| session.punch_out_punctuality(at))
    {
        Some(Punctuality::Early(by)) => markers.push(format!("out {} min early", by.num_minutes())),
        Some(Punctuality::Late(by)) => markers.push(format!("out {} min late", by.num_minutes())),
        None if session.is_early => markers.push("early out".to_string()),
        _ => {}
    }
    markers
}
