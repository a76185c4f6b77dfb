//! Live watch mode: periodic schedule refreshes feed the tracker, whose
//! events drive the terminal readout until Ctrl-C.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use client::{HttpScheduleSource, ScheduleSource};
use common::config;
use tracker::{SessionTracker, TrackerEvent};

pub async fn run() -> Result<()> {
    let source = HttpScheduleSource::from_config()?;
    let refresh_every = Duration::from_secs(config::refresh_seconds().max(1));
    let (mut tracker, mut events) = SessionTracker::new();

    println!("Watching today's schedule (refresh every {}s, Ctrl-C to stop)", refresh_every.as_secs());

    // First tick fires immediately, so the initial fetch happens in-loop.
    let mut refreshes = tokio::time::interval(refresh_every);

    loop {
        tokio::select! {
            _ = refreshes.tick() => {
                match source.today().await {
                    Ok(day) => {
                        debug!("schedule refreshed, {} sessions", day.data.len());
                        tracker.on_schedule_refreshed(&day.data);
                        if tracker.active_session().is_none() {
                            print!("\rNo class in progress.          ");
                            std::io::stdout().flush().ok();
                        }
                    }
                    // Keep the previous state on a failed refresh.
                    Err(err) => warn!("schedule refresh failed: {err}"),
                }
            }
            event = events.recv() => {
                let Some(event) = event else { continue };
                match event {
                    TrackerEvent::Tick { elapsed, .. } => {
                        if let Some(active) = tracker.active_session() {
                            print!(
                                "\r[{}] {} - {}          ",
                                elapsed,
                                active.subject.name,
                                active.class_label()
                            );
                            std::io::stdout().flush().ok();
                        }
                    }
                    TrackerEvent::EndOfClassWarning { subject, class_label, .. } => {
                        println!();
                        println!("Heads up: {subject} ({class_label}) ends in 10 minutes or less.");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracker.stop();
                println!();
                println!("Stopped.");
                break;
            }
        }
    }

    Ok(())
}
