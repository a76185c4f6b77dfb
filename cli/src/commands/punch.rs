//! Punch submission with the reason-retry flow: the first write goes up
//! bare; a structured late/early rejection prompts for a reason and retries
//! once with it attached.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;

use client::{
    HttpScheduleSource, PunchDirection, PunchOutcome, PunchReason, PunchRequest, ScheduleSource,
};

pub async fn run(
    direction: PunchDirection,
    class_id: &str,
    photo: PathBuf,
    reason: Option<String>,
) -> Result<()> {
    let source = HttpScheduleSource::from_config()?;
    let now = Local::now().time();
    let mut request = PunchRequest {
        direction,
        time: now,
        photo_path: photo,
        reason: None,
    };

    match source.record_punch(class_id, &request).await? {
        PunchOutcome::Accepted => {
            println!("Punch {direction} recorded at {}.", now.format("%H:%M"));
            Ok(())
        }
        PunchOutcome::ReasonRequired { late, early } => {
            let text = match reason {
                Some(text) => text,
                None => prompt_reason(reason_title(direction, late, early))?,
            };
            if text.trim().is_empty() {
                bail!("a reason is required; punch not recorded");
            }
            request.reason = Some(if late {
                PunchReason::Late(text)
            } else {
                PunchReason::Early(text)
            });

            match source.record_punch(class_id, &request).await? {
                PunchOutcome::Accepted => {
                    println!(
                        "Punch {direction} recorded at {} with reason attached.",
                        now.format("%H:%M")
                    );
                    Ok(())
                }
                PunchOutcome::ReasonRequired { .. } => {
                    bail!("backend still requires a reason; punch not recorded")
                }
            }
        }
    }
}

fn reason_title(direction: PunchDirection, late: bool, early: bool) -> &'static str {
    match (direction, late, early) {
        (PunchDirection::In, true, _) => "Reason for arriving late",
        (PunchDirection::Out, _, true) => "Reason for leaving early",
        (PunchDirection::Out, true, _) => "Reason for staying late",
        _ => "Reason",
    }
}

fn prompt_reason(title: &str) -> Result<String> {
    print!("{title}: ");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("reading reason from stdin")?;
    Ok(line.trim().to_string())
}
