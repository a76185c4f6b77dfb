//! Token acquisition. Only the token goes to stdout so the output can be
//! captured straight into `API_TOKEN`.

use anyhow::{Context, Result};

use client::{HttpScheduleSource, ScheduleSource};

pub async fn run(username: &str) -> Result<()> {
    let password = rpassword::prompt_password("Password: ").context("reading password")?;
    let source = HttpScheduleSource::from_config()?;
    let token = source.login(username, &password).await?;
    println!("{token}");
    eprintln!("Set API_TOKEN to this value to use authenticated commands.");
    Ok(())
}
