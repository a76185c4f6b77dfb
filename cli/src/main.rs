use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use client::{PunchDirection, ReportFilter};
use common::config;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "rollcall",
    version,
    about = "Teacher attendance client: schedules, punches and reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a day's schedule with status and punch availability
    Schedule {
        /// Day to show, YYYY-MM-DD. Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Follow today's schedule live: elapsed readout and end-of-class warnings
    Watch,
    /// Record a punch with photo evidence
    Punch {
        /// Punch direction
        #[arg(long, value_enum)]
        direction: DirectionArg,
        /// Session id to punch against
        #[arg(long = "class")]
        class_id: String,
        /// JPEG photo captured at the punch
        #[arg(long)]
        photo: PathBuf,
        /// Late/early reason, skips the interactive prompt on rejection
        #[arg(long)]
        reason: Option<String>,
    },
    /// Print an attendance report summary
    Report {
        #[arg(long, value_enum, default_value_t = FilterArg::Today)]
        filter: FilterArg,
        /// Range start for --filter custom, YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Range end for --filter custom, YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Obtain an access token (password prompted on stdin)
    Login {
        #[arg(long)]
        username: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DirectionArg {
    In,
    Out,
}

impl From<DirectionArg> for PunchDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::In => PunchDirection::In,
            DirectionArg::Out => PunchDirection::Out,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterArg {
    Today,
    ThisWeek,
    ThisMonth,
    Custom,
}

impl From<FilterArg> for ReportFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::Today => ReportFilter::Today,
            FilterArg::ThisWeek => ReportFilter::ThisWeek,
            FilterArg::ThisMonth => ReportFilter::ThisMonth,
            FilterArg::Custom => ReportFilter::Custom,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration and initialize logging
    let _log_guard = common::logger::init_logging(&config::log_file(), &config::log_level());

    let cli = Cli::parse();
    match cli.command {
        Command::Schedule { date } => commands::schedule::run(date).await,
        Command::Watch => commands::watch::run().await,
        Command::Punch {
            direction,
            class_id,
            photo,
            reason,
        } => commands::punch::run(direction.into(), &class_id, photo, reason).await,
        Command::Report { filter, start, end } => {
            commands::report::run(filter.into(), start, end).await
        }
        Command::Login { username } => commands::login::run(&username).await,
    }
}
