pub mod login;
pub mod punch;
pub mod report;
pub mod schedule;
pub mod watch;
