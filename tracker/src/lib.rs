//! # Tracker Library
//!
//! The attendance session tracker: watches refreshed schedule lists for the
//! class currently being attended, keeps a once-per-second elapsed-time
//! readout running while one is, and raises a one-shot warning when the
//! class is close to its scheduled end.
//!
//! ## Key Concepts
//! - **Active session**: the first session in list order with a punch-in and
//!   no punch-out. At most one is tracked.
//! - **Tick**: once per second the readout is recomputed from the punch-in
//!   seed and emitted as an event; the display value survives refreshes of
//!   the same session, so the timer never visibly restarts.
//! - **End-of-class warning**: fired at most once per active session when
//!   ten minutes or less remain to the scheduled end.
//!
//! The tracker owns no I/O. Callers fetch schedules however they like and
//! feed them in through [`SessionTracker::on_schedule_refreshed`].

mod state;
mod ticker;

use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use domain::ClassSession;
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    oneshot,
};
use tracing::info;

pub use state::END_WARNING_LEAD_MINUTES;
pub use ticker::TICK_INTERVAL;

use state::{RefreshEffect, TrackerState};

/// Events pushed to the UI layer over the tracker's channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// Fresh elapsed readout, once per second while a session is active.
    Tick { session_id: String, elapsed: String },
    /// The active session is within [`END_WARNING_LEAD_MINUTES`] of its
    /// scheduled end. At most one per active session.
    EndOfClassWarning {
        session_id: String,
        subject: String,
        class_label: String,
    },
}

/// Tracks the class currently being attended across schedule refreshes.
///
/// State lives behind an `Arc<Mutex<_>>` shared with the tick task, so a
/// refresh applies atomically with respect to ticks. The tick task is
/// started and cancelled here; at most one runs per tracker.
pub struct SessionTracker {
    state: Arc<Mutex<TrackerState>>,
    events: UnboundedSender<TrackerEvent>,
    ticker_stop: Option<oneshot::Sender<()>>,
}

impl SessionTracker {
    /// Creates a tracker and the receiving end of its event channel.
    pub fn new() -> (Self, UnboundedReceiver<TrackerEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let tracker = Self {
            state: Arc::new(Mutex::new(TrackerState::new())),
            events,
            ticker_stop: None,
        };
        (tracker, rx)
    }

    /// Applies a freshly fetched schedule list and adjusts the tick task.
    ///
    /// The first session with a punch-in and no punch-out becomes (or stays)
    /// active; none found stops the readout and resets it to `00:00:00`.
    /// Malformed sessions degrade to "not ongoing"; this never fails.
    pub fn on_schedule_refreshed(&mut self, sessions: &[ClassSession]) {
        let effect = self
            .state
            .lock()
            .expect("tracker state lock poisoned")
            .apply_refresh(sessions);

        match effect {
            RefreshEffect::Installed => {
                if let Some(session) = self.active_session() {
                    info!(
                        "tracking session {} ({} {})",
                        session.id,
                        session.subject.name,
                        session.class_label()
                    );
                }
                self.restart_ticker();
            }
            RefreshEffect::Unchanged => self.start_ticker(),
            RefreshEffect::Cleared => {
                info!("active session ended, stopping readout");
                self.stop_ticker();
            }
            RefreshEffect::Idle => {}
        }
    }

    /// Snapshot of the session currently being attended, if any.
    pub fn active_session(&self) -> Option<ClassSession> {
        self.state
            .lock()
            .expect("tracker state lock poisoned")
            .active
            .clone()
    }

    /// Last formatted elapsed readout, `00:00:00` when idle.
    pub fn elapsed_time(&self) -> String {
        self.state
            .lock()
            .expect("tracker state lock poisoned")
            .elapsed
            .clone()
    }

    /// True when the teacher may punch into `session` at `now`: no punch-in
    /// recorded yet, `now` inside the scheduled window, and no other session
    /// currently being attended.
    pub fn is_punch_in_allowed(&self, session: &ClassSession, now: NaiveDateTime) -> bool {
        session.accepts_punch_in(now) && self.active_session().is_none()
    }

    /// True when the teacher may punch out of `session`: punch-in recorded,
    /// punch-out not yet.
    pub fn is_punch_out_allowed(&self, session: &ClassSession) -> bool {
        session.is_punch_out_allowed()
    }

    /// Cancels the tick task. Idempotent; also runs on drop.
    pub fn stop(&mut self) {
        self.stop_ticker();
    }

    fn start_ticker(&mut self) {
        if self.ticker_stop.is_some() {
            return;
        }
        self.ticker_stop = Some(ticker::spawn(self.state.clone(), self.events.clone()));
    }

    fn restart_ticker(&mut self) {
        self.stop_ticker();
        self.start_ticker();
    }

    fn stop_ticker(&mut self) {
        if let Some(stop) = self.ticker_stop.take() {
            let _ = stop.send(());
        }
    }
}

impl Drop for SessionTracker {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{AttendanceLog, ClassGroup, Subject};
    use tokio::sync::mpsc::error::TryRecvError;

    fn open_session(id: &str, start: &str, end: &str, punch_in: &str) -> ClassSession {
        ClassSession {
            id: id.to_string(),
            subject: Subject {
                id: "10".to_string(),
                name: "Mathematics".to_string(),
            },
            class_info: ClassGroup {
                id: "20".to_string(),
                name: "Grade 10".to_string(),
                section: "A".to_string(),
            },
            day: None,
            date: None,
            start_time: start.to_string(),
            end_time: end.to_string(),
            status: None,
            logs: Some(AttendanceLog {
                last_punch_in_time: Some(punch_in.to_string()),
                ..Default::default()
            }),
            is_early: false,
            is_late: false,
        }
    }

    fn drain(rx: &mut UnboundedReceiver<TrackerEvent>) -> Vec<TrackerEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_emits_elapsed_updates() {
        let (mut tracker, mut rx) = SessionTracker::new();
        tracker.on_schedule_refreshed(&[open_session("2", "00:00:00", "23:59:59", "00:00")]);

        tokio::time::sleep(TICK_INTERVAL * 3).await;

        let ticks = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, TrackerEvent::Tick { .. }))
            .count();
        assert!(ticks >= 2, "expected repeated ticks, got {ticks}");
        assert_ne!(tracker.elapsed_time(), "");
        tracker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_refresh_stops_ticker_and_resets() {
        let (mut tracker, mut rx) = SessionTracker::new();
        tracker.on_schedule_refreshed(&[open_session("2", "00:00:00", "23:59:59", "00:00")]);
        tokio::time::sleep(TICK_INTERVAL * 2).await;
        assert!(tracker.active_session().is_some());

        tracker.on_schedule_refreshed(&[]);
        assert!(tracker.active_session().is_none());
        assert_eq!(tracker.elapsed_time(), "00:00:00");

        // Let any in-flight tick land, then the channel must stay quiet.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        drain(&mut rx);
        tokio::time::sleep(TICK_INTERVAL * 5).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_ticker() {
        let (mut tracker, mut rx) = SessionTracker::new();
        tracker.on_schedule_refreshed(&[open_session("2", "00:00:00", "23:59:59", "00:00")]);
        tracker.stop();

        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        drain(&mut rx);
        tokio::time::sleep(TICK_INTERVAL * 5).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    /// Punching in is barred while another session is being attended.
    #[tokio::test]
    async fn test_punch_in_blocked_while_another_session_active() {
        let (mut tracker, _rx) = SessionTracker::new();
        tracker.on_schedule_refreshed(&[open_session("2", "09:00:00", "10:00:00", "09:02")]);

        let mut next = open_session("3", "09:00:00", "10:00:00", "");
        next.logs = None;
        let now = chrono::NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert!(next.accepts_punch_in(now));
        assert!(!tracker.is_punch_in_allowed(&next, now));

        tracker.on_schedule_refreshed(&[]);
        assert!(tracker.is_punch_in_allowed(&next, now));
        tracker.stop();
    }

    #[tokio::test]
    async fn test_punch_out_follows_open_log() {
        let (tracker, _rx) = SessionTracker::new();
        let open = open_session("2", "09:00:00", "10:00:00", "09:02");
        assert!(tracker.is_punch_out_allowed(&open));

        let mut closed = open;
        closed.logs.as_mut().unwrap().last_punch_out_time = Some("09:58".to_string());
        assert!(!tracker.is_punch_out_allowed(&closed));
    }
}
