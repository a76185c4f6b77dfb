//! # Ticker Module
//!
//! The spawned tick task: once per second it advances the shared state and
//! forwards the outcome on the event channel. Cancellation goes through a
//! oneshot handle so stopping is deterministic; the task also exits on its
//! own when the state reports nothing active.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;
use tokio::sync::{mpsc::UnboundedSender, oneshot};
use tracing::debug;

use crate::TrackerEvent;
use crate::state::TrackerState;

/// Cadence of the elapsed-time readout.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns the tick task and returns its stop handle.
pub(crate) fn spawn(
    state: Arc<Mutex<TrackerState>>,
    events: UnboundedSender<TrackerEvent>,
) -> oneshot::Sender<()> {
    let (stop_tx, mut stop_rx) = oneshot::channel();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = &mut stop_rx => {
                    debug!("tick task stopped");
                    break;
                }
                _ = tokio::time::sleep(TICK_INTERVAL) => {
                    let outcome = state
                        .lock()
                        .expect("tracker state lock poisoned")
                        .tick(Local::now().naive_local());
                    let Some(tick) = outcome else {
                        debug!("no active session, tick task exiting");
                        break;
                    };
                    let _ = events.send(TrackerEvent::Tick {
                        session_id: tick.session_id.clone(),
                        elapsed: tick.elapsed,
                    });
                    if let Some(warning) = tick.end_warning {
                        let _ = events.send(TrackerEvent::EndOfClassWarning {
                            session_id: tick.session_id,
                            subject: warning.subject,
                            class_label: warning.class_label,
                        });
                    }
                }
            }
        }
    });
    stop_tx
}
