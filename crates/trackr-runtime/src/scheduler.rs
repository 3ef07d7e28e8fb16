//! Sampling scheduler
//!
//! Periodic timer feeding `TickFired` into the node channel. The node
//! stops it on connectivity loss and restarts it on recovery; while
//! stopped, no ticks are produced at all.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::event::TrackerEvent;

/// Periodic tick source for the node loop
pub struct SampleScheduler {
    interval: Duration,
    events: mpsc::Sender<TrackerEvent>,
    task: Option<JoinHandle<()>>,
}

impl SampleScheduler {
    pub fn new(interval: Duration, events: mpsc::Sender<TrackerEvent>) -> Self {
        SampleScheduler {
            interval,
            events,
            task: None,
        }
    }

    /// Start (or restart) ticking
    ///
    /// The first tick lands one full interval from now; reconnection
    /// already triggers an immediate out-of-band cycle, so an immediate
    /// first tick would double-sample.
    pub fn start(&mut self) {
        self.stop();

        let events = self.events.clone();
        let period = self.interval;
        self.task = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                if events.send(TrackerEvent::TickFired).await.is_err() {
                    break; // Node dropped
                }
            }
        }));
    }

    /// Stop ticking until the next `start`
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SampleScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
