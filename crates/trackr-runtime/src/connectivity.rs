//! Connectivity reporting
//!
//! The platform's connectivity service calls back with interface state
//! changes; this handle turns those callbacks into node events.

use tokio::sync::mpsc;

use crate::event::TrackerEvent;

/// Sender-side adapter for connectivity state changes
#[derive(Clone)]
pub struct ConnectivityHandle {
    events: mpsc::Sender<TrackerEvent>,
}

impl ConnectivityHandle {
    pub fn new(events: mpsc::Sender<TrackerEvent>) -> Self {
        ConnectivityHandle { events }
    }

    /// Report one interface state change to the node
    pub async fn notify(&self, interface: &str, connected: bool) {
        let event = TrackerEvent::ConnectivityChanged {
            interface: interface.to_string(),
            connected,
        };
        if self.events.send(event).await.is_err() {
            tracing::debug!("node gone; dropping connectivity report for {}", interface);
        }
    }
}
