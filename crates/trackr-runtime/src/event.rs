//! Node event definitions

/// Events consumed by the tracker node
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The sampling interval elapsed
    TickFired,
    /// The platform reported a network state change
    ConnectivityChanged { interface: String, connected: bool },
    /// Stop the node loop
    Shutdown,
}
