//! trackrd - the tracker daemon
//!
//! Wires the receiver, the HTTP publisher, and the node loop together.
//! Configuration comes from the environment; the defaults match the
//! deployed tracker. Without GNSS hardware the simulated receiver stands
//! in, and the data link is reported up once at startup.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use trackr_core::{TrackerConfig, TrackerError, TrackerId, TrackerResult};
use trackr_gnss::SimulatedPositioning;
use trackr_publish::HttpPublisher;
use trackr_runtime::{ConnectivityHandle, TrackerEvent, TrackerNode};

/// Location queries the simulated receiver answers out-of-range before it
/// locks, standing in for time to first fix
const SIM_COLD_READS: u32 = 3;

fn env_duration_secs(name: &str) -> TrackerResult<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw.parse().map_err(|_| {
                TrackerError::InvalidConfig(format!("{} must be a whole number of seconds", name))
            })?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}

fn config_from_env() -> TrackerResult<TrackerConfig> {
    let mut config = TrackerConfig::default();

    if let Ok(endpoint) = std::env::var("TRACKR_ENDPOINT") {
        config.endpoint = endpoint;
    }
    if let Ok(id) = std::env::var("TRACKR_ID") {
        config.tracker_id = TrackerId::new(id);
    }
    if let Some(interval) = env_duration_secs("TRACKR_SAMPLE_INTERVAL_SECS")? {
        config.sample_interval = interval;
    }
    if let Some(timeout) = env_duration_secs("TRACKR_PUBLISH_TIMEOUT_SECS")? {
        config.publish_timeout = timeout;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config_from_env()?;
    tracing::info!(
        "tracker {} publishing to {} every {:?}",
        config.tracker_id,
        config.endpoint,
        config.sample_interval
    );

    let positioning = SimulatedPositioning::new().cold_start(SIM_COLD_READS);
    let publisher = HttpPublisher::from_config(&config)?;
    let (node, events) = TrackerNode::new(&config, positioning, publisher)?;

    // Stand-in for the platform data-connection service: request the link
    // and report it up once granted.
    let connectivity = ConnectivityHandle::new(events.clone());
    tokio::spawn(async move {
        connectivity.notify("rmnet0", true).await;
    });

    // Ctrl-C becomes a clean shutdown event
    let shutdown = events.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown.send(TrackerEvent::Shutdown).await;
        }
    });
    drop(events);

    let stats = node.run().await?;
    tracing::info!(
        "stopped after {} ticks: {} published, {} rejected, {} transport errors, {} without fix",
        stats.ticks,
        stats.published,
        stats.rejected,
        stats.transport_errors,
        stats.fixes_unavailable
    );
    Ok(())
}
