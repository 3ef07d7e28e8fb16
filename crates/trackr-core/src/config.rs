//! Tracker configuration
//!
//! All values are fixed at startup. The defaults match the deployed
//! configuration; the daemon may override them from the environment before
//! the node starts.

use std::time::Duration;

use crate::error::{TrackerError, TrackerResult};
use crate::id::TrackerId;

/// Collection endpoint samples are POSTed to
pub const DEFAULT_ENDPOINT: &str = "http://api.animaltrackr.com/animal/points";

/// Identity assigned to this device at provisioning time
pub const DEFAULT_TRACKER_ID: &str = "bc6bf7b3-708d-4ba0-b356-1b6337ba7a4c";

/// Tracker configuration
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    /// Interval between position samples
    pub sample_interval: Duration,
    /// Advisory window for one publish attempt
    pub publish_timeout: Duration,
    /// Destination URL for rendered samples
    pub endpoint: String,
    /// Device identity reported with every sample
    pub tracker_id: TrackerId,
    /// Event channel capacity for the node loop
    pub event_buffer: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            sample_interval: Duration::from_secs(10),
            publish_timeout: Duration::from_secs(60),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            tracker_id: TrackerId::new(DEFAULT_TRACKER_ID),
            event_buffer: 64,
        }
    }
}

impl TrackerConfig {
    /// Check that the configuration can actually drive a tracker
    pub fn validate(&self) -> TrackerResult<()> {
        if self.sample_interval.is_zero() {
            return Err(TrackerError::InvalidConfig(
                "sample interval must be nonzero".to_string(),
            ));
        }
        if self.publish_timeout.is_zero() {
            return Err(TrackerError::InvalidConfig(
                "publish timeout must be nonzero".to_string(),
            ));
        }
        if self.endpoint.is_empty() {
            return Err(TrackerError::InvalidConfig(
                "endpoint must not be empty".to_string(),
            ));
        }
        if self.tracker_id.is_empty() {
            return Err(TrackerError::InvalidConfig(
                "tracker id must not be empty".to_string(),
            ));
        }
        if self.event_buffer == 0 {
            return Err(TrackerError::InvalidConfig(
                "event buffer must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}
